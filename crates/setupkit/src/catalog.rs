//! Task catalog - the read-only table of all known tasks

use crate::error::CatalogError;
use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named group of tasks, for display only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Category {
    pub fn new(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            name: name.into(),
            tasks,
        }
    }
}

/// Validated, ordered collection of categories
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
    #[serde(skip)]
    index: HashMap<String, (usize, usize)>,
}

impl Catalog {
    /// Build a catalog, checking that ids are present, numeric and unique
    pub fn new(categories: Vec<Category>) -> Result<Self, CatalogError> {
        let mut index: HashMap<String, (usize, usize)> = HashMap::new();

        for (ci, category) in categories.iter().enumerate() {
            for (ti, task) in category.tasks.iter().enumerate() {
                if task.id.trim().is_empty() {
                    return Err(CatalogError::EmptyId(task.description.clone()));
                }
                // Must round-trip so selections ("7") resolve back to the id
                if task.number().is_none_or(|n| n.to_string() != task.id) {
                    return Err(CatalogError::NonNumericId(task.id.clone()));
                }
                if let Some(&(pc, pt)) = index.get(&task.id) {
                    let first: &Task = &categories[pc].tasks[pt];
                    return Err(CatalogError::DuplicateId {
                        id: task.id.clone(),
                        first: first.description.clone(),
                        second: task.description.clone(),
                    });
                }
                index.insert(task.id.clone(), (ci, ti));
            }
        }

        Ok(Self { categories, index })
    }

    /// Append more categories (e.g. from a config file) and re-validate
    pub fn merge(self, extra: Vec<Category>) -> Result<Self, CatalogError> {
        let mut categories = self.categories;
        categories.extend(extra);
        Self::new(categories)
    }

    /// Drop the given ids from the table
    pub fn without(self, ids: &[String]) -> Result<Self, CatalogError> {
        let categories = self
            .categories
            .into_iter()
            .map(|mut c| {
                c.tasks.retain(|t| !ids.contains(&t.id));
                c
            })
            .filter(|c| !c.tasks.is_empty())
            .collect();
        Self::new(categories)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.index
            .get(id)
            .map(|&(c, t)| &self.categories[c].tasks[t])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Every task, in display order
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.categories.iter().flat_map(|c| c.tasks.iter())
    }

    /// All ids in ascending numeric order
    pub fn ids(&self) -> Vec<String> {
        let mut tasks: Vec<&Task> = self.tasks().collect();
        tasks.sort_by_key(|t| t.number());
        tasks.into_iter().map(|t| t.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
