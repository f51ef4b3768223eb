//! Task selection parsing
//!
//! Accepts `all`, `q`/`quit`, or a comma-separated list of ids and inclusive
//! ranges such as `1,3,5-8`. Every unknown token is reported at once.

use crate::catalog::Catalog;
use crate::error::SelectionError;
use std::collections::BTreeSet;

/// Ranges wider than this are reported as a single invalid token
const MAX_RANGE_SPAN: u32 = 256;

/// What the operator asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Leave the tool
    Quit,
    /// Task ids, de-duplicated and in ascending numeric order
    Tasks(Vec<String>),
}

/// Parse a selection string against the catalog
pub fn parse_selection(input: &str, catalog: &Catalog) -> Result<Selection, SelectionError> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "q" | "quit" => return Ok(Selection::Quit),
        "all" => return Ok(Selection::Tasks(catalog.ids())),
        _ => {}
    }

    let mut selected = BTreeSet::new();
    let mut invalid = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some((start, end)) = part.split_once('-') {
            match (start.trim().parse::<u32>(), end.trim().parse::<u32>()) {
                (Ok(a), Ok(b)) => {
                    let (lo, hi) = if a > b { (b, a) } else { (a, b) };
                    if hi - lo > MAX_RANGE_SPAN {
                        invalid.push(part.to_string());
                        continue;
                    }
                    for n in lo..=hi {
                        let id = n.to_string();
                        if catalog.contains(&id) {
                            selected.insert(n);
                        } else {
                            invalid.push(id);
                        }
                    }
                }
                _ => invalid.push(part.to_string()),
            }
        } else if part.chars().all(|c| c.is_ascii_digit()) && catalog.contains(part) {
            if let Ok(n) = part.parse::<u32>() {
                selected.insert(n);
            }
        } else {
            invalid.push(part.to_string());
        }
    }

    if !invalid.is_empty() {
        return Err(SelectionError::Invalid(invalid));
    }
    if selected.is_empty() {
        return Err(SelectionError::Empty);
    }

    Ok(Selection::Tasks(
        selected.into_iter().map(|n| n.to_string()).collect(),
    ))
}
