use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use setupkit::{Catalog, Category, TaskKind};
use std::fs;
use std::path::{Path, PathBuf};

use crate::tasks;

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("fedora-setup"))
}

/// Default location of the config file
pub fn default_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

// ============================================================================
// Config Schema
// ============================================================================

/// Optional user configuration
///
/// ```toml
/// [settings]
/// assume_yes = false
/// disabled = ["6"]
///
/// [[categories]]
/// name = "6. Extras"
///
/// [[categories.tasks]]
/// id = "20"
/// description = "Install fish shell"
/// kind = "packages"
/// packages = ["fish"]
/// steps = [{ argv = ["dnf", "install", "-y", "fish"] }]
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    /// Extra tasks, appended after the built-in categories
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Confirm the system upgrade without asking
    #[serde(default)]
    pub assume_yes: bool,

    /// Never apply anything, only check
    #[serde(default)]
    pub dry_run: bool,

    /// Built-in task ids to hide
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl Config {
    /// Load the config file
    ///
    /// An explicit path must exist. The default path is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let (path, required) = match explicit {
            Some(p) => (p.to_path_buf(), true),
            None => (default_config_path()?, false),
        };

        if !path.exists() {
            if required {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            log::debug!("no config at {}, using built-in tasks only", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let mut config = Self::parse(&content)
            .with_context(|| format!("Invalid config format in {}", path.display()))?;
        config.expand_paths();
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Expand `~` and `$VAR` in file paths of user tasks
    fn expand_paths(&mut self) {
        for task in self.categories.iter_mut().flat_map(|c| c.tasks.iter_mut()) {
            if let TaskKind::ConfigLines { path, .. } | TaskKind::FileExists { path, .. } =
                &mut task.kind
            {
                let raw = path.to_string_lossy().to_string();
                match shellexpand::full(&raw) {
                    Ok(expanded) => *path = PathBuf::from(expanded.as_ref()),
                    Err(e) => log::warn!("could not expand {raw}: {e}"),
                }
            }
        }
    }

    /// Built-in tasks minus disabled ones, plus user tasks
    pub fn catalog(&self) -> Result<Catalog> {
        let catalog = Catalog::new(tasks::builtin())
            .context("Built-in task table is invalid")?
            .without(&self.settings.disabled)?
            .merge(self.categories.clone())
            .context("Config tasks conflict with the task table")?;
        Ok(catalog)
    }
}
