use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One crisis to report on, with the two datasets that describe it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisConfig {
    pub name: String,
    pub media_path: PathBuf,
    pub comments_path: PathBuf,
    pub notes: Option<String>,
}

impl CrisisConfig {
    /// Generate a URL-safe slug from the crisis name.
    #[must_use]
    pub fn slug(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' || c == '_' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }
}

#[derive(Debug, Deserialize)]
pub struct CrisesFile {
    pub crises: Vec<CrisisConfig>,
}

/// Load and validate the crises definitions from a YAML file.
///
/// Relative dataset paths are resolved against the directory that holds the
/// YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_crises(path: &Path) -> Result<CrisesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CrisesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut crises_file: CrisesFile = serde_yaml::from_str(&content)?;

    validate_crises(&crises_file)?;

    if let Some(base) = path.parent() {
        for crisis in &mut crises_file.crises {
            crisis.media_path = resolve_against(base, &crisis.media_path);
            crisis.comments_path = resolve_against(base, &crisis.comments_path);
        }
    }

    Ok(crises_file)
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn validate_crises(crises_file: &CrisesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_slugs = HashSet::new();

    for crisis in &crises_file.crises {
        if crisis.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "crisis name must be non-empty".to_string(),
            ));
        }

        if crisis.media_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!(
                "crisis '{}' has an empty media_path",
                crisis.name
            )));
        }

        if crisis.comments_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!(
                "crisis '{}' has an empty comments_path",
                crisis.name
            )));
        }

        let lower_name = crisis.name.to_lowercase();
        if !seen_names.insert(lower_name) {
            return Err(ConfigError::Validation(format!(
                "duplicate crisis name: '{}'",
                crisis.name
            )));
        }

        let slug = crisis.slug();
        if !seen_slugs.insert(slug.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate crisis slug: '{}' (from crisis '{}')",
                slug, crisis.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "crises_test.rs"]
mod tests;
