//! Fixed choice lists for the search form: business types and countries.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub business_types: Vec<String>,
    pub countries: Vec<String>,
}

impl Catalog {
    /// Case-insensitive lookup of a business type, returning the catalog spelling.
    #[must_use]
    pub fn find_business_type(&self, name: &str) -> Option<&str> {
        find_ignore_case(&self.business_types, name)
    }

    #[must_use]
    pub fn find_country(&self, name: &str) -> Option<&str> {
        find_ignore_case(&self.countries, name)
    }
}

fn find_ignore_case<'a>(list: &'a [String], name: &str) -> Option<&'a str> {
    let needle = name.trim().to_lowercase();
    list.iter()
        .find(|entry| entry.to_lowercase() == needle)
        .map(String::as_str)
}

/// Load and validate the catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: Catalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;

    tracing::debug!(
        business_types = catalog.business_types.len(),
        countries = catalog.countries.len(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    validate_list("business_types", &catalog.business_types)?;
    validate_list("countries", &catalog.countries)
}

fn validate_list(field: &str, entries: &[String]) -> Result<(), ConfigError> {
    if entries.is_empty() {
        return Err(ConfigError::Validation(format!("{field} must not be empty")));
    }

    let mut seen = HashSet::new();
    for entry in entries {
        if entry.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{field} contains a blank entry"
            )));
        }
        if !seen.insert(entry.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate entry in {field}: '{entry}'"
            )));
        }
    }

    Ok(())
}
