use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::combobox::option::SelectOption;

/// Reads the option catalogue from a YAML file.
///
/// The file holds a sequence of `{ value, label, description? }` mappings.
/// Duplicate values are kept as they are and only logged.
pub fn load_options(path: &Path) -> Result<Vec<SelectOption>> {
    let data = fs::read_to_string(path).with_context(|| {
        format!("Failed to read options file {}", path.display())
    })?;

    let options = parse_options(&data).with_context(|| {
        format!("Failed to parse options file {}", path.display())
    })?;

    debug!(path = %path.display(), count = options.len(), "options loaded");

    Ok(options)
}

pub fn parse_options(data: &str) -> Result<Vec<SelectOption>> {
    // an empty document is an empty catalogue
    if data.trim().is_empty() {
        return Ok(Vec::new());
    }

    let options: Vec<SelectOption> = serde_yaml::from_str(data)?;

    for value in duplicate_values(&options) {
        warn!(value = %value, "duplicate option value");
    }

    Ok(options)
}

/// Returns every value that appears more than once, in order of the first
/// repetition.
pub fn duplicate_values(options: &[SelectOption]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    options
        .iter()
        .map(|option| option.value.as_str())
        .filter(|value| !seen.insert(*value) && reported.insert(*value))
        .collect()
}
