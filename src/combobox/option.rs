use std::fmt;

use serde::{Deserialize, Serialize};

/// A single selectable entry of a combobox.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Unique key reported back to the caller on commit.
    pub value: String,
    /// Display text.
    pub label: String,
    /// Secondary display text, also searched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SelectOption {
    /// Creates a new option without a description.
    ///
    /// # Arguments
    /// * `value` - The key reported on commit.
    /// * `label` - The text shown for the option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
        }
    }

    /// Attaches a description to the option.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for SelectOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{} - {}", self.label, description),
            None => write!(f, "{}", self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_appends_description() {
        let projector =
            SelectOption::new("a1", "Projector").with_description("AV Room");
        assert_eq!(projector.to_string(), "Projector - AV Room");
        assert_eq!(SelectOption::new("a2", "Chair").to_string(), "Chair");
    }
}
