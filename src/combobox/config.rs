pub const DEFAULT_PLACEHOLDER: &str = "Select an option...";
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";
pub const DEFAULT_EMPTY_MESSAGE: &str = "No results found.";

/// Display and behaviour settings of a combobox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboboxConfig {
    /// Shown on the trigger when no option matches the current value.
    pub placeholder: String,
    /// Shown in the empty search input.
    pub search_placeholder: String,
    /// Shown instead of rows when nothing matches.
    pub empty_message: String,
    /// Suppresses activation entirely.
    pub disabled: bool,
    /// Noun appended to the result count, e.g. `3 of 10 assets`.
    pub count_label: Option<String>,
}

impl Default for ComboboxConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            disabled: false,
            count_label: None,
        }
    }
}
