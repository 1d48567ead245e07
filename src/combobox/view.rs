use crate::combobox::{
    config::ComboboxConfig,
    filter::{Segment, mark_matches},
    option::SelectOption,
    state::InteractionState,
};

/// Everything needed to draw a combobox, derived from its state and the
/// caller's current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboboxView {
    pub trigger: TriggerView,
    pub panel: Option<PanelView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerView {
    pub text: String,
    pub description: Option<String>,
    pub is_placeholder: bool,
    pub disabled: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub query: String,
    pub search_placeholder: String,
    pub body: PanelBody,
    /// `"{filtered} of {total}"`, present while the query is non-empty.
    pub count: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelBody {
    Empty(String),
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub value: String,
    pub label: Vec<Segment>,
    pub description: Option<Vec<Segment>>,
    pub highlighted: bool,
    pub selected: bool,
}

impl RowView {
    /// Number of terminal lines the row occupies.
    pub fn height(&self) -> u16 {
        if self.description.is_some() { 2 } else { 1 }
    }
}

/// Builds the view model. `value` is looked up on every call.
///
/// With duplicate keys the trigger shows the first matching option and
/// every row carrying that key is marked as selected.
pub fn build(
    options: &[SelectOption],
    state: &InteractionState,
    config: &ComboboxConfig,
    value: &str,
) -> ComboboxView {
    let trigger = match options.iter().find(|o| o.value == value) {
        Some(selected) => TriggerView {
            text: selected.label.clone(),
            description: selected.description.clone(),
            is_placeholder: false,
            disabled: config.disabled,
            expanded: state.open,
        },
        None => TriggerView {
            text: config.placeholder.clone(),
            description: None,
            is_placeholder: true,
            disabled: config.disabled,
            expanded: state.open,
        },
    };

    let panel = state
        .open
        .then(|| build_panel(options, state, config, value));

    ComboboxView { trigger, panel }
}

fn build_panel(
    options: &[SelectOption],
    state: &InteractionState,
    config: &ComboboxConfig,
    value: &str,
) -> PanelView {
    let query = state.query();
    let highlighted = state.list_state.selected();

    let body = if state.filtered.is_empty() {
        PanelBody::Empty(config.empty_message.clone())
    } else {
        let rows = state
            .filtered
            .iter()
            .enumerate()
            .map(|(row_idx, &option_idx)| {
                let option = &options[option_idx];
                RowView {
                    value: option.value.clone(),
                    label: mark_matches(&option.label, &query),
                    description: option
                        .description
                        .as_deref()
                        .map(|d| mark_matches(d, &query)),
                    highlighted: highlighted == Some(row_idx),
                    selected: option.value == value,
                }
            })
            .collect();
        PanelBody::Rows(rows)
    };

    let count = (!query.is_empty()).then(|| {
        let count = format!("{} of {}", state.filtered.len(), options.len());
        match &config.count_label {
            Some(label) => format!("{count} {label}"),
            None => count,
        }
    });

    PanelView {
        query,
        search_placeholder: config.search_placeholder.clone(),
        body,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets() -> Vec<SelectOption> {
        vec![
            SelectOption::new("a1", "Projector").with_description("AV Room"),
            SelectOption::new("a2", "Chair").with_description("Sanctuary"),
        ]
    }

    fn open_state<'a>(options: &[SelectOption], query: &str) -> InteractionState<'a> {
        let mut state = InteractionState::new(options, "Search...");
        state.open = true;
        state.search_input.insert_str(query);
        state.update_filter(options);
        state
    }

    fn rows(view: &ComboboxView) -> &[RowView] {
        match &view.panel.as_ref().unwrap().body {
            PanelBody::Rows(rows) => rows,
            PanelBody::Empty(message) => panic!("unexpected empty panel: {message}"),
        }
    }

    #[test]
    fn closed_view_has_no_panel() {
        let options = assets();
        let state = InteractionState::new(&options, "");
        let view = build(&options, &state, &ComboboxConfig::default(), "a1");

        assert!(view.panel.is_none());
        assert_eq!(view.trigger.text, "Projector");
        assert_eq!(view.trigger.description.as_deref(), Some("AV Room"));
        assert!(!view.trigger.is_placeholder);
        assert!(!view.trigger.expanded);
    }

    #[test]
    fn unknown_value_falls_back_to_placeholder() {
        let options = assets();
        let state = InteractionState::new(&options, "");
        let view = build(&options, &state, &ComboboxConfig::default(), "nope");

        assert!(view.trigger.is_placeholder);
        assert_eq!(view.trigger.text, "Select an option...");
    }

    #[test]
    fn highlight_and_selection_are_independent() {
        let options = assets();
        let mut state = open_state(&options, "");
        state.move_highlight(1);
        let view = build(&options, &state, &ComboboxConfig::default(), "a1");

        let rows = rows(&view);
        assert!(rows[0].selected && !rows[0].highlighted);
        assert!(!rows[1].selected && rows[1].highlighted);
    }

    #[test]
    fn matches_are_marked_in_label_and_description() {
        let options = assets();
        let state = open_state(&options, "r");
        let view = build(&options, &state, &ComboboxConfig::default(), "");

        let rows = rows(&view);
        assert!(rows[0].label.iter().any(|s| s.matched && s.text == "r"));
        let description = rows[0].description.as_ref().unwrap();
        assert!(description.iter().any(|s| s.matched && s.text == "R"));
        assert_eq!(view.panel.as_ref().unwrap().count.as_deref(), Some("2 of 2"));
    }

    #[test]
    fn empty_results_use_the_empty_message() {
        let options = assets();
        let state = open_state(&options, "z");
        let config = ComboboxConfig {
            empty_message: "No assets found.".into(),
            ..ComboboxConfig::default()
        };
        let view = build(&options, &state, &config, "");

        let panel = view.panel.unwrap();
        assert_eq!(panel.body, PanelBody::Empty("No assets found.".into()));
        assert_eq!(panel.count.as_deref(), Some("0 of 2"));
    }

    #[test]
    fn whitespace_query_shows_count_but_keeps_every_row() {
        let options = assets();
        let state = open_state(&options, "  ");
        let view = build(&options, &state, &ComboboxConfig::default(), "");

        assert_eq!(rows(&view).len(), 2);
        assert_eq!(view.panel.unwrap().count.as_deref(), Some("2 of 2"));
    }

    #[test]
    fn duplicate_keys_show_first_match_and_check_every_copy() {
        let options = vec![
            SelectOption::new("dup", "First"),
            SelectOption::new("dup", "Second"),
        ];
        let state = open_state(&options, "");
        let view = build(&options, &state, &ComboboxConfig::default(), "dup");

        assert_eq!(view.trigger.text, "First");
        assert!(rows(&view).iter().all(|row| row.selected));
    }
}
