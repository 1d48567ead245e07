use tracing::{debug, info};
use tui_textarea::TextArea;

use crate::combobox::{Combobox, action::ComboboxAction, state::InputFocus};

pub trait ActionDispatcher {
    fn dispatch(&self, action: ComboboxAction, combobox: &mut Combobox<'_>);
}

pub struct DefaultActionDispatcher;

impl ActionDispatcher for DefaultActionDispatcher {
    fn dispatch(&self, action: ComboboxAction, combobox: &mut Combobox<'_>) {
        match action {
            ComboboxAction::Activate => handle_activate(combobox),
            ComboboxAction::Dismiss => handle_dismiss(combobox),
            ComboboxAction::AppendToQuery(c) => {
                edit_query(combobox, |input| input.insert_char(c))
            }
            ComboboxAction::PasteIntoQuery(text) => {
                // the query is a single line
                let text = text.replace(['\r', '\n'], " ");
                edit_query(combobox, |input| {
                    input.insert_str(text);
                })
            }
            ComboboxAction::DeleteFromQuery => edit_query(combobox, |input| {
                input.delete_char();
            }),
            ComboboxAction::RemoveLastWord => edit_query(combobox, |input| {
                input.delete_word();
            }),
            ComboboxAction::MoveHighlight(delta) => {
                if combobox.state.open {
                    combobox.state.move_highlight(delta);
                }
            }
            ComboboxAction::HighlightAt(idx) => {
                if combobox.state.open {
                    combobox.state.highlight(idx);
                }
            }
            ComboboxAction::Confirm => {
                let idx = combobox.state.highlighted_index();
                handle_commit(combobox, idx);
            }
            ComboboxAction::CommitAt(idx) => handle_commit(combobox, idx),
            ComboboxAction::Nop => {}
        }
    }
}

fn handle_activate(combobox: &mut Combobox<'_>) {
    if combobox.config().disabled {
        debug!("activation ignored, combobox is disabled");
        return;
    }

    if combobox.state.open {
        return;
    }

    combobox.state.open = true;
    combobox.state.focus = InputFocus::Pending;
    combobox.state.reset_highlight();

    debug!(options = combobox.options().len(), "combobox opened");
}

fn handle_dismiss(combobox: &mut Combobox<'_>) {
    if !combobox.state.open {
        return;
    }

    combobox.close();
    debug!("combobox dismissed");
}

fn edit_query<F>(combobox: &mut Combobox<'_>, operation: F)
where
    F: FnOnce(&mut TextArea),
{
    if !combobox.state.open {
        return;
    }

    operation(&mut combobox.state.search_input);
    combobox.refilter();
}

fn handle_commit(combobox: &mut Combobox<'_>, idx: usize) {
    if !combobox.state.open {
        return;
    }

    let Some(value) = combobox.filtered_value(idx) else {
        return;
    };

    info!(value = %value, "selection committed");
    combobox.commit(&value);
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::combobox::{config::ComboboxConfig, option::SelectOption};

    fn assets() -> Vec<SelectOption> {
        vec![
            SelectOption::new("a1", "Projector").with_description("AV Room"),
            SelectOption::new("a2", "Chair").with_description("Sanctuary"),
        ]
    }

    fn combobox_with_log(
        config: ComboboxConfig,
    ) -> (Combobox<'static>, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let combobox = Combobox::new(assets(), config, move |value: &str| {
            sink.borrow_mut().push(value.to_string())
        });
        (combobox, log)
    }

    fn type_query(combobox: &mut Combobox<'_>, query: &str) {
        for c in query.chars() {
            combobox.update(ComboboxAction::AppendToQuery(c));
        }
    }

    #[test]
    fn typing_and_enter_commits_once_and_closes() {
        let (mut combobox, log) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        type_query(&mut combobox, "proj");

        assert_eq!(combobox.state.filtered, vec![0]);
        assert_eq!(combobox.state.highlighted_index(), 0);

        combobox.update(ComboboxAction::Confirm);

        assert_eq!(*log.borrow(), vec!["a1".to_string()]);
        assert!(!combobox.is_open());
        assert_eq!(combobox.state.query(), "");
        assert_eq!(combobox.state.highlighted_index(), 0);
    }

    #[test]
    fn enter_on_empty_results_is_a_noop() {
        let (mut combobox, log) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        type_query(&mut combobox, "z");
        assert!(combobox.state.filtered.is_empty());

        combobox.update(ComboboxAction::Confirm);

        assert!(log.borrow().is_empty());
        assert!(combobox.is_open());
    }

    #[test]
    fn disabled_combobox_never_opens() {
        let config = ComboboxConfig {
            disabled: true,
            ..ComboboxConfig::default()
        };
        let (mut combobox, _) = combobox_with_log(config);

        combobox.update(ComboboxAction::Activate);

        assert!(!combobox.is_open());
        assert_eq!(combobox.state.focus, InputFocus::Blurred);
    }

    #[test]
    fn escape_discards_query_for_next_open() {
        let (mut combobox, log) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        type_query(&mut combobox, "cha");
        combobox.update(ComboboxAction::Dismiss);
        combobox.update(ComboboxAction::Activate);

        assert_eq!(combobox.state.query(), "");
        assert_eq!(combobox.state.filtered, vec![0, 1]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn click_commit_matches_enter_commit() {
        let (mut combobox, log) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        type_query(&mut combobox, "r");
        combobox.update(ComboboxAction::CommitAt(1));

        assert_eq!(*log.borrow(), vec!["a2".to_string()]);
        assert!(!combobox.is_open());
        assert_eq!(combobox.state.query(), "");
        assert_eq!(combobox.state.highlighted_index(), 0);
    }

    #[test]
    fn navigation_never_commits() {
        let (mut combobox, log) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        combobox.update(ComboboxAction::MoveHighlight(1));
        combobox.update(ComboboxAction::MoveHighlight(1));
        combobox.update(ComboboxAction::HighlightAt(0));
        combobox.update(ComboboxAction::MoveHighlight(-1));

        assert!(log.borrow().is_empty());
        assert_eq!(combobox.state.highlighted_index(), 0);
    }

    #[test]
    fn arrow_keys_clamp_at_both_ends() {
        let (mut combobox, _) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        for _ in 0..5 {
            combobox.update(ComboboxAction::MoveHighlight(1));
        }
        assert_eq!(combobox.state.highlighted_index(), 1);

        for _ in 0..5 {
            combobox.update(ComboboxAction::MoveHighlight(-1));
        }
        assert_eq!(combobox.state.highlighted_index(), 0);
    }

    #[test]
    fn result_count_change_resets_highlight() {
        let (mut combobox, _) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        combobox.update(ComboboxAction::MoveHighlight(1));
        assert_eq!(combobox.state.highlighted_index(), 1);

        type_query(&mut combobox, "chair");
        assert_eq!(combobox.state.highlighted_index(), 0);

        combobox.update(ComboboxAction::RemoveLastWord);
        assert_eq!(combobox.state.query(), "");
        assert_eq!(combobox.state.filtered, vec![0, 1]);
        assert_eq!(combobox.state.highlighted_index(), 0);
    }

    #[test]
    fn query_edits_are_ignored_while_closed() {
        let (mut combobox, log) = combobox_with_log(ComboboxConfig::default());

        type_query(&mut combobox, "chair");
        combobox.update(ComboboxAction::MoveHighlight(1));
        combobox.update(ComboboxAction::Confirm);

        assert_eq!(combobox.state.query(), "");
        assert_eq!(combobox.state.highlighted_index(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn pasted_newlines_stay_on_one_line() {
        let (mut combobox, _) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        combobox.update(ComboboxAction::PasteIntoQuery("av\nroom".into()));

        assert_eq!(combobox.state.query(), "av room");
        assert_eq!(combobox.state.filtered, vec![0]);
    }

    #[test]
    fn focus_is_applied_after_the_panel_is_drawn() {
        let (mut combobox, _) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        assert_eq!(combobox.state.focus, InputFocus::Pending);

        combobox.run_deferred();
        assert_eq!(combobox.state.focus, InputFocus::Focused);
    }

    #[test]
    fn deferred_focus_skips_a_closed_panel() {
        let (mut combobox, _) = combobox_with_log(ComboboxConfig::default());

        combobox.update(ComboboxAction::Activate);
        combobox.update(ComboboxAction::Dismiss);
        combobox.run_deferred();

        assert_eq!(combobox.state.focus, InputFocus::Blurred);
    }
}
