use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::ListState,
};
use tui_textarea::TextArea;

use crate::combobox::{filter::filter_indices, option::SelectOption};

/// Focus of the search input.
///
/// Opening the panel only schedules focus; it is applied by the host once
/// the panel has been drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFocus {
    Blurred,
    Pending,
    Focused,
}

/// Screen areas of the last drawn frame, used for pointer hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawnLayout {
    pub trigger: Rect,
    pub panel: Option<Rect>,
    /// Inner area of the option list (without borders).
    pub list: Option<Rect>,
}

/// Interaction state owned by a single combobox instance.
#[derive(Debug)]
pub struct InteractionState<'a> {
    pub open: bool,
    pub search_input: TextArea<'a>,
    pub focus: InputFocus,
    /// Indices into the option list, in original order.
    pub filtered: Vec<usize>,
    /// Highlighted row (index into `filtered`) and scroll offset.
    pub list_state: ListState,
    pub layout: DrawnLayout,
}

impl<'a> InteractionState<'a> {
    pub fn new(options: &[SelectOption], search_placeholder: &str) -> Self {
        let filtered = filter_indices(options, "");
        let list_state = initial_list_state(filtered.len());

        Self {
            open: false,
            search_input: search_input(search_placeholder),
            focus: InputFocus::Blurred,
            filtered,
            list_state,
            layout: DrawnLayout::default(),
        }
    }

    pub fn query(&self) -> String {
        self.search_input.lines().join("\n")
    }

    /// Index into the filtered list; 0 when nothing is highlighted.
    pub fn highlighted_index(&self) -> usize {
        self.list_state.selected().unwrap_or(0)
    }

    /// Recomputes the filtered list, resetting the highlight when its length
    /// changes.
    pub fn update_filter(&mut self, options: &[SelectOption]) {
        let previous_len = self.filtered.len();
        self.filtered = filter_indices(options, &self.query());

        if self.filtered.len() != previous_len || self.filtered.is_empty() {
            self.reset_highlight();
        }
    }

    pub fn reset_highlight(&mut self) {
        if self.filtered.is_empty() {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(0));
        }
    }

    pub fn move_highlight(&mut self, delta: i32) {
        if let Some(highlighted) = self.list_state.selected() {
            let moved = usize::try_from((highlighted as i64 + delta as i64).max(0))
                .unwrap_or(0);
            self.list_state
                .select(Some(moved.min(self.filtered.len().saturating_sub(1))));
        }
    }

    pub fn highlight(&mut self, idx: usize) {
        if idx < self.filtered.len() {
            self.list_state.select(Some(idx));
        }
    }

    pub fn focus_input(&mut self) {
        self.focus = InputFocus::Focused;
        self.search_input
            .set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    }

    /// Returns to the closed state: empty query, first row highlighted,
    /// input blurred.
    pub fn close(&mut self, options: &[SelectOption], search_placeholder: &str) {
        self.open = false;
        self.search_input = search_input(search_placeholder);
        self.focus = InputFocus::Blurred;
        self.filtered = filter_indices(options, "");
        self.list_state = initial_list_state(self.filtered.len());
        self.layout.panel = None;
        self.layout.list = None;
    }
}

fn initial_list_state(len: usize) -> ListState {
    let mut list_state = ListState::default();
    if len > 0 {
        list_state.select(Some(0));
    }
    list_state
}

fn search_input<'a>(placeholder: &str) -> TextArea<'a> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(Style::default());
    input.set_cursor_style(Style::default());
    input.set_placeholder_text(placeholder);
    input
}
