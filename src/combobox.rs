//! Searchable select widget.
//!
//! The widget is a controlled view over a value owned by the caller: terminal
//! events are mapped to [`ComboboxAction`]s by an
//! [`EventHandler`](event_handler::EventHandler), applied by an
//! [`ActionDispatcher`](action_dispatcher::ActionDispatcher), and the result
//! is turned into a [`ComboboxView`] for the
//! [`ComboboxRenderer`](renderer::ComboboxRenderer).

pub mod action;
pub mod action_dispatcher;
pub mod config;
pub mod event_handler;
pub mod filter;
pub mod option;
pub mod renderer;
pub mod state;
pub mod view;

use std::fmt;

use crate::combobox::{
    action::ComboboxAction,
    action_dispatcher::{ActionDispatcher, DefaultActionDispatcher},
    config::ComboboxConfig,
    option::SelectOption,
    state::{InputFocus, InteractionState},
    view::ComboboxView,
};

/// Callback receiving every committed value.
pub type ValueChangeHandler<'a> = Box<dyn FnMut(&str) + 'a>;

pub struct Combobox<'a> {
    options: Vec<SelectOption>,
    config: ComboboxConfig,
    pub state: InteractionState<'a>,
    on_value_change: ValueChangeHandler<'a>,
}

impl fmt::Debug for Combobox<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combobox")
            .field("options", &self.options)
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'a> Combobox<'a> {
    /// Creates a closed combobox.
    ///
    /// # Arguments
    /// * `options` - The selectable entries; order is kept as given.
    /// * `config` - Placeholders, empty message and the disabled flag.
    /// * `on_value_change` - Called once per committed selection.
    pub fn new(
        options: Vec<SelectOption>,
        config: ComboboxConfig,
        on_value_change: impl FnMut(&str) + 'a,
    ) -> Self {
        let state = InteractionState::new(&options, &config.search_placeholder);

        Self {
            options,
            config,
            state,
            on_value_change: Box::new(on_value_change),
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn config(&self) -> &ComboboxConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.state.open
    }

    /// Replaces the option list, keeping the current query.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        self.state.update_filter(&self.options);
    }

    /// Applies an action with the default dispatcher.
    pub fn update(&mut self, action: ComboboxAction) {
        DefaultActionDispatcher.dispatch(action, self);
    }

    /// Derives the view model for the caller's current `value`.
    pub fn view(&self, value: &str) -> ComboboxView {
        view::build(&self.options, &self.state, &self.config, value)
    }

    /// Runs work scheduled for after the panel has been drawn.
    ///
    /// Applies a pending input focus, unless the panel has closed since.
    pub fn run_deferred(&mut self) {
        if self.state.focus != InputFocus::Pending {
            return;
        }

        if self.state.open {
            self.state.focus_input();
        } else {
            self.state.focus = InputFocus::Blurred;
        }
    }

    pub(crate) fn refilter(&mut self) {
        self.state.update_filter(&self.options);
    }

    pub(crate) fn close(&mut self) {
        self.state.close(&self.options, &self.config.search_placeholder);
    }

    /// Value of the filtered row at `idx`, if any.
    pub(crate) fn filtered_value(&self, idx: usize) -> Option<String> {
        self.state
            .filtered
            .get(idx)
            .and_then(|&option_idx| self.options.get(option_idx))
            .map(|option| option.value.clone())
    }

    pub(crate) fn commit(&mut self, value: &str) {
        (self.on_value_change)(value);
        self.close();
    }
}
