//! A searchable select widget for terminal UIs and a picker built on it.
//!
//! The [`combobox`] module holds the widget itself; [`picker`] hosts a single
//! combobox on a terminal and owns the selected value.

pub mod combobox;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod picker;
pub mod terminal_utils;

pub use combobox::{Combobox, option::SelectOption};
