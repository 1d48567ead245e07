/// Everything that can happen to a combobox, after terminal events have been
/// translated by an [`EventHandler`](crate::combobox::event_handler::EventHandler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComboboxAction {
    /// Open the panel from the trigger.
    Activate,
    /// Close the panel without committing.
    Dismiss,
    AppendToQuery(char),
    PasteIntoQuery(String),
    DeleteFromQuery,
    RemoveLastWord,
    /// Move the highlight by the given delta, clamped to the list bounds.
    MoveHighlight(i32),
    /// Highlight the filtered row under the pointer.
    HighlightAt(usize),
    /// Commit the highlighted row.
    Confirm,
    /// Commit the filtered row under the pointer.
    CommitAt(usize),
    Nop,
}
