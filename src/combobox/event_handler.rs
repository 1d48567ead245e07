use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

use crate::combobox::{Combobox, action::ComboboxAction};

pub trait EventHandler {
    fn handle_event(&self, event: Event, combobox: &Combobox) -> ComboboxAction;
}

pub struct DefaultEventHandler;

impl EventHandler for DefaultEventHandler {
    fn handle_event(&self, event: Event, combobox: &Combobox) -> ComboboxAction {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if combobox.is_open() {
                    handle_panel_key(key)
                } else {
                    handle_trigger_key(key)
                }
            }
            Event::Mouse(mouse) => handle_mouse(mouse, combobox),
            Event::Paste(text) if combobox.is_open() => {
                ComboboxAction::PasteIntoQuery(text)
            }
            Event::FocusLost if combobox.is_open() => ComboboxAction::Dismiss,
            _ => ComboboxAction::Nop,
        }
    }
}

fn handle_trigger_key(key: KeyEvent) -> ComboboxAction {
    match (key.modifiers.contains(KeyModifiers::CONTROL), key.code) {
        (false, KeyCode::Enter | KeyCode::Char(' ')) => ComboboxAction::Activate,
        _ => ComboboxAction::Nop,
    }
}

fn handle_panel_key(key: KeyEvent) -> ComboboxAction {
    match (key.modifiers.contains(KeyModifiers::CONTROL), key.code) {
        (true, KeyCode::Char('p')) => ComboboxAction::MoveHighlight(-1),
        (true, KeyCode::Char('n')) => ComboboxAction::MoveHighlight(1),
        (true, KeyCode::Char('w')) => ComboboxAction::RemoveLastWord,

        (false, KeyCode::Char(c)) => ComboboxAction::AppendToQuery(c),
        (false, KeyCode::Backspace) => ComboboxAction::DeleteFromQuery,
        (false, KeyCode::Up) => ComboboxAction::MoveHighlight(-1),
        (false, KeyCode::Down) => ComboboxAction::MoveHighlight(1),
        (false, KeyCode::Enter) => ComboboxAction::Confirm,
        (false, KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab) => {
            ComboboxAction::Dismiss
        }

        _ => ComboboxAction::Nop,
    }
}

fn handle_mouse(mouse: MouseEvent, combobox: &Combobox) -> ComboboxAction {
    let position = Position::new(mouse.column, mouse.row);
    let layout = &combobox.state.layout;

    if !combobox.is_open() {
        return match mouse.kind {
            MouseEventKind::Down(MouseButton::Left)
                if layout.trigger.contains(position) =>
            {
                ComboboxAction::Activate
            }
            _ => ComboboxAction::Nop,
        };
    }

    let row = row_at(combobox, position);

    match mouse.kind {
        MouseEventKind::Moved => match row {
            Some(idx) => ComboboxAction::HighlightAt(idx),
            None => ComboboxAction::Nop,
        },
        MouseEventKind::Down(MouseButton::Left) => match row {
            Some(idx) => ComboboxAction::CommitAt(idx),
            None if layout.panel.is_some_and(|p| p.contains(position)) => {
                ComboboxAction::Nop
            }
            None => ComboboxAction::Dismiss,
        },
        _ => ComboboxAction::Nop,
    }
}

/// Maps a screen position to a filtered row, walking the rows visible in
/// the last drawn list area.
fn row_at(combobox: &Combobox, position: Position) -> Option<usize> {
    let list = combobox.state.layout.list?;
    if !list.contains(position) {
        return None;
    }

    let options = combobox.options();
    let mut top = list.y;

    for (row_idx, &option_idx) in combobox
        .state
        .filtered
        .iter()
        .enumerate()
        .skip(combobox.state.list_state.offset())
    {
        if top >= list.bottom() {
            break;
        }

        let height = if options[option_idx].description.is_some() { 2 } else { 1 };
        if position.y < top + height {
            return Some(row_idx);
        }
        top += height;
    }

    None
}
