use std::{
    sync::mpsc::{self, Receiver},
    time::Duration,
};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};
use tracing::info;

use crate::combobox::{
    Combobox,
    action_dispatcher::{ActionDispatcher, DefaultActionDispatcher},
    config::ComboboxConfig,
    event_handler::{DefaultEventHandler, EventHandler},
    option::SelectOption,
    renderer::{ComboboxRenderer, DefaultComboboxRenderer},
};

const MAX_WIDTH: u16 = 72;
const DEFAULT_TITLE: &str = "Select an asset";

/// Supplies terminal events to the picker loop.
pub trait EventSource {
    /// Returns the next event, or `None` when nothing arrived this tick.
    fn next_event(&mut self) -> Result<Option<Event>>;
}

/// Reads events from the terminal, polling every 50 ms.
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<Option<Event>> {
        if event::poll(Duration::from_millis(50))? {
            return Ok(Some(event::read()?));
        }

        Ok(None)
    }
}

/// Host-level settings of the picker.
#[derive(Debug, Clone, Default)]
pub struct PickerSettings {
    pub title: Option<String>,
    /// Exit right after the first committed selection.
    pub exit_on_commit: bool,
}

/// Terminal host of a single combobox. Owns the selected value and feeds
/// every terminal event through the widget.
pub struct Picker<
    'a,
    H: EventHandler = DefaultEventHandler,
    R: ComboboxRenderer = DefaultComboboxRenderer,
    D: ActionDispatcher = DefaultActionDispatcher,
> {
    combobox: Combobox<'a>,
    value: String,
    changes: Receiver<String>,

    event_handler: H,
    renderer: R,
    dispatcher: D,

    settings: PickerSettings,
    should_exit: bool,
}

impl<'a> Picker<'a> {
    pub fn new(
        options: Vec<SelectOption>,
        config: ComboboxConfig,
        value: String,
        settings: PickerSettings,
    ) -> Self {
        Self::with_parts(
            options,
            config,
            value,
            settings,
            DefaultEventHandler,
            DefaultComboboxRenderer,
            DefaultActionDispatcher,
        )
    }
}

impl<'a, H, R, D> Picker<'a, H, R, D>
where
    H: EventHandler,
    R: ComboboxRenderer,
    D: ActionDispatcher,
{
    pub fn with_parts(
        options: Vec<SelectOption>,
        config: ComboboxConfig,
        value: String,
        settings: PickerSettings,
        event_handler: H,
        renderer: R,
        dispatcher: D,
    ) -> Self {
        let (sender, changes) = mpsc::channel();
        let combobox = Combobox::new(options, config, move |value: &str| {
            // the receiver lives as long as the picker
            let _ = sender.send(value.to_string());
        });

        Self {
            combobox,
            value,
            changes,
            event_handler,
            renderer,
            dispatcher,
            settings,
            should_exit: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn combobox(&self) -> &Combobox<'a> {
        &self.combobox
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    /// Runs the event loop until the user quits, returning the final value.
    pub fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
        events: &mut impl EventSource,
    ) -> Result<String> {
        while !self.should_exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.combobox.run_deferred();

            if let Some(event) = events.next_event()? {
                self.handle_event(event);
            }
        }

        Ok(self.value)
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = centered_column(frame.area(), MAX_WIDTH);

        let [title_area, _, combobox_area, hint_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        let title = self.settings.title.as_deref().unwrap_or(DEFAULT_TITLE);
        frame.render_widget(
            Paragraph::new(title).style(Style::default().add_modifier(Modifier::BOLD)),
            title_area,
        );

        self.renderer
            .draw(frame, combobox_area, &mut self.combobox, &self.value);

        let hint = if self.combobox.is_open() {
            "↑/↓: Move | Enter: Select | Esc: Close"
        } else if self.combobox.config().disabled {
            "Esc/q: Quit"
        } else {
            "Enter/Space: Open | Esc/q: Quit"
        };
        frame.render_widget(
            Paragraph::new(hint)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            hint_area,
        );
    }

    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = &event {
            if is_interrupt(key) {
                self.should_exit = true;
                return;
            }

            if !self.combobox.is_open() && is_quit(key) {
                self.should_exit = true;
                return;
            }
        }

        let action = self.event_handler.handle_event(event, &self.combobox);
        self.dispatcher.dispatch(action, &mut self.combobox);
        self.apply_value_changes();
    }

    fn apply_value_changes(&mut self) {
        while let Ok(value) = self.changes.try_recv() {
            info!(from = %self.value, to = %value, "value changed");
            self.value = value;

            if self.settings.exit_on_commit {
                self.should_exit = true;
            }
        }
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && key.modifiers.contains(KeyModifiers::CONTROL)
        && key.code == KeyCode::Char('c')
}

fn is_quit(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && !key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
}

fn centered_column(area: Rect, max_width: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Max(max_width)])
        .flex(Flex::Center)
        .areas(area);
    column
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn picker(exit_on_commit: bool) -> Picker<'static> {
        let options = vec![
            SelectOption::new("a1", "Projector").with_description("AV Room"),
            SelectOption::new("a2", "Chair").with_description("Sanctuary"),
        ];
        let settings = PickerSettings {
            title: None,
            exit_on_commit,
        };
        Picker::new(options, ComboboxConfig::default(), String::new(), settings)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(picker: &mut Picker<'_>, code: KeyCode) {
        picker.handle_event(key(code, KeyModifiers::NONE));
    }

    #[test]
    fn escape_closes_panel_before_quitting() {
        let mut picker = picker(false);

        press(&mut picker, KeyCode::Enter);
        assert!(picker.combobox().is_open());

        press(&mut picker, KeyCode::Esc);
        assert!(!picker.combobox().is_open());
        assert!(!picker.should_exit());

        press(&mut picker, KeyCode::Esc);
        assert!(picker.should_exit());
    }

    #[test]
    fn q_is_typed_into_an_open_panel() {
        let mut picker = picker(false);

        press(&mut picker, KeyCode::Enter);
        press(&mut picker, KeyCode::Char('q'));

        assert!(!picker.should_exit());
        assert_eq!(picker.combobox().state.query(), "q");
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut picker = picker(false);
        press(&mut picker, KeyCode::Enter);

        picker.handle_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(picker.should_exit());
    }

    #[test]
    fn committed_value_is_owned_by_the_host() {
        let mut picker = picker(false);

        press(&mut picker, KeyCode::Enter);
        for c in "chair".chars() {
            press(&mut picker, KeyCode::Char(c));
        }
        press(&mut picker, KeyCode::Enter);

        assert_eq!(picker.value(), "a2");
        assert!(!picker.combobox().is_open());
        assert!(!picker.should_exit());
    }

    #[test]
    fn exit_on_commit_stops_after_selection() {
        let mut picker = picker(true);

        press(&mut picker, KeyCode::Enter);
        press(&mut picker, KeyCode::Down);
        press(&mut picker, KeyCode::Enter);

        assert_eq!(picker.value(), "a2");
        assert!(picker.should_exit());
    }

    #[test]
    fn draw_shows_title_trigger_and_hint() {
        let mut picker = picker(false);
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        terminal.draw(|frame| picker.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(screen.contains("Select an asset"));
        assert!(screen.contains("Select an option..."));
        assert!(screen.contains("Enter/Space: Open"));
    }

    #[test]
    fn disabled_picker_only_offers_quitting() {
        let options = vec![SelectOption::new("a1", "Projector")];
        let config = ComboboxConfig {
            disabled: true,
            ..ComboboxConfig::default()
        };
        let mut picker =
            Picker::new(options, config, String::new(), PickerSettings::default());
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();

        press(&mut picker, KeyCode::Enter);
        terminal.draw(|frame| picker.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer.content.iter().map(|c| c.symbol()).collect();
        assert!(!picker.combobox().is_open());
        assert!(screen.contains("Esc/q: Quit"));
        assert!(!screen.contains("Enter/Space: Open"));
    }
}
