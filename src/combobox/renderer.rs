use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::combobox::{
    Combobox,
    filter::Segment,
    state::DrawnLayout,
    view::{PanelBody, PanelView, RowView, TriggerView},
};

/// Upper bound for the height of the option list, in lines.
const MAX_LIST_HEIGHT: u16 = 12;
const TRIGGER_HEIGHT: u16 = 3;

pub trait ComboboxRenderer {
    fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        combobox: &mut Combobox,
        value: &str,
    );
}

pub struct DefaultComboboxRenderer;

impl ComboboxRenderer for DefaultComboboxRenderer {
    fn draw(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        combobox: &mut Combobox,
        value: &str,
    ) {
        let view = combobox.view(value);

        let trigger_area = Rect {
            height: TRIGGER_HEIGHT.min(area.height),
            ..area
        };
        draw_trigger(frame, trigger_area, &view.trigger);

        let mut layout = DrawnLayout {
            trigger: trigger_area,
            panel: None,
            list: None,
        };

        if let Some(panel) = &view.panel {
            let below = Rect {
                y: trigger_area.bottom(),
                height: area.bottom().saturating_sub(trigger_area.bottom()),
                ..area
            };
            let panel_area = Rect {
                height: panel_height(panel).min(below.height),
                ..below
            };

            layout.panel = Some(panel_area);
            layout.list = draw_panel(frame, panel_area, panel, combobox);
        }

        combobox.state.layout = layout;
    }
}

fn draw_trigger(frame: &mut Frame, area: Rect, trigger: &TriggerView) {
    let border_style = if trigger.disabled {
        Style::default().fg(Color::DarkGray)
    } else if trigger.expanded {
        Style::default().fg(Color::Blue)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = if trigger.is_placeholder {
        Line::from(Span::styled(
            trigger.text.as_str(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::styled(
            trigger.text.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(description) = &trigger.description {
            spans.push(Span::styled(
                format!(" - {description}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    };

    let [text_area, chevron_area] = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(inner);

    let text_style = if trigger.disabled {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    frame.render_widget(Paragraph::new(line).style(text_style), text_area);
    frame.render_widget(
        Paragraph::new("⇕")
            .alignment(Alignment::Right)
            .style(Style::default().fg(Color::DarkGray)),
        chevron_area,
    );
}

fn list_height(panel: &PanelView) -> u16 {
    match &panel.body {
        PanelBody::Empty(_) => 1,
        PanelBody::Rows(rows) => rows
            .iter()
            .map(RowView::height)
            .sum::<u16>()
            .clamp(1, MAX_LIST_HEIGHT),
    }
}

fn panel_height(panel: &PanelView) -> u16 {
    // borders + input + separator
    let count_height = u16::from(panel.count.is_some());
    2 + 2 + list_height(panel) + count_height
}

/// Draws the open panel and returns the inner area of the option list.
fn draw_panel(
    frame: &mut Frame,
    area: Rect,
    panel: &PanelView,
    combobox: &mut Combobox,
) -> Option<Rect> {
    frame.render_widget(Clear, area);

    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(u16::from(panel.count.is_some())),
        ])
        .split(inner);

    let input_block = Block::default().borders(Borders::BOTTOM);
    let input_area = input_block.inner(chunks[0]);
    frame.render_widget(input_block, chunks[0]);

    let [icon_area, text_area] =
        Layout::horizontal([Constraint::Length(2), Constraint::Min(1)])
            .areas(input_area);
    frame.render_widget(
        Paragraph::new("⌕").style(Style::default().fg(Color::DarkGray)),
        icon_area,
    );
    frame.render_widget(&combobox.state.search_input, text_area);

    if let Some(count) = &panel.count {
        frame.render_widget(
            Paragraph::new(count.as_str())
                .style(Style::default().fg(Color::DarkGray)),
            chunks[2],
        );
    }

    match &panel.body {
        PanelBody::Empty(message) => {
            frame.render_widget(
                Paragraph::new(message.as_str())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                chunks[1],
            );
            None
        }
        PanelBody::Rows(rows) => {
            let items: Vec<ListItem> = rows.iter().map(row_item).collect();
            let list = List::new(items)
                .highlight_style(Style::default().bg(Color::Blue));

            frame.render_stateful_widget(
                list,
                chunks[1],
                &mut combobox.state.list_state,
            );
            Some(chunks[1])
        }
    }
}

fn row_item(row: &RowView) -> ListItem<'static> {
    let check = if row.selected { "✓ " } else { "  " };
    let label_style = if row.selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut first = vec![Span::raw(check)];
    first.extend(segment_spans(&row.label, label_style));

    let mut lines = vec![Line::from(first)];

    if let Some(description) = &row.description {
        let mut second = vec![Span::raw("  ")];
        second.extend(segment_spans(
            description,
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::from(second));
    }

    ListItem::new(Text::from(lines))
}

fn segment_spans(segments: &[Segment], base: Style) -> Vec<Span<'static>> {
    segments
        .iter()
        .map(|segment| {
            let style = if segment.matched {
                base.bg(Color::Yellow).fg(Color::Black)
            } else {
                base
            };
            Span::styled(segment.text.clone(), style)
        })
        .collect()
}
