use crate::{
    app::{App, AppState, Focus},
    chat_message::render_message,
    constants::INPUT_PLACEHOLDER,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Chat ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Messages
            Constraint::Length(1), // Typing indicator
            Constraint::Length(3), // Input
        ])
        .split(inner);

    draw_messages(f, chunks[0], app);
    app.status_indicator.render(f, chunks[1], app.is_busy());
    draw_input(f, chunks[2], app);
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    if app.snapshot.is_empty() {
        let hint = Paragraph::new("Pregunta lo que quieras o elige una película.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, area);
        app.rendered_lines = 0;
        return;
    }

    let mut lines: Vec<Line<'static>> = Vec::new();
    for message in app.snapshot.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area.width));
    }

    // Lines are pre-wrapped, so the count is the rendered height.
    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    // Keep a scrolled-up view anchored when new lines land below it.
    if app.scroll_from_bottom > 0 {
        let grown = total_lines.saturating_sub(app.rendered_lines);
        app.scroll_from_bottom = app.scroll_from_bottom.saturating_add(grown);
    }
    app.rendered_lines = total_lines;
    let max_scroll = total_lines.saturating_sub(area.height);
    app.scroll_from_bottom = app.scroll_from_bottom.min(max_scroll);
    let offset = max_scroll - app.scroll_from_bottom;

    f.render_widget(Paragraph::new(lines).scroll((offset, 0)), area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let busy = app.is_busy();
    let focused = app.focus == Focus::Input;

    let (text, mut style) = if app.input.is_empty() {
        (INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        (app.input.as_str(), Style::default().fg(Color::White))
    };
    if busy {
        style = style.fg(Color::DarkGray).add_modifier(Modifier::DIM);
    }

    let border_color = if focused && !busy {
        Color::LightYellow
    } else {
        Color::DarkGray
    };

    let text_width = u16::try_from(app.input.width()).unwrap_or(u16::MAX);
    let visible_width = area.width.saturating_sub(3);
    let scroll_offset = text_width.saturating_sub(visible_width);

    let input = Paragraph::new(text)
        .style(style)
        .scroll((0, scroll_offset))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Enviar ")
                .border_style(Style::default().fg(border_color)),
        );
    f.render_widget(input, area);

    if focused && !busy && app.state == AppState::Chat {
        f.set_cursor_position((area.x + 1 + text_width - scroll_offset, area.y + 1));
    }
}
