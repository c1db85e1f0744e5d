use crate::app::{App, Focus};
use crate::constants::CATALOG_TITLE;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn draw_catalog(f: &mut Frame<'_>, area: Rect, app: &App) {
    let focused = app.focus == Focus::Catalog;
    // Picking a film is disabled while an answer is pending.
    let item_style = if app.is_busy() {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::White)
    };

    let items: Vec<ListItem> = app
        .catalog
        .iter()
        .map(|entry| ListItem::new(entry.title.clone()).style(item_style))
        .collect();

    let border_color = if focused { Color::LightMagenta } else { Color::DarkGray };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", CATALOG_TITLE))
                .border_style(Style::default().fg(border_color)),
        )
        .highlight_style(if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        })
        .highlight_symbol("➤ ");

    let mut state = ListState::default().with_selected(Some(app.selected_entry));
    f.render_stateful_widget(list, area, &mut state);
}
