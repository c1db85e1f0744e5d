use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Modal asking whether to leave; drawn over the chat while the app is in
/// `AppState::QuitConfirm`.
pub fn draw_quit_confirm(f: &mut Frame<'_>, area: Rect) {
    let key = Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(Color::Gray);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "¿Salir de Tarantibot?",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("s", key),
            Span::styled(" / ", hint),
            Span::styled("Enter", key),
            Span::styled(": salir", hint),
        ]),
        Line::from(vec![
            Span::styled("n", key),
            Span::styled(" / ", hint),
            Span::styled("Esc", key),
            Span::styled(": seguir conversando", hint),
        ]),
    ];

    let dialog = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(" Salir ")
            .title_alignment(Alignment::Center)
            .border_style(Style::default().fg(Color::LightRed))
            .style(Style::default().bg(Color::Black)),
    );

    f.render_widget(Clear, area);
    f.render_widget(dialog, area);
}
