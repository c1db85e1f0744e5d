use crate::app::{App, AppState, Focus};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// One line of key hints for the current state and focus.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    let instructions = match (app.state, app.focus) {
        (AppState::QuitConfirm, _) => "s / Enter salir · n / Esc seguir conversando",
        (_, _) if app.is_busy() => "Esperando a Tarantibot... · RePág/AvPág desplazar · Ctrl+C salir",
        (_, Focus::Input) => "Enter enviar · Tab películas · RePág/AvPág desplazar · Ctrl+C salir",
        (_, Focus::Catalog) => "↑/↓ elegir · Enter preguntar · Tab/Esc volver al chat · Ctrl+C salir",
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
