// src/ui.rs

pub mod catalog;
pub mod chat;
pub mod footer;
pub mod header;
pub mod quit_confirm;

use crate::{
    app::{App, AppState},
    errors::{TarantibotError, TarantibotResult},
    exchange::ExchangeController,
    key_handlers::handle_key,
    models::CatalogEntry,
};
use crossterm::{
    cursor,
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::error;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::{io, time::Duration};
use tokio::{sync::mpsc, time};

const TICK_RATE: Duration = Duration::from_millis(120);
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Undoes raw mode and the alternate screen when dropped, so the terminal is
/// restored on every exit path out of `run_ui`, including setup failures.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
            error!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode: {}", e);
        }
    }
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(
    controller: ExchangeController,
    catalog: Vec<CatalogEntry>,
) -> TarantibotResult<()> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| TarantibotError::terminal_error(format!("Failed to enable raw mode: {}", e)))?;
    let _restore = TerminalGuard;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        TarantibotError::terminal_error(format!("Failed to enter alternate screen: {}", e))
    })?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(controller, catalog);
    run_app(&mut terminal, app).await
}

/// Main loop of the application: redraws on key presses, transcript changes
/// and spinner ticks.
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> TarantibotResult<()> {
    let (tx, mut rx) = mpsc::channel::<CEvent>(100);
    tokio::task::spawn_blocking(move || read_terminal_events(tx));

    let mut updates = app.controller.subscribe();
    let mut ticker = time::interval(TICK_RATE);

    loop {
        terminal.draw(|f| draw(f, &mut app))?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(CEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_key(key, &mut app);
                }
                Some(_) => {}
                None => break,
            },
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = ticker.tick() => app.status_indicator.update_spinner(),
        }

        app.refresh();

        if app.state == AppState::Quit {
            break;
        }
    }

    Ok(())
}

/// Forwards terminal events until the UI loop hangs up.
fn read_terminal_events(tx: mpsc::Sender<CEvent>) {
    while !tx.is_closed() {
        match event::poll(POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    if tx.blocking_send(event).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    error!("Failed to read terminal event: {}", e);
                    return;
                }
            },
            Ok(false) => {}
            Err(e) => {
                error!("Failed to poll terminal events: {}", e);
                return;
            }
        }
    }
}

/// Renders every pane for the current state.
pub fn draw(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    header::draw_header(f, rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(rows[1]);

    catalog::draw_catalog(f, columns[0], app);
    chat::draw_chat(f, columns[1], app);
    footer::draw_footer(f, rows[2], app);

    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, centered_rect(50, 30, f.area()));
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AskService, ExchangeFailure};
    use crate::models::default_catalog;
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    struct SilentService;

    #[async_trait]
    impl AskService for SilentService {
        async fn ask(&self, _query: &str) -> Result<String, ExchangeFailure> {
            std::future::pending().await
        }
    }

    struct EchoService;

    #[async_trait]
    impl AskService for EchoService {
        async fn ask(&self, query: &str) -> Result<String, ExchangeFailure> {
            Ok(format!("eco: {}", query))
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn test_app() -> App {
        let controller = ExchangeController::new(Arc::new(SilentService));
        App::new(controller, default_catalog())
    }

    #[tokio::test]
    async fn test_draw_shows_header_catalog_and_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = test_app();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Tarantibot"));
        assert!(screen.contains("Jaws"));
        assert!(screen.contains("Escribe un mensaje..."));
        assert!(!screen.contains("Escribiendo..."));
    }

    #[tokio::test]
    async fn test_draw_shows_typing_indicator_while_busy() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = test_app();

        app.controller.submit("Hola").unwrap();
        app.refresh();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Hola"));
        assert!(screen.contains("Escribiendo..."));
    }

    #[tokio::test]
    async fn test_draw_quit_confirm_overlay() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = test_app();
        app.state = AppState::QuitConfirm;

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("¿Salir de Tarantibot?"));
        assert!(screen.contains("seguir conversando"));
        assert!(!screen.contains("Press"));
    }

    #[tokio::test]
    async fn test_footer_hints_are_spanish() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = test_app();

        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let screen = screen_text(&terminal);
        assert!(screen.contains("Enter enviar"));
        assert!(screen.contains("Ctrl+C salir"));
    }

    /// Fills the transcript with enough answered exchanges to overflow the
    /// chat pane of a 100x30 terminal.
    async fn long_conversation() -> App {
        let controller = ExchangeController::new(Arc::new(EchoService));
        for i in 0..6 {
            controller.submit(&format!("pregunta {}", i)).unwrap().await;
        }
        let mut app = App::new(controller, default_catalog());
        app.refresh();
        app
    }

    #[tokio::test]
    async fn test_scrolled_view_holds_still_when_reply_arrives() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = long_conversation().await;

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        for _ in 0..4 {
            handle_key(KeyEvent::new(KeyCode::PageUp, KeyModifiers::NONE), &mut app);
        }
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        let before = screen_text(&terminal);
        assert!(!before.contains("eco: pregunta 5"));

        app.controller.submit("pregunta nueva").unwrap().await;
        app.refresh();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert_eq!(screen_text(&terminal), before);
        assert!(app.scroll_from_bottom > 4);
    }

    #[tokio::test]
    async fn test_view_at_bottom_follows_new_reply() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut app = long_conversation().await;
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        app.controller.submit("pregunta nueva").unwrap().await;
        app.refresh();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert!(screen_text(&terminal).contains("eco: pregunta nueva"));
        assert_eq!(app.scroll_from_bottom, 0);
    }

    #[test]
    fn test_terminal_guard_drop_without_tty_does_not_panic() {
        drop(TerminalGuard);
    }
}
