use crate::app::{App, AppState, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

pub fn handle_key(key: KeyEvent, app: &mut App) {
    match app.state {
        AppState::Chat => handle_chat_input(key, app),
        AppState::QuitConfirm => handle_quit_confirm_input(key, app),
        AppState::Quit => {}
    }
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.state = AppState::QuitConfirm;
        }
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::PageUp => app.scroll_up(),
        KeyCode::PageDown => app.scroll_down(),
        _ => match app.focus {
            Focus::Input => handle_input_key(key, app),
            Focus::Catalog => handle_catalog_key(key, app),
        },
    }
}

fn handle_input_key(key: KeyEvent, app: &mut App) {
    // Typing is disabled while the bot is answering.
    if app.is_busy() {
        return;
    }

    match key.code {
        KeyCode::Enter => match app.controller.submit(&app.input) {
            Ok(_) => app.input.clear(),
            Err(rejection) => debug!("Submission ignored: {}", rejection),
        },
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.push(c);
        }
        _ => {}
    }
}

fn handle_catalog_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Enter if !app.is_busy() => {
            let Some(title) = app.selected_title().map(str::to_owned) else {
                return;
            };
            if let Err(rejection) = app.controller.select_catalog_entry(&title) {
                debug!("Catalog selection ignored: {}", rejection);
            }
        }
        KeyCode::Esc => app.focus = Focus::Input,
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}
