use crate::exchange::ExchangeController;
use crate::models::CatalogEntry;
use crate::status_indicator::StatusIndicator;
use crate::transcript::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    QuitConfirm,
    Quit,
}

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Catalog,
}

pub struct App {
    pub state: AppState,
    pub focus: Focus,
    pub controller: ExchangeController,
    pub catalog: Vec<CatalogEntry>,
    pub selected_entry: usize,
    pub input: String,
    pub snapshot: Snapshot,
    /// Lines scrolled up from the bottom; 0 keeps the newest message in view.
    pub scroll_from_bottom: u16,
    /// Transcript height at the last draw, used to pin a scrolled-up view.
    pub rendered_lines: u16,
    pub status_indicator: StatusIndicator,
}

impl App {
    pub fn new(controller: ExchangeController, catalog: Vec<CatalogEntry>) -> App {
        let snapshot = controller.snapshot();
        App {
            state: AppState::Chat,
            focus: Focus::Input,
            controller,
            catalog,
            selected_entry: 0,
            input: String::new(),
            snapshot,
            scroll_from_bottom: 0,
            rendered_lines: 0,
            status_indicator: StatusIndicator::new(),
        }
    }

    /// Pulls the latest transcript from the controller.
    pub fn refresh(&mut self) {
        self.snapshot = self.controller.snapshot();
    }

    pub fn is_busy(&self) -> bool {
        self.snapshot.busy()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Catalog,
            Focus::Catalog => Focus::Input,
        };
    }

    pub fn select_previous(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        self.selected_entry = self
            .selected_entry
            .checked_sub(1)
            .unwrap_or(self.catalog.len() - 1);
    }

    pub fn select_next(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        self.selected_entry = (self.selected_entry + 1) % self.catalog.len();
    }

    pub fn selected_title(&self) -> Option<&str> {
        self.catalog
            .get(self.selected_entry)
            .map(|entry| entry.title.as_str())
    }

    pub fn scroll_up(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(1);
    }
}
