use crate::constants::TYPING_INDICATOR;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const SPINNER_FRAMES: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// The "typing" line shown under the transcript while the bot is answering.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn line(&self, thinking: bool) -> Line<'static> {
        if !thinking {
            return Line::from("");
        }

        let frame = SPINNER_FRAMES[self.spinner_idx % SPINNER_FRAMES.len()];
        Line::from(vec![
            Span::styled(frame, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(
                TYPING_INDICATOR,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, thinking: bool) {
        frame.render_widget(Paragraph::new(self.line(thinking)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_idle_indicator_is_blank() {
        assert_eq!(text(&StatusIndicator::new().line(false)), "");
    }

    #[test]
    fn test_spinner_advances_while_thinking() {
        let mut indicator = StatusIndicator::new();
        let first = text(&indicator.line(true));
        indicator.update_spinner();
        let second = text(&indicator.line(true));

        assert!(first.ends_with("Escribiendo..."));
        assert_ne!(first, second);
    }
}
