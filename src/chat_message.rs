use crate::models::Message;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

/// Turns a transcript message into display lines for a column `width` cells
/// wide. User bubbles hug the right edge, bot bubbles the left.
pub fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let style = base_style(message);
    let alignment = if message.is_from_user() {
        Alignment::Right
    } else {
        Alignment::Left
    };
    let bubble_width = bubble_width(width);

    let mut lines = Vec::new();

    let author = if message.is_from_user() { "Tú" } else { "Tarantibot" };
    lines.push(
        Line::from(vec![
            Span::styled(author.to_string(), style.add_modifier(Modifier::BOLD)),
            Span::styled(" · ".to_string(), style.add_modifier(Modifier::DIM)),
            Span::styled(
                message.sent_at().format("%H:%M").to_string(),
                style.add_modifier(Modifier::DIM),
            ),
        ])
        .alignment(alignment),
    );

    for paragraph in message.text().lines() {
        if paragraph.trim().is_empty() {
            lines.push(Line::from(""));
            continue;
        }
        for wrapped in wrap(paragraph, bubble_width) {
            lines.push(Line::from(Span::styled(wrapped.into_owned(), style)).alignment(alignment));
        }
    }

    lines
}

fn bubble_width(width: u16) -> usize {
    // Bubbles take at most three quarters of the column, like chat apps do.
    ((width as usize) * 3 / 4).max(10)
}

fn base_style(message: &Message) -> Style {
    Style::default().fg(if message.is_from_user() {
        Color::Rgb(255, 223, 128)
    } else {
        Color::Rgb(144, 238, 144)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_user_message_is_right_aligned() {
        let lines = render_message(&Message::user("Hola"), 40);
        assert_eq!(lines.len(), 2);
        assert!(plain(&lines[0]).starts_with("Tú"));
        assert_eq!(plain(&lines[1]), "Hola");
        assert_eq!(lines[1].alignment, Some(Alignment::Right));
    }

    #[test]
    fn test_bot_message_wraps_to_bubble_width() {
        let text = "palabra ".repeat(20);
        let lines = render_message(&Message::bot(text.trim()), 40);

        assert_eq!(lines[1].alignment, Some(Alignment::Left));
        assert!(lines.len() > 2);
        assert!(lines[1..].iter().all(|line| plain(line).chars().count() <= 30));
    }

    #[test]
    fn test_blank_lines_are_kept() {
        let lines = render_message(&Message::bot("uno\n\ndos"), 40);
        let body: Vec<String> = lines[1..].iter().map(plain).collect();
        assert_eq!(body, ["uno", "", "dos"]);
    }
}
