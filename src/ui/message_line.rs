use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

/// The bottom row: an open prompt wins over an error, which wins over
/// nothing.
pub(super) enum MessageLineWidget<'a> {
	Prompt { prompt: &'a str, text: &'a str },
	Error(&'a str),
	Empty,
}

impl MessageLineWidget<'_> {
	/// Column of the prompt cursor when `pos` characters of the text precede
	/// it.
	pub(super) fn cursor_x(&self, pos: usize) -> Option<u16> {
		let MessageLineWidget::Prompt { prompt, text } = self else {
			return None;
		};
		let before: String = text.chars().take(pos).collect();
		Some((prompt.width() + before.width()) as u16)
	}
}

impl Widget for MessageLineWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		let line = match self {
			MessageLineWidget::Prompt { prompt, text } => {
				Line::from(vec![Span::styled(prompt, Style::default().add_modifier(Modifier::BOLD)), Span::raw(text)])
			}
			MessageLineWidget::Error(message) => Line::from(Span::styled(
				message,
				Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
			)),
			MessageLineWidget::Empty => Line::default(),
		};
		Paragraph::new(line).render(area, buf);
	}
}
