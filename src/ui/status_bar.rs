use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

pub(super) struct StatusBarWidget<'a> {
	status_line: &'a str,
}

impl<'a> StatusBarWidget<'a> {
	pub(super) fn new(status_line: &'a str) -> Self {
		Self { status_line }
	}
}

impl Widget for StatusBarWidget<'_> {
	fn render(self, area: Rect, buf: &mut Buffer) {
		Paragraph::new(Line::from(Span::styled(
			format!(" {}", self.status_line),
			Style::default().fg(Color::White).bg(Color::Blue).add_modifier(Modifier::BOLD),
		)))
		.style(Style::default().bg(Color::Blue))
		.render(area, buf);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn status_bar_should_fill_the_row() {
		let area = Rect::new(0, 0, 12, 1);
		let mut buf = Buffer::empty(area);
		StatusBarWidget::new("row 1 col 1").render(area, &mut buf);

		let text: String = (0..area.width).map(|x| buf[(x, 0)].symbol().to_string()).collect();
		assert_eq!(text, " row 1 col 1");
		assert!((0..area.width).all(|x| buf[(x, 0)].bg == Color::Blue));
	}
}
