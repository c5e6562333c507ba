use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use unicode_width::UnicodeWidthChar;

use crate::editor::{Editor, Selection};
use crate::text::{self, Cursor};

const TAB_WIDTH: usize = 4;

/// The visible slice of the document, with the selection highlighted.
pub(super) struct TextAreaWidget {
	lines: Vec<Line<'static>>,
}

impl TextAreaWidget {
	/// Builds the rows from `scroll_y` down and returns where the primary
	/// cursor lands inside `area`.
	pub(super) fn from_editor(editor: &Editor, area: Rect, scroll_y: usize) -> (Self, Option<(u16, u16)>) {
		let width = usize::from(area.width);
		let rows = usize::from(area.height);
		let lines = editor
			.buffer
			.get_lines(scroll_y, scroll_y + rows)
			.iter()
			.enumerate()
			.map(|(offset, line)| render_line(line, scroll_y + offset, editor.selection.as_ref(), width))
			.collect();

		let cursor = editor.cursors.primary();
		let cursor_position = (width > 0 && cursor.line >= scroll_y && cursor.line < scroll_y + rows).then(|| {
			let chars = editor.buffer.line(cursor.line).map(text::Line::chars).unwrap_or_default();
			let x = display_width_of_char_prefix(chars, cursor.pos).min(width - 1);
			(area.x.saturating_add(x as u16), area.y.saturating_add((cursor.line - scroll_y) as u16))
		});
		(Self { lines }, cursor_position)
	}
}

impl Widget for TextAreaWidget {
	fn render(self, area: Rect, buf: &mut Buffer) {
		Paragraph::new(self.lines).render(area, buf);
	}
}

/// Moves `scroll_y` the least needed to keep `line` within `rows` rows.
pub(super) fn scroll_to_cursor(scroll_y: usize, line: usize, rows: usize) -> usize {
	if rows == 0 || line < scroll_y {
		line
	} else if line >= scroll_y + rows {
		line + 1 - rows
	} else {
		scroll_y
	}
}

fn char_width(ch: char) -> usize {
	if ch == '\t' { TAB_WIDTH } else { ch.width().unwrap_or(0) }
}

pub(super) fn display_width_of_char_prefix(chars: &[char], n: usize) -> usize {
	chars.iter().take(n).map(|&ch| char_width(ch)).sum()
}

fn render_line(line: &text::Line, line_idx: usize, selection: Option<&Selection>, width: usize) -> Line<'static> {
	let selected = Style::default().add_modifier(Modifier::REVERSED);
	let mut spans: Vec<Span<'static>> = Vec::new();
	let mut run = String::new();
	let mut run_selected = false;
	let mut used = 0;

	for (pos, &ch) in line.chars().iter().enumerate() {
		let w = char_width(ch);
		if used + w > width {
			break;
		}
		used += w;
		let is_selected = selection.is_some_and(|s| s.contains(Cursor::new(line_idx, pos)));
		if is_selected != run_selected && !run.is_empty() {
			let text = std::mem::take(&mut run);
			spans.push(if run_selected { Span::styled(text, selected) } else { Span::raw(text) });
		}
		run_selected = is_selected;
		if ch == '\t' {
			run.extend(std::iter::repeat_n(' ', TAB_WIDTH));
		} else {
			run.push(ch);
		}
	}
	if !run.is_empty() {
		spans.push(if run_selected { Span::styled(run, selected) } else { Span::raw(run) });
	}
	Line::from(spans)
}
