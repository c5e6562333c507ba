use super::Vi;
use crate::editor::Editor;
use crate::emulation::Outcome;
use crate::event::{Event, Key};
use crate::motion;
use crate::text::{Buffer, Cursor, Direction};

/// Moves one step, never leaving the line horizontally. With `past_end`
/// the cursor may sit one past the last character. Returns whether the
/// cursor moved.
pub(super) fn move_cursor(buffer: &Buffer, cursor: &mut Cursor, direction: Direction, past_end: bool) -> bool {
	let before = *cursor;
	let ceiling = |line: usize| {
		let len = buffer.line_len(line);
		if past_end { len } else { len.saturating_sub(1) }
	};
	match direction {
		Direction::Up => cursor.line = cursor.line.saturating_sub(1),
		Direction::Down => {
			if cursor.line + 1 < buffer.len() {
				cursor.line += 1;
			}
		}
		Direction::Left => cursor.pos = cursor.pos.saturating_sub(1),
		Direction::Right => {
			if cursor.pos < ceiling(cursor.line) {
				cursor.pos += 1;
			}
		}
		Direction::Begin => cursor.pos = 0,
		Direction::End => cursor.pos = ceiling(cursor.line),
	}
	cursor.pos = cursor.pos.min(ceiling(cursor.line));
	*cursor != before
}

/// Repeats [`move_cursor`] up to `count` times, stopping once it gets stuck.
pub(super) fn move_many(buffer: &Buffer, cursor: &mut Cursor, direction: Direction, count: usize, past_end: bool) {
	for _ in 0..count {
		if !move_cursor(buffer, cursor, direction, past_end) {
			break;
		}
	}
}

type WordMotion = fn(&Buffer, Cursor, bool) -> Cursor;

fn word_motion(command: &str) -> Option<(WordMotion, bool)> {
	let motion: (WordMotion, bool) = match command {
		"w" => (motion::jump_forward, false),
		"W" => (motion::jump_forward, true),
		"b" => (motion::jump_backward, false),
		"B" => (motion::jump_backward, true),
		"e" => (motion::jump_forward_end, false),
		"E" => (motion::jump_forward_end, true),
		"ge" => (motion::jump_backward_end, false),
		"gE" => (motion::jump_backward_end, true),
		_ => return None,
	};
	Some(motion)
}

impl Vi {
	pub(super) fn move_cursors(&mut self, editor: &mut Editor, event: &Event) -> Outcome {
		let Event::Key(key) = event else {
			return Outcome::Unhandled;
		};
		let direction = match key.key {
			Key::Left => Direction::Left,
			Key::Right => Direction::Right,
			Key::Up => Direction::Up,
			Key::Down => Direction::Down,
			Key::Home => Direction::Begin,
			Key::End => Direction::End,
			_ => return Outcome::Unhandled,
		};
		self.move_all(editor, direction, 1);
		Outcome::Handled
	}

	pub(super) fn move_all(&mut self, editor: &mut Editor, direction: Direction, count: usize) {
		let past_end = self.past_end();
		for cursor in editor.cursors.iter_mut() {
			move_many(&editor.buffer, cursor, direction, count, past_end);
		}
	}

	/// `w W b B e E ge gE`, `count` times for every cursor.
	pub(super) fn jump_words(&mut self, editor: &mut Editor, command: &str, count: usize) {
		let Some((jump, fold)) = word_motion(command) else {
			return;
		};
		for cursor in editor.cursors.iter_mut() {
			for _ in 0..count {
				let next = jump(&editor.buffer, *cursor, fold);
				if next == *cursor {
					break;
				}
				*cursor = next;
			}
		}
	}

	/// `gg` and `G`. A count greater than one is a line number for both.
	pub(super) fn jump_top_bottom(&mut self, editor: &mut Editor, count: usize, top: bool) {
		let past_end = self.past_end();
		let last_line = editor.buffer.len().saturating_sub(1);
		for cursor in editor.cursors.iter_mut() {
			if count > 1 {
				*cursor = Cursor::default();
				move_many(&editor.buffer, cursor, Direction::Down, count - 1, past_end);
			} else if top {
				*cursor = Cursor::default();
			} else {
				*cursor = Cursor::new(last_line, 0);
			}
		}
	}

	/// `^` and `$`. `$` with a count first moves `count - 1` lines down.
	pub(super) fn jump_line_edge(&mut self, editor: &mut Editor, count: usize, start: bool) {
		let past_end = self.past_end();
		for cursor in editor.cursors.iter_mut() {
			if start {
				cursor.pos = 0;
			} else {
				move_many(&editor.buffer, cursor, Direction::Down, count.saturating_sub(1), past_end);
				move_cursor(&editor.buffer, cursor, Direction::End, past_end);
			}
		}
	}
}
