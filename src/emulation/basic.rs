use std::ops::ControlFlow;

use tracing::debug;

use super::editing::{backspace_at_cursors, delete_at_cursors, insert_at_cursors, split_at_cursors};
use super::{Emulation, MAIN_INPUT, Outcome, fit_to_width};
use crate::editor::Editor;
use crate::event::{ControlEvent, ControlSink, Event, InputId, Key, KeyEvent, Modifiers};
use crate::text::{Buffer, Cursor, Direction};

/// A non-modal editor: keys insert, arrows move, control keys save and quit.
#[derive(Debug, Default)]
pub struct Basic {
	sink: Option<ControlSink>,
}

impl Basic {
	pub fn new() -> Self {
		Self::default()
	}

	fn send(&self, event: ControlEvent) {
		match &self.sink {
			Some(sink) => sink.send(event),
			None => debug!("no control sink, dropping {:?}", event),
		}
	}

	fn handle_ctrl(&mut self, editor: &mut Editor, ch: char) -> Outcome {
		match ch.to_ascii_lowercase() {
			'h' => backspace_at_cursors(editor),
			's' => self.send(ControlEvent::Save { name: None, force: false, quit_after: false }),
			'q' => self.send(ControlEvent::Quit { force: false }),
			_ => return Outcome::Unhandled,
		}
		Outcome::Handled
	}

	fn handle_key(&mut self, editor: &mut Editor, key: Key) -> Outcome {
		let direction = match key {
			Key::Up => Direction::Up,
			Key::Down => Direction::Down,
			Key::Left => Direction::Left,
			Key::Right => Direction::Right,
			Key::Home => Direction::Begin,
			Key::End => Direction::End,
			Key::Enter => {
				split_at_cursors(editor);
				return Outcome::Handled;
			}
			Key::Backspace => {
				backspace_at_cursors(editor);
				return Outcome::Handled;
			}
			Key::Delete => {
				delete_at_cursors(editor);
				return Outcome::Handled;
			}
			Key::Tab => {
				insert_at_cursors(editor, '\t');
				return Outcome::Handled;
			}
			Key::Escape => return Outcome::Handled,
			_ => return Outcome::Unhandled,
		};
		for cursor in editor.cursors.iter_mut() {
			move_cursor(&editor.buffer, cursor, direction);
		}
		Outcome::Handled
	}
}

/// Moves like a plain text field: left and right wrap across line ends.
fn move_cursor(buffer: &Buffer, cursor: &mut Cursor, direction: Direction) {
	let last_line = buffer.len().saturating_sub(1);
	match direction {
		Direction::Up => cursor.line = cursor.line.saturating_sub(1),
		Direction::Down => cursor.line = (cursor.line + 1).min(last_line),
		Direction::Left => {
			if cursor.pos > 0 {
				cursor.pos -= 1;
			} else if cursor.line > 0 {
				cursor.line -= 1;
				cursor.pos = buffer.line_len(cursor.line);
			}
		}
		Direction::Right => {
			if cursor.pos < buffer.line_len(cursor.line) {
				cursor.pos += 1;
			} else if cursor.line < last_line {
				cursor.line += 1;
				cursor.pos = 0;
			}
		}
		Direction::Begin => cursor.pos = 0,
		Direction::End => cursor.pos = buffer.line_len(cursor.line),
	}
	cursor.pos = cursor.pos.min(buffer.line_len(cursor.line));
}

impl Emulation for Basic {
	fn handle_event(&mut self, editor: &mut Editor, id: InputId, event: &Event) -> ControlFlow<()> {
		if id != MAIN_INPUT {
			debug!("basic emulation has no input {:?}", id);
			return ControlFlow::Continue(());
		}
		let outcome = match *event {
			Event::Key(KeyEvent { modifiers, key: Key::Rune, ch: Some(ch) }) if modifiers == Modifiers::CTRL => {
				self.handle_ctrl(editor, ch)
			}
			Event::Key(KeyEvent { modifiers, key, .. }) if modifiers.is_empty() => self.handle_key(editor, key),
			Event::Character(ch) => {
				insert_at_cursors(editor, ch);
				Outcome::Handled
			}
			Event::Key(_) => Outcome::Unhandled,
		};
		if outcome == Outcome::Unhandled {
			debug!("not handled: {:?}", event);
		}
		editor.validate(true);
		ControlFlow::Continue(())
	}

	fn status(&self, editor: &Editor, width: usize) -> String {
		let cursor = editor.cursors.primary();
		let modified = if editor.buffer.modified { " (modified)" } else { "" };
		let status = format!(
			"{}{}  row {} col {}",
			editor.display_name(),
			modified,
			cursor.line + 1,
			cursor.pos + 1
		);
		fit_to_width(&status, width)
	}

	fn set_control_sink(&mut self, sink: ControlSink) {
		self.sink = Some(sink);
	}
}
