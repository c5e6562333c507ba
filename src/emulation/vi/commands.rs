use std::ops::ControlFlow;

use tracing::debug;

use super::movement::move_cursor;
use super::{Mode, Vi};
use crate::command::parse_command;
use crate::editor::Editor;
use crate::emulation::Outcome;
use crate::emulation::editing::{backspace_at_cursors, insert_at_cursors, split_at_cursors};
use crate::event::{ControlEvent, Event};
use crate::motion::{CharClass, classify, jump_forward_end, next_word_start, word_ends};
use crate::text::{Buffer, Cursor, Direction};

/// Characters that accumulate in the command buffer.
const COMMAND_ALPHABET: &str = "BbcdeEgGhjklxXwWZQ0123456789$^";

/// Commands that still need more keystrokes.
fn is_command_prefix(command: &str) -> bool {
	matches!(command, "" | "g" | "d" | "c" | "Z")
}

impl Vi {
	pub(super) fn to_command_mode(&mut self, _editor: &mut Editor, _event: &Event) -> Outcome {
		self.set_mode(Mode::Command);
		Outcome::Handled
	}

	/// Escape outside edit mode: forget pending keystrokes and any selection.
	pub(super) fn clear_command(&mut self, _editor: &mut Editor, _event: &Event) -> Outcome {
		self.command_buffer.clear();
		self.cancel_selection();
		Outcome::Handled
	}

	pub(super) fn command_enter(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		let past_end = self.past_end();
		for cursor in editor.cursors.iter_mut() {
			move_cursor(&editor.buffer, cursor, Direction::Down, past_end);
			move_cursor(&editor.buffer, cursor, Direction::Begin, past_end);
		}
		Outcome::Handled
	}

	pub(super) fn edit_enter(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		split_at_cursors(editor);
		Outcome::Handled
	}

	/// `i I o O a A`. Only the primary cursor is positioned.
	pub(super) fn insertion_key(&mut self, editor: &mut Editor, event: &Event) -> Outcome {
		let Event::Character(ch) = *event else {
			return Outcome::Unhandled;
		};
		let primary = editor.cursors.primary();
		match ch {
			'i' => {}
			'I' => editor.cursors.primary_mut().pos = 0,
			'o' | 'O' => {
				let before = ch == 'O';
				if let Some(edit) = editor.buffer.insert_line(primary, "", before) {
					editor.cursors.reindex(edit, Some(0));
					let line = if before { primary.line } else { primary.line + 1 };
					*editor.cursors.primary_mut() = Cursor::new(line, 0);
				}
			}
			'a' => editor.cursors.primary_mut().pos += 1,
			'A' => editor.cursors.primary_mut().pos = editor.buffer.line_len(primary.line),
			_ => return Outcome::Unhandled,
		}
		self.command_buffer.clear();
		self.set_mode(Mode::Edit);
		Outcome::Handled
	}

	/// In edit mode removes the character before each cursor, joining lines
	/// at column 0. Elsewhere it only moves left, wrapping to the end of the
	/// previous line.
	pub(super) fn backspace(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		if self.mode == Mode::Edit {
			backspace_at_cursors(editor);
			return Outcome::Handled;
		}
		for cursor in editor.cursors.iter_mut() {
			if cursor.pos == 0 && cursor.line > 0 {
				move_cursor(&editor.buffer, cursor, Direction::Up, false);
				move_cursor(&editor.buffer, cursor, Direction::End, false);
			} else {
				move_cursor(&editor.buffer, cursor, Direction::Left, false);
			}
		}
		Outcome::Handled
	}

	pub(super) fn insert_tab(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		insert_at_cursors(editor, '\t');
		Outcome::Handled
	}

	pub(super) fn insert_character(&mut self, editor: &mut Editor, event: &Event) -> Outcome {
		let Event::Character(ch) = *event else {
			return Outcome::Unhandled;
		};
		insert_at_cursors(editor, ch);
		Outcome::Handled
	}

	pub(super) fn command_key(&mut self, _editor: &mut Editor, event: &Event) -> Outcome {
		match *event {
			Event::Character(ch) if COMMAND_ALPHABET.contains(ch) => {
				self.command_buffer.push(ch);
				Outcome::Handled
			}
			_ => Outcome::Unhandled,
		}
	}

	/// Runs the command buffer if it holds a complete command. Only `ZQ`
	/// breaks.
	pub(super) fn execute_pending(&mut self, editor: &mut Editor) -> ControlFlow<()> {
		if self.command_buffer.is_empty() {
			return ControlFlow::Continue(());
		}
		if self.command_buffer == "0" {
			self.jump_line_edge(editor, 1, true);
			self.command_buffer.clear();
			return ControlFlow::Continue(());
		}

		let (count, command) = parse_command(&self.command_buffer);
		let mut flow = ControlFlow::Continue(());
		match command.as_str() {
			"h" => self.move_all(editor, Direction::Left, count),
			"j" => self.move_all(editor, Direction::Down, count),
			"k" => self.move_all(editor, Direction::Up, count),
			"l" => self.move_all(editor, Direction::Right, count),
			"w" | "W" | "b" | "B" | "e" | "E" | "ge" | "gE" => self.jump_words(editor, &command, count),
			"x" | "X" => remove_characters(editor, count, command == "X"),
			"gg" | "G" => self.jump_top_bottom(editor, count, command == "gg"),
			"^" | "$" => self.jump_line_edge(editor, count, command == "^"),
			"ZZ" => {
				self.send(ControlEvent::Save { name: None, force: false, quit_after: false });
				self.send(ControlEvent::Quit { force: false });
			}
			"ZQ" => {
				self.send(ControlEvent::Quit { force: true });
				flow = ControlFlow::Break(());
			}
			"dd" => remove_lines(editor, count),
			"cw" | "dw" => self.change_delete_words(editor, count, command == "cw"),
			pending if is_command_prefix(pending) => return ControlFlow::Continue(()),
			_ => debug!("not handled: command {:?}", self.command_buffer),
		}
		self.command_buffer.clear();
		flow
	}

	/// `cw` removes up to the end of the word (just the character when it
	/// already ends a word) and enters edit mode. `dw` removes up to the next
	/// word start but stops at the end of the line.
	fn change_delete_words(&mut self, editor: &mut Editor, count: usize, change: bool) {
		if change {
			self.set_mode(Mode::Edit);
		}
		let start = editor.cursors.primary();
		let line_len = editor.buffer.line_len(start.line);
		if count == 0 || start.pos >= line_len {
			return;
		}
		let end = if change {
			change_word_end(&editor.buffer, start, count)
		} else {
			delete_word_end(&editor.buffer, start, count, line_len)
		};
		if let Some(edit) = editor.buffer.remove_between_cursors(start, end).edit {
			editor.cursors.reindex(edit, Some(0));
		}
	}
}

fn remove_characters(editor: &mut Editor, count: usize, before: bool) {
	for idx in 0..editor.cursors.len() {
		let Some(cursor) = editor.cursors.get(idx) else {
			continue;
		};
		if let Some(edit) = editor.buffer.remove_characters(cursor, before, count).edit {
			editor.cursors.reindex(edit, None);
		}
	}
}

/// `dd`, at the primary cursor.
fn remove_lines(editor: &mut Editor, count: usize) {
	let line = editor.cursors.primary().line;
	let available = editor.buffer.len().saturating_sub(line);
	for _ in 0..count.min(available) {
		if let Some(edit) = editor.buffer.remove_line(line) {
			editor.cursors.reindex(edit, Some(0));
		}
	}
}

fn is_word_end(buffer: &Buffer, at: Cursor) -> bool {
	buffer.line(at.line).is_some_and(|line| {
		line.char_at(at.pos).is_some_and(|ch| classify(ch) != CharClass::Space)
			&& word_ends(line, false).contains(&at.pos)
	})
}

fn change_word_end(buffer: &Buffer, start: Cursor, count: usize) -> Cursor {
	let mut end = start;
	for i in 0..count {
		if i == 0 && is_word_end(buffer, start) {
			continue;
		}
		let next = jump_forward_end(buffer, end, false);
		if next <= end {
			break;
		}
		end = next;
	}
	end
}

fn delete_word_end(buffer: &Buffer, start: Cursor, count: usize, line_len: usize) -> Cursor {
	let line_end = Cursor::new(start.line, line_len - 1);
	let mut at = start;
	for _ in 0..count {
		match next_word_start(buffer, at, false) {
			Some(next) if next.line == start.line => at = next,
			_ => return line_end,
		}
	}
	Cursor::new(start.line, at.pos - 1)
}
