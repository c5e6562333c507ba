//! The `:` command line: a one-line input editor and the commands it runs.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use super::{EX_INPUT, Vi};
use crate::editor::Editor;
use crate::emulation::Outcome;
use crate::event::{ControlEvent, Event, Key, KeyEvent};
use crate::text::{Cursor, Line};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExError {
	#[error("Trailing characters: {0}")]
	TrailingCharacters(String),
	#[error("Not an editor command: {0}")]
	NotAnEditorCommand(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
	Nothing,
	/// 1-based line number.
	GotoLine(usize),
	GotoEnd,
	Write { name: Option<PathBuf>, force: bool, quit: bool },
	Quit { force: bool },
}

impl ExCommand {
	pub fn parse(input: &str) -> Result<Self, ExError> {
		let input = input.trim();
		if input.is_empty() {
			return Ok(ExCommand::Nothing);
		}
		let (name, rest) = match input.split_once(char::is_whitespace) {
			Some((name, rest)) => (name, rest.trim()),
			None => (input, ""),
		};
		let without_args = |command: ExCommand| {
			if rest.is_empty() { Ok(command) } else { Err(ExError::TrailingCharacters(rest.to_string())) }
		};

		if name.chars().all(|c| c.is_ascii_digit()) {
			return without_args(ExCommand::GotoLine(name.parse().unwrap_or(usize::MAX)));
		}
		match name {
			"$" => without_args(ExCommand::GotoEnd),
			"q" => without_args(ExCommand::Quit { force: false }),
			"q!" => without_args(ExCommand::Quit { force: true }),
			"w" | "w!" | "wq" | "wq!" | "x" | "x!" => {
				if let Some((_, extra)) = rest.split_once(char::is_whitespace) {
					return Err(ExError::TrailingCharacters(extra.trim().to_string()));
				}
				Ok(ExCommand::Write {
					name: (!rest.is_empty()).then(|| PathBuf::from(rest)),
					force: name.ends_with('!'),
					quit: !name.starts_with('w') || name.starts_with("wq"),
				})
			}
			_ => Err(ExError::NotAnEditorCommand(name.to_string())),
		}
	}
}

/// The text typed after `:` and the cursor within it.
#[derive(Debug, Clone, Default)]
pub(super) struct ExInput {
	text: Line,
	pos: usize,
}

impl ExInput {
	pub(super) fn clear(&mut self) {
		self.text = Line::new();
		self.pos = 0;
	}

	pub(super) fn text(&self) -> String {
		self.text.to_string()
	}

	pub(super) fn pos(&self) -> usize {
		self.pos
	}

	fn insert(&mut self, ch: char) {
		self.text.insert(self.pos, ch);
		self.pos += 1;
	}

	/// Returns `false` when there was nothing left to remove.
	fn backspace(&mut self) -> bool {
		if self.text.is_empty() {
			return false;
		}
		if self.pos > 0 {
			self.text.remove(self.pos - 1);
			self.pos -= 1;
		}
		true
	}

	fn left(&mut self) {
		self.pos = self.pos.saturating_sub(1);
	}

	fn right(&mut self) {
		self.pos = (self.pos + 1).min(self.text.len());
	}
}

impl Vi {
	pub(super) fn to_ex_command(&mut self, _editor: &mut Editor, _event: &Event) -> Outcome {
		self.command_buffer.clear();
		self.ex.clear();
		self.send(ControlEvent::AskInput { id: EX_INPUT, prompt: ":".to_string() });
		Outcome::Handled
	}

	pub(super) fn handle_ex_input(&mut self, editor: &mut Editor, event: &Event) {
		match *event {
			Event::Character(ch) => self.ex.insert(ch),
			Event::Key(KeyEvent { modifiers, key, .. }) if modifiers.is_empty() => match key {
				Key::Backspace => {
					if !self.ex.backspace() {
						self.close_ex();
						return;
					}
				}
				Key::Left => self.ex.left(),
				Key::Right => self.ex.right(),
				Key::Escape => {
					self.close_ex();
					return;
				}
				Key::Enter => {
					let text = self.ex.text();
					self.close_ex();
					self.execute_ex(editor, &text);
					return;
				}
				_ => {
					debug!("not handled in ex input: {:?}", event);
					return;
				}
			},
			Event::Key(_) => {
				debug!("not handled in ex input: {:?}", event);
				return;
			}
		}
		self.send(ControlEvent::UpdateInput { id: EX_INPUT, text: self.ex.text(), pos: self.ex.pos() });
	}

	fn close_ex(&mut self) {
		self.ex.clear();
		self.send(ControlEvent::CloseInput { id: EX_INPUT });
	}

	pub(super) fn execute_ex(&mut self, editor: &mut Editor, text: &str) {
		debug!("ex command {:?}", text);
		let last_line = editor.buffer.len().saturating_sub(1);
		match ExCommand::parse(text) {
			Ok(ExCommand::Nothing) => {}
			Ok(ExCommand::GotoLine(number)) => {
				let line = number.clamp(1, last_line + 1) - 1;
				*editor.cursors.primary_mut() = Cursor::new(line, 0);
			}
			Ok(ExCommand::GotoEnd) => *editor.cursors.primary_mut() = Cursor::new(last_line, 0),
			Ok(ExCommand::Write { name, force, quit }) => {
				self.send(ControlEvent::Save { name, force, quit_after: quit });
			}
			Ok(ExCommand::Quit { force }) => self.send(ControlEvent::Quit { force }),
			Err(err) => {
				debug!("ex command {:?} rejected: {}", text, err);
				self.send(ControlEvent::Error { message: err.to_string() });
			}
		}
		editor.validate(self.past_end());
	}
}
