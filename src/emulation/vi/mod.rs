//! A vi-like modal emulation.
//!
//! Events are matched against a priority-ordered rule table (see
//! [`dispatch`]); after any rule fires, the pending command buffer is parsed
//! and executed once it names a complete command.

mod commands;
mod dispatch;
mod ex;
mod movement;
mod selection;

#[cfg(test)]
mod tests;

use std::ops::ControlFlow;

use tracing::debug;

use super::{CursorShape, Emulation, MAIN_INPUT, Outcome, fit_to_width};
use crate::editor::Editor;
use crate::event::{ControlEvent, ControlSink, Event, InputId};
use crate::text::Cursor;

pub use ex::{ExCommand, ExError};

/// The overlay prompt used for `:` commands.
pub const EX_INPUT: InputId = InputId(1);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
	#[default]
	Command,
	Edit,
	Select,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionKind {
	#[default]
	None,
	Fluid,
	Lines,
	Block,
}

#[derive(Debug, Default)]
pub struct Vi {
	mode: Mode,
	selection_kind: SelectionKind,
	selection_start: Cursor,
	selection_end: Cursor,
	command_buffer: String,
	ex: ex::ExInput,
	sink: Option<ControlSink>,
}

impl Vi {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn selection_kind(&self) -> SelectionKind {
		self.selection_kind
	}

	/// Keystrokes typed in command mode that do not form a command yet.
	pub fn pending_command(&self) -> &str {
		&self.command_buffer
	}

	fn set_mode(&mut self, mode: Mode) {
		if self.mode != mode {
			debug!("mode {:?} -> {:?}", self.mode, mode);
			self.mode = mode;
		}
	}

	fn past_end(&self) -> bool {
		self.mode == Mode::Edit
	}

	fn send(&self, event: ControlEvent) {
		match &self.sink {
			Some(sink) => sink.send(event),
			None => debug!("no control sink, dropping {:?}", event),
		}
	}

	fn mode_tag(&self) -> Option<&'static str> {
		match (self.mode, self.selection_kind) {
			(Mode::Edit, _) => Some("--INSERT--"),
			(Mode::Select, SelectionKind::Lines) => Some("--VISUAL LINE--"),
			(Mode::Select, SelectionKind::Block) => Some("--VISUAL BLOCK--"),
			(Mode::Select, _) => Some("--VISUAL--"),
			(Mode::Command, _) => None,
		}
	}
}

impl Emulation for Vi {
	fn handle_event(&mut self, editor: &mut Editor, id: InputId, event: &Event) -> ControlFlow<()> {
		match id {
			EX_INPUT => {
				self.handle_ex_input(editor, event);
				return ControlFlow::Continue(());
			}
			MAIN_INPUT => {}
			other => {
				debug!("vi emulation has no input {:?}", other);
				return ControlFlow::Continue(());
			}
		}

		if dispatch::dispatch(self, editor, event) == Outcome::Unhandled {
			debug!("not handled: {:?} in {:?} mode", event, self.mode);
			return ControlFlow::Continue(());
		}
		let flow = self.execute_pending(editor);
		editor.validate(self.past_end());
		self.sync_selection(editor);
		flow
	}

	fn status(&self, editor: &Editor, width: usize) -> String {
		let cursor = editor.cursors.primary();
		let mut parts: Vec<String> = Vec::new();
		if let Some(tag) = self.mode_tag() {
			parts.push(tag.to_string());
		}
		parts.push(editor.display_name());
		if editor.buffer.modified {
			parts.push("(modified)".to_string());
		}
		if !self.command_buffer.is_empty() {
			parts.push(self.command_buffer.clone());
		}
		parts.push(format!("row {} col {}", cursor.line + 1, cursor.pos + 1));
		fit_to_width(&parts.join(" "), width)
	}

	fn set_control_sink(&mut self, sink: ControlSink) {
		self.sink = Some(sink);
	}

	fn cursor_shape(&self) -> CursorShape {
		if self.mode == Mode::Edit { CursorShape::Bar } else { CursorShape::Block }
	}
}
