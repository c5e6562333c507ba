use super::{Mode, SelectionKind, Vi};
use crate::editor::{Editor, Selection};
use crate::emulation::Outcome;
use crate::event::Event;
use crate::text::{Buffer, Cursor};

impl Vi {
	pub(super) fn selection_fluid(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		self.toggle_selection(editor, SelectionKind::Fluid);
		Outcome::Handled
	}

	pub(super) fn selection_lines(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		self.toggle_selection(editor, SelectionKind::Lines);
		Outcome::Handled
	}

	pub(super) fn selection_block(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		self.toggle_selection(editor, SelectionKind::Block);
		Outcome::Handled
	}

	pub(super) fn select_remove(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		self.remove_selection(editor, false);
		Outcome::Handled
	}

	pub(super) fn select_change(&mut self, editor: &mut Editor, _event: &Event) -> Outcome {
		self.remove_selection(editor, true);
		Outcome::Handled
	}

	/// Starts a selection anchored at the primary cursor, switches the kind
	/// of a running one, or cancels it when `kind` is already active.
	fn toggle_selection(&mut self, editor: &Editor, kind: SelectionKind) {
		self.command_buffer.clear();
		if self.mode != Mode::Select {
			self.selection_start = editor.cursors.primary();
			self.selection_end = self.selection_start;
			self.selection_kind = kind;
			self.set_mode(Mode::Select);
		} else if self.selection_kind == kind {
			self.cancel_selection();
		} else {
			self.selection_kind = kind;
		}
	}

	pub(super) fn cancel_selection(&mut self) {
		self.selection_kind = SelectionKind::None;
		if self.mode == Mode::Select {
			self.set_mode(Mode::Command);
		}
	}

	/// Follows the primary cursor with the selection end and publishes the
	/// region on the editor.
	pub(super) fn sync_selection(&mut self, editor: &mut Editor) {
		if self.mode == Mode::Select {
			self.selection_end = editor.cursors.primary();
		}
		editor.selection = self.selection_region(&editor.buffer);
	}

	/// The anchor and end ordered so `start` comes first, then narrowed by
	/// kind. Block columns are ordered independently of the lines.
	pub(super) fn selection_region(&self, buffer: &Buffer) -> Option<Selection> {
		if self.selection_kind == SelectionKind::None {
			return None;
		}
		let (mut start, mut end) = if self.selection_end < self.selection_start {
			(self.selection_end, self.selection_start)
		} else {
			(self.selection_start, self.selection_end)
		};
		match self.selection_kind {
			SelectionKind::Block => {
				if end.pos < start.pos {
					std::mem::swap(&mut start.pos, &mut end.pos);
				}
			}
			SelectionKind::Lines => {
				start.pos = 0;
				end.pos = buffer.line_len(end.line).saturating_sub(1);
			}
			SelectionKind::Fluid | SelectionKind::None => {}
		}
		Some(Selection { start, end, block: self.selection_kind == SelectionKind::Block })
	}

	/// Deletes the selected region. A line selection leaves one empty line
	/// behind.
	pub(super) fn remove_selection(&mut self, editor: &mut Editor, change: bool) {
		let Some(region) = self.selection_region(&editor.buffer) else {
			return;
		};
		match self.selection_kind {
			SelectionKind::Block => {
				for line in (region.start.line..=region.end.line).rev() {
					let len = editor.buffer.line_len(line);
					if region.start.pos >= len {
						continue;
					}
					let end = Cursor::new(line, region.end.pos.min(len - 1));
					let start = Cursor::new(line, region.start.pos);
					if let Some(edit) = editor.buffer.remove_between_cursors(start, end).edit {
						editor.cursors.reindex(edit, Some(0));
					}
				}
			}
			_ => {
				if let Some(edit) = editor.buffer.remove_between_cursors(region.start, region.end).edit {
					editor.cursors.reindex(edit, Some(0));
				}
			}
		}
		*editor.cursors.primary_mut() = region.start;
		self.selection_kind = SelectionKind::None;
		self.set_mode(if change { Mode::Edit } else { Mode::Command });
	}
}
