//! Multi-cursor edits shared by the emulations. Each one walks the cursors
//! by index and re-indexes the whole set after every structural change, so
//! a cursor visited later always sees the current layout.

use crate::editor::Editor;

pub(super) fn insert_at_cursors(editor: &mut Editor, ch: char) {
	editor.buffer.insert_char_at_cursors(&editor.cursors, ch);
	editor.cursors.advance_after_insert();
}

/// Splits the line at every cursor; each cursor ends up at the start of the
/// line it split off.
pub(super) fn split_at_cursors(editor: &mut Editor) {
	for idx in 0..editor.cursors.len() {
		let Some(cursor) = editor.cursors.get(idx) else {
			continue;
		};
		if let Some(edit) = editor.buffer.split_line(cursor) {
			editor.cursors.reindex(edit, None);
		}
	}
}

/// Removes the character before every cursor, joining with the previous
/// line at column 0.
pub(super) fn backspace_at_cursors(editor: &mut Editor) {
	for idx in 0..editor.cursors.len() {
		let Some(cursor) = editor.cursors.get(idx) else {
			continue;
		};
		let edit = if cursor.pos > 0 {
			editor.buffer.remove_characters(cursor, true, 1).edit
		} else {
			editor.buffer.join_line_with_previous(cursor.line)
		};
		if let Some(edit) = edit {
			editor.cursors.reindex(edit, None);
		}
	}
}

/// Removes the character under every cursor, pulling up the next line when
/// a cursor sits past the end of its line.
pub(super) fn delete_at_cursors(editor: &mut Editor) {
	for idx in 0..editor.cursors.len() {
		let Some(cursor) = editor.cursors.get(idx) else {
			continue;
		};
		let edit = if cursor.pos < editor.buffer.line_len(cursor.line) {
			editor.buffer.remove_characters(cursor, false, 1).edit
		} else {
			editor.buffer.join_line_with_previous(cursor.line + 1)
		};
		if let Some(edit) = edit {
			editor.cursors.reindex(edit, None);
		}
	}
}
