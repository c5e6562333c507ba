use super::{Cursor, CursorSet, Line, LineEdit};

/// The lines of one open document. A buffer always holds at least one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
	lines: Vec<Line>,
	pub modified: bool,
}

/// Text cut out of a buffer by [`Buffer::remove_between_cursors`], plus the
/// layout change needed to re-index sibling cursors. `edit` is `None` when
/// nothing was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
	pub text: Buffer,
	pub edit: Option<LineEdit>,
}

impl Default for Buffer {
	fn default() -> Self {
		Self::new()
	}
}

impl Buffer {
	pub fn new() -> Self {
		Self { lines: vec![Line::new()], modified: false }
	}

	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut buffer = Self { lines: lines.into_iter().map(|l| Line::from(l.as_ref())).collect(), modified: false };
		buffer.validate();
		buffer
	}

	/// A detached buffer that may be empty; only used for removed text.
	fn detached() -> Self {
		Self { lines: Vec::new(), modified: false }
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	pub fn line(&self, idx: usize) -> Option<&Line> {
		self.lines.get(idx)
	}

	pub fn line_len(&self, idx: usize) -> usize {
		self.lines.get(idx).map_or(0, Line::len)
	}

	pub fn lines(&self) -> &[Line] {
		&self.lines
	}

	pub fn to_lines(&self) -> Vec<String> {
		self.lines.iter().map(Line::to_string).collect()
	}

	/// Clamped slice of `[start, end)`; never panics.
	pub fn get_lines(&self, start: usize, end: usize) -> &[Line] {
		let end = end.min(self.lines.len());
		if start >= end {
			return &[];
		}
		&self.lines[start..end]
	}

	/// Re-inserts a single empty line if the buffer ran empty. Returns
	/// `false` when that was necessary.
	pub fn validate(&mut self) -> bool {
		if self.lines.is_empty() {
			self.lines.push(Line::new());
			return false;
		}
		true
	}

	/// The last valid character position of the buffer (the origin for an
	/// empty last line).
	pub fn last_char(&self) -> Cursor {
		let line = self.lines.len().saturating_sub(1);
		Cursor::new(line, self.line_len(line).saturating_sub(1))
	}

	/// Inserts `ch` at every cursor without moving any of them. Insertion
	/// runs right to left so that positions later on the same line stay
	/// valid; callers advance the cursors afterwards.
	pub fn insert_char_at_cursors(&mut self, cursors: &CursorSet, ch: char) {
		let mut targets = cursors.as_slice().to_vec();
		targets.sort_unstable_by(|a, b| b.cmp(a));
		for c in targets {
			if let Some(line) = self.lines.get_mut(c.line) {
				line.insert(c.pos, ch);
				self.modified = true;
			}
		}
	}

	pub fn remove_char_before_cursor(&mut self, cursor: Cursor) -> bool {
		if cursor.pos == 0 {
			return false;
		}
		let Some(line) = self.lines.get_mut(cursor.line) else {
			return false;
		};
		let removed = line.remove(cursor.pos - 1).is_some();
		self.modified |= removed;
		removed
	}

	/// Splits the line under `cursor` in two at its column.
	pub fn split_line(&mut self, cursor: Cursor) -> Option<LineEdit> {
		let line = self.lines.get(cursor.line)?;
		let pos = cursor.pos.min(line.len());
		let (before, after) = line.split(pos);
		self.lines.splice(cursor.line..=cursor.line, [before, after]);
		self.modified = true;
		Some(LineEdit::Split { line: cursor.line, pos })
	}

	/// Inserts a new line holding `text` before or after the cursor's line.
	pub fn insert_line(&mut self, cursor: Cursor, text: &str, before: bool) -> Option<LineEdit> {
		if cursor.line >= self.lines.len() {
			return None;
		}
		let at = if before { cursor.line } else { cursor.line + 1 };
		self.lines.insert(at, Line::from(text));
		self.modified = true;
		Some(LineEdit::Inserted { line: at })
	}

	/// Removes line `idx`. Removing the last remaining line leaves a single
	/// empty line behind.
	pub fn remove_line(&mut self, idx: usize) -> Option<LineEdit> {
		if idx >= self.lines.len() {
			return None;
		}
		self.lines.remove(idx);
		self.modified = true;
		self.validate();
		Some(LineEdit::Removed { line: idx })
	}

	/// Appends line `idx` to line `idx - 1`.
	pub fn join_line_with_previous(&mut self, idx: usize) -> Option<LineEdit> {
		if idx == 0 || idx >= self.lines.len() {
			return None;
		}
		let tail = self.lines.remove(idx);
		let prev = &mut self.lines[idx - 1];
		let prev_len = prev.len();
		prev.join(&tail);
		self.modified = true;
		Some(LineEdit::Joined { line: idx, prev_len })
	}

	/// Removes up to `count` characters before the cursor (not including
	/// the one under it) or from the cursor onwards (including it).
	pub fn remove_characters(&mut self, cursor: Cursor, before: bool, count: usize) -> Removal {
		if count == 0 {
			return Removal { text: Self::detached(), edit: None };
		}
		if before {
			if cursor.pos == 0 {
				return Removal { text: Self::detached(), edit: None };
			}
			let start = cursor.pos.saturating_sub(count);
			return self.remove_between_cursors(Cursor::new(cursor.line, start), Cursor::new(cursor.line, cursor.pos - 1));
		}
		let len = self.line_len(cursor.line);
		if len == 0 || cursor.pos >= len {
			return Removal { text: Self::detached(), edit: None };
		}
		let end = cursor.pos.saturating_add(count - 1).min(len - 1);
		self.remove_between_cursors(cursor, Cursor::new(cursor.line, end))
	}

	/// Removes the inclusive range `start..=end`, possibly across lines, and
	/// returns what was removed. Nothing happens when `start` is after `end`.
	pub fn remove_between_cursors(&mut self, start: Cursor, end: Cursor) -> Removal {
		let mut removed = Self::detached();
		if start > end || start.line >= self.lines.len() {
			return Removal { text: removed, edit: None };
		}
		let end = if end.line >= self.lines.len() { self.last_char() } else { end };

		if start.line == end.line {
			let part = self.lines[start.line].cut(start.pos, end.pos.saturating_add(1));
			if part.is_empty() {
				return Removal { text: removed, edit: None };
			}
			removed.lines.push(part);
		} else {
			let (head, first) = self.lines[start.line].split(start.pos);
			removed.lines.push(first);
			removed.lines.extend(self.lines[start.line + 1..end.line].iter().cloned());
			let (last, tail) = self.lines[end.line].split(end.pos.saturating_add(1));
			removed.lines.push(last);

			let mut joined = head;
			joined.join(&tail);
			self.lines[start.line] = joined;
			self.lines.drain(start.line + 1..=end.line);
		}
		self.modified = true;
		Removal { text: removed, edit: Some(LineEdit::RangeRemoved { start, end }) }
	}

	/// Inserts the content of `other` at `at`, the inverse of
	/// [`Buffer::remove_between_cursors`].
	pub fn insert_buffer_at(&mut self, at: Cursor, other: &Buffer) {
		let Some(target) = self.lines.get(at.line) else {
			return;
		};
		let Some((first, rest)) = other.lines.split_first() else {
			return;
		};
		let (head, tail) = target.split(at.pos);
		let mut new_lines = Vec::with_capacity(other.lines.len());
		let mut current = head;
		current.join(first);
		for line in rest {
			new_lines.push(current);
			current = line.clone();
		}
		current.join(&tail);
		new_lines.push(current);
		self.lines.splice(at.line..=at.line, new_lines);
		self.modified = true;
	}
}
