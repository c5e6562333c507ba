use super::Buffer;

/// A position in a buffer. Cursors do not own or borrow the buffer; they
/// are checked against it with [`Cursor::validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor {
	pub line: usize,
	pub pos: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
	Up,
	Down,
	Left,
	Right,
	Begin,
	End,
}

impl Cursor {
	pub const fn new(line: usize, pos: usize) -> Self {
		Self { line, pos }
	}

	pub fn is_before(&self, other: &Cursor) -> bool {
		self < other
	}

	pub fn is_after(&self, other: &Cursor) -> bool {
		self > other
	}

	/// Clamps the cursor into the buffer, allowing the one-past-end column.
	/// Returns `false` if anything had to be adjusted.
	pub fn validate(&mut self, buffer: &Buffer) -> bool {
		self.validate_bounds(buffer, true)
	}

	/// Like [`Cursor::validate`], but `past_end` decides whether the column
	/// may sit one past the last character.
	pub fn validate_bounds(&mut self, buffer: &Buffer, past_end: bool) -> bool {
		let mut valid = true;
		let last_line = buffer.len().saturating_sub(1);
		if self.line > last_line {
			self.line = last_line;
			valid = false;
		}
		let len = buffer.line_len(self.line);
		let max_pos = if past_end { len } else { len.saturating_sub(1) };
		if self.pos > max_pos {
			self.pos = max_pos;
			valid = false;
		}
		valid
	}
}

/// What a structural buffer edit did to the line layout. Produced by the
/// buffer methods that change line counts and consumed by
/// [`CursorSet::reindex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEdit {
	/// `line` was split at `pos`; the tail is now line `line + 1`.
	Split { line: usize, pos: usize },
	/// `line` was appended to `line - 1`, which had `prev_len` characters.
	Joined { line: usize, prev_len: usize },
	/// A new line now lives at index `line`.
	Inserted { line: usize },
	/// Line `line` is gone.
	Removed { line: usize },
	/// The inclusive character range `start..=end` is gone and the two ends
	/// were spliced together on `start.line`.
	RangeRemoved { start: Cursor, end: Cursor },
}

impl LineEdit {
	/// Where `cursor` ends up after the edit.
	pub fn apply(&self, cursor: Cursor) -> Cursor {
		let Cursor { line, pos } = cursor;
		match *self {
			LineEdit::Split { line: at, pos: split } => {
				if line > at {
					Cursor::new(line + 1, pos)
				} else if line == at && pos >= split {
					Cursor::new(line + 1, pos - split)
				} else {
					cursor
				}
			}
			LineEdit::Joined { line: at, prev_len } => {
				if line > at {
					Cursor::new(line - 1, pos)
				} else if line == at && at > 0 {
					Cursor::new(line - 1, pos + prev_len)
				} else {
					cursor
				}
			}
			LineEdit::Inserted { line: at } => {
				if line >= at {
					Cursor::new(line + 1, pos)
				} else {
					cursor
				}
			}
			LineEdit::Removed { line: at } => {
				if line > at {
					Cursor::new(line - 1, pos)
				} else {
					cursor
				}
			}
			LineEdit::RangeRemoved { start, end } => {
				if cursor < start {
					cursor
				} else if cursor <= end {
					start
				} else if line == end.line {
					Cursor::new(start.line, start.pos + (pos - end.pos - 1))
				} else {
					Cursor::new(line - (end.line - start.line), pos)
				}
			}
		}
	}
}

/// An ordered collection of cursors. The first one is the primary cursor.
/// Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorSet {
	cursors: Vec<Cursor>,
}

impl Default for CursorSet {
	fn default() -> Self {
		Self::single(Cursor::default())
	}
}

impl CursorSet {
	/// Builds a set from `cursors`, falling back to a single cursor at the
	/// origin when the list is empty.
	pub fn new(cursors: Vec<Cursor>) -> Self {
		if cursors.is_empty() {
			return Self::default();
		}
		Self { cursors }
	}

	pub fn single(cursor: Cursor) -> Self {
		Self { cursors: vec![cursor] }
	}

	pub fn len(&self) -> usize {
		self.cursors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.cursors.is_empty()
	}

	pub fn primary(&self) -> Cursor {
		self.cursors[0]
	}

	pub fn primary_mut(&mut self) -> &mut Cursor {
		&mut self.cursors[0]
	}

	pub fn get(&self, idx: usize) -> Option<Cursor> {
		self.cursors.get(idx).copied()
	}

	pub fn push(&mut self, cursor: Cursor) {
		self.cursors.push(cursor);
	}

	pub fn iter(&self) -> impl Iterator<Item = &Cursor> {
		self.cursors.iter()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cursor> {
		self.cursors.iter_mut()
	}

	pub fn as_slice(&self) -> &[Cursor] {
		&self.cursors
	}

	/// Indexes of the cursors strictly before `reference`.
	pub fn before(&self, reference: Cursor) -> Vec<usize> {
		self.positions(|c| c < reference)
	}

	/// Indexes of the cursors strictly after `reference`.
	pub fn after(&self, reference: Cursor) -> Vec<usize> {
		self.positions(|c| c > reference)
	}

	fn positions(&self, pred: impl Fn(Cursor) -> bool) -> Vec<usize> {
		self.cursors.iter().enumerate().filter(|(_, c)| pred(**c)).map(|(idx, _)| idx).collect()
	}

	/// Shifts every cursor except `except` to follow a structural edit. The
	/// buffer never does this on its own; the code that performed the edit
	/// calls this once and positions the editing cursor itself.
	pub fn reindex(&mut self, edit: LineEdit, except: Option<usize>) {
		for (idx, cursor) in self.cursors.iter_mut().enumerate() {
			if Some(idx) == except {
				continue;
			}
			*cursor = edit.apply(*cursor);
		}
	}

	/// Moves every cursor past the character that was just inserted at each
	/// of them, accounting for earlier insertions on the same line.
	pub fn advance_after_insert(&mut self) {
		let snapshot = self.cursors.clone();
		for (idx, cursor) in self.cursors.iter_mut().enumerate() {
			let shifted_by = snapshot
				.iter()
				.enumerate()
				.filter(|(other, c)| {
					*other != idx && c.line == cursor.line && (c.pos < cursor.pos || (c.pos == cursor.pos && *other < idx))
				})
				.count();
			cursor.pos += 1 + shifted_by;
		}
	}

	pub fn validate(&mut self, buffer: &Buffer, past_end: bool) -> bool {
		self.cursors.iter_mut().fold(true, |valid, c| c.validate_bounds(buffer, past_end) && valid)
	}
}
