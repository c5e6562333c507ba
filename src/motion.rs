//! Word and WORD motions.
//!
//! A "word" is a run of alphanumerics or a run of separators; a "WORD" folds
//! separators into alphanumerics so only whitespace splits it. Every motion
//! takes `fold` to pick between the two. An empty line always counts as a
//! single word at column 0.

use crate::text::{Buffer, Cursor, Line};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
	AlphaNumeric,
	Separator,
	Space,
}

pub fn classify(ch: char) -> CharClass {
	if ch.is_alphanumeric() || ch == '_' {
		CharClass::AlphaNumeric
	} else if ch.is_whitespace() {
		CharClass::Space
	} else {
		CharClass::Separator
	}
}

fn class_of(ch: char, fold: bool) -> CharClass {
	match classify(ch) {
		CharClass::Separator if fold => CharClass::AlphaNumeric,
		class => class,
	}
}

/// Columns where a word begins, in ascending order.
pub fn word_starts(line: &Line, fold: bool) -> Vec<usize> {
	if line.is_empty() {
		return vec![0];
	}
	let mut starts = Vec::new();
	let mut prev = CharClass::Space;
	for (pos, ch) in line.chars().iter().enumerate() {
		let class = class_of(*ch, fold);
		if class != CharClass::Space && class != prev {
			starts.push(pos);
		}
		prev = class;
	}
	starts
}

/// Columns where a word ends, in ascending order.
pub fn word_ends(line: &Line, fold: bool) -> Vec<usize> {
	if line.is_empty() {
		return vec![0];
	}
	let chars = line.chars();
	let mut ends = Vec::new();
	for (pos, ch) in chars.iter().enumerate() {
		let class = class_of(*ch, fold);
		if class == CharClass::Space {
			continue;
		}
		let next = chars.get(pos + 1).map(|c| class_of(*c, fold));
		if next != Some(class) {
			ends.push(pos);
		}
	}
	ends
}

fn search_forward(
	buffer: &Buffer,
	cursor: Cursor,
	marks: impl Fn(&Line) -> Vec<usize>,
) -> Option<Cursor> {
	let current = buffer.line(cursor.line)?;
	if let Some(pos) = marks(current).into_iter().find(|p| *p > cursor.pos) {
		return Some(Cursor::new(cursor.line, pos));
	}
	buffer
		.lines()
		.iter()
		.enumerate()
		.skip(cursor.line + 1)
		.find_map(|(idx, line)| marks(line).first().map(|pos| Cursor::new(idx, *pos)))
}

fn search_backward(
	buffer: &Buffer,
	cursor: Cursor,
	marks: impl Fn(&Line) -> Vec<usize>,
) -> Option<Cursor> {
	let current = buffer.line(cursor.line)?;
	if let Some(pos) = marks(current).into_iter().rev().find(|p| *p < cursor.pos) {
		return Some(Cursor::new(cursor.line, pos));
	}
	buffer.lines()[..cursor.line]
		.iter()
		.enumerate()
		.rev()
		.find_map(|(idx, line)| marks(line).last().map(|pos| Cursor::new(idx, *pos)))
}

/// The next word start after the cursor, or `None` when there is none left in
/// the buffer.
pub fn next_word_start(buffer: &Buffer, cursor: Cursor, fold: bool) -> Option<Cursor> {
	search_forward(buffer, cursor, |line| word_starts(line, fold))
}

/// `w` / `W`. Clamps to the last character of the buffer.
pub fn jump_forward(buffer: &Buffer, cursor: Cursor, fold: bool) -> Cursor {
	next_word_start(buffer, cursor, fold).unwrap_or_else(|| buffer.last_char())
}

/// `b` / `B`. Landing exactly on a word start moves to the one before it.
pub fn jump_backward(buffer: &Buffer, cursor: Cursor, fold: bool) -> Cursor {
	search_backward(buffer, cursor, |line| word_starts(line, fold)).unwrap_or_default()
}

/// `e` / `E`.
pub fn jump_forward_end(buffer: &Buffer, cursor: Cursor, fold: bool) -> Cursor {
	search_forward(buffer, cursor, |line| word_ends(line, fold)).unwrap_or_else(|| buffer.last_char())
}

/// `ge` / `gE`.
pub fn jump_backward_end(buffer: &Buffer, cursor: Cursor, fold: bool) -> Cursor {
	search_backward(buffer, cursor, |line| word_ends(line, fold)).unwrap_or_default()
}
