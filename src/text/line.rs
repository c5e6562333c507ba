use std::fmt;

/// An owned, mutable run of characters. Every operation that hands out a
/// piece of the line copies it, so two lines never share storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
	chars: Vec<char>,
}

impl Line {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn from_chars(chars: &[char]) -> Self {
		Self { chars: chars.to_vec() }
	}

	pub fn len(&self) -> usize {
		self.chars.len()
	}

	pub fn is_empty(&self) -> bool {
		self.chars.is_empty()
	}

	pub fn chars(&self) -> &[char] {
		&self.chars
	}

	pub fn char_at(&self, pos: usize) -> Option<char> {
		self.chars.get(pos).copied()
	}

	pub fn push(&mut self, ch: char) -> &mut Self {
		self.chars.push(ch);
		self
	}

	/// Inserts at `pos`, appending when `pos` is past the end.
	pub fn insert(&mut self, pos: usize, ch: char) -> &mut Self {
		let pos = pos.min(self.chars.len());
		self.chars.insert(pos, ch);
		self
	}

	pub fn remove(&mut self, pos: usize) -> Option<char> {
		(pos < self.chars.len()).then(|| self.chars.remove(pos))
	}

	/// Splits at `pos` into `(before, after)`; both halves are fresh copies.
	pub fn split(&self, pos: usize) -> (Line, Line) {
		let pos = pos.min(self.chars.len());
		(Line::from_chars(&self.chars[..pos]), Line::from_chars(&self.chars[pos..]))
	}

	pub fn join(&mut self, other: &Line) -> &mut Self {
		self.chars.extend_from_slice(&other.chars);
		self
	}

	/// Removes `[start, end)` from the line and returns it as a new line.
	pub fn cut(&mut self, start: usize, end: usize) -> Line {
		let end = end.min(self.chars.len());
		if start >= end {
			return Line::new();
		}
		Line { chars: self.chars.drain(start..end).collect() }
	}
}

impl From<&str> for Line {
	fn from(s: &str) -> Self {
		Self { chars: s.chars().collect() }
	}
}

impl From<String> for Line {
	fn from(s: String) -> Self {
		Self::from(s.as_str())
	}
}

impl fmt::Display for Line {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for ch in &self.chars {
			fmt::Write::write_char(f, *ch)?;
		}
		Ok(())
	}
}
