use std::path::{Path, PathBuf};

use crate::persistence::{self, LoadError, SaveError};
use crate::text::{Buffer, Cursor, CursorSet};

/// A normalized selection region, `start` never after `end`. A block
/// selection is the rectangle spanned by the two corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
	pub start: Cursor,
	pub end: Cursor,
	pub block: bool,
}

impl Selection {
	pub fn contains(&self, at: Cursor) -> bool {
		if self.block {
			(self.start.line..=self.end.line).contains(&at.line) && (self.start.pos..=self.end.pos).contains(&at.pos)
		} else {
			self.start <= at && at <= self.end
		}
	}
}

/// One open document: its buffer, the cursors into it and where it lives
/// on disk.
#[derive(Debug, Default)]
pub struct Editor {
	pub buffer: Buffer,
	pub cursors: CursorSet,
	pub selection: Option<Selection>,
	filename: Option<PathBuf>,
}

impl Editor {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_buffer(buffer: Buffer) -> Self {
		Self { buffer, ..Self::default() }
	}

	/// Opens `path`, which does not need to exist yet.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, LoadError> {
		let path = path.into();
		let lines = persistence::load_lines(&path)?;
		Ok(Self { buffer: Buffer::from_lines(lines), filename: Some(path), ..Self::default() })
	}

	pub fn filename(&self) -> Option<&Path> {
		self.filename.as_deref()
	}

	pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
		self.filename = Some(path.into());
	}

	pub fn display_name(&self) -> String {
		self.filename.as_ref().map_or_else(|| "[No Name]".to_string(), |p| p.display().to_string())
	}

	/// Writes the buffer to `name`, or to the document's own file. Writing
	/// over some other existing file needs `force`. On success the buffer is
	/// no longer modified and an unnamed document adopts `name`.
	pub fn save(&mut self, name: Option<&Path>, force: bool) -> Result<PathBuf, SaveError> {
		let target = match (name, self.filename.as_deref()) {
			(Some(name), _) => name.to_path_buf(),
			(None, Some(own)) => own.to_path_buf(),
			(None, None) => return Err(SaveError::NoFilenameSet),
		};
		if let Some(name) = name
			&& !force
			&& self.filename.as_deref() != Some(name)
			&& persistence::exists(name)?
		{
			return Err(SaveError::WouldOverwriteExisting { path: name.to_path_buf() });
		}

		persistence::save_lines(&target, self.buffer.lines())?;
		self.buffer.modified = false;
		if self.filename.is_none() {
			self.filename = Some(target.clone());
		}
		Ok(target)
	}

	/// Re-establishes the buffer and cursor invariants after an edit.
	pub fn validate(&mut self, past_end: bool) -> bool {
		let buffer_ok = self.buffer.validate();
		self.cursors.validate(&self.buffer, past_end) && buffer_ok
	}
}
