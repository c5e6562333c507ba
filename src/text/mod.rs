//! The document model: lines, the buffer that owns them and the cursors that
//! address them.
//!
//! Buffer methods only ever touch the cursor they are handed. Whenever an
//! edit changes the number of lines, the method returns a [`LineEdit`] and the
//! caller feeds it to [`CursorSet::reindex`] to keep sibling cursors in place.

mod buffer;
mod cursor;
mod line;

pub use buffer::{Buffer, Removal};
pub use cursor::{Cursor, CursorSet, Direction, LineEdit};
pub use line::Line;

#[cfg(test)]
mod tests;
