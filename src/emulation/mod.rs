//! Keystroke interpretation policies.

mod basic;
mod editing;
pub mod vi;

use std::ops::ControlFlow;

use serde::Deserialize;
use unicode_width::UnicodeWidthChar;

use crate::editor::Editor;
use crate::event::{ControlSink, Event, InputId};

pub use basic::Basic;
pub use vi::Vi;

/// The input stream every emulation reads its main keystrokes from.
pub const MAIN_INPUT: InputId = InputId(0);

/// Whether a dispatch rule consumed an event. Unhandled events fall through
/// to the next rule and are finally ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	Handled,
	Unhandled,
}

/// How the presentation layer should draw the primary cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorShape {
	#[default]
	Bar,
	Block,
}

pub trait Emulation {
	/// Applies one event to `editor`. `Break` stops the editor.
	fn handle_event(&mut self, editor: &mut Editor, id: InputId, event: &Event) -> ControlFlow<()>;

	/// A one-line status for a display `width` columns wide.
	fn status(&self, editor: &Editor, width: usize) -> String;

	fn set_control_sink(&mut self, sink: ControlSink);

	fn cursor_shape(&self) -> CursorShape {
		CursorShape::Bar
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EmulationKind {
	#[default]
	Vi,
	Basic,
}

impl EmulationKind {
	pub fn create(self) -> Box<dyn Emulation> {
		match self {
			EmulationKind::Vi => Box::new(Vi::new()),
			EmulationKind::Basic => Box::new(Basic::new()),
		}
	}
}

/// Truncates `text` so it takes at most `width` terminal columns.
pub(crate) fn fit_to_width(text: &str, width: usize) -> String {
	let mut used = 0;
	let mut out = String::with_capacity(text.len());
	for ch in text.chars() {
		let w = ch.width().unwrap_or(0);
		if used + w > width {
			break;
		}
		used += w;
		out.push(ch);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::fit_to_width;

	#[test]
	fn fit_to_width_should_count_wide_chars() {
		assert_eq!(fit_to_width("hello", 3), "hel");
		assert_eq!(fit_to_width("日本語", 5), "日本");
		assert_eq!(fit_to_width("short", 80), "short");
	}
}
