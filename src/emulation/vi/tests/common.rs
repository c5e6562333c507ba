use std::ops::ControlFlow;

use crate::editor::Editor;
use crate::emulation::vi::{EX_INPUT, Mode, Vi};
use crate::emulation::{Emulation, MAIN_INPUT};
use crate::event::{ControlEvent, ControlSink, Event, Key};
use crate::text::{Buffer, Cursor, CursorSet};

pub(super) struct Harness {
	pub(super) vi: Vi,
	pub(super) editor: Editor,
	rx: flume::Receiver<ControlEvent>,
}

pub(super) fn setup(mode: Mode, line: usize, pos: usize, lines: &[&str]) -> Harness {
	let (tx, rx) = flume::unbounded();
	let mut vi = Vi::new();
	vi.set_control_sink(ControlSink::new(tx));
	vi.mode = mode;
	let mut editor = Editor::with_buffer(Buffer::from_lines(lines.iter().copied()));
	editor.cursors = CursorSet::single(Cursor::new(line, pos));
	Harness { vi, editor, rx }
}

impl Harness {
	pub(super) fn press(&mut self, event: Event) -> ControlFlow<()> {
		self.vi.handle_event(&mut self.editor, MAIN_INPUT, &event)
	}

	pub(super) fn key(&mut self, key: Key) -> ControlFlow<()> {
		self.press(Event::key(key))
	}

	/// Presses every character of `keys` in turn.
	pub(super) fn keys(&mut self, keys: &str) -> ControlFlow<()> {
		for ch in keys.chars() {
			self.press(Event::Character(ch))?;
		}
		ControlFlow::Continue(())
	}

	pub(super) fn ex_key(&mut self, key: Key) {
		let flow = self.vi.handle_event(&mut self.editor, EX_INPUT, &Event::key(key));
		assert_eq!(flow, ControlFlow::Continue(()));
	}

	pub(super) fn ex_type(&mut self, text: &str) {
		for ch in text.chars() {
			let flow = self.vi.handle_event(&mut self.editor, EX_INPUT, &Event::Character(ch));
			assert_eq!(flow, ControlFlow::Continue(()));
		}
	}

	/// `:` followed by `command` and Enter.
	pub(super) fn ex(&mut self, command: &str) {
		self.keys(":");
		self.ex_type(command);
		self.ex_key(Key::Enter);
	}

	pub(super) fn set_cursors(&mut self, cursors: &[(usize, usize)]) {
		self.editor.cursors = CursorSet::new(cursors.iter().map(|(l, p)| Cursor::new(*l, *p)).collect());
	}

	pub(super) fn cursors(&self) -> Vec<(usize, usize)> {
		self.editor.cursors.iter().map(|c| (c.line, c.pos)).collect()
	}

	pub(super) fn cursor(&self) -> Cursor {
		self.editor.cursors.primary()
	}

	pub(super) fn lines(&self) -> Vec<String> {
		self.editor.buffer.to_lines()
	}

	pub(super) fn control_events(&self) -> Vec<ControlEvent> {
		self.rx.try_iter().collect()
	}
}
