use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use crossterm::event::{self as term, KeyCode, KeyEventKind, KeyModifiers};
use tracing::{Dispatch, error, info, trace};

use crate::event::{Event, InputEvent, InputSource, Key, KeyEvent, Modifiers};

/// The source whose prompt currently has the keyboard, shared between the
/// presentation layer and the input pump.
#[derive(Debug, Clone)]
pub(crate) struct Focus(Arc<AtomicU32>);

impl Focus {
	pub(crate) fn new() -> Self {
		Self(Arc::new(AtomicU32::new(InputSource::MAIN.0)))
	}

	pub(crate) fn get(&self) -> InputSource {
		InputSource(self.0.load(Ordering::Acquire))
	}

	pub(crate) fn set(&self, source: InputSource) {
		self.0.store(source.0, Ordering::Release);
	}
}

/// Reads terminal events on a background thread and pushes them, tagged
/// with the focused source, until the terminal or the queue goes away.
pub(crate) fn start_input_pump(focus: Focus, input_tx: flume::Sender<InputEvent>, dispatch: Option<Dispatch>) {
	thread::spawn(move || {
		let _log_guard = dispatch.as_ref().map(tracing::dispatcher::set_default);
		loop {
			let evt = match term::read() {
				Ok(evt) => evt,
				Err(err) => {
					error!("input pump stopped: failed to read terminal event: {}", err);
					break;
				}
			};
			let Some(event) = translate(&evt) else {
				continue;
			};
			let input = InputEvent { source: focus.get(), event };
			trace!("input {:?}", input);
			if input_tx.send(input).is_err() {
				info!("input pump stopped: input queue closed");
				break;
			}
		}
	});
}

/// Key presses only. A plain or shifted printable key becomes a character
/// event; everything else a key event.
pub(crate) fn translate(event: &term::Event) -> Option<Event> {
	let term::Event::Key(key) = event else {
		return None;
	};
	if key.kind == KeyEventKind::Release {
		return None;
	}
	let modifiers = modifiers(key.modifiers);
	let (key, ch) = match key.code {
		KeyCode::Char(ch) => {
			if !modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
				return Some(Event::Character(ch));
			}
			(Key::Rune, Some(ch))
		}
		KeyCode::Esc => (Key::Escape, None),
		KeyCode::Enter => (Key::Enter, None),
		KeyCode::Up => (Key::Up, None),
		KeyCode::Down => (Key::Down, None),
		KeyCode::Left => (Key::Left, None),
		KeyCode::Right => (Key::Right, None),
		KeyCode::Home => (Key::Home, None),
		KeyCode::End => (Key::End, None),
		KeyCode::PageUp => (Key::PgUp, None),
		KeyCode::PageDown => (Key::PgDn, None),
		KeyCode::Backspace => (Key::Backspace, None),
		KeyCode::Tab => (Key::Tab, None),
		KeyCode::BackTab => {
			return Some(Event::Key(KeyEvent { modifiers: modifiers | Modifiers::SHIFT, key: Key::Tab, ch: None }));
		}
		KeyCode::Delete => (Key::Delete, None),
		KeyCode::Insert => (Key::Insert, None),
		KeyCode::F(n) => (function_key(n)?, None),
		_ => return None,
	};
	Some(Event::Key(KeyEvent { modifiers, key, ch }))
}

fn modifiers(mods: KeyModifiers) -> Modifiers {
	let mut out = Modifiers::empty();
	out.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
	out.set(Modifiers::CTRL, mods.contains(KeyModifiers::CONTROL));
	out.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
	out.set(Modifiers::META, mods.intersects(KeyModifiers::META | KeyModifiers::SUPER));
	out
}

fn function_key(n: u8) -> Option<Key> {
	const KEYS: [Key; 12] = [
		Key::F1,
		Key::F2,
		Key::F3,
		Key::F4,
		Key::F5,
		Key::F6,
		Key::F7,
		Key::F8,
		Key::F9,
		Key::F10,
		Key::F11,
		Key::F12,
	];
	KEYS.get(usize::from(n).checked_sub(1)?).copied()
}
