//! Input events, the patterns the dispatch tables match them with, and the
//! control events an emulation sends back to the coordinator.

use std::path::PathBuf;

use bitflags::bitflags;
use flume::TrySendError;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
	Rune,
	Escape,
	Enter,
	Up,
	Down,
	Left,
	Right,
	Home,
	End,
	PgUp,
	PgDn,
	Backspace,
	Tab,
	Delete,
	Insert,
	F1,
	F2,
	F3,
	F4,
	F5,
	F6,
	F7,
	F8,
	F9,
	F10,
	F11,
	F12,
}

bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct Modifiers: u8 {
		const SHIFT = 1;
		const CTRL = 1 << 1;
		const ALT = 1 << 2;
		const META = 1 << 3;
	}
}

/// A non-printable key press, or a modified printable one (`ch` set, `key`
/// is [`Key::Rune`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
	pub modifiers: Modifiers,
	pub key: Key,
	pub ch: Option<char>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
	Key(KeyEvent),
	Character(char),
}

impl Event {
	pub const fn key(key: Key) -> Self {
		Event::Key(KeyEvent { modifiers: Modifiers::empty(), key, ch: None })
	}

	pub const fn ctrl(ch: char) -> Self {
		Event::Key(KeyEvent { modifiers: Modifiers::CTRL, key: Key::Rune, ch: Some(ch) })
	}
}

/// Matches events with wildcards. An unset char matches any char.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
	Key { modifiers: Modifiers, key: Key, ch: Option<char> },
	Character(Option<char>),
}

impl Pattern {
	pub const ANY_CHARACTER: Self = Pattern::Character(None);

	pub const fn key(key: Key) -> Self {
		Pattern::Key { modifiers: Modifiers::empty(), key, ch: None }
	}

	pub const fn ctrl(ch: char) -> Self {
		Pattern::Key { modifiers: Modifiers::CTRL, key: Key::Rune, ch: Some(ch) }
	}

	pub const fn character(ch: char) -> Self {
		Pattern::Character(Some(ch))
	}

	pub fn matches(&self, event: &Event) -> bool {
		match (self, event) {
			(Pattern::Key { modifiers, key, ch }, Event::Key(ev)) => {
				*modifiers == ev.modifiers && *key == ev.key && ch.is_none_or(|c| ev.ch == Some(c))
			}
			(Pattern::Character(ch), Event::Character(c)) => ch.is_none_or(|p| p == *c),
			_ => false,
		}
	}
}

/// Who an input event came from: the main text area or an overlay prompt.
/// Handed out by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputSource(pub u32);

impl InputSource {
	pub const MAIN: Self = Self(0);
}

/// The logical input stream an emulation is talking to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InputId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
	pub source: InputSource,
	pub event: Event,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
	AskInput { id: InputId, prompt: String },
	CloseInput { id: InputId },
	UpdateInput { id: InputId, text: String, pos: usize },
	Save { name: Option<PathBuf>, force: bool, quit_after: bool },
	Quit { force: bool },
	Error { message: String },
}

/// The emulation's end of the control queue.
#[derive(Debug, Clone)]
pub struct ControlSink {
	tx: flume::Sender<ControlEvent>,
}

impl ControlSink {
	pub fn new(tx: flume::Sender<ControlEvent>) -> Self {
		Self { tx }
	}

	/// Queues `event` without blocking; the coordinator is the only consumer
	/// and is the thread calling this.
	pub fn send(&self, event: ControlEvent) {
		trace!("control event: {:?}", event);
		match self.tx.try_send(event) {
			Ok(()) => {}
			Err(TrySendError::Full(event)) => {
				warn!("control queue full, dropping {:?}", event);
			}
			Err(TrySendError::Disconnected(event)) => {
				warn!("control queue disconnected, dropping {:?}", event);
			}
		}
	}
}
