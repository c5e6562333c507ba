//! The terminal front end: draws the document with ratatui and pumps
//! crossterm key presses into the coordinator's input queue.

mod input;
mod message_line;
mod status_bar;
mod terminal_session;
mod text_area;

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use tracing::debug;

use crate::config::UiConfig;
use crate::core::Presentation;
use crate::editor::Editor;
use crate::emulation::CursorShape;
use crate::event::InputSource;
pub(crate) use input::{Focus, start_input_pump};
use message_line::MessageLineWidget;
use status_bar::StatusBarWidget;
use terminal_session::TerminalSession;
pub use terminal_session::TerminalSessionError;
use text_area::{TextAreaWidget, scroll_to_cursor};

#[derive(Debug)]
struct Prompt {
	source: InputSource,
	prompt: String,
	text: String,
	pos: usize,
}

/// Everything drawn besides the document itself.
#[derive(Debug, Default)]
struct Screen {
	status: String,
	error: Option<(String, Instant)>,
	prompt: Option<Prompt>,
	scroll_y: usize,
}

impl Screen {
	fn expire_error(&mut self, now: Instant) {
		if self.error.as_ref().is_some_and(|(_, until)| *until <= now) {
			self.error = None;
		}
	}

	fn draw(&mut self, frame: &mut Frame<'_>, editor: &Editor) {
		let chunks = Layout::vertical([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
			.split(frame.area());

		self.scroll_y =
			scroll_to_cursor(self.scroll_y, editor.cursors.primary().line, usize::from(chunks[0].height));
		let (text_area, text_cursor) = TextAreaWidget::from_editor(editor, chunks[0], self.scroll_y);
		let message_line = match (&self.prompt, &self.error) {
			(Some(prompt), _) => MessageLineWidget::Prompt { prompt: &prompt.prompt, text: &prompt.text },
			(None, Some((message, _))) => MessageLineWidget::Error(message),
			(None, None) => MessageLineWidget::Empty,
		};
		let cursor_position = match &self.prompt {
			Some(prompt) => message_line
				.cursor_x(prompt.pos)
				.map(|x| (chunks[2].x.saturating_add(x).min(chunks[2].right().saturating_sub(1)), chunks[2].y)),
			None => text_cursor,
		};

		frame.render_widget(text_area, chunks[0]);
		frame.render_widget(StatusBarWidget::new(&self.status), chunks[1]);
		frame.render_widget(message_line, chunks[2]);
		if let Some(position) = cursor_position {
			frame.set_cursor_position(position);
		}
	}
}

pub struct TerminalUi {
	session: TerminalSession,
	focus: Focus,
	screen: Screen,
	error_timeout: Duration,
	next_source: u32,
}

impl TerminalUi {
	/// Switches the terminal to raw mode and the alternate screen. Both are
	/// restored when the value is dropped.
	pub fn enter(title: &str, config: &UiConfig) -> Result<Self, TerminalSessionError> {
		Ok(Self {
			session: TerminalSession::enter(title)?,
			focus: Focus::new(),
			screen: Screen::default(),
			error_timeout: config.error_timeout(),
			next_source: InputSource::MAIN.0 + 1,
		})
	}

	pub(crate) fn focus(&self) -> Focus {
		self.focus.clone()
	}
}

impl Presentation for TerminalUi {
	type Error = TerminalSessionError;

	fn render(&mut self, editor: &Editor, cursor: CursorShape) -> Result<(), TerminalSessionError> {
		self.screen.expire_error(Instant::now());
		self.session.sync_cursor_style(cursor)?;
		let screen = &mut self.screen;
		self.session.draw(|frame| screen.draw(frame, editor))
	}

	fn set_status(&mut self, text: String) {
		self.screen.status = text;
	}

	fn set_error(&mut self, text: String) {
		self.screen.error = Some((text, Instant::now() + self.error_timeout));
	}

	fn dimension(&self) -> (u16, u16) {
		self.session.size()
	}

	fn ask_input(&mut self, prompt: &str) -> InputSource {
		let source = InputSource(self.next_source);
		self.next_source = self.next_source.wrapping_add(1).max(InputSource::MAIN.0 + 1);
		if let Some(old) = self.screen.prompt.replace(Prompt {
			source,
			prompt: prompt.to_string(),
			text: String::new(),
			pos: 0,
		}) {
			debug!("prompt {:?} replaced by {:?}", old.source, source);
		}
		self.focus.set(source);
		source
	}

	fn close_input(&mut self, source: InputSource) {
		if self.screen.prompt.as_ref().is_some_and(|prompt| prompt.source == source) {
			self.screen.prompt = None;
			self.focus.set(InputSource::MAIN);
		}
	}

	fn update_input(&mut self, source: InputSource, text: &str, pos: usize) {
		match &mut self.screen.prompt {
			Some(prompt) if prompt.source == source => {
				prompt.text = text.to_string();
				prompt.pos = pos;
			}
			_ => debug!("update for closed prompt {:?}", source),
		}
	}
}

#[cfg(test)]
mod tests {
	use ratatui::Terminal;
	use ratatui::backend::TestBackend;

	use super::*;
	use crate::text::{Buffer, Cursor, CursorSet};

	fn draw(screen: &mut Screen, editor: &Editor) -> Terminal<TestBackend> {
		let mut terminal = Terminal::new(TestBackend::new(12, 4)).unwrap();
		terminal.draw(|frame| screen.draw(frame, editor)).unwrap();
		terminal
	}

	fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
		let buf = terminal.backend().buffer();
		(0..buf.area.height)
			.map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect())
			.collect()
	}

	#[test]
	fn screen_should_scroll_to_cursor_and_show_status() {
		let mut editor = Editor::with_buffer(Buffer::from_lines(["a", "b", "c", "d"]));
		editor.cursors = CursorSet::single(Cursor::new(3, 0));
		let mut screen = Screen { status: "row 4 col 1".to_string(), ..Screen::default() };
		let mut terminal = draw(&mut screen, &editor);

		assert_eq!(screen.scroll_y, 2);
		assert_eq!(rows(&terminal), vec!["c           ", "d           ", " row 4 col 1", "            "]);
		terminal.backend_mut().assert_cursor_position((0, 1));
	}

	#[test]
	fn prompt_should_take_the_cursor_and_hide_errors() {
		let editor = Editor::new();
		let mut screen = Screen {
			error: Some(("boom".to_string(), Instant::now() + Duration::from_secs(60))),
			prompt: Some(Prompt { source: InputSource(1), prompt: ":".to_string(), text: "wq".to_string(), pos: 2 }),
			..Screen::default()
		};
		let mut terminal = draw(&mut screen, &editor);
		assert_eq!(rows(&terminal)[3], ":wq         ");
		terminal.backend_mut().assert_cursor_position((3, 3));

		screen.prompt = None;
		let terminal = draw(&mut screen, &editor);
		assert_eq!(rows(&terminal)[3], "boom        ");
	}

	#[test]
	fn errors_should_expire() {
		let now = Instant::now();
		let mut screen = Screen { error: Some(("boom".to_string(), now + Duration::from_secs(1))), ..Screen::default() };
		screen.expire_error(now);
		assert!(screen.error.is_some());
		screen.expire_error(now + Duration::from_secs(1));
		assert!(screen.error.is_none());
	}
}
