use std::io::{self, Stdout};

use crossterm::cursor::SetCursorStyle;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use thiserror::Error;

use crate::emulation::CursorShape;

#[derive(Debug, Error)]
pub enum TerminalSessionError {
	#[error("switch terminal to raw mode failed")]
	RawMode {
		#[source]
		source: io::Error,
	},
	#[error("prepare screen for {title:?} failed")]
	Screen {
		title: String,
		#[source]
		source: io::Error,
	},
	#[error("redraw failed")]
	Draw {
		#[source]
		source: io::Error,
	},
	#[error("change cursor to {shape:?} failed")]
	CursorShape {
		shape: CursorShape,
		#[source]
		source: io::Error,
	},
}

/// Undoes whatever part of the setup succeeded.
struct Restore {
	alternate_screen: bool,
}

impl Drop for Restore {
	fn drop(&mut self) {
		let mut stdout = io::stdout();
		if self.alternate_screen {
			let _ = execute!(stdout, SetCursorStyle::DefaultUserShape, LeaveAlternateScreen);
		}
		let _ = disable_raw_mode();
	}
}

fn cursor_style(shape: CursorShape) -> SetCursorStyle {
	match shape {
		CursorShape::Bar => SetCursorStyle::SteadyBar,
		CursorShape::Block => SetCursorStyle::SteadyBlock,
	}
}

/// The editor's hold on the real terminal: raw mode plus the alternate
/// screen, both released on drop.
pub(crate) struct TerminalSession {
	terminal: Terminal<CrosstermBackend<Stdout>>,
	shown_shape: Option<CursorShape>,
	_restore: Restore,
}

impl TerminalSession {
	pub(crate) fn enter(title: &str) -> Result<Self, TerminalSessionError> {
		enable_raw_mode().map_err(|source| TerminalSessionError::RawMode { source })?;
		let mut restore = Restore { alternate_screen: false };

		let screen_error = |source| TerminalSessionError::Screen { title: title.to_string(), source };
		let mut stdout = io::stdout();
		execute!(stdout, EnterAlternateScreen).map_err(screen_error)?;
		restore.alternate_screen = true;
		execute!(stdout, SetTitle(title)).map_err(screen_error)?;
		let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(screen_error)?;

		Ok(Self { terminal, shown_shape: None, _restore: restore })
	}

	pub(crate) fn draw(&mut self, render: impl FnOnce(&mut Frame<'_>)) -> Result<(), TerminalSessionError> {
		self.terminal.draw(render).map(drop).map_err(|source| TerminalSessionError::Draw { source })
	}

	/// Falls back to 80x24 when the terminal does not report a size.
	pub(crate) fn size(&self) -> (u16, u16) {
		self.terminal.size().map_or((80, 24), |size| (size.width, size.height))
	}

	/// Only writes to the terminal when the shape actually changes.
	pub(crate) fn sync_cursor_style(&mut self, shape: CursorShape) -> Result<(), TerminalSessionError> {
		if self.shown_shape == Some(shape) {
			return Ok(());
		}
		execute!(self.terminal.backend_mut(), cursor_style(shape))
			.map_err(|source| TerminalSessionError::CursorShape { shape, source })?;
		self.shown_shape = Some(shape);
		Ok(())
	}
}
