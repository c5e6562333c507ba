//! The coordinator: the single owner of the document, feeding input to the
//! emulation and carrying out the control requests it sends back.

use std::collections::HashMap;
use std::ops::ControlFlow;

use flume::{RecvError, Selector};
use thiserror::Error;
use tracing::{debug, error, info, trace};

use crate::config::CoreConfig;
use crate::editor::Editor;
use crate::emulation::{CursorShape, Emulation, MAIN_INPUT};
use crate::event::{ControlEvent, ControlSink, InputEvent, InputId, InputSource};
use crate::logging::Logging;

const QUIT_GUARD: &str = "No write since last change (add ! to override)";

#[derive(Debug, Error)]
pub enum CoreError {
	#[error("presentation layer failed")]
	Presentation {
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},
}

/// What the coordinator needs from whatever shows the document.
pub trait Presentation {
	type Error: std::error::Error + Send + Sync + 'static;

	fn render(&mut self, editor: &Editor, cursor: CursorShape) -> Result<(), Self::Error>;

	fn set_status(&mut self, text: String);

	/// Shows `text` as an error. Clearing it again is up to the implementation.
	fn set_error(&mut self, text: String);

	/// `(width, height)` in terminal cells.
	fn dimension(&self) -> (u16, u16);

	/// Opens an overlay prompt and returns the source its keystrokes will be
	/// tagged with.
	fn ask_input(&mut self, prompt: &str) -> InputSource;

	fn close_input(&mut self, source: InputSource);

	fn update_input(&mut self, source: InputSource, text: &str, pos: usize);
}

enum Next {
	Input(Result<InputEvent, RecvError>),
	Control(Result<ControlEvent, RecvError>),
}

pub struct Core<P> {
	editor: Editor,
	emulation: Box<dyn Emulation>,
	presentation: P,
	input_rx: flume::Receiver<InputEvent>,
	control_rx: flume::Receiver<ControlEvent>,
	control: ControlSink,
	ids: HashMap<InputSource, InputId>,
	sources: HashMap<InputId, InputSource>,
	/// Open overlays, newest last.
	overlays: Vec<InputSource>,
	logging: Option<Logging>,
}

impl<P: Presentation> Core<P> {
	pub fn new(
		editor: Editor,
		mut emulation: Box<dyn Emulation>,
		presentation: P,
		input_rx: flume::Receiver<InputEvent>,
		config: &CoreConfig,
	) -> Self {
		let (control_tx, control_rx) = flume::bounded(config.queue_capacity);
		let control = ControlSink::new(control_tx);
		emulation.set_control_sink(control.clone());
		Self {
			editor,
			emulation,
			presentation,
			input_rx,
			control_rx,
			control,
			ids: HashMap::from([(InputSource::MAIN, MAIN_INPUT)]),
			sources: HashMap::from([(MAIN_INPUT, InputSource::MAIN)]),
			overlays: Vec::new(),
			logging: None,
		}
	}

	/// Installs `logging` as the default subscriber while [`Core::run`] runs.
	pub fn with_logging(mut self, logging: Logging) -> Self {
		self.logging = Some(logging);
		self
	}

	pub fn editor(&self) -> &Editor {
		&self.editor
	}

	pub fn presentation(&self) -> &P {
		&self.presentation
	}

	/// Runs until the emulation or a quit request stops it, or until the
	/// input queue is closed.
	pub fn run(&mut self) -> Result<(), CoreError> {
		let _log_guard = self.logging.as_ref().map(|logging| tracing::dispatcher::set_default(logging.dispatch()));
		info!("core loop started for {}", self.editor.display_name());

		loop {
			while let Ok(event) = self.control_rx.try_recv() {
				if self.handle_control(event).is_break() {
					info!("core loop stopped by request");
					return Ok(());
				}
			}

			let (width, _) = self.presentation.dimension();
			let status = self.emulation.status(&self.editor, usize::from(width));
			self.presentation.set_status(status);
			self.presentation
				.render(&self.editor, self.emulation.cursor_shape())
				.map_err(|err| CoreError::Presentation { source: Box::new(err) })?;

			let next = Selector::new()
				.recv(&self.control_rx, Next::Control)
				.recv(&self.input_rx, Next::Input)
				.wait();
			let flow = match next {
				Next::Control(Ok(event)) => self.handle_control(event),
				Next::Input(Ok(input)) => self.handle_input(input),
				Next::Input(Err(RecvError::Disconnected)) => {
					info!("input queue closed, stopping core loop");
					return Ok(());
				}
				Next::Control(Err(err)) => {
					error!("control queue failed: {}", err);
					return Ok(());
				}
			};
			if flow.is_break() {
				info!("core loop stopped by emulation");
				return Ok(());
			}
		}
	}

	/// Main-area input that arrives while an overlay is open was read before
	/// the presentation switched focus, so it goes to the newest overlay.
	fn handle_input(&mut self, input: InputEvent) -> ControlFlow<()> {
		let source = match self.overlays.last() {
			Some(&overlay) if input.source == InputSource::MAIN => {
				trace!("redirecting main input to overlay {:?}", overlay);
				overlay
			}
			_ => input.source,
		};
		let Some(&id) = self.ids.get(&source) else {
			debug!("not handled: input from unknown source {:?}", input.source);
			return ControlFlow::Continue(());
		};
		self.emulation.handle_event(&mut self.editor, id, &input.event)
	}

	fn handle_control(&mut self, event: ControlEvent) -> ControlFlow<()> {
		trace!("handling control event: {:?}", event);
		match event {
			ControlEvent::AskInput { id, prompt } => {
				let source = self.presentation.ask_input(&prompt);
				self.ids.insert(source, id);
				self.sources.insert(id, source);
				self.overlays.push(source);
			}
			ControlEvent::CloseInput { id } => match self.sources.remove(&id) {
				Some(source) => {
					self.ids.remove(&source);
					self.overlays.retain(|open| *open != source);
					self.presentation.close_input(source);
				}
				None => debug!("close for unknown input {:?}", id),
			},
			ControlEvent::UpdateInput { id, text, pos } => match self.sources.get(&id) {
				Some(&source) => self.presentation.update_input(source, &text, pos),
				None => debug!("update for unknown input {:?}", id),
			},
			ControlEvent::Save { name, force, quit_after } => match self.editor.save(name.as_deref(), force) {
				Ok(path) => {
					info!("saved {}", path.display());
					if quit_after {
						return ControlFlow::Break(());
					}
				}
				Err(err) => {
					error!("save failed: {}", err);
					self.control.send(ControlEvent::Error { message: err.to_string() });
				}
			},
			ControlEvent::Quit { force } => {
				if self.editor.buffer.modified && !force {
					self.presentation.set_error(QUIT_GUARD.to_string());
				} else {
					return ControlFlow::Break(());
				}
			}
			ControlEvent::Error { message } => self.presentation.set_error(message),
		}
		ControlFlow::Continue(())
	}
}
