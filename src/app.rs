use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::core::{Core, CoreError};
use crate::editor::Editor;
use crate::logging::Logging;
use crate::persistence::LoadError;
use crate::ui::{TerminalSessionError, TerminalUi, start_input_pump};

#[derive(Debug, Error)]
pub enum AppError {
	#[error("open document failed")]
	Open {
		#[source]
		source: LoadError,
	},
	#[error("start terminal failed")]
	Terminal {
		#[source]
		source: TerminalSessionError,
	},
	#[error("editor loop failed")]
	Core {
		#[source]
		source: CoreError,
	},
}

/// Wires a document, an emulation and the terminal front end into a
/// [`Core`] and runs it.
pub struct App {
	config: Config,
	file: Option<PathBuf>,
}

impl App {
	pub fn new(config: Config, file: Option<PathBuf>) -> Self {
		Self { config, file }
	}

	pub fn run(self, logging: Option<Logging>) -> Result<(), AppError> {
		let _log_guard = logging.as_ref().map(|logging| tracing::dispatcher::set_default(logging.dispatch()));
		let editor = match &self.file {
			Some(path) => Editor::open(path.clone()).map_err(|source| AppError::Open { source })?,
			None => Editor::new(),
		};
		info!("starting {:?} emulation on {}", self.config.emulation, editor.display_name());

		let title = format!("novi - {}", editor.display_name());
		let ui = TerminalUi::enter(&title, &self.config.ui).map_err(|source| AppError::Terminal { source })?;
		let (input_tx, input_rx) = flume::bounded(self.config.core.queue_capacity);
		start_input_pump(ui.focus(), input_tx, logging.as_ref().map(|logging| logging.dispatch().clone()));

		let mut core = Core::new(editor, self.config.emulation.create(), ui, input_rx, &self.config.core);
		if let Some(logging) = logging {
			core = core.with_logging(logging);
		}
		core.run().map_err(|source| AppError::Core { source })
	}
}
