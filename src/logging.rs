use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;
use time::macros::format_description;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;

use crate::config::LogConfig;

const LOG_FILE_NAME: &str = "novi.log";

#[derive(Debug, Error)]
pub enum LoggingError {
	#[error("create log directory {path} failed")]
	CreateLogDir {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid log filter {filter:?}")]
	InvalidFilter {
		filter: String,
		#[source]
		source: tracing_subscriber::filter::ParseError,
	},
}

/// An initialized subscriber that is not installed anywhere yet. Whoever owns
/// it decides which threads log through it; dropping it flushes the file.
pub struct Logging {
	dispatch: Dispatch,
	directory: PathBuf,
	_guard: WorkerGuard,
}

impl Logging {
	pub fn dispatch(&self) -> &Dispatch {
		&self.dispatch
	}

	pub fn directory(&self) -> &Path {
		&self.directory
	}
}

impl std::fmt::Debug for Logging {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Logging").field("directory", &self.directory).finish_non_exhaustive()
	}
}

pub fn init_logging(config: &LogConfig) -> Result<Logging, LoggingError> {
	let log_dir = config.directory.clone().unwrap_or_else(user_log_dir);
	std::fs::create_dir_all(&log_dir)
		.map_err(|source| LoggingError::CreateLogDir { path: log_dir.clone(), source })?;

	let filter = build_filter(std::env::var("RUST_LOG").ok(), &config.filter)?;
	let timer =
		UtcTime::new(format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]"));
	let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME));
	let subscriber = tracing_subscriber::fmt()
		.with_timer(timer)
		.with_env_filter(filter)
		.with_writer(writer)
		.with_ansi(false)
		.finish();

	Ok(Logging { dispatch: Dispatch::new(subscriber), directory: log_dir, _guard: guard })
}

/// `RUST_LOG` wins when it parses, then the configured directive.
fn build_filter(env: Option<String>, configured: &str) -> Result<EnvFilter, LoggingError> {
	if let Some(env) = env
		&& let Ok(filter) = EnvFilter::try_new(&env)
	{
		return Ok(filter);
	}
	EnvFilter::try_new(configured)
		.map_err(|source| LoggingError::InvalidFilter { filter: configured.to_string(), source })
}

fn user_log_dir() -> PathBuf {
	log_dir_from_env(|name| std::env::var_os(name))
}

/// Resolves the per-user log directory from `env`. Relative values are
/// ignored, as XDG asks; with nothing usable the logs go to the temp dir.
fn log_dir_from_env(env: impl Fn(&str) -> Option<OsString>) -> PathBuf {
	let absolute = |name: &str| env(name).map(PathBuf::from).filter(|path| path.is_absolute());
	let dir = if cfg!(target_os = "windows") {
		absolute("LOCALAPPDATA").map(|dir| dir.join("novi").join("logs"))
	} else if cfg!(target_os = "macos") {
		absolute("HOME").map(|home| home.join("Library").join("Logs").join("novi"))
	} else {
		absolute("XDG_STATE_HOME")
			.or_else(|| absolute("HOME").map(|home| home.join(".local").join("state")))
			.map(|state| state.join("novi").join("logs"))
	};
	dir.unwrap_or_else(|| std::env::temp_dir().join("novi").join("logs"))
}
