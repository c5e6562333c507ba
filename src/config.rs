//! User configuration: an optional TOML file overridden by command-line
//! flags.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::emulation::EmulationKind;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("read config {path} failed")]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("parse config {path} failed")]
	Parse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub emulation: EmulationKind,
	pub log: LogConfig,
	pub ui: UiConfig,
	pub core: CoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
	/// Defaults to the per-user state directory.
	pub directory: Option<PathBuf>,
	/// An `EnvFilter` directive; `RUST_LOG` takes precedence.
	pub filter: String,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self { directory: None, filter: "info".to_string() }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
	pub error_timeout_ms: u64,
}

impl UiConfig {
	pub fn error_timeout(&self) -> Duration {
		Duration::from_millis(self.error_timeout_ms)
	}
}

impl Default for UiConfig {
	fn default() -> Self {
		Self { error_timeout_ms: 3000 }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
	/// Bound of both the input and the control queue.
	pub queue_capacity: usize,
}

impl Default for CoreConfig {
	fn default() -> Self {
		Self { queue_capacity: 1024 }
	}
}

#[derive(Debug, Parser)]
#[command(name = "novi", version, about = "A small modal text editor")]
pub struct Cli {
	/// File to edit. It does not need to exist yet.
	pub file: Option<PathBuf>,

	#[arg(long, value_enum)]
	pub emulation: Option<EmulationKind>,

	/// Config file to use instead of the default location.
	#[arg(long)]
	pub config: Option<PathBuf>,

	#[arg(long)]
	pub log_dir: Option<PathBuf>,
}

impl Config {
	pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
		toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
	}

	/// Reads `path`. A missing file is only an error when `required`.
	pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
		match std::fs::read_to_string(path) {
			Ok(text) => {
				info!("loading config from {}", path.display());
				Self::parse(&text, path)
			}
			Err(err) if err.kind() == io::ErrorKind::NotFound && !required => Ok(Self::default()),
			Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
		}
	}

	/// The file named by `--config`, or the default location if one exists,
	/// with the remaining flags applied on top.
	pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
		let mut config = match &cli.config {
			Some(path) => Self::load(path, true)?,
			None => match default_path() {
				Some(path) => Self::load(&path, false)?,
				None => Self::default(),
			},
		};
		config.apply_cli(cli);
		Ok(config)
	}

	pub fn apply_cli(&mut self, cli: &Cli) {
		if let Some(emulation) = cli.emulation {
			self.emulation = emulation;
		}
		if let Some(dir) = &cli.log_dir {
			self.log.directory = Some(dir.clone());
		}
	}
}

pub fn default_path() -> Option<PathBuf> {
	#[cfg(target_os = "windows")]
	{
		std::env::var_os("APPDATA").map(|dir| PathBuf::from(dir).join("novi").join("config.toml"))
	}

	#[cfg(not(target_os = "windows"))]
	{
		if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
			return Some(config_home.join("novi").join("config.toml"));
		}
		std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config").join("novi").join("config.toml"))
	}
}

#[cfg(test)]
mod tests {
	use std::ffi::OsString;

	use super::*;

	#[test]
	fn empty_config_should_use_defaults() {
		let config = Config::parse("", Path::new("config.toml")).unwrap();
		assert_eq!(config, Config::default());
		assert_eq!(config.emulation, EmulationKind::Vi);
		assert_eq!(config.log.filter, "info");
		assert_eq!(config.ui.error_timeout(), Duration::from_secs(3));
		assert_eq!(config.core.queue_capacity, 1024);
	}

	#[test]
	fn partial_config_should_keep_other_defaults() {
		let text = r#"
emulation = "basic"

[log]
filter = "novi=debug"

[ui]
error_timeout_ms = 500
"#;
		let config = Config::parse(text, Path::new("config.toml")).unwrap();
		assert_eq!(config.emulation, EmulationKind::Basic);
		assert_eq!(config.log.filter, "novi=debug");
		assert_eq!(config.log.directory, None);
		assert_eq!(config.ui.error_timeout_ms, 500);
		assert_eq!(config.core, CoreConfig::default());
	}

	#[test]
	fn unknown_keys_should_be_rejected() {
		let err = Config::parse("emulation = \"emacs\"", Path::new("a.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Parse { .. }));
		let err = Config::parse("[ui]\ncolour = 1", Path::new("a.toml")).unwrap_err();
		assert!(matches!(err, ConfigError::Parse { .. }));
	}

	#[test]
	fn load_should_tolerate_missing_default_file_only() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("config.toml");
		assert_eq!(Config::load(&missing, false).unwrap(), Config::default());
		assert!(matches!(Config::load(&missing, true), Err(ConfigError::Read { .. })));

		std::fs::write(&missing, "[core]\nqueue_capacity = 8\n").unwrap();
		assert_eq!(Config::load(&missing, true).unwrap().core.queue_capacity, 8);
	}

	#[test]
	fn cli_flags_should_override_file_values() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("novi.toml");
		std::fs::write(&path, "emulation = \"vi\"\n[log]\ndirectory = \"/tmp/from-file\"\n").unwrap();

		let args: Vec<OsString> = vec![
			"novi".into(),
			"notes.txt".into(),
			"--emulation".into(),
			"basic".into(),
			"--config".into(),
			path.clone().into_os_string(),
			"--log-dir".into(),
			"/tmp/from-cli".into(),
		];
		let cli = Cli::parse_from(args);
		assert_eq!(cli.file, Some(PathBuf::from("notes.txt")));

		let config = Config::from_cli(&cli).unwrap();
		assert_eq!(config.emulation, EmulationKind::Basic);
		assert_eq!(config.log.directory, Some(PathBuf::from("/tmp/from-cli")));
	}

	#[test]
	fn cli_without_flags_should_leave_config_alone() {
		let cli = Cli::parse_from(["novi"]);
		let mut config = Config::default();
		config.apply_cli(&cli);
		assert_eq!(config, Config::default());
		assert_eq!(cli.file, None);
	}
}
