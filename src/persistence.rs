//! Reading a document into lines and writing it back with a `.bak` copy of
//! whatever was there before.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::text::Line;

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("cannot read {}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

#[derive(Debug, Error)]
pub enum SaveError {
	#[error("No file name")]
	NoFilenameSet,
	#[error("cannot write backup {}", path.display())]
	BackupFailed {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("cannot create {}", path.display())]
	CreateFailed {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("write to {} failed", path.display())]
	WriteFailed {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
	#[error("{} exists (add ! to override)", path.display())]
	WouldOverwriteExisting { path: PathBuf },
	#[error("cannot save {}", path.display())]
	Other {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Reads `path` as UTF-8 lines. A missing file is an empty document.
pub fn load_lines(path: &Path) -> Result<Vec<String>, LoadError> {
	let text = match fs::read_to_string(path) {
		Ok(text) => text,
		Err(err) if err.kind() == ErrorKind::NotFound => {
			info!("{} does not exist yet, starting empty", path.display());
			return Ok(Vec::new());
		}
		Err(source) => return Err(LoadError::Read { path: path.to_path_buf(), source }),
	};
	let body = text.strip_suffix('\n').unwrap_or(&text);
	let lines: Vec<String> =
		body.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line).to_string()).collect();
	info!("loaded {} lines from {}", lines.len(), path.display());
	Ok(lines)
}

/// `<path>.bak`, next to `path`.
pub fn backup_path(path: &Path) -> PathBuf {
	let mut name = OsString::from(path.as_os_str());
	name.push(".bak");
	PathBuf::from(name)
}

pub fn exists(path: &Path) -> Result<bool, SaveError> {
	path.try_exists().map_err(|source| SaveError::Other { path: path.to_path_buf(), source })
}

/// Copies an existing `path` to its backup, then overwrites it with `lines`,
/// each followed by a newline.
pub fn save_lines(path: &Path, lines: &[Line]) -> Result<(), SaveError> {
	if exists(path)? {
		let backup = backup_path(path);
		fs::copy(path, &backup).map_err(|source| SaveError::BackupFailed { path: backup.clone(), source })?;
	}

	let file = File::create(path).map_err(|source| SaveError::CreateFailed { path: path.to_path_buf(), source })?;
	let write_failed = |source| SaveError::WriteFailed { path: path.to_path_buf(), source };
	let mut writer = BufWriter::new(file);
	for line in lines {
		writeln!(writer, "{line}").map_err(write_failed)?;
	}
	writer.flush().map_err(write_failed)?;
	info!("wrote {} lines to {}", lines.len(), path.display());
	Ok(())
}
