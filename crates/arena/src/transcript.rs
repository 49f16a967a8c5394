//! Append-only output files: the PGN transcript and the illegal-move log

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chess_core::pgn::export_pgn;
use chess_core::GameRecord;

use crate::error::ArenaError;

fn append(path: &Path, text: &str) -> Result<(), ArenaError> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<(), ArenaError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// PGN file that accumulates one record per finished game.
#[derive(Debug, Clone)]
pub struct Transcript {
    path: PathBuf,
}

impl Transcript {
    /// Existing content is kept; records are appended.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ArenaError> {
        let path = path.into();
        ensure_parent(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &GameRecord) -> Result<(), ArenaError> {
        append(&self.path, &format!("{}\n\n", export_pgn(record)))
    }
}

/// Log of completions that were not usable as moves.
#[derive(Debug, Clone)]
pub struct IllegalMoveLog {
    path: PathBuf,
}

impl IllegalMoveLog {
    /// Creates (or truncates) the log file.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, ArenaError> {
        let path = path.into();
        ensure_parent(&path)?;
        File::create(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One `position|text` entry followed by a blank line.
    pub fn record(&self, position: &str, text: &str) -> Result<(), ArenaError> {
        append(&self.path, &format!("{position}|{text}\n\n"))
    }
}
