//! Durable storage for the whole board.
//!
//! The production store is a CSV file with one row per task (see
//! [`crate::codec`] for the row layout). Every save rewrites the complete
//! file through a temporary sibling that is renamed into place, so a reader
//! never observes a half-written board.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::codec::{HEADERS, TaskRow};
use crate::error::{ErrorCode, ValidationError};
use crate::lock::{LockError, StoreLock};
use crate::model::{Priority, Task};

/// Name of the task written to a brand-new board.
pub const SEED_TASK_NAME: &str = "Tarefa Exemplo";

/// Errors raised while reading or writing the board file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} row {row}: {reason}")]
    InvalidRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    #[error("{path} row {row}: duplicate task name '{name}'")]
    DuplicateTask {
        path: PathBuf,
        row: usize,
        name: String,
    },

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("simulated write failure")]
    Injected,
}

impl StoreError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::StoreReadFailed,
            Self::Write { .. } | Self::Injected => ErrorCode::StoreWriteFailed,
            Self::Csv { .. } | Self::InvalidRow { .. } | Self::DuplicateTask { .. } => {
                ErrorCode::CorruptStore
            }
            Self::Lock(err) => err.code(),
        }
    }
}

/// Backing storage for a [`Board`].
pub trait Store {
    /// Read the persisted board, seeding and persisting a default one when
    /// nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing resource cannot be read or
    /// contains invalid rows.
    fn load(&mut self) -> Result<Board, StoreError>;

    /// Replace the persisted board with `board`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the write fails. The previous contents are
    /// left in place.
    fn save(&mut self, board: &Board) -> Result<(), StoreError>;
}

/// The board a fresh install starts with.
#[must_use]
pub fn seed_board() -> Board {
    let mut board = Board::new();
    // An empty board cannot reject the insert.
    let _ = board.insert(Task::new(
        SEED_TASK_NAME,
        "Geral",
        Priority::Medium,
        ["Sub1", "Sub2"],
    ));
    board
}

/// CSV file store holding an exclusive lock for its lifetime.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    _lock: StoreLock,
}

impl CsvStore {
    /// Open the store at `path`, taking the sibling lock file.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Lock`] if another process holds the board for
    /// longer than `lock_timeout`.
    pub fn open(path: impl Into<PathBuf>, lock_timeout: Duration) -> Result<Self, StoreError> {
        let path = path.into();
        let lock = StoreLock::acquire(&StoreLock::path_for(&path), lock_timeout)?;
        debug!(path = %path.display(), "board file locked");
        Ok(Self { path, _lock: lock })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_board(&self) -> Result<Board, StoreError> {
        let file = File::open(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        let mut reader = csv::Reader::from_reader(file);

        let mut board = Board::new();
        for (idx, record) in reader.deserialize::<TaskRow>().enumerate() {
            // Row 1 is the header.
            let row = idx + 2;
            let record = record.map_err(|source| StoreError::Csv {
                path: self.path.clone(),
                source,
            })?;
            let task = record.into_task().map_err(|err| StoreError::InvalidRow {
                path: self.path.clone(),
                row,
                reason: err.to_string(),
            })?;
            board.insert(task).map_err(|err| match err {
                ValidationError::DuplicateTask { name } => StoreError::DuplicateTask {
                    path: self.path.clone(),
                    row,
                    name,
                },
                other => StoreError::InvalidRow {
                    path: self.path.clone(),
                    row,
                    reason: other.to_string(),
                },
            })?;
        }

        Ok(board)
    }

    fn write_board(&self, board: &Board) -> Result<(), StoreError> {
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        let write_err = |source: io::Error| StoreError::Write {
            path: tmp_path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let file = File::create(&tmp_path).map_err(write_err)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(HEADERS).map_err(|source| StoreError::Csv {
            path: tmp_path.clone(),
            source,
        })?;
        for task in board {
            writer
                .serialize(TaskRow::from_task(task))
                .map_err(|source| StoreError::Csv {
                    path: tmp_path.clone(),
                    source,
                })?;
        }

        let mut file = writer
            .into_inner()
            .map_err(|err| write_err(err.into_error()))?;
        file.flush().map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

impl Store for CsvStore {
    fn load(&mut self) -> Result<Board, StoreError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no board file, writing seed board");
            let board = seed_board();
            self.save(&board)?;
            return Ok(board);
        }

        let board = self.read_board()?;
        debug!(path = %self.path.display(), tasks = board.len(), "board loaded");
        Ok(board)
    }

    fn save(&mut self, board: &Board) -> Result<(), StoreError> {
        self.write_board(board).inspect_err(|err| {
            warn!(path = %self.path.display(), error = %err, "board save failed");
        })?;
        debug!(path = %self.path.display(), tasks = board.len(), "board saved");
        Ok(())
    }
}

/// Store that keeps the board in memory.
///
/// Used by tests and by embedders that handle persistence themselves.
/// [`MemoryStore::fail_next_save`] makes the next save return
/// [`StoreError::Injected`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<Board>,
    saves: usize,
    fail_next: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `board`.
    #[must_use]
    pub const fn with_board(board: Board) -> Self {
        Self {
            saved: Some(board),
            saves: 0,
            fail_next: false,
        }
    }

    /// Last successfully saved board.
    #[must_use]
    pub const fn saved(&self) -> Option<&Board> {
        self.saved.as_ref()
    }

    /// Number of successful saves.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }

    pub fn fail_next_save(&mut self) {
        self.fail_next = true;
    }
}

impl Store for MemoryStore {
    fn load(&mut self) -> Result<Board, StoreError> {
        if let Some(board) = &self.saved {
            return Ok(board.clone());
        }
        let board = seed_board();
        self.save(&board)?;
        Ok(board)
    }

    fn save(&mut self, board: &Board) -> Result<(), StoreError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(StoreError::Injected);
        }
        self.saved = Some(board.clone());
        self.saves += 1;
        Ok(())
    }
}
