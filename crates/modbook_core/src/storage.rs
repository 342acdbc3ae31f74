//! JSON persistence adapter for `DataBook`.
//!
//! # Responsibility
//! - Convert a `DataBook` to and from the `persons`/`modules1`/`modules2`
//!   JSON document.
//! - Read and write that document on the local file system.
//!
//! # Invariants
//! - Save reads the raw semester lists, never the display mirror.
//! - Load re-adds every element in document order; a duplicate identity is
//!   reported as data corruption naming the offending section.
//! - A save never leaves a half-written data file behind (temp file + rename).
//! - `load(save(book)) == book` under full structural equality.

use crate::book::DataBook;
use crate::model::module::{Module, Semester};
use crate::model::person::Person;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Document section holding contacts.
pub const PERSONS_SECTION: &str = "persons";
/// Document section holding first-semester modules.
pub const FIRST_SEMESTER_SECTION: &str = "modules1";
/// Document section holding second-semester modules.
pub const SECOND_SEMESTER_SECTION: &str = "modules2";

pub type StorageResult<T> = Result<T, StorageError>;

/// Persistence boundary error.
#[derive(Debug)]
pub enum StorageError {
    Io { path: PathBuf, source: io::Error },
    Json(serde_json::Error),
    /// The document breaks the duplicate-free contract of a section.
    DataCorruption {
        section: &'static str,
        detail: String,
    },
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "storage_io_failed",
            Self::Json(_) => "storage_json_invalid",
            Self::DataCorruption { .. } => "storage_data_corrupted",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid data file: {err}"),
            Self::DataCorruption { section, detail } => {
                write!(f, "`{section}` list contains duplicate entries: {detail}")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::DataCorruption { .. } => None,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializable snapshot of a `DataBook`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub modules1: Vec<Module>,
    #[serde(default)]
    pub modules2: Vec<Module>,
    /// Zero-based active semester; absent in older files.
    #[serde(default)]
    pub active_semester: Semester,
}

impl BookDocument {
    /// Snapshots the raw backing lists of `book`.
    pub fn from_book(book: &DataBook) -> Self {
        Self {
            persons: book.person_list().internal_list().clone(),
            modules1: book.module_list(Semester::First).internal_list().clone(),
            modules2: book.module_list(Semester::Second).internal_list().clone(),
            active_semester: book.active_semester(),
        }
    }

    /// Rebuilds a book by adding every element in document order.
    ///
    /// # Errors
    /// - `DataCorruption` naming the section that holds a duplicate.
    pub fn into_book(self) -> StorageResult<DataBook> {
        let mut book = DataBook::new();

        for person in self.persons {
            book.add_person(person)
                .map_err(|err| corrupted(PERSONS_SECTION, err))?;
        }
        for module in self.modules1 {
            book.add_module(module, Semester::First)
                .map_err(|err| corrupted(FIRST_SEMESTER_SECTION, err))?;
        }
        for module in self.modules2 {
            book.add_module(module, Semester::Second)
                .map_err(|err| corrupted(SECOND_SEMESTER_SECTION, err))?;
        }

        Ok(book.with_active_semester(self.active_semester))
    }

    pub fn from_json(text: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> StorageResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn corrupted(section: &'static str, err: impl Display) -> StorageError {
    StorageError::DataCorruption {
        section,
        detail: err.to_string(),
    }
}

/// Persistence contract for `DataBook` snapshots.
pub trait BookStorage {
    /// Returns `Ok(None)` when no data has been saved yet.
    fn read_book(&self) -> StorageResult<Option<DataBook>>;
    fn save_book(&self, book: &DataBook) -> StorageResult<()>;
}

/// File-backed JSON storage.
#[derive(Debug, Clone)]
pub struct JsonBookStorage {
    path: PathBuf,
}

impl JsonBookStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }

    fn read_document(&self) -> StorageResult<Option<BookDocument>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::io(&self.path, err)),
        };
        BookDocument::from_json(&text).map(Some)
    }

    fn write_document(&self, document: &BookDocument) -> StorageResult<()> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
        }

        let text = document.to_json()?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, text).map_err(|err| StorageError::io(&temp_path, err))?;
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            // Best-effort cleanup; the rename error is returned.
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::io(&self.path, err));
        }
        Ok(())
    }
}

impl BookStorage for JsonBookStorage {
    fn read_book(&self) -> StorageResult<Option<DataBook>> {
        let started_at = Instant::now();
        info!("event=book_load module=storage status=start");

        let result = self
            .read_document()
            .and_then(|document| document.map(BookDocument::into_book).transpose());

        match &result {
            Ok(Some(book)) => {
                let summary = book.summary();
                info!(
                    "event=book_load module=storage status=ok duration_ms={} persons={} modules1={} modules2={} active_semester={}",
                    started_at.elapsed().as_millis(),
                    summary.persons,
                    summary.first_semester_modules,
                    summary.second_semester_modules,
                    summary.active_semester.index()
                );
            }
            Ok(None) => {
                warn!(
                    "event=book_load module=storage status=missing duration_ms={}",
                    started_at.elapsed().as_millis()
                );
            }
            Err(err) => {
                error!(
                    "event=book_load module=storage status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
            }
        }

        result
    }

    fn save_book(&self, book: &DataBook) -> StorageResult<()> {
        let started_at = Instant::now();
        info!("event=book_save module=storage status=start");

        let result = self.write_document(&BookDocument::from_book(book));
        match &result {
            Ok(()) => info!(
                "event=book_save module=storage status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=book_save module=storage status=error duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }

        result
    }
}
