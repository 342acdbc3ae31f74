//! Core domain logic for ModBook.
//! This crate is the single source of truth for contact and module invariants.

pub mod book;
pub mod collection;
pub mod command;
pub mod config;
pub mod logging;
pub mod model;
pub mod storage;
pub mod store;

pub use book::{BookSummary, DataBook};
pub use collection::{EntityKind, Identified, StoreError, StoreResult, UniqueList};
pub use command::{Command, CommandError, CommandResult};
pub use config::{ConfigError, CoreConfig, LogSettings};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::module::{Credits, InstructorRef, Module, ModuleCode, Semester};
pub use model::person::{Email, Name, Person, Phone, Tag};
pub use model::validation::ValidationError;
pub use storage::{BookDocument, BookStorage, JsonBookStorage, StorageError, StorageResult};
pub use store::{ModuleStore, PersonStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
