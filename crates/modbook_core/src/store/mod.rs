//! Entity stores owned by the `DataBook` aggregate.
//!
//! # Responsibility
//! - Wrap unique collections with domain-level operations.
//! - Keep the semester module lists and the display mirror in lockstep.
//!
//! # Invariants
//! - Store collections are private; callers only see read-only views.
//! - Stores never log and never perform I/O.

pub mod module_store;
pub mod person_store;

pub use crate::collection::{EntityKind, StoreError, StoreResult};
pub use module_store::ModuleStore;
pub use person_store::PersonStore;
