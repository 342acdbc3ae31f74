//! Entity value types for contacts and semester modules.
//!
//! # Responsibility
//! - Define validated value types (`Name`, `ModuleCode`, ...) and records.
//! - Expose identity comparison separately from full equality.
//!
//! # Invariants
//! - A record is only constructible from already-validated field values.
//! - Identity of a `Person` is its normalized name; identity of a `Module`
//!   is its `ModuleCode`.

pub mod module;
pub mod person;
pub mod validation;
