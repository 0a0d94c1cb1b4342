//! SQLite storage layer for caljournal.
//!
//! This module provides the persistence layer using SQLite with:
//! - WAL mode for concurrent reads
//! - One `IMMEDIATE` transaction per mutation
//! - Versioned migrations recorded in `schema_migrations`
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Store adapter: per-kind reads, upserts, delete-all
//! - [`journal`] - Template, calendar event and holiday operations

pub mod journal;
pub mod migrations;
pub mod schema;
pub mod sqlite;

pub use journal::{ApplyOutcome, DuplicateConflict};
pub use sqlite::{MutationContext, SqliteStorage, StoreSnapshot};
