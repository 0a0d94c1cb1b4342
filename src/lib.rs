//! caljournal - local event journal with JSON backup and restore
//!
//! This crate provides the core functionality for the `cj` CLI tool.
//!
//! # Architecture
//!
//! - [`model`] - Data types (EventTemplate, CalendarEvent, Holiday)
//! - [`storage`] - SQLite database layer and journal operations
//! - [`backup`] - JSON backup export/import
//! - [`holidays`] - Fetch-once public holiday cache
//! - [`sink`] - One-way export to an external calendar
//! - [`config`] - Configuration management
//! - [`cli`] - Command-line interface using clap
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod holidays;
pub mod model;
pub mod sink;
pub mod storage;

pub use error::{Error, Result};
