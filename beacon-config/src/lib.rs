//! JSON-backed configuration loading for Beacon devices
//!
//! This crate contains the generic "open file, parse, apply" sequence
//! used to configure device components from JSON files on local
//! storage:
//!
//! - `Storage` / `File` traits for the storage backend (SPIFFS-style
//!   flash filesystems, SD cards, host filesystems in tests)
//! - `Document` — a bounded, parsed configuration document
//! - `ConfigSink` — the hook a component implements to pick its own
//!   fields out of a loaded document
//! - `ConfigLoader` — runs the load sequence and invokes the sink
//!
//! # Architecture
//!
//! The loader owns the one generic algorithm; everything specific to a
//! configuration purpose lives in a `ConfigSink` implementation. The
//! loader guarantees the sink only ever sees a syntactically valid
//! document, but makes no promise about which keys are present —
//! field presence and type checks belong to the sink, which should
//! tolerate missing optional fields and keep its previous state for
//! them.
//!
//! Load failures (missing file, malformed JSON, document over budget)
//! are expected in normal operation — first boot has no saved config —
//! so they come back as ordinary `Err` values and never panic.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod document;
pub mod json;
pub mod loader;
pub mod storage;

// Re-export key types
pub use document::{Document, DocumentBudget, Value};
pub use json::ParseError;
pub use loader::{ConfigError, ConfigLoader, ConfigSink};
pub use storage::{File, Storage, StorageError};
