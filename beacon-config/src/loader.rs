//! Configuration loader
//!
//! Owns the one generic load sequence: open the file, read it fully
//! within the document budget, parse it as JSON, and hand the parsed
//! document to a [`ConfigSink`] exactly once. Everything specific to a
//! configuration purpose lives in the sink implementation.

use alloc::vec;
use alloc::vec::Vec;

use crate::document::{Document, DocumentBudget};
use crate::json::{self, ParseError};
use crate::storage::{File, Storage, StorageError};

/// Configuration loading errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Storage operation failed (missing or unreadable file)
    Storage(StorageError),
    /// Document was malformed or over budget
    Parse(ParseError),
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        ConfigError::Storage(e)
    }
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::Parse(e)
    }
}

/// Consumer of a loaded configuration document
///
/// Implemented once per configuration purpose. The document handed to
/// `apply` is guaranteed syntactically valid but NOT guaranteed to
/// contain any particular keys — presence and type checks belong here.
/// Implementations should tolerate missing optional fields by keeping
/// their previous state for them, and buffer values locally before
/// committing if they need all-or-nothing application.
pub trait ConfigSink {
    /// Apply fields from a successfully parsed document
    fn apply(&mut self, doc: &Document);
}

/// Configuration loader
///
/// Handles loading JSON configuration from a storage backend and
/// applying it to a [`ConfigSink`].
///
/// Load failures are expected in normal operation (first boot has no
/// saved config), so they surface as ordinary `Err` values with a
/// kind, never as panics. Callers that only need a coarse "did it
/// load" signal can use `is_ok()` on the result.
pub struct ConfigLoader<S: Storage> {
    storage: S,
    budget: DocumentBudget,
}

impl<S: Storage> ConfigLoader<S> {
    /// Create a loader with the default document budget
    pub fn new(storage: S) -> Self {
        Self::with_budget(storage, DocumentBudget::default())
    }

    /// Create a loader with an explicit document budget
    ///
    /// Callers loading documents larger than the default budget must
    /// size the budget accordingly.
    pub fn with_budget(storage: S, budget: DocumentBudget) -> Self {
        Self { storage, budget }
    }

    /// The budget applied to every load
    pub fn budget(&self) -> DocumentBudget {
        self.budget
    }

    /// Consume the loader and return the underlying storage
    ///
    /// Use this to reclaim the backend after boot-time loading so it
    /// can be handed to other components.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Load the named file and apply it to `sink`
    ///
    /// On success the sink's `apply` has run exactly once with the
    /// parsed document. On any failure the sink is never invoked and
    /// its state is untouched.
    pub fn load<T: ConfigSink>(&mut self, path: &str, sink: &mut T) -> Result<(), ConfigError> {
        debug!("config: loading {}", path);

        let raw = self.read_raw(path)?;
        let text = core::str::from_utf8(&raw).map_err(|_| {
            error!("config: {}", ParseError::InvalidUtf8.description());
            ConfigError::Parse(ParseError::InvalidUtf8)
        })?;
        let doc = json::parse_document(text, self.budget).map_err(|e| {
            error!("config: {}", e.description());
            ConfigError::Parse(e)
        })?;

        sink.apply(&doc);
        debug!("config: applied {} fields from {}", doc.len(), path);
        Ok(())
    }

    /// Read the whole file into a budget-sized buffer
    fn read_raw(&mut self, path: &str) -> Result<Vec<u8>, ConfigError> {
        let mut buf = vec![0u8; self.budget.max_document_len];
        let mut len = 0;

        // Scope the handle so it is released before the parse outcome
        // is inspected, parse failures included.
        {
            let mut file = self.storage.open(path).map_err(|e| {
                debug!("config: cannot open {}", path);
                ConfigError::Storage(e)
            })?;
            loop {
                if len == buf.len() {
                    // One more readable byte means the file is over budget
                    let mut probe = [0u8; 1];
                    if file.read(&mut probe).map_err(ConfigError::Storage)? > 0 {
                        error!("config: {}", ParseError::DocumentTooLarge.description());
                        return Err(ConfigError::Parse(ParseError::DocumentTooLarge));
                    }
                    break;
                }
                let n = file.read(&mut buf[len..]).map_err(ConfigError::Storage)?;
                if n == 0 {
                    break;
                }
                len += n;
            }
        }

        buf.truncate(len);
        Ok(buf)
    }
}
