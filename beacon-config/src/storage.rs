//! Storage access traits
//!
//! Abstracts the device filesystem the configuration files live on
//! (SPIFFS-style flash filesystems, SD cards, or a host filesystem in
//! tests). The loader needs only open-by-path and byte-stream reads.

/// Errors from storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Path does not exist
    NotFound,
    /// Underlying read failed
    Io,
}

/// Filesystem trait
///
/// Implementations hand out one [`File`] per `open`. Concurrent opens
/// are not required; the loader holds at most one file at a time.
pub trait Storage {
    /// Open file handle type
    type File: File;

    /// Open the named file for reading
    fn open(&mut self, path: &str) -> Result<Self::File, StorageError>;
}

/// An open file
///
/// The handle is released by dropping it; implementations that need an
/// explicit close perform it in `Drop`. The loader scopes its handle
/// so release happens on every exit path, parse failures included.
pub trait File {
    /// Read up to `buf.len()` bytes into `buf`
    ///
    /// Returns the number of bytes read; `Ok(0)` means end of file.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, StorageError>;
}
