//! Platform runtime abstraction for cartographer.
//!
//! The `Runtime` trait abstracts the filesystem operations the analyzer
//! needs: byte reads, metadata lookups, and the process working directory.
//! The analyzer itself never touches `std::fs`; platform bindings implement
//! this trait and are passed in as `Arc<dyn Runtime>`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O error other than absence
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("runtime error: {0}")]
    Other(String),
}

/// File metadata
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a regular file
    pub is_file: bool,
    /// Last modified timestamp (milliseconds since epoch)
    pub modified: Option<u64>,
}

/// Platform runtime trait.
///
/// Every filesystem touch in the analyzer goes through this trait, so a
/// resolution is a pure function of (specifier, base, configuration) and
/// whatever filesystem state the runtime presents. Implementations must
/// distinguish absence (`RuntimeError::FileNotFound`) from other failures:
/// the resolver treats absence as "try the next candidate" and logs
/// everything else.
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file's raw bytes
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// The default base for resolution when the caller supplies none.
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;
}
