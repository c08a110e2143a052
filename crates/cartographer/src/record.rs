//! Graph data model: file records, import descriptors, dependency edges.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// The unit of disk content: one record per absolute path.
///
/// The path-keyed [`FileCache`](crate::FileCache) owns the canonical
/// `Arc<FileRecord>`; every edge that resolved to the same path holds a
/// clone of the same allocation, so consumers can compare records with
/// `Arc::ptr_eq`. The record is immutable apart from the one-shot
/// dependency-list assignment performed by the grapher.
pub struct FileRecord {
    /// Absolute path; the record's identity.
    pub path: PathBuf,
    /// File contents. Analyzed sources are required to be UTF-8.
    pub source: String,
    /// Parent directory, the base for resolving this file's imports.
    pub directory: PathBuf,
    dependencies: OnceLock<Vec<DependencyRecord>>,
}

impl FileRecord {
    /// Create a record for `path` holding `source`.
    pub fn new(path: PathBuf, source: String) -> Self {
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self {
            path,
            source,
            directory,
            dependencies: OnceLock::new(),
        }
    }

    /// The file's resolved imports, in source order.
    ///
    /// `None` until a graph walk has processed this file. Inside an import
    /// cycle a record becomes reachable before its own list is assigned;
    /// the list is in place once the walk that first discovered the record
    /// returns.
    pub fn dependencies(&self) -> Option<&[DependencyRecord]> {
        self.dependencies.get().map(Vec::as_slice)
    }

    /// One-time assignment; returns false if a list was already present.
    pub(crate) fn assign_dependencies(&self, records: Vec<DependencyRecord>) -> bool {
        self.dependencies.set(records).is_ok()
    }
}

// Dependency edges may form cycles, so Debug prints the edge count
// instead of recursing into the records.
impl fmt::Debug for FileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRecord")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .field(
                "dependencies",
                &self.dependencies.get().map(Vec::len),
            )
            .finish()
    }
}

/// A single occurrence of an import call: the source text of the whole
/// call expression and its half-open byte offsets within the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Text of the entire call expression, e.g. `require('./b')`.
    pub source: String,
    /// Byte offset of the call's first character.
    pub start: usize,
    /// Byte offset one past the call's last character.
    pub end: usize,
}

/// A distinct import site discovered by the scanner.
///
/// Descriptors are unique per file by exact specifier text: repeated call
/// sites with identical argument source fold into one descriptor with
/// multiple references, in first-sighting order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDescriptor {
    /// The textual path exactly as written: the literal's contents for a
    /// static import, the raw argument source slice for a dynamic one.
    pub specifier: String,
    /// True iff the argument was a single string literal.
    pub is_static: bool,
    /// Every occurrence of this specifier in the file.
    pub references: Vec<Reference>,
}

/// A descriptor after resolution has been attempted.
///
/// Exactly one of `file` and `error` is populated once resolution
/// terminated. Dynamic imports always carry
/// [`EdgeError::UnresolvableDynamicImport`] and no file.
#[derive(Debug, Clone)]
pub struct DependencyRecord {
    /// The textual path exactly as written.
    pub specifier: String,
    /// True iff the import was a single string literal.
    pub is_static: bool,
    /// Call-site occurrences, copied from the descriptor.
    pub references: Vec<Reference>,
    /// The resolved file, shared with the path-keyed cache.
    pub file: Option<Arc<FileRecord>>,
    /// Why resolution produced no file.
    pub error: Option<EdgeError>,
}

impl DependencyRecord {
    pub(crate) fn failed(descriptor: ImportDescriptor, error: EdgeError) -> Self {
        Self {
            specifier: descriptor.specifier,
            is_static: descriptor.is_static,
            references: descriptor.references,
            file: None,
            error: Some(error),
        }
    }

    /// True iff resolution produced a file.
    pub fn is_resolved(&self) -> bool {
        self.file.is_some()
    }
}

/// Per-edge resolution failure, recorded as data while the walk continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdgeError {
    /// The import's argument was not a single string literal.
    #[error("unresolvable dynamic import")]
    UnresolvableDynamicImport,

    /// The resolver exhausted every candidate without a hit.
    #[error("unable to locate dependency")]
    NotLocated,

    /// The resolver aborted, e.g. on a malformed package manifest.
    #[error("{0}")]
    Resolve(String),
}
