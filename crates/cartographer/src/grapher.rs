//! Transitive dependency walking.
//!
//! The grapher orchestrates scanning and resolution over the closure of
//! imports reachable from a file: descriptors are processed strictly in
//! source order, and a dependency's own subtree is fully walked before the
//! next sibling is touched (depth-first pre-order of first sighting).

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::record::{DependencyRecord, EdgeError, FileRecord, ImportDescriptor};
use crate::resolver::{Resolution, Resolver};
use crate::scanner::{ScanError, Scanner};

/// Errors that abort a graph walk.
///
/// Per-edge failures (dynamic imports, unresolvable specifiers, malformed
/// manifests) are recorded as data on the dependency records and do not
/// abort; only an unparseable source file does.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("failed to scan {}: {}", .path.display(), .source)]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError,
    },
}

/// Cached result of one (directory, specifier) resolution.
#[derive(Debug, Clone, Default)]
struct Outcome {
    file: Option<Arc<FileRecord>>,
    error: Option<EdgeError>,
}

/// Walks the transitive closure of a file's imports.
pub struct Grapher {
    scanner: Scanner,
    resolver: Arc<Resolver>,
    // Node-style resolution depends only on the starting directory, so
    // sibling files in one directory share outcomes and the resolver runs
    // at most once per (directory, specifier).
    outcomes: Mutex<FxHashMap<PathBuf, FxHashMap<String, Outcome>>>,
    visited: Mutex<FxHashSet<PathBuf>>,
}

impl Grapher {
    /// Create a grapher over `resolver`, sharing its caches.
    pub fn new(resolver: Arc<Resolver>) -> Self {
        Self::with_scanner(resolver, Scanner::new())
    }

    /// Create a grapher with a caller-supplied scanner.
    pub fn with_scanner(resolver: Arc<Resolver>, scanner: Scanner) -> Self {
        Self {
            scanner,
            resolver,
            outcomes: Mutex::new(FxHashMap::default()),
            visited: Mutex::new(FxHashSet::default()),
        }
    }

    /// The resolver this grapher walks with.
    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    /// Forget every visited file and cached outcome. The path-keyed file
    /// cache is owned by the resolver and cleared separately.
    pub fn reset(&self) {
        self.visited.lock().clear();
        self.outcomes.lock().clear();
    }

    /// Populate the dependency tree rooted at `file`.
    ///
    /// Idempotent: a file whose dependency list is already assigned, or
    /// that is already being walked higher up the stack, returns
    /// immediately. That re-entry check is what terminates import cycles:
    /// the back edge's record points at a file whose list is assigned when
    /// the walk that first discovered it unwinds.
    pub async fn analyze(&self, file: &Arc<FileRecord>) -> Result<(), GraphError> {
        self.walk(Arc::clone(file)).await
    }

    // async fn cannot recurse; the depth-first walk boxes its future.
    fn walk(
        &self,
        file: Arc<FileRecord>,
    ) -> Pin<Box<dyn Future<Output = Result<(), GraphError>> + Send + '_>> {
        Box::pin(async move {
            if file.dependencies().is_some() {
                return Ok(());
            }
            if !self.visited.lock().insert(file.path.clone()) {
                return Ok(());
            }
            debug!(path = %file.path.display(), "scanning");

            let descriptors =
                self.scanner
                    .scan(&file.source)
                    .map_err(|source| GraphError::Scan {
                        path: file.path.clone(),
                        source,
                    })?;

            let mut records = Vec::with_capacity(descriptors.len());
            for descriptor in descriptors {
                if !descriptor.is_static {
                    records.push(DependencyRecord::failed(
                        descriptor,
                        EdgeError::UnresolvableDynamicImport,
                    ));
                    continue;
                }

                if let Some(outcome) = self.cached(&file.directory, &descriptor.specifier) {
                    // The subtree behind a cached outcome was walked when
                    // the outcome was first produced.
                    records.push(into_record(descriptor, outcome));
                    continue;
                }

                let outcome = self.resolve(&descriptor.specifier, &file.directory).await;
                self.store(&file.directory, &descriptor.specifier, outcome.clone());

                let next = outcome.file.clone();
                records.push(into_record(descriptor, outcome));

                if let Some(child) = next {
                    self.walk(child).await?;
                }
            }

            file.assign_dependencies(records);
            Ok(())
        })
    }

    async fn resolve(&self, specifier: &str, directory: &Path) -> Outcome {
        match self.resolver.resolve(specifier, Some(directory)).await {
            Ok(Resolution::File(record)) => Outcome {
                file: Some(record),
                error: None,
            },
            Ok(Resolution::NotFound) => Outcome {
                file: None,
                error: Some(EdgeError::NotLocated),
            },
            // Resolver failures abort that resolution only; the walk
            // continues with the failure recorded on the edge.
            Err(error) => Outcome {
                file: None,
                error: Some(EdgeError::Resolve(error.to_string())),
            },
        }
    }

    fn cached(&self, directory: &Path, specifier: &str) -> Option<Outcome> {
        self.outcomes
            .lock()
            .get(directory)
            .and_then(|outcomes| outcomes.get(specifier))
            .cloned()
    }

    fn store(&self, directory: &Path, specifier: &str, outcome: Outcome) {
        self.outcomes
            .lock()
            .entry(directory.to_path_buf())
            .or_default()
            .insert(specifier.to_string(), outcome);
    }
}

fn into_record(descriptor: ImportDescriptor, outcome: Outcome) -> DependencyRecord {
    DependencyRecord {
        specifier: descriptor.specifier,
        is_static: descriptor.is_static,
        references: descriptor.references,
        file: outcome.file,
        error: outcome.error,
    }
}
