//! Node-style module resolution.
//!
//! A resolver maps a textual specifier plus a base directory to a concrete
//! file on disk: extension probing for files, manifest-driven entry lookup
//! and index fallback for directories, and an upward module-directory walk
//! for bare names. All candidate orderings come from [`ResolverConfig`]
//! and the first success wins, so resolution is a pure function of
//! (specifier, base, configuration, filesystem state).

mod directory;
mod file;
mod modules;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_clean::PathClean;
use tracing::debug;

use cartographer_core::{Runtime, RuntimeError};

use crate::cache::FileCache;
use crate::config::ResolverConfig;
use crate::record::FileRecord;

/// Outcome of a terminated resolution.
///
/// Exhausting every candidate is not an error; it is the `NotFound`
/// outcome, and the caller decides what that means for its edge.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// The specifier resolved to this record.
    File(Arc<FileRecord>),
    /// Every candidate missed.
    NotFound,
}

impl Resolution {
    /// The resolved record, if any.
    pub fn file(self) -> Option<Arc<FileRecord>> {
        match self {
            Resolution::File(record) => Some(record),
            Resolution::NotFound => None,
        }
    }
}

/// Errors that abort a resolution.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The specifier was empty.
    #[error("specifier must not be empty")]
    EmptySpecifier,

    /// A package manifest was present but not valid JSON.
    #[error("malformed package manifest: {}", .0.display())]
    MalformedManifest(PathBuf),

    /// The runtime could not report a working directory.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Maps specifiers to file records.
#[derive(Debug)]
pub struct Resolver {
    config: ResolverConfig,
    runtime: Arc<dyn Runtime>,
    files: Arc<FileCache>,
    cwd: Option<PathBuf>,
}

impl Resolver {
    /// Create a resolver over a runtime and a shared file cache.
    pub fn new(config: ResolverConfig, runtime: Arc<dyn Runtime>, files: Arc<FileCache>) -> Self {
        Self {
            config,
            runtime,
            files,
            cwd: None,
        }
    }

    /// Override the default base directory (otherwise the runtime's cwd).
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The path-keyed cache this resolver populates.
    pub fn files(&self) -> &Arc<FileCache> {
        &self.files
    }

    pub fn runtime(&self) -> &Arc<dyn Runtime> {
        &self.runtime
    }

    /// Resolve `specifier` starting from `base` (default: the working
    /// directory). Relative specifiers (`/`, `./`, `../`) are joined
    /// against the base and tried file-first then directory; anything else
    /// is a bare module name for the upward walk. A trailing `/` forces
    /// directory resolution.
    pub async fn resolve(
        &self,
        specifier: &str,
        base: Option<&Path>,
    ) -> Result<Resolution, ResolveError> {
        if specifier.is_empty() {
            return Err(ResolveError::EmptySpecifier);
        }
        let base = match base {
            Some(base) => base.to_path_buf(),
            None => self.base_dir()?,
        };

        if is_relative(specifier) {
            let force_directory = specifier.ends_with('/');
            let candidate = base.join(specifier).clean();
            debug!(specifier, candidate = %candidate.display(), "resolving relative specifier");
            self.resolve_relative(&candidate.to_string_lossy(), force_directory)
                .await
        } else {
            debug!(specifier, base = %base.display(), "resolving bare module");
            self.resolve_module(&base.to_string_lossy(), specifier).await
        }
    }

    /// File resolution first, directory resolution on a miss.
    pub(crate) async fn resolve_relative(
        &self,
        candidate: &str,
        force_directory: bool,
    ) -> Result<Resolution, ResolveError> {
        if !force_directory {
            if let Some(record) = self.load_file(candidate).await {
                return Ok(Resolution::File(record));
            }
        }
        self.load_directory(candidate).await
    }

    fn base_dir(&self) -> Result<PathBuf, ResolveError> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => Ok(self.runtime.get_cwd()?),
        }
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('/') || specifier.starts_with("./") || specifier.starts_with("../")
}
