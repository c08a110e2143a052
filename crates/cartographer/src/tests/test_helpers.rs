//! Shared test utilities for analysis tests.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use cartographer_core::test_utils::TestRuntime;
use cartographer_core::{FileMetadata, Runtime, RuntimeResult};

use crate::cache::FileCache;
use crate::config::ResolverConfig;
use crate::facade::Cartographer;
use crate::resolver::Resolver;

/// Create a test project with the given files.
///
/// Paths are relative to the temp dir; parent directories are created as
/// needed. Returns the project root.
pub fn create_test_project(temp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = temp.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("failed to create parent directory for {path}: {e}"));
        }
        fs::write(&file_path, content)
            .unwrap_or_else(|e| panic!("failed to write file {path}: {e}"));
    }

    root
}

/// A default-config resolver rooted at `root`.
pub fn resolver_at(root: &Path) -> Resolver {
    resolver_with(root, ResolverConfig::default())
}

/// A resolver rooted at `root` with a custom configuration.
pub fn resolver_with(root: &Path, config: ResolverConfig) -> Resolver {
    Resolver::new(
        config,
        Arc::new(TestRuntime::new(root.to_path_buf())),
        Arc::new(FileCache::new()),
    )
    .with_cwd(root)
}

/// A default cartographer rooted at `root`.
pub fn cartographer_at(root: &Path) -> Cartographer {
    Cartographer::builder()
        .runtime(Arc::new(TestRuntime::new(root.to_path_buf())))
        .cwd(root)
        .build()
}

/// Runtime wrapper that records every stat and read, so tests can observe
/// how often the resolver actually touched the filesystem.
#[derive(Debug)]
pub struct CountingRuntime {
    inner: TestRuntime,
    stats: Mutex<Vec<PathBuf>>,
    reads: Mutex<Vec<PathBuf>>,
}

impl CountingRuntime {
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            inner: TestRuntime::new(cwd),
            stats: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
        }
    }

    /// Number of stat probes whose path ends with `suffix`.
    pub fn stats_of(&self, suffix: &str) -> usize {
        Self::count(&self.stats, suffix)
    }

    /// Number of reads whose path ends with `suffix`.
    pub fn reads_of(&self, suffix: &str) -> usize {
        Self::count(&self.reads, suffix)
    }

    fn count(log: &Mutex<Vec<PathBuf>>, suffix: &str) -> usize {
        log.lock()
            .unwrap()
            .iter()
            .filter(|path| path.to_string_lossy().ends_with(suffix))
            .count()
    }
}

#[async_trait]
impl Runtime for CountingRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        self.reads.lock().unwrap().push(path.to_path_buf());
        self.inner.read_file(path).await
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        self.stats.lock().unwrap().push(path.to_path_buf());
        self.inner.metadata(path).await
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        self.inner.get_cwd()
    }
}
