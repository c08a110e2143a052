//! Path-keyed file cache.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::record::FileRecord;

/// Process-wide cache mapping absolute paths to their canonical records.
///
/// Shared (`Arc<FileCache>`) across every resolver and grapher wired by a
/// facade, so at most one [`FileRecord`] exists per absolute path for the
/// cache's lifetime. Insertion is insert-or-adopt: a racing inserter
/// discards its candidate and adopts the record that won.
#[derive(Debug, Default)]
pub struct FileCache {
    records: DashMap<PathBuf, Arc<FileRecord>>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the record for an absolute path.
    pub fn get(&self, path: &Path) -> Option<Arc<FileRecord>> {
        self.records.get(path).map(|entry| entry.value().clone())
    }

    /// Insert a freshly-read record, or adopt the existing one for the
    /// same path. Returns the canonical record either way.
    pub fn insert(&self, record: FileRecord) -> Arc<FileRecord> {
        self.records
            .entry(record.path.clone())
            .or_insert_with(|| Arc::new(record))
            .value()
            .clone()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.records.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record. Intended for tests and long-lived processes that
    /// need a fresh view of the filesystem.
    pub fn clear(&self) {
        self.records.clear();
    }

    /// All cached paths, in no particular order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.records.iter().map(|entry| entry.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_shares_one_record() {
        let cache = FileCache::new();
        let inserted = cache.insert(FileRecord::new(
            PathBuf::from("/a/b.js"),
            "module.exports = {};".to_string(),
        ));

        let fetched = cache.get(Path::new("/a/b.js")).unwrap();
        assert!(Arc::ptr_eq(&inserted, &fetched));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn second_insert_adopts_the_winner() {
        let cache = FileCache::new();
        let first = cache.insert(FileRecord::new(PathBuf::from("/a/b.js"), "one".into()));
        let second = cache.insert(FileRecord::new(PathBuf::from("/a/b.js"), "two".into()));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.source, "one");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = FileCache::new();
        cache.insert(FileRecord::new(PathBuf::from("/a/b.js"), String::new()));
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(Path::new("/a/b.js")).is_none());
    }
}
