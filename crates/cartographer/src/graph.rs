//! Read-side helpers over an analyzed dependency tree.
//!
//! Consumers walk the tree by following each record's `file` reference;
//! these helpers package the common traversals a packager needs. All of
//! them are cycle-safe.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::record::FileRecord;

/// Every unique record reachable from `root`, in first-sighting
/// (pre-order) discovery order. The root comes first.
pub fn files(root: &Arc<FileRecord>) -> Vec<Arc<FileRecord>> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    pre_order(root, &mut seen, &mut out);
    out
}

/// Every unique record reachable from `root` in post-order: dependencies
/// before dependents, the order a bundler emits modules. Inside a cycle
/// the file discovered first is emitted last among the cycle's members.
pub fn load_order(root: &Arc<FileRecord>) -> Vec<Arc<FileRecord>> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    post_order(root, &mut seen, &mut out);
    out
}

fn pre_order(
    file: &Arc<FileRecord>,
    seen: &mut FxHashSet<PathBuf>,
    out: &mut Vec<Arc<FileRecord>>,
) {
    if !seen.insert(file.path.clone()) {
        return;
    }
    out.push(Arc::clone(file));
    for dependency in file.dependencies().unwrap_or_default() {
        if let Some(child) = &dependency.file {
            pre_order(child, seen, out);
        }
    }
}

fn post_order(
    file: &Arc<FileRecord>,
    seen: &mut FxHashSet<PathBuf>,
    out: &mut Vec<Arc<FileRecord>>,
) {
    if !seen.insert(file.path.clone()) {
        return;
    }
    for dependency in file.dependencies().unwrap_or_default() {
        if let Some(child) = &dependency.file {
            post_order(child, seen, out);
        }
    }
    out.push(Arc::clone(file));
}

/// Aggregate counts over an analyzed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStats {
    /// Unique files reachable from the root.
    pub files: usize,
    /// Dependency records across all files.
    pub edges: usize,
    /// Edges whose import was a string literal.
    pub static_edges: usize,
    /// Edges whose import argument was not a string literal.
    pub dynamic_edges: usize,
    /// Static edges that did not resolve to a file.
    pub unresolved_edges: usize,
    /// Total source bytes across all files.
    pub total_bytes: usize,
}

/// Compute [`GraphStats`] for the tree rooted at `root`.
pub fn stats(root: &Arc<FileRecord>) -> GraphStats {
    let records = files(root);
    let mut stats = GraphStats {
        files: records.len(),
        edges: 0,
        static_edges: 0,
        dynamic_edges: 0,
        unresolved_edges: 0,
        total_bytes: 0,
    };

    for record in &records {
        stats.total_bytes += record.source.len();
        for dependency in record.dependencies().unwrap_or_default() {
            stats.edges += 1;
            if dependency.is_static {
                stats.static_edges += 1;
                if !dependency.is_resolved() {
                    stats.unresolved_edges += 1;
                }
            } else {
                stats.dynamic_edges += 1;
            }
        }
    }

    stats
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Files: {}", self.files)?;
        writeln!(f, "Edges: {} ({} static, {} dynamic)", self.edges, self.static_edges, self.dynamic_edges)?;
        writeln!(f, "Unresolved: {}", self.unresolved_edges)?;
        write!(f, "Total bytes: {}", self.total_bytes)
    }
}
