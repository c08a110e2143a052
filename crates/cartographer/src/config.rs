//! Resolver configuration.

use serde_json::Value;

/// Options controlling node-style resolution.
///
/// Every list is consulted in declared order and the first success wins,
/// so order is part of the configuration's meaning.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Extension suffixes tried in turn when probing a file candidate.
    /// The empty string means "the candidate as given".
    pub extensions: Vec<String>,
    /// Directory names probed when walking up for a bare module.
    pub modules: Vec<String>,
    /// Manifest filenames tried inside a directory.
    pub packages: Vec<String>,
    /// Manifest keys naming a package's entry point.
    pub mains: Vec<MainSpec>,
    /// Base name used when no extension is supplied and no manifest entry
    /// is available.
    pub index: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            extensions: vec![String::new(), ".js".to_string()],
            modules: vec!["node_modules".to_string()],
            packages: vec!["package.json".to_string()],
            mains: vec![MainSpec::key("main")],
            index: "index".to_string(),
        }
    }
}

/// A manifest key naming an entry point: either a single top-level key or
/// a path of nested keys descended level by level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainSpec {
    /// A single top-level manifest key, e.g. `"main"`.
    Key(String),
    /// An ordered path of nested keys, e.g. `["exports", "require"]`.
    Path(Vec<String>),
}

impl MainSpec {
    /// Single-key spec.
    pub fn key(key: impl Into<String>) -> Self {
        MainSpec::Key(key.into())
    }

    /// Nested key-path spec.
    pub fn path(keys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        MainSpec::Path(keys.into_iter().map(Into::into).collect())
    }

    /// Descend into a parsed manifest and return the entry-point leaf.
    ///
    /// Only a non-empty string leaf counts: anything else could not be
    /// joined into a path, so the caller moves on to the next spec.
    pub fn descend<'a>(&self, manifest: &'a Value) -> Option<&'a str> {
        let leaf = match self {
            MainSpec::Key(key) => manifest.get(key)?,
            MainSpec::Path(keys) => keys
                .iter()
                .try_fold(manifest, |value, key| value.get(key))?,
        };
        match leaf.as_str() {
            Some(entry) if !entry.is_empty() => Some(entry),
            _ => None,
        }
    }
}
