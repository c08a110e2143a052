//! The `Cartographer` facade: one resolver and one grapher over shared
//! caches, built with a consuming builder.

use std::path::PathBuf;
use std::sync::Arc;

use cartographer_core::{NativeRuntime, Runtime};

use crate::cache::FileCache;
use crate::config::{MainSpec, ResolverConfig};
use crate::grapher::{GraphError, Grapher};
use crate::record::FileRecord;
use crate::resolver::{Resolution, ResolveError, Resolver};

/// Errors surfaced by [`Cartographer::analyze`].
#[derive(Debug, thiserror::Error)]
pub enum CartographerError {
    /// No specifier was supplied.
    #[error("specifier must not be empty")]
    EmptySpecifier,

    /// The entry specifier did not resolve to a file.
    #[error("file not found: {0}")]
    EntryNotFound(String),

    /// Entry resolution aborted (e.g. a malformed package manifest).
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The graph walk aborted (an unparseable source file).
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Entry point: resolves a specifier and walks its dependency graph.
///
/// ```rust,no_run
/// use cartographer::Cartographer;
///
/// # async fn example() -> Result<(), cartographer::CartographerError> {
/// let cartographer = Cartographer::builder()
///     .extensions(["", ".js", ".json"])
///     .cwd("/srv/app")
///     .build();
///
/// let root = cartographer.analyze("./src/main.js").await?;
/// println!("{} direct dependencies", root.dependencies().unwrap_or_default().len());
/// # Ok(())
/// # }
/// ```
pub struct Cartographer {
    resolver: Arc<Resolver>,
    grapher: Grapher,
}

impl Cartographer {
    /// A cartographer with default configuration over the native
    /// filesystem.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CartographerBuilder {
        CartographerBuilder::default()
    }

    /// Resolve `specifier` from the working directory, walk its transitive
    /// dependencies, and return the root record with its tree populated in
    /// place. Per-edge failures are data on the records; only an
    /// unresolvable entry, a malformed manifest on the entry's path, or an
    /// unparseable source is an `Err`.
    pub async fn analyze(&self, specifier: &str) -> Result<Arc<FileRecord>, CartographerError> {
        if specifier.is_empty() {
            return Err(CartographerError::EmptySpecifier);
        }

        let root = match self.resolver.resolve(specifier, None).await? {
            Resolution::File(record) => record,
            Resolution::NotFound => {
                return Err(CartographerError::EntryNotFound(specifier.to_string()))
            }
        };

        self.grapher.analyze(&root).await?;
        Ok(root)
    }

    pub fn resolver(&self) -> &Arc<Resolver> {
        &self.resolver
    }

    pub fn grapher(&self) -> &Grapher {
        &self.grapher
    }
}

impl Default for Cartographer {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Cartographer`].
///
/// Parts may be injected pre-built: a shared [`FileCache`], a
/// [`Resolver`], or a whole [`Grapher`]; anything not supplied is
/// constructed with defaults, and the grapher always shares the resolver's
/// caches.
#[derive(Default)]
pub struct CartographerBuilder {
    config: ResolverConfig,
    runtime: Option<Arc<dyn Runtime>>,
    cwd: Option<PathBuf>,
    files: Option<Arc<FileCache>>,
    resolver: Option<Arc<Resolver>>,
    grapher: Option<Grapher>,
}

impl CartographerBuilder {
    /// Replace the whole resolver configuration.
    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Extension suffixes tried in turn (`""` means "as given").
    pub fn extensions(mut self, extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Directory names probed during the upward module walk.
    pub fn modules(mut self, modules: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.modules = modules.into_iter().map(Into::into).collect();
        self
    }

    /// Manifest filenames tried inside a directory.
    pub fn packages(mut self, packages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.config.packages = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Manifest keys naming entry points.
    pub fn mains(mut self, mains: impl IntoIterator<Item = MainSpec>) -> Self {
        self.config.mains = mains.into_iter().collect();
        self
    }

    /// Base name for directory-index fallback.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.config.index = index.into();
        self
    }

    /// Filesystem seam (default: [`NativeRuntime`]).
    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Base directory for entry resolution (default: the runtime's cwd).
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Share an existing path-keyed file cache.
    pub fn file_cache(mut self, files: Arc<FileCache>) -> Self {
        self.files = Some(files);
        self
    }

    /// Use a pre-built resolver (its config, runtime and cache win).
    pub fn resolver(mut self, resolver: Arc<Resolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Use a pre-built grapher (its resolver wins).
    pub fn grapher(mut self, grapher: Grapher) -> Self {
        self.grapher = Some(grapher);
        self
    }

    pub fn build(self) -> Cartographer {
        let Self {
            config,
            runtime,
            cwd,
            files,
            resolver,
            grapher,
        } = self;

        let (resolver, grapher) = match grapher {
            Some(grapher) => {
                let resolver = resolver.unwrap_or_else(|| Arc::clone(grapher.resolver()));
                (resolver, grapher)
            }
            None => {
                let resolver = resolver.unwrap_or_else(|| {
                    let runtime = runtime.unwrap_or_else(|| Arc::new(NativeRuntime::new()));
                    let files = files.unwrap_or_default();
                    let mut resolver = Resolver::new(config, runtime, files);
                    if let Some(cwd) = cwd {
                        resolver = resolver.with_cwd(cwd);
                    }
                    Arc::new(resolver)
                });
                let grapher = Grapher::new(Arc::clone(&resolver));
                (resolver, grapher)
            }
        };

        Cartographer { resolver, grapher }
    }
}
