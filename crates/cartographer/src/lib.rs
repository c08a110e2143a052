//! # cartographer
//!
//! Static dependency-graph analysis for CommonJS-style sources: given an
//! entry specifier, cartographer scans files for `require(...)` call
//! sites, resolves each import with a configurable node-style algorithm,
//! and returns the entry's file record with its transitive dependency
//! tree populated in place. A packager consumes the tree to emit
//! load-ordered bundles.
//!
//! ```rust,no_run
//! use cartographer::Cartographer;
//!
//! # async fn example() -> Result<(), cartographer::CartographerError> {
//! let cartographer = Cartographer::new();
//! let root = cartographer.analyze("./src/main.js").await?;
//!
//! for dep in root.dependencies().unwrap_or_default() {
//!     match (&dep.file, &dep.error) {
//!         (Some(file), _) => println!("{} -> {}", dep.specifier, file.path.display()),
//!         (_, Some(err)) => println!("{} -> {}", dep.specifier, err),
//!         _ => unreachable!("resolution always terminates with a file or an error"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The pieces compose: [`Scanner`] extracts import call sites, [`Resolver`]
//! maps specifiers to files, [`Grapher`] walks the transitive closure, and
//! [`Cartographer`] is the facade wiring them over shared caches. Each is
//! separately instantiable and swappable through the builder.
//!
//! Dynamic imports (any `require` argument that is not a single string
//! literal) and unresolvable specifiers are recorded per-edge as data, not
//! errors: check `file` and `error` on each [`DependencyRecord`].

pub mod cache;
pub mod config;
pub mod facade;
pub mod graph;
pub mod grapher;
#[cfg(feature = "logging")]
pub mod logging;
pub mod record;
pub mod resolver;
pub mod scanner;

#[cfg(test)]
mod tests;

pub use cache::FileCache;
pub use config::{MainSpec, ResolverConfig};
pub use facade::{Cartographer, CartographerBuilder, CartographerError};
pub use graph::{files, load_order, stats, GraphStats};
pub use grapher::{GraphError, Grapher};
pub use record::{DependencyRecord, EdgeError, FileRecord, ImportDescriptor, Reference};
pub use resolver::{Resolution, ResolveError, Resolver};
pub use scanner::{ScanError, Scanner};

// Re-export the runtime seam so consumers don't need a separate
// cartographer-core dependency for the common case.
pub use cartographer_core::{FileMetadata, NativeRuntime, Runtime, RuntimeError};
