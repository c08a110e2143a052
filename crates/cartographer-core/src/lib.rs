//! # cartographer-core
//!
//! Runtime abstraction and shared types for the cartographer workspace.
//!
//! This crate provides the filesystem seam the analyzer crates depend on.
//! It contains no dependency on the analysis crate, breaking the cyclic
//! dependency chain: platform implementations live here, consumers only
//! ever see `Arc<dyn Runtime>`.

pub mod runtime;

pub mod native_runtime;
pub use native_runtime::NativeRuntime;

// Test utilities (available in test builds and when test-utils is enabled)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use runtime::{FileMetadata, Runtime, RuntimeError, RuntimeResult};
