//! Bare-module resolution: the upward module-directory walk.

use std::path::Path;

use path_clean::PathClean;
use tracing::debug;

use super::{Resolution, ResolveError, Resolver};

impl Resolver {
    /// Walk from `base` toward the filesystem root, probing
    /// `<ancestor>/<module dir>/<name>` with relative resolution at every
    /// step. Module directories are consulted in configured order at each
    /// ancestor before moving up. The walk ends, with `NotFound`, once the
    /// base is exhausted.
    pub(crate) async fn resolve_module(
        &self,
        base: &str,
        name: &str,
    ) -> Result<Resolution, ResolveError> {
        let force_directory = name.ends_with('/');
        let mut base = if base.len() > 1 {
            base.trim_end_matches('/').to_string()
        } else {
            base.to_string()
        };

        loop {
            for module_dir in &self.config.modules {
                let candidate = Path::new(&base).join(module_dir).join(name).clean();
                let candidate = candidate.to_string_lossy();
                debug!(candidate = %candidate, "probing module directory");
                if let Resolution::File(record) =
                    self.resolve_relative(&candidate, force_directory).await?
                {
                    return Ok(Resolution::File(record));
                }
            }

            // Cut the base at its final separator and retry the module
            // directories from the top.
            match base.rfind('/') {
                Some(cut) => base.truncate(cut),
                None => base.clear(),
            }
            if base.is_empty() {
                return Ok(Resolution::NotFound);
            }
        }
    }
}
