//! Directory resolution: manifest entry points and index fallback.

use std::path::Path;

use path_clean::PathClean;
use serde_json::Value;
use tracing::{debug, warn};

use cartographer_core::RuntimeError;

use super::{Resolution, ResolveError, Resolver};

impl Resolver {
    /// Resolve a directory to a file.
    ///
    /// Manifests are tried in configured order. A manifest that reads and
    /// parses selects the entry point (first main-spec with a usable leaf,
    /// else the index name); the entry is tried as a file and then as
    /// `<entry>/<index>`. A chosen manifest whose entry point fails to
    /// resolve stops the manifest search entirely; later manifests are not
    /// consulted. The final fallback is `<directory>/<index>`.
    ///
    /// A manifest that is present but not valid JSON aborts this
    /// resolution with [`ResolveError::MalformedManifest`].
    pub(crate) async fn load_directory(&self, dir: &str) -> Result<Resolution, ResolveError> {
        for manifest_name in &self.config.packages {
            let manifest_path = Path::new(dir).join(manifest_name);
            let bytes = match self.runtime.read_file(&manifest_path).await {
                Ok(bytes) => bytes,
                Err(RuntimeError::FileNotFound(_)) => continue,
                Err(error) => {
                    warn!(path = %manifest_path.display(), %error, "manifest read failed, trying next manifest");
                    continue;
                }
            };

            let manifest: Value = serde_json::from_slice(&bytes)
                .map_err(|_| ResolveError::MalformedManifest(manifest_path.clone()))?;

            let entry = self
                .config
                .mains
                .iter()
                .find_map(|spec| spec.descend(&manifest))
                .unwrap_or(self.config.index.as_str());
            debug!(path = %manifest_path.display(), entry, "selected manifest entry");

            let entry_path = join(dir, entry);
            if let Some(record) = self.load_file(&entry_path).await {
                return Ok(Resolution::File(record));
            }

            let entry_index = join(&entry_path, &self.config.index);
            if let Some(record) = self.load_file(&entry_index).await {
                return Ok(Resolution::File(record));
            }

            break;
        }

        let index_path = join(dir, &self.config.index);
        match self.load_file(&index_path).await {
            Some(record) => Ok(Resolution::File(record)),
            None => Ok(Resolution::NotFound),
        }
    }
}

fn join(dir: &str, tail: &str) -> String {
    Path::new(dir).join(tail).clean().to_string_lossy().into_owned()
}
