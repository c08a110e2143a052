//! File resolution: extension probing over the path-keyed cache.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use cartographer_core::RuntimeError;

use super::Resolver;
use crate::record::FileRecord;

impl Resolver {
    /// Try `candidate` with each configured extension in turn and return
    /// the first record that exists. The empty extension probes the
    /// candidate as given. A cache hit is indistinguishable from a fresh
    /// read. Missing paths advance to the next extension silently; other
    /// stat/read failures (permissions, non-UTF-8 contents) are logged and
    /// then also advance, so resolution degrades to "next candidate"
    /// rather than aborting.
    pub(crate) async fn load_file(&self, candidate: &str) -> Option<Arc<FileRecord>> {
        for extension in &self.config.extensions {
            let probe = PathBuf::from(format!("{candidate}{extension}"));

            if let Some(record) = self.files.get(&probe) {
                debug!(path = %probe.display(), "file cache hit");
                return Some(record);
            }

            match self.runtime.metadata(&probe).await {
                Ok(metadata) if metadata.is_file => {}
                Ok(_) => continue,
                Err(RuntimeError::FileNotFound(_)) => continue,
                Err(error) => {
                    warn!(path = %probe.display(), %error, "stat failed, trying next candidate");
                    continue;
                }
            }

            match self.runtime.read_file(&probe).await {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(source) => {
                        debug!(path = %probe.display(), "resolved file");
                        return Some(self.files.insert(FileRecord::new(probe, source)));
                    }
                    Err(_) => {
                        warn!(path = %probe.display(), "skipping non-UTF-8 file");
                        continue;
                    }
                },
                Err(RuntimeError::FileNotFound(_)) => continue,
                Err(error) => {
                    warn!(path = %probe.display(), %error, "read failed, trying next candidate");
                    continue;
                }
            }
        }
        None
    }
}
