//! Location of per-version documentation corpora
//!
//! Fetching a corpus is not handled here. A [`CorpusProvider`] only tells the
//! resolver where an already-provisioned corpus lives.

use std::future::Future;
use std::path::{Path, PathBuf};

use super::index::{IndexStore, document_paths};
use crate::config::Settings;
use crate::error::{ApiRefError, ApiRefResult};
use crate::types::CorpusKey;

/// Sub-directory of the data directory that holds the corpora
pub const CORPUS_DIR_NAME: &str = "api_json_files";

/// Supplies the root directory of the corpus for a framework version.
///
/// The returned directory must contain an `index.json` consistent with the
/// documents next to it.
pub trait CorpusProvider: Send + Sync {
    fn corpus_root(&self, key: &CorpusKey) -> impl Future<Output = ApiRefResult<PathBuf>> + Send;
}

/// Corpora stored below a local data directory
/// (`<data_dir>/api_json_files/<framework>-<version>`)
#[derive(Debug, Clone)]
pub struct LocalCorpus {
    base_dir: PathBuf,
    build_missing_index: bool,
}

impl LocalCorpus {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: data_dir.as_ref().join(CORPUS_DIR_NAME),
            build_missing_index: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.corpus.data_dir)
            .with_build_missing_index(settings.corpus.build_missing_index)
    }

    /// Whether a corpus without `index.json` gets indexed on first use
    pub fn with_build_missing_index(mut self, enabled: bool) -> Self {
        self.build_missing_index = enabled;
        self
    }

    pub fn dir_for(&self, key: &CorpusKey) -> PathBuf {
        self.base_dir.join(key.dir_name())
    }

    fn prepare(&self, key: &CorpusKey) -> ApiRefResult<PathBuf> {
        let dir = self.dir_for(key);
        if !dir.is_dir() {
            return Err(ApiRefError::invalid_input(format!(
                "No API reference data available for {} version {} (expected at {})",
                key.framework,
                key.version,
                dir.display()
            )));
        }
        if IndexStore::exists(&dir) {
            return Ok(dir);
        }
        if !self.build_missing_index || document_paths(&dir)?.is_empty() {
            return Err(ApiRefError::IndexLoad {
                path: IndexStore::index_path(&dir),
                reason: "index artifact is missing".to_string(),
            });
        }

        tracing::info!("Building API reference index for {key}...");
        let store = IndexStore::build_from_dir(&dir)?;
        store.save(&dir)?;
        Ok(dir)
    }
}

impl CorpusProvider for LocalCorpus {
    async fn corpus_root(&self, key: &CorpusKey) -> ApiRefResult<PathBuf> {
        let this = self.clone();
        let key = key.clone();
        tokio::task::spawn_blocking(move || this.prepare(&key))
            .await
            .map_err(|e| ApiRefError::IndexLoad {
                path: PathBuf::new(),
                reason: format!("index preparation task failed: {e}"),
            })?
    }
}

/// A provider that always answers with one fixed directory
#[derive(Debug, Clone)]
pub struct FixedCorpus(pub PathBuf);

impl CorpusProvider for FixedCorpus {
    async fn corpus_root(&self, _key: &CorpusKey) -> ApiRefResult<PathBuf> {
        Ok(self.0.clone())
    }
}
