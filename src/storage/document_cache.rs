//! Lazily loaded library documents
//!
//! Each document is parsed at most once per process, even when many
//! resolutions ask for it concurrently. Hits are served from a concurrent map
//! without touching the load lock.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::{ApiRefError, ApiRefResult};
use crate::symbol::SymbolDocument;

#[derive(Debug)]
pub struct DocumentCache {
    root: PathBuf,
    documents: DashMap<String, Arc<SymbolDocument>>,
    load_lock: Mutex<()>,
}

impl DocumentCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            documents: DashMap::new(),
            load_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get a document by its path relative to the corpus root.
    ///
    /// A document that cannot be read or parsed is a fatal error: the index
    /// promised that it exists.
    pub async fn get(&self, reference: &str) -> ApiRefResult<Arc<SymbolDocument>> {
        if let Some(doc) = self.cached(reference) {
            return Ok(doc);
        }

        let _guard = self.load_lock.lock().await;

        // Another request may have loaded it while we waited
        if let Some(doc) = self.cached(reference) {
            tracing::debug!("Document {reference} loaded by a concurrent request");
            return Ok(doc);
        }

        let path = self.root.join(reference);
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ApiRefError::DocumentLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        // Library documents run to several megabytes
        let document = tokio::task::spawn_blocking(move || SymbolDocument::from_json(&content))
            .await
            .map_err(|e| ApiRefError::DocumentLoad {
                path: path.clone(),
                reason: format!("parse task failed: {e}"),
            })?
            .map(Arc::new)
            .map_err(|e| ApiRefError::DocumentLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        tracing::info!(
            "Loaded {} symbols of library {} from {}",
            document.len(),
            document.library(),
            path.display()
        );

        self.documents
            .insert(reference.to_string(), Arc::clone(&document));
        Ok(document)
    }

    fn cached(&self, reference: &str) -> Option<Arc<SymbolDocument>> {
        self.documents
            .get(reference)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Number of documents loaded so far
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
