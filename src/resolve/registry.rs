//! Process-wide cache of resolvers, one per framework version

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::normalize::validate_query;
use super::{ApiReferenceProvider, TypeInfoNode};
use crate::display::{ApiReference, FormattedSymbol};
use crate::error::{ApiRefError, ApiRefResult};
use crate::storage::CorpusProvider;
use crate::types::{CorpusKey, Framework, FrameworkVersion};

/// Builds resolvers on first use and hands out shared references afterwards.
///
/// Hits only take a read lock. A cold build holds the build lock, so each
/// corpus is opened once even under concurrent first requests.
pub struct ProviderRegistry<P> {
    corpus: P,
    providers: RwLock<HashMap<CorpusKey, Arc<ApiReferenceProvider>>>,
    build_lock: Mutex<()>,
}

impl<P: CorpusProvider> ProviderRegistry<P> {
    pub fn new(corpus: P) -> Self {
        Self {
            corpus,
            providers: RwLock::new(HashMap::new()),
            build_lock: Mutex::new(()),
        }
    }

    pub fn corpus(&self) -> &P {
        &self.corpus
    }

    pub fn get(&self, key: &CorpusKey) -> Option<Arc<ApiReferenceProvider>> {
        self.providers.read().get(key).cloned()
    }

    /// Number of resolvers built so far
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }

    pub async fn get_or_create(&self, key: &CorpusKey) -> ApiRefResult<Arc<ApiReferenceProvider>> {
        if let Some(provider) = self.get(key) {
            return Ok(provider);
        }

        let _guard = self.build_lock.lock().await;
        if let Some(provider) = self.get(key) {
            return Ok(provider);
        }

        let root = self.corpus.corpus_root(key).await?;
        tracing::info!("Opening API reference for {key} at {}", root.display());
        let index_root = root.clone();
        let provider = tokio::task::spawn_blocking(move || ApiReferenceProvider::create(root))
            .await
            .map_err(|e| ApiRefError::IndexLoad {
                path: index_root,
                reason: format!("index load task failed: {e}"),
            })??;
        let provider = Arc::new(provider);
        self.providers
            .write()
            .insert(key.clone(), Arc::clone(&provider));
        Ok(provider)
    }
}

async fn provider_for<P: CorpusProvider>(
    registry: &ProviderRegistry<P>,
    framework: Framework,
    version: &FrameworkVersion,
) -> ApiRefResult<Arc<ApiReferenceProvider>> {
    registry
        .get_or_create(&CorpusKey::new(framework, version.clone()))
        .await
}

/// Look up a query, e.g. `sap.ui.table.Table`, in the given framework version
pub async fn get_api_reference<P: CorpusProvider>(
    registry: &ProviderRegistry<P>,
    query: &str,
    framework: Framework,
    version: &FrameworkVersion,
) -> ApiRefResult<Vec<FormattedSymbol>> {
    validate_query(query)?;
    let provider = provider_for(registry, framework, version).await?;
    provider.find_symbol(query).await
}

pub async fn get_api_reference_summary<P: CorpusProvider>(
    registry: &ProviderRegistry<P>,
    query: &str,
    framework: Framework,
    version: &FrameworkVersion,
) -> ApiRefResult<Vec<ApiReference>> {
    validate_query(query)?;
    let provider = provider_for(registry, framework, version).await?;
    provider.find_symbol_and_summarize(query).await
}

pub async fn get_api_reference_for_type_info<P: CorpusProvider>(
    registry: &ProviderRegistry<P>,
    node: &TypeInfoNode,
    framework: Framework,
    version: &FrameworkVersion,
) -> ApiRefResult<FormattedSymbol> {
    let provider = provider_for(registry, framework, version).await?;
    provider.symbol_for_type_info(node).await
}

pub async fn get_api_reference_summary_for_type_info<P: CorpusProvider>(
    registry: &ProviderRegistry<P>,
    node: &TypeInfoNode,
    framework: Framework,
    version: &FrameworkVersion,
) -> ApiRefResult<ApiReference> {
    let provider = provider_for(registry, framework, version).await?;
    provider.symbol_for_type_info_and_summarize(node).await
}
