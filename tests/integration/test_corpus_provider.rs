//! Corpus location, on-demand indexing and the shared resolver cache

use crate::common::{TestCorpus, fixture_key, version};
use apiref::{
    ApiRefError, Framework, IndexStore, LocalCorpus, ProviderRegistry, TypeInfoKind, TypeInfoNode,
    get_api_reference, get_api_reference_for_type_info, get_api_reference_summary,
};
use std::sync::Arc;

#[tokio::test]
async fn test_index_is_built_on_first_use() {
    let corpus = TestCorpus::new();
    let root = corpus.corpus_root();
    assert!(!IndexStore::exists(&root));

    let registry = ProviderRegistry::new(corpus.local());
    let result = get_api_reference(&registry, "sap.m.Button", Framework::OpenUI5, &version())
        .await
        .unwrap();
    assert_eq!(result.len(), 1);
    assert!(IndexStore::exists(&root));

    // The persisted artifact is what later processes read
    let store = IndexStore::load(&root).unwrap();
    let entry = store.get("sap.base.log").unwrap();
    assert_eq!(entry.name, "module:sap/base/Log");
    assert_eq!(entry.file_path, "sap.ui.core.api.json");
}

#[tokio::test]
async fn test_missing_index_without_build() {
    let corpus = TestCorpus::new();
    let registry =
        ProviderRegistry::new(LocalCorpus::new(corpus.data_dir()).with_build_missing_index(false));

    let err = get_api_reference(&registry, "sap.m.Button", Framework::OpenUI5, &version())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiRefError::IndexLoad { .. }));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_unknown_corpus_is_invalid_input() {
    let corpus = TestCorpus::new();
    let registry = ProviderRegistry::new(corpus.local());

    let other = apiref::FrameworkVersion::parse("1.38.0").unwrap();
    let err = get_api_reference(&registry, "sap.m.Button", Framework::OpenUI5, &other)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiRefError::InvalidInput { .. }));
    assert!(err.to_string().contains("No API reference data available for OpenUI5 version 1.38.0"));
}

#[tokio::test]
async fn test_concurrent_lookups_share_one_resolver() {
    let corpus = TestCorpus::new();
    let registry = Arc::new(ProviderRegistry::new(corpus.local()));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let query = if i % 2 == 0 {
                    "sap.m.Button#addStyleClass"
                } else {
                    "sap/ui/core/library"
                };
                get_api_reference_summary(&registry, query, Framework::OpenUI5, &version())
                    .await
                    .unwrap()
            })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    assert!(results.iter().step_by(2).all(|r| r == &results[0]));
    assert!(results.iter().skip(1).step_by(2).all(|r| r == &results[1]));
    assert_eq!(results[1].len(), 3);

    assert_eq!(registry.len(), 1);
    let provider = registry.get(&fixture_key()).unwrap();
    assert_eq!(provider.documents().len(), 2);
}

#[tokio::test]
async fn test_type_info_through_registry() {
    let corpus = TestCorpus::new();
    let registry = ProviderRegistry::new(corpus.local());

    let node = TypeInfoNode::new(TypeInfoKind::MetadataProperty, "busy").with_parent(
        TypeInfoNode::new(TypeInfoKind::Class, "Control")
            .with_parent(TypeInfoNode::new(TypeInfoKind::Module, "sap/ui/core/Control")),
    );
    let formatted =
        get_api_reference_for_type_info(&registry, &node, Framework::OpenUI5, &version())
            .await
            .unwrap();
    let value = serde_json::to_value(&formatted).unwrap();
    assert_eq!(value["kind"], "ui5-property");
    assert_eq!(value["name"], "busy");
    assert_eq!(value["defaultValue"], false);
    assert_eq!(value["module"], "sap.ui.core.Control");
}
