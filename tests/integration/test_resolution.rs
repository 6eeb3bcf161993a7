//! String query resolution against the fixture corpus

use crate::common::TestCorpus;
use apiref::display::SymbolAttributes;
use apiref::{ApiRefError, FieldKind, Resolution, ResolvedRecord, SymbolInfo};

fn single(resolution: Resolution) -> SymbolInfo {
    match resolution {
        Resolution::Single(info) => info,
        Resolution::Many(infos) => panic!("expected one result, got {}", infos.len()),
    }
}

fn field_kind(info: &SymbolInfo) -> FieldKind {
    match &info.record {
        ResolvedRecord::Field(field) => field.kind,
        ResolvedRecord::Symbol(symbol) => panic!("expected a field, got {symbol}"),
    }
}

#[tokio::test]
async fn test_every_index_key_resolves_to_its_symbol() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let keys: Vec<String> = provider
        .index()
        .keys()
        .into_iter()
        .map(str::to_string)
        .collect();
    assert!(keys.len() >= 10, "fixture corpus should be indexed");

    for key in keys {
        let entry = provider.index().get(&key).unwrap().clone();
        match provider.resolve(&key).await {
            Ok(resolution) => {
                let info = single(resolution);
                assert_eq!(info.record.name(), entry.name, "key {key}");
            }
            Err(ApiRefError::NotFound { message }) => {
                assert_eq!(message, format!("Symbol '{}' is not public API", entry.name));
            }
            Err(e) => panic!("unexpected error for {key}: {e}"),
        }
    }
}

#[tokio::test]
async fn test_field_lookup_tags_the_collection() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let cases = [
        ("sap.m.Button#text", "text", FieldKind::Ui5Property),
        ("sap.m.Button#getText", "getText", FieldKind::Method),
        ("sap.m.Button#press", "press", FieldKind::Event),
        ("sap.m.Button#constructor", "constructor", FieldKind::Constructor),
        ("sap.m.Button#tooltip", "tooltip", FieldKind::Ui5Aggregation),
        ("sap.m.Button#ariaLabelledBy", "ariaLabelledBy", FieldKind::Ui5Association),
        ("sap.m.ButtonType.Accept", "Accept", FieldKind::EnumProperty),
        ("sap/m/ButtonAccessibilityInfo#role", "role", FieldKind::Property),
        ("sap.ui#getCore", "getCore", FieldKind::Method),
        ("module:sap/base/Log#info", "info", FieldKind::Method),
    ];

    for (query, name, kind) in cases {
        let info = single(provider.resolve(query).await.unwrap());
        assert!(
            info.record.name().eq_ignore_ascii_case(name),
            "{query} resolved to {}",
            info.record.name()
        );
        assert_eq!(field_kind(&info), kind, "{query}");
    }
}

#[tokio::test]
async fn test_field_names_are_case_insensitive() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let info = single(provider.resolve("SAP.M.BUTTON#GETTEXT").await.unwrap());
    assert_eq!(info.record.name(), "getText");
    assert_eq!(info.library, "sap.m");
    assert_eq!(info.module_name.as_deref(), Some("sap/m/Button"));
}

#[tokio::test]
async fn test_field_example_scenario() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let clean = provider.find_symbol("sap.m.Button#text").await.unwrap();
    assert_eq!(clean.len(), 1);
    assert_eq!(clean[0].name(), "text");
    assert_eq!(clean[0].kind(), "ui5-property");

    let spaced = provider.find_symbol(" sap.m .Button #text ").await.unwrap();
    assert_eq!(spaced, clean);

    let err = provider
        .resolve("sap.m.Button#doesNotExist")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "Could not find field 'doesNotExist' in symbol 'sap.m.Button' of library 'sap.m'"
    );
}

#[tokio::test]
async fn test_hidden_symbols_are_not_found() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    assert!(provider.index().contains_key("sap.m.buttonrenderer"));
    let err = provider.resolve("sap.m.ButtonRenderer").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Symbol 'sap.m.ButtonRenderer' is not public API");

    // Visibility of the owner is checked before any field lookup
    let err = provider.resolve("sap.m.ButtonRenderer#render").await.unwrap_err();
    assert_eq!(err.to_string(), "Symbol 'sap.m.ButtonRenderer' is not public API");
}

#[tokio::test]
async fn test_inherited_fields() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    // One level up, across libraries
    let info = single(provider.resolve("sap.m.Button#addStyleClass").await.unwrap());
    assert_eq!(info.record.name(), "addStyleClass");
    assert_eq!(info.library, "sap.ui.core");
    assert_eq!(info.module_name.as_deref(), Some("sap/ui/core/Control"));

    // Two levels up
    let info = single(provider.resolve("sap.m.Button#getDomRef").await.unwrap());
    assert_eq!(info.module_name.as_deref(), Some("sap/ui/core/Element"));

    // `extends` given as a list
    let info = single(provider.resolve("sap.m.ToggleButton#setText").await.unwrap());
    assert_eq!(info.record.name(), "setText");
    assert_eq!(field_kind(&info), FieldKind::Method);
}

#[tokio::test]
async fn test_module_containment() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let Resolution::Many(infos) = provider.resolve("sap/ui/core/library").await.unwrap() else {
        panic!("expected module contents");
    };
    let names: Vec<&str> = infos.iter().map(|info| info.record.name()).collect();
    assert_eq!(
        names,
        ["sap.ui.core", "sap.ui.core.ValueState", "sap.ui.core.TextAlign"]
    );
    assert!(
        infos
            .iter()
            .all(|info| info.module_name.as_deref() == Some("sap/ui/core/library"))
    );

    let formatted = provider.find_symbol("sap/ui/core/library").await.unwrap();
    assert_eq!(formatted.len(), 3);
    assert!(formatted.iter().all(|s| s.module() == Some("sap/ui/core/library")));
}

#[tokio::test]
async fn test_not_found_messages() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let err = provider.resolve("Button").await.unwrap_err();
    assert_eq!(err.to_string(), "Could not find symbol for query 'Button'");

    let err = provider
        .resolve("sap/ui/core/does-not-exist")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "Could not find field 'does-not-exist' in symbol 'sap.ui.core' of library 'sap.ui.core'"
    );
}

#[tokio::test]
async fn test_warm_resolution_matches_cold() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();
    assert!(provider.documents().is_empty());

    let queries = [
        "sap.m.Button",
        "sap.m.Button#addStyleClass",
        "sap/ui/core/library",
        "sap.ui#getCore",
    ];
    let mut cold = Vec::new();
    for query in queries {
        cold.push(provider.find_symbol(query).await.unwrap());
    }
    assert_eq!(provider.documents().len(), 2);

    for (query, expected) in queries.iter().zip(&cold) {
        let warm = provider.find_symbol(query).await.unwrap();
        assert_eq!(&warm, expected, "{query}");
    }
    assert_eq!(provider.documents().len(), 2);
}

#[tokio::test]
async fn test_summaries_only_shorten_symbols() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let symbol = provider.find_symbol_and_summarize("sap.m.ToggleButton").await.unwrap();
    assert!(symbol[0].is_summary());
    assert_eq!(
        symbol[0].attr("deprecatedText"),
        Some("Use {@link sap.m.SegmentedButton} instead.")
    );

    let field = provider
        .find_symbol_and_summarize("sap.m.Button#setText")
        .await
        .unwrap();
    assert!(!field[0].is_summary());
    assert_eq!(field[0].kind(), "method");
}
