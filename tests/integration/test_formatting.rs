//! Output shape of resolved records

use crate::common::{TestCorpus, version};
use apiref::display::{SUMMARY_INFO, SymbolAttributes};
use apiref::{ApiReference, Framework, LookupReport, create_uri_for_symbol};
use serde_json::Value;

const SUMMARY_KEYS: &[&str] = &[
    "kind",
    "name",
    "module",
    "library",
    "export",
    "description",
    "extends",
    "deprecatedText",
    "experimentalText",
    "_summaryInfo",
];

fn find_key(value: &Value, key: &str) -> bool {
    match value {
        Value::Object(map) => map.contains_key(key) || map.values().any(|v| find_key(v, key)),
        Value::Array(items) => items.iter().any(|v| find_key(v, key)),
        _ => false,
    }
}

fn find_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty() || items.iter().any(find_empty),
        Value::Object(map) => map.is_empty() || map.values().any(find_empty),
        _ => false,
    }
}

#[tokio::test]
async fn test_formatted_records_are_pruned() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    for query in [
        "sap.m.Button",
        "sap.m.Button#press",
        "sap.m.ButtonAccessibilityInfo",
        "sap/ui/core/library",
        "module:sap/base/Log",
    ] {
        for symbol in provider.find_symbol(query).await.unwrap() {
            let value = serde_json::to_value(&symbol).unwrap();
            assert!(!find_key(&value, "visibility"), "{query} keeps visibility");
            assert!(!find_key(&value, "basename"), "{query} keeps basename");
            assert!(!find_empty(&value), "{query} keeps empty values: {value}");
        }
    }
}

#[tokio::test]
async fn test_hidden_members_are_dropped() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let button = provider.find_symbol("sap.m.Button").await.unwrap().remove(0);
    let methods: Vec<&str> = button
        .get("methods")
        .and_then(Value::as_array)
        .unwrap()
        .iter()
        .filter_map(|m| m.get("name").and_then(Value::as_str))
        .collect();
    assert_eq!(methods, ["getText", "setText"]);
    assert_eq!(button.library(), "sap.m");
    assert_eq!(button.module(), Some("sap/m/Button"));
    assert_eq!(button.export(), None);
}

#[tokio::test]
async fn test_summary_keys_are_restricted() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    for query in ["sap.m.Button", "sap.m.ToggleButton", "sap.ui", "sap/ui/core/library"] {
        for reference in provider.find_symbol_and_summarize(query).await.unwrap() {
            assert!(reference.is_summary());
            let value = serde_json::to_value(&reference).unwrap();
            let map = value.as_object().unwrap();
            for key in map.keys() {
                assert!(SUMMARY_KEYS.contains(&key.as_str()), "{query} keeps {key}");
            }
            assert_eq!(map["_summaryInfo"], SUMMARY_INFO);
        }
    }
}

#[tokio::test]
async fn test_field_module_is_injected() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let field = provider.find_symbol("sap.ui#getCore").await.unwrap().remove(0);
    assert_eq!(field.kind(), "method");
    assert_eq!(field.module(), Some("sap/ui/Global"));
    assert_eq!(field.library(), "sap.ui.core");
}

#[tokio::test]
async fn test_report_links_each_result() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let references: Vec<ApiReference> = vec![
        provider.find_symbol("sap.m.Button").await.unwrap().remove(0).into(),
        provider.find_symbol("sap.m.Button#setText").await.unwrap().remove(0).into(),
        provider.find_symbol("sap.m.Button#tooltip").await.unwrap().remove(0).into(),
        provider.find_symbol("sap.m.ButtonType").await.unwrap().remove(0).into(),
    ];
    let uris: Vec<String> = references
        .iter()
        .map(|r| create_uri_for_symbol(r, Framework::OpenUI5, &version()))
        .collect();
    assert_eq!(
        uris,
        [
            "https://openui5.org/1.120.30/api/sap.m.Button/",
            "https://openui5.org/1.120.30/api/sap.m.Button/methods/setText",
            "https://openui5.org/1.120.30/api/sap.m.Button/aggregations/tooltip",
            "https://openui5.org/1.120.30/api/sap.m.library/ButtonType/",
        ]
    );

    let report = LookupReport::new(Framework::SAPUI5, version(), references, true);
    assert_eq!(report.len(), 4);
    assert!(
        report.results[0]
            .uri
            .as_deref()
            .is_some_and(|uri| uri.starts_with("https://ui5.sap.com/1.120.30/"))
    );
    let text = report.to_string();
    assert!(text.contains("Found 4 symbols in SAPUI5 1.120.30"));
}
