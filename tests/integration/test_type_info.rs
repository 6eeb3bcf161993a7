//! Type-information resolution against the fixture corpus

use crate::common::TestCorpus;
use apiref::display::SymbolAttributes;
use apiref::{ApiRefError, FieldKind, ResolvedRecord, TypeInfoKind, TypeInfoNode};

fn node(kind: TypeInfoKind, name: &str) -> TypeInfoNode {
    TypeInfoNode::new(kind, name)
}

fn in_button_module(kind: TypeInfoKind, name: &str) -> TypeInfoNode {
    node(kind, name).with_parent(
        node(TypeInfoKind::Class, "Button")
            .with_parent(node(TypeInfoKind::Module, "sap/m/Button").with_library("sap.m")),
    )
}

#[tokio::test]
async fn test_namespace_chain_without_module() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let get_core = node(TypeInfoKind::Method, "getCore").with_parent(
        node(TypeInfoKind::Namespace, "ui").with_parent(node(TypeInfoKind::Namespace, "sap")),
    );
    let info = provider.resolve_type_info(&get_core).await.unwrap();
    assert_eq!(info.record.name(), "getCore");
    assert_eq!(info.library, "sap.ui.core");
    assert_eq!(info.module_name.as_deref(), Some("sap.ui"));

    let formatted = provider.symbol_for_type_info(&get_core).await.unwrap();
    assert_eq!(formatted.kind(), "method");
    assert_eq!(formatted.module(), Some("sap.ui"));

    let missing = node(TypeInfoKind::Method, "getDoesNotExist").with_parent(
        node(TypeInfoKind::Namespace, "ui").with_parent(node(TypeInfoKind::Namespace, "sap")),
    );
    let err = provider.resolve_type_info(&missing).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "Could not find field 'getDoesNotExist' in symbol 'sap.ui' of library 'sap.ui.core'"
    );
}

#[tokio::test]
async fn test_members_of_a_class_module() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let cases = [
        (TypeInfoKind::Method, "getText", FieldKind::Method),
        (TypeInfoKind::Constructor, "constructor", FieldKind::Constructor),
        (TypeInfoKind::MetadataEvent, "press", FieldKind::Event),
        (TypeInfoKind::MetadataProperty, "text", FieldKind::Ui5Property),
        (TypeInfoKind::MetadataAggregation, "tooltip", FieldKind::Ui5Aggregation),
        (TypeInfoKind::MetadataAssociation, "ariaLabelledBy", FieldKind::Ui5Association),
    ];
    for (kind, name, expected) in cases {
        let info = provider
            .resolve_type_info(&in_button_module(kind, name))
            .await
            .unwrap();
        let ResolvedRecord::Field(field) = &info.record else {
            panic!("expected a field for {kind}");
        };
        assert_eq!(field.kind, expected, "{kind} {name}");
        assert_eq!(info.module_name.as_deref(), Some("sap.m.Button"));
    }

    let class = provider
        .resolve_type_info(&node(TypeInfoKind::Class, "Button").with_parent(node(
            TypeInfoKind::Module,
            "sap/m/Button",
        )))
        .await
        .unwrap();
    assert!(class.record.is_symbol());
    assert_eq!(class.record.name(), "sap.m.Button");
}

#[tokio::test]
async fn test_structural_wrappers_are_skipped() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let call = node(TypeInfoKind::Wrapper, "call-expression")
        .with_parent(in_button_module(TypeInfoKind::Method, "setText"));
    let info = provider.resolve_type_info(&call).await.unwrap();
    assert_eq!(info.record.name(), "setText");

    let summary = provider
        .symbol_for_type_info_and_summarize(&node(TypeInfoKind::Module, "sap/m/Button"))
        .await
        .unwrap();
    assert!(summary.is_summary());
    assert_eq!(summary.name(), "sap.m.Button");
}

#[tokio::test]
async fn test_enum_values() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let accept = node(TypeInfoKind::Enum, "Accept")
        .with_parent(node(TypeInfoKind::Module, "sap/m/ButtonType"));
    let info = provider.resolve_type_info(&accept).await.unwrap();
    assert_eq!(info.record.kind_str(), "enum-property");
    assert_eq!(info.module_name.as_deref(), Some("sap.m.ButtonType"));

    let missing = node(TypeInfoKind::Enum, "Accept")
        .with_parent(node(TypeInfoKind::Module, "sap/m/DoesNotExist"));
    let err = provider.resolve_type_info(&missing).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Could not find symbol for module 'sap/m/DoesNotExist'");

    let accept = node(TypeInfoKind::Enum, "Accept").with_parent(
        node(TypeInfoKind::Namespace, "ButtonType").with_parent(
            node(TypeInfoKind::Namespace, "m").with_parent(node(TypeInfoKind::Namespace, "sap")),
        ),
    );
    let info = provider.resolve_type_info(&accept).await.unwrap();
    let ResolvedRecord::Field(field) = &info.record else {
        panic!("expected an enum value");
    };
    assert_eq!(field.kind, FieldKind::EnumProperty);
    assert_eq!(field.name(), "Accept");
}

#[tokio::test]
async fn test_kind_mismatch_is_fatal() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let aggregation = node(TypeInfoKind::MetadataAggregation, "content").with_parent(
        node(TypeInfoKind::Namespace, "ValueState").with_parent(
            node(TypeInfoKind::Namespace, "core").with_parent(
                node(TypeInfoKind::Namespace, "ui")
                    .with_parent(node(TypeInfoKind::Namespace, "sap")),
            ),
        ),
    );
    let err = provider.resolve_type_info(&aggregation).await.unwrap_err();
    assert!(!err.is_not_found());
    assert!(matches!(err, ApiRefError::KindMismatch { .. }));
    assert_eq!(
        err.to_string(),
        "Expected API reference to be a class, but got enum"
    );

    // Typedefs never own type positions
    let typedef = node(TypeInfoKind::Property, "role").with_parent(node(
        TypeInfoKind::Namespace,
        "sap.m.ButtonAccessibilityInfo",
    ));
    let err = provider.resolve_type_info(&typedef).await.unwrap_err();
    assert!(matches!(err, ApiRefError::KindMismatch { .. }));
}

#[tokio::test]
async fn test_malformed_chains() {
    let corpus = TestCorpus::new();
    let provider = corpus.provider();

    let orphan =
        node(TypeInfoKind::Method, "getText").with_parent(node(TypeInfoKind::Class, "Button"));
    let err = provider.resolve_type_info(&orphan).await.unwrap_err();
    assert!(matches!(err, ApiRefError::MalformedTypeInfo { .. }));
    assert!(err.to_string().contains("Could not extract module name"));

    let settings = node(TypeInfoKind::ManagedObjectSettings, "mSettings")
        .with_parent(node(TypeInfoKind::Module, "sap/m/Button"));
    let err = provider.resolve_type_info(&settings).await.unwrap_err();
    assert!(matches!(err, ApiRefError::MalformedTypeInfo { .. }));
}

#[test]
fn test_node_from_json() {
    let node: TypeInfoNode = serde_json::from_str(
        r#"{"kind": "metadata-aggregation", "name": "items",
            "parent": {"kind": "jsx-attribute", "name": "x",
                "parent": {"kind": "module", "name": "sap/m/List", "library": "sap.m"}}}"#,
    )
    .unwrap();
    assert_eq!(node.kind, TypeInfoKind::MetadataAggregation);
    let parent = node.parent.as_deref().unwrap();
    assert_eq!(parent.kind, TypeInfoKind::Wrapper);
    assert_eq!(parent.parent.as_deref().unwrap().library.as_deref(), Some("sap.m"));
}
