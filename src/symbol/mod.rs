//! Documentation records of a library corpus.
//!
//! A library document (`<library>.api.json`) holds a flat list of top-level
//! symbols. Each symbol is one variant of [`SymbolRecord`], tagged by its
//! `kind` attribute. Only the attributes needed for lookup are typed; every
//! other attribute (descriptions, deprecation notes, signatures, ...) is kept
//! verbatim so that it can be shown to the caller.

pub mod field;

pub use field::{FieldKind, FieldRecord};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Visibility marker of a symbol or nested entry.
///
/// Documents use more values than the four lookup cares about (UI5 metadata
/// marks internal aggregations `hidden`, for instance). Those are kept as
/// [`Visibility::Other`] and never hide anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    Restricted,
    Other(String),
}

impl Visibility {
    /// Private and restricted API is never exposed to callers
    pub fn is_hidden(&self) -> bool {
        matches!(self, Visibility::Private | Visibility::Restricted)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Restricted => "restricted",
            Visibility::Other(value) => value,
        }
    }
}

impl From<String> for Visibility {
    fn from(value: String) -> Self {
        match value.as_str() {
            "public" => Visibility::Public,
            "protected" => Visibility::Protected,
            "private" => Visibility::Private,
            "restricted" => Visibility::Restricted,
            _ => Visibility::Other(value),
        }
    }
}

impl From<Visibility> for String {
    fn from(value: Visibility) -> Self {
        match value {
            Visibility::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Parent(s) a symbol inherits from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Extends {
    One(String),
    Many(Vec<String>),
}

impl Extends {
    /// Parent used for the inheritance fallback. For lists this is the first entry.
    pub fn primary(&self) -> Option<&str> {
        match self {
            Extends::One(name) => Some(name.as_str()).filter(|n| !n.is_empty()),
            Extends::Many(names) => names.first().map(String::as_str),
        }
    }
}

/// Attributes shared by every top-level symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolBase {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Extends>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,

    /// Everything the resolver does not interpret
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// An entry of a nested collection (method, property, event, parameter, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(default)]
    pub name: String,

    /// Everything else, `visibility` included
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// The `ui5-metadata` block of managed object classes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ui5Metadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregations: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Member>,

    #[serde(
        rename = "specialSettings",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub special_settings: Vec<Member>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSymbol {
    #[serde(flatten)]
    pub base: SymbolBase,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Member>,

    #[serde(
        rename = "ui5-metadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ui5_metadata: Option<Ui5Metadata>,
}

/// Shape shared by `namespace`, `member` and `object` symbols
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamespaceSymbol {
    #[serde(flatten)]
    pub base: SymbolBase,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceSymbol {
    #[serde(flatten)]
    pub base: SymbolBase,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumSymbol {
    #[serde(flatten)]
    pub base: SymbolBase,

    /// Enum values
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedefSymbol {
    #[serde(flatten)]
    pub base: SymbolBase,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Member>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Member>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSymbol {
    #[serde(flatten)]
    pub base: SymbolBase,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Member>,
}

/// A top-level documented entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SymbolRecord {
    Class(ClassSymbol),
    Interface(InterfaceSymbol),
    Namespace(NamespaceSymbol),
    Member(NamespaceSymbol),
    Object(NamespaceSymbol),
    Enum(EnumSymbol),
    Typedef(TypedefSymbol),
    Function(FunctionSymbol),
}

impl SymbolRecord {
    pub fn base(&self) -> &SymbolBase {
        match self {
            SymbolRecord::Class(s) => &s.base,
            SymbolRecord::Interface(s) => &s.base,
            SymbolRecord::Namespace(s) | SymbolRecord::Member(s) | SymbolRecord::Object(s) => {
                &s.base
            }
            SymbolRecord::Enum(s) => &s.base,
            SymbolRecord::Typedef(s) => &s.base,
            SymbolRecord::Function(s) => &s.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn module(&self) -> Option<&str> {
        self.base().module.as_deref()
    }

    pub fn extends(&self) -> Option<&Extends> {
        self.base().extends.as_ref()
    }

    /// True for private and restricted symbols
    pub fn is_hidden(&self) -> bool {
        self.base()
            .visibility
            .as_ref()
            .is_some_and(Visibility::is_hidden)
    }

    /// The `kind` tag as it appears in the document
    pub fn kind_str(&self) -> &'static str {
        match self {
            SymbolRecord::Class(_) => "class",
            SymbolRecord::Interface(_) => "interface",
            SymbolRecord::Namespace(_) => "namespace",
            SymbolRecord::Member(_) => "member",
            SymbolRecord::Object(_) => "object",
            SymbolRecord::Enum(_) => "enum",
            SymbolRecord::Typedef(_) => "typedef",
            SymbolRecord::Function(_) => "function",
        }
    }
}

impl fmt::Display for SymbolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind_str(), self.name())
    }
}

/// On-disk layout of a library document
#[derive(Debug, Deserialize)]
struct RawDocument {
    library: String,
    #[serde(default)]
    symbols: Vec<Value>,
}

/// All symbols of one library, immutable once loaded
#[derive(Debug)]
pub struct SymbolDocument {
    library: String,
    symbols: Vec<Arc<SymbolRecord>>,
    by_name: HashMap<String, usize>,
}

impl SymbolDocument {
    pub fn new(library: impl Into<String>, symbols: Vec<SymbolRecord>) -> Self {
        let symbols: Vec<Arc<SymbolRecord>> = symbols.into_iter().map(Arc::new).collect();
        let by_name = symbols
            .iter()
            .enumerate()
            .map(|(idx, s)| (s.name().to_string(), idx))
            .collect();
        Self {
            library: library.into(),
            symbols,
            by_name,
        }
    }

    /// Parse a library document from its JSON text.
    ///
    /// Symbols of a kind this crate does not know are skipped.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let raw: RawDocument = serde_json::from_str(content)?;
        let mut symbols = Vec::with_capacity(raw.symbols.len());
        for value in raw.symbols {
            match serde_json::from_value::<SymbolRecord>(value) {
                Ok(symbol) => symbols.push(symbol),
                Err(e) => {
                    tracing::debug!("Skipping unsupported symbol in {}: {e}", raw.library);
                }
            }
        }
        Ok(Self::new(raw.library, symbols))
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn get(&self, name: &str) -> Option<&Arc<SymbolRecord>> {
        self.by_name.get(name).map(|&idx| &self.symbols[idx])
    }

    /// Symbols in document order
    pub fn symbols(&self) -> impl Iterator<Item = &Arc<SymbolRecord>> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
