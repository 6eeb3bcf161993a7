//! Shaping of resolved records for callers
//!
//! Formatting works on the JSON object form of a record. Hidden nested
//! entries and bookkeeping attributes are removed, empty values are pruned and
//! the library/module context is injected. A summary additionally reduces the
//! record to a handful of attributes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiRefResult;

/// Attributes that only matter for locating a record
const REMOVE_ATTRIBUTES: &[&str] = &["basename", "resource", "visibility"];

const SUMMARY_ATTRIBUTES: &[&str] = &[
    "kind",
    "name",
    "module",
    "library",
    "export",
    "description",
    "extends",
    "deprecatedText",
    "experimentalText",
    SUMMARY_INFO_KEY,
];

pub const SUMMARY_INFO_KEY: &str = "_summaryInfo";
pub const SUMMARY_INFO: &str = "Note: This object is a shortened version of the full API object";

/// Read access to the well-known attributes of a formatted record
pub trait SymbolAttributes {
    fn attributes(&self) -> &Map<String, Value>;

    fn attr(&self, key: &str) -> Option<&str> {
        self.attributes().get(key).and_then(Value::as_str)
    }

    fn kind(&self) -> &str {
        self.attr("kind").unwrap_or_default()
    }

    fn name(&self) -> &str {
        self.attr("name").unwrap_or_default()
    }

    fn library(&self) -> &str {
        self.attr("library").unwrap_or_default()
    }

    fn module(&self) -> Option<&str> {
        self.attr("module")
    }

    fn export(&self) -> Option<&str> {
        self.attr("export")
    }

    fn description(&self) -> Option<&str> {
        self.attr("description")
    }
}

/// A full record, ready to be shown to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedSymbol(Map<String, Value>);

/// An abbreviated record, carrying the `_summaryInfo` marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattedSymbolSummary(Map<String, Value>);

impl FormattedSymbol {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl FormattedSymbolSummary {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl SymbolAttributes for FormattedSymbol {
    fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl SymbolAttributes for FormattedSymbolSummary {
    fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Either form of a formatted record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ApiReference {
    Full(FormattedSymbol),
    Summary(FormattedSymbolSummary),
}

impl ApiReference {
    pub fn is_summary(&self) -> bool {
        matches!(self, ApiReference::Summary(_))
    }
}

impl SymbolAttributes for ApiReference {
    fn attributes(&self) -> &Map<String, Value> {
        match self {
            ApiReference::Full(symbol) => symbol.attributes(),
            ApiReference::Summary(summary) => summary.attributes(),
        }
    }
}

impl From<FormattedSymbol> for ApiReference {
    fn from(symbol: FormattedSymbol) -> Self {
        ApiReference::Full(symbol)
    }
}

impl From<FormattedSymbolSummary> for ApiReference {
    fn from(summary: FormattedSymbolSummary) -> Self {
        ApiReference::Summary(summary)
    }
}

/// Format a record for output.
///
/// `module_name` is only injected when the record has no `module` attribute
/// of its own. `library` is always overwritten.
pub fn format_symbol<T: Serialize + ?Sized>(
    record: &T,
    library: &str,
    module_name: Option<&str>,
) -> ApiRefResult<FormattedSymbol> {
    let mut map = match serde_json::to_value(record)? {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    };
    let had_module = map.contains_key("module");

    remove_restricted(&mut map);
    prune_empty(&mut map);
    for attr in REMOVE_ATTRIBUTES {
        map.remove(*attr);
    }

    if let Some(module_name) = module_name.filter(|_| !had_module) {
        map.insert("module".to_string(), Value::String(module_name.to_string()));
    }
    map.insert("library".to_string(), Value::String(library.to_string()));
    Ok(FormattedSymbol(map))
}

/// Format a record and reduce it to its summary attributes
pub fn summarize_symbol<T: Serialize + ?Sized>(
    record: &T,
    library: &str,
    module_name: Option<&str>,
) -> ApiRefResult<FormattedSymbolSummary> {
    Ok(summarize(format_symbol(record, library, module_name)?))
}

/// Reduce an already formatted record to its summary
pub fn summarize(symbol: FormattedSymbol) -> FormattedSymbolSummary {
    let mut map = symbol.0;
    if let Some(text) = notice_text(&map, "deprecated") {
        map.insert("deprecatedText".to_string(), Value::String(text));
    }
    if let Some(text) = notice_text(&map, "experimental") {
        map.insert("experimentalText".to_string(), Value::String(text));
    }
    map.retain(|key, _| SUMMARY_ATTRIBUTES.contains(&key.as_str()));
    map.insert(
        SUMMARY_INFO_KEY.to_string(),
        Value::String(SUMMARY_INFO.to_string()),
    );
    FormattedSymbolSummary(map)
}

fn notice_text(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)?
        .get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn is_hidden(value: &Value) -> bool {
    matches!(
        value.get("visibility").and_then(Value::as_str),
        Some("private" | "restricted")
    )
}

/// Drop hidden nested entries and every remaining `visibility` marker
fn remove_restricted(map: &mut Map<String, Value>) {
    map.retain(|_, value| !is_hidden(value));
    map.remove("visibility");
    for value in map.values_mut() {
        remove_restricted_value(value);
    }
}

fn remove_restricted_value(value: &mut Value) {
    match value {
        Value::Array(items) => {
            items.retain(|item| !is_hidden(item));
            for item in items {
                remove_restricted_value(item);
            }
        }
        Value::Object(map) => remove_restricted(map),
        _ => {}
    }
}

fn prune_empty(map: &mut Map<String, Value>) {
    map.retain(|_, value| !prune_value(value));
}

/// Prune `value` in place, returns true if nothing is left of it
fn prune_value(value: &mut Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => {
            items.retain_mut(|item| !prune_value(item));
            items.is_empty()
        }
        Value::Object(map) => {
            prune_empty(map);
            map.is_empty()
        }
        Value::Bool(_) | Value::Number(_) => false,
    }
}
