//! Field lookup inside a top-level symbol.
//!
//! A field is an entry of one of the nested collections of a symbol. The kind
//! tag is not part of the document; it is attached here, depending on the
//! collection the entry was found in.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Member, SymbolRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    #[serde(rename = "method")]
    Method,
    #[serde(rename = "property")]
    Property,
    #[serde(rename = "event")]
    Event,
    #[serde(rename = "parameter")]
    Parameter,
    #[serde(rename = "enum-property")]
    EnumProperty,
    #[serde(rename = "constructor")]
    Constructor,
    /// Method reached through a function type-info node
    #[serde(rename = "function")]
    Function,
    #[serde(rename = "ui5-property")]
    Ui5Property,
    #[serde(rename = "ui5-aggregation")]
    Ui5Aggregation,
    #[serde(rename = "ui5-association")]
    Ui5Association,
    #[serde(rename = "ui5-event")]
    Ui5Event,
    #[serde(rename = "ui5-specialSetting")]
    Ui5SpecialSetting,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Method => "method",
            FieldKind::Property => "property",
            FieldKind::Event => "event",
            FieldKind::Parameter => "parameter",
            FieldKind::EnumProperty => "enum-property",
            FieldKind::Constructor => "constructor",
            FieldKind::Function => "function",
            FieldKind::Ui5Property => "ui5-property",
            FieldKind::Ui5Aggregation => "ui5-aggregation",
            FieldKind::Ui5Association => "ui5-association",
            FieldKind::Ui5Event => "ui5-event",
            FieldKind::Ui5SpecialSetting => "ui5-specialSetting",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member extracted from a symbol, tagged with the collection it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRecord {
    pub kind: FieldKind,
    #[serde(flatten)]
    pub member: Member,
}

impl FieldRecord {
    pub fn new(kind: FieldKind, member: &Member) -> Self {
        Self {
            kind,
            member: member.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.member.name
    }
}

/// First entry of `members` whose name matches `field` (already lowercase)
pub(crate) fn find_by_name(
    field: &str,
    members: &[Member],
    kind: FieldKind,
) -> Option<FieldRecord> {
    members
        .iter()
        .find(|m| m.name.to_lowercase() == field)
        .map(|m| FieldRecord::new(kind, m))
}

pub(crate) fn constructor_field(constructor: &Member) -> FieldRecord {
    let mut field = FieldRecord::new(FieldKind::Constructor, constructor);
    if field.member.name.is_empty() {
        field.member.name = "constructor".to_string();
    }
    field
}

impl SymbolRecord {
    /// Search a field by name, case-insensitively.
    ///
    /// Collections are searched in a fixed order per symbol kind and the first
    /// match wins.
    pub fn find_field(&self, field: &str) -> Option<FieldRecord> {
        let field = field.to_lowercase();
        let field = field.as_str();
        match self {
            SymbolRecord::Class(class) => {
                if field == "constructor"
                    && let Some(constructor) = &class.constructor
                {
                    return Some(constructor_field(constructor));
                }

                let found = find_by_name(field, &class.methods, FieldKind::Method)
                    .or_else(|| find_by_name(field, &class.properties, FieldKind::Property))
                    .or_else(|| find_by_name(field, &class.events, FieldKind::Event));
                if found.is_some() {
                    return found;
                }

                let metadata = class.ui5_metadata.as_ref()?;
                find_by_name(field, &metadata.properties, FieldKind::Ui5Property)
                    .or_else(|| {
                        find_by_name(field, &metadata.aggregations, FieldKind::Ui5Aggregation)
                    })
                    .or_else(|| {
                        find_by_name(field, &metadata.associations, FieldKind::Ui5Association)
                    })
                    .or_else(|| find_by_name(field, &metadata.events, FieldKind::Ui5Event))
                    .or_else(|| {
                        find_by_name(
                            field,
                            &metadata.special_settings,
                            FieldKind::Ui5SpecialSetting,
                        )
                    })
            }
            SymbolRecord::Namespace(ns) | SymbolRecord::Member(ns) | SymbolRecord::Object(ns) => {
                find_by_name(field, &ns.methods, FieldKind::Method)
                    .or_else(|| find_by_name(field, &ns.properties, FieldKind::Property))
                    .or_else(|| find_by_name(field, &ns.events, FieldKind::Event))
            }
            SymbolRecord::Interface(iface) => find_by_name(field, &iface.methods, FieldKind::Method)
                .or_else(|| find_by_name(field, &iface.events, FieldKind::Event)),
            SymbolRecord::Enum(e) => find_by_name(field, &e.properties, FieldKind::EnumProperty),
            SymbolRecord::Typedef(t) => find_by_name(field, &t.properties, FieldKind::Property)
                .or_else(|| find_by_name(field, &t.parameters, FieldKind::Parameter)),
            SymbolRecord::Function(func) => {
                find_by_name(field, &func.parameters, FieldKind::Parameter)
            }
        }
    }
}
