//! Resolution of analyzer type positions
//!
//! A static analyzer describes a source position as a chain of nodes linked
//! to their parents, e.g. `getCore (function) -> ui (namespace) -> sap (namespace)`.
//! The chain is walked once to find the owning module and the most specific
//! node that names something inside it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::ResolvedRecord;
use crate::error::{ApiRefError, ApiRefResult};
use crate::symbol::field::{constructor_field, find_by_name};
use crate::symbol::{FieldKind, Member, SymbolRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeInfoKind {
    Module,
    Namespace,
    Class,
    Constructor,
    Function,
    Method,
    Property,
    Enum,
    MetadataAggregation,
    MetadataAssociation,
    MetadataEvent,
    MetadataProperty,
    ManagedObjectSettings,
    /// Structural node without an identity of its own
    #[serde(other)]
    Wrapper,
}

impl TypeInfoKind {
    /// Kinds that can be mapped onto a symbol or one of its fields
    pub fn is_resolvable(&self) -> bool {
        !matches!(
            self,
            TypeInfoKind::ManagedObjectSettings | TypeInfoKind::Wrapper
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeInfoKind::Module => "module",
            TypeInfoKind::Namespace => "namespace",
            TypeInfoKind::Class => "class",
            TypeInfoKind::Constructor => "constructor",
            TypeInfoKind::Function => "function",
            TypeInfoKind::Method => "method",
            TypeInfoKind::Property => "property",
            TypeInfoKind::Enum => "enum",
            TypeInfoKind::MetadataAggregation => "metadata-aggregation",
            TypeInfoKind::MetadataAssociation => "metadata-association",
            TypeInfoKind::MetadataEvent => "metadata-event",
            TypeInfoKind::MetadataProperty => "metadata-property",
            TypeInfoKind::ManagedObjectSettings => "managed-object-settings",
            TypeInfoKind::Wrapper => "wrapper",
        }
    }
}

impl fmt::Display for TypeInfoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfoNode {
    pub kind: TypeInfoKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<TypeInfoNode>>,
}

impl TypeInfoNode {
    pub fn new(kind: TypeInfoKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            library: None,
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: TypeInfoNode) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    pub fn with_library(mut self, library: impl Into<String>) -> Self {
        self.library = Some(library.into());
        self
    }
}

/// Result of walking a type-info chain
#[derive(Debug, PartialEq)]
pub struct TypeInfoTarget<'a> {
    /// Name of the owning module, or dotted namespace path
    pub module_name: String,
    /// Most specific node to look up inside the module
    pub relevant: &'a TypeInfoNode,
}

/// Find the owning module and the relevant node of a type-info chain.
///
/// The nearest `module` ancestor wins. A chain that ends in namespaces uses
/// the accumulated namespace path instead. Anything else is malformed.
pub fn locate(node: &TypeInfoNode) -> ApiRefResult<TypeInfoTarget<'_>> {
    if node.kind == TypeInfoKind::Module {
        return Ok(TypeInfoTarget {
            module_name: node.name.clone(),
            relevant: node,
        });
    }

    let mut relevant: Option<&TypeInfoNode> = None;
    let mut namespace: Option<String> = None;
    let mut current = node;
    while let Some(parent) = current.parent.as_deref() {
        match parent.kind {
            TypeInfoKind::Module => {
                return Ok(TypeInfoTarget {
                    module_name: parent.name.clone(),
                    relevant: relevant.unwrap_or(current),
                });
            }
            TypeInfoKind::Namespace => {
                namespace = Some(match namespace {
                    Some(path) => format!("{}.{path}", parent.name),
                    None => parent.name.clone(),
                });
            }
            // A namespace path is only meaningful if it is contiguous
            _ => namespace = None,
        }
        if relevant.is_none() && current.kind.is_resolvable() {
            relevant = Some(current);
        }
        current = parent;
    }

    if current.kind == TypeInfoKind::Namespace {
        return Ok(TypeInfoTarget {
            module_name: namespace.unwrap_or_else(|| current.name.clone()),
            relevant: relevant.unwrap_or(current),
        });
    }
    Err(ApiRefError::malformed(format!(
        "Could not extract module name from type information of '{}' ({})",
        node.name, node.kind
    )))
}

/// Symbol kinds a type-info chain may resolve into
pub(crate) fn check_owner_kind(symbol: &SymbolRecord) -> ApiRefResult<()> {
    match symbol {
        SymbolRecord::Class(_)
        | SymbolRecord::Interface(_)
        | SymbolRecord::Namespace(_)
        | SymbolRecord::Member(_)
        | SymbolRecord::Enum(_) => Ok(()),
        other => Err(ApiRefError::kind_mismatch(
            "a class, interface, namespace or enum",
            other.kind_str(),
        )),
    }
}

/// Map the relevant node onto `symbol` or one of its fields.
///
/// Returns `Ok(None)` when the node names a field the symbol does not have.
/// A node kind that does not fit the symbol kind is an error.
pub(crate) fn find_for_node(
    symbol: &Arc<SymbolRecord>,
    node: &TypeInfoNode,
) -> ApiRefResult<Option<ResolvedRecord>> {
    let field = node.name.to_lowercase();
    let field = field.as_str();
    let mismatch = |expected: &str| ApiRefError::kind_mismatch(expected, symbol.kind_str());

    let found = match node.kind {
        TypeInfoKind::Module | TypeInfoKind::Namespace | TypeInfoKind::Class => {
            return Ok(Some(ResolvedRecord::Symbol(Arc::clone(symbol))));
        }
        TypeInfoKind::Constructor => match symbol.as_ref() {
            SymbolRecord::Class(class) => class.constructor.as_ref().map(constructor_field),
            _ => return Err(mismatch("a class")),
        },
        TypeInfoKind::Function | TypeInfoKind::Method => {
            let kind = if node.kind == TypeInfoKind::Method {
                FieldKind::Method
            } else {
                FieldKind::Function
            };
            let methods = callable_owner(symbol)
                .map(|(methods, _)| methods)
                .ok_or_else(|| mismatch("a class, namespace or interface"))?;
            find_by_name(field, methods, kind)
        }
        TypeInfoKind::MetadataEvent => {
            let events = callable_owner(symbol)
                .map(|(_, events)| events)
                .ok_or_else(|| mismatch("a class, namespace or interface"))?;
            find_by_name(field, events, FieldKind::Event)
        }
        TypeInfoKind::Property => match symbol.as_ref() {
            SymbolRecord::Class(class) => {
                find_by_name(field, &class.properties, FieldKind::Property)
            }
            SymbolRecord::Namespace(ns) | SymbolRecord::Member(ns) => {
                find_by_name(field, &ns.properties, FieldKind::Property)
            }
            _ => return Err(mismatch("a class or namespace")),
        },
        TypeInfoKind::Enum => match symbol.as_ref() {
            SymbolRecord::Enum(e) => find_by_name(field, &e.properties, FieldKind::EnumProperty),
            _ => return Err(mismatch("an enum")),
        },
        TypeInfoKind::MetadataAggregation
        | TypeInfoKind::MetadataAssociation
        | TypeInfoKind::MetadataProperty => {
            let SymbolRecord::Class(class) = symbol.as_ref() else {
                return Err(mismatch("a class"));
            };
            let Some(metadata) = class.ui5_metadata.as_ref() else {
                return Ok(None);
            };
            match node.kind {
                TypeInfoKind::MetadataAggregation => {
                    find_by_name(field, &metadata.aggregations, FieldKind::Ui5Aggregation)
                }
                TypeInfoKind::MetadataAssociation => {
                    find_by_name(field, &metadata.associations, FieldKind::Ui5Association)
                }
                _ => find_by_name(field, &metadata.properties, FieldKind::Ui5Property),
            }
        }
        TypeInfoKind::ManagedObjectSettings | TypeInfoKind::Wrapper => {
            return Err(ApiRefError::malformed(format!(
                "Node '{}' of kind {} does not identify an API entity",
                node.name, node.kind
            )));
        }
    };
    Ok(found.map(ResolvedRecord::Field))
}

/// Methods and events of symbols that can own callables
fn callable_owner(symbol: &SymbolRecord) -> Option<(&[Member], &[Member])> {
    match symbol {
        SymbolRecord::Class(class) => Some((class.methods.as_slice(), class.events.as_slice())),
        SymbolRecord::Namespace(ns) | SymbolRecord::Member(ns) => {
            Some((ns.methods.as_slice(), ns.events.as_slice()))
        }
        SymbolRecord::Interface(iface) => {
            Some((iface.methods.as_slice(), iface.events.as_slice()))
        }
        _ => None,
    }
}
