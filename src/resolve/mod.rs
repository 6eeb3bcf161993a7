//! Symbol resolution against one corpus
//!
//! A query is resolved through a fixed chain of strategies:
//!
//! 1. exact index hit on the normalized query
//! 2. retry with the part after the last dot split off as a field name
//! 3. field lookup inside the matched symbol
//! 4. the same field on the parent symbol (`extends`), recursively
//! 5. every symbol of the document whose module equals the query
//!
//! Only not-found conditions move the chain forward. Integrity faults and
//! load failures end the resolution immediately.

pub mod normalize;
pub mod registry;
pub mod type_info;

pub use normalize::{normalize, normalize_for_module_name, validate_query};
pub use registry::{
    ProviderRegistry, get_api_reference, get_api_reference_for_type_info,
    get_api_reference_summary, get_api_reference_summary_for_type_info,
};
pub use type_info::{TypeInfoKind, TypeInfoNode};

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::display::{ApiReference, FormattedSymbol, format_symbol, summarize_symbol};
use crate::error::{ApiRefError, ApiRefResult};
use crate::storage::{DocumentCache, IndexEntry, IndexStore};
use crate::symbol::{Extends, FieldRecord, SymbolDocument, SymbolRecord};

/// A top-level symbol or a field cut out of one
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedRecord {
    Symbol(Arc<SymbolRecord>),
    Field(FieldRecord),
}

impl ResolvedRecord {
    pub fn name(&self) -> &str {
        match self {
            ResolvedRecord::Symbol(symbol) => symbol.name(),
            ResolvedRecord::Field(field) => field.name(),
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            ResolvedRecord::Symbol(symbol) => symbol.kind_str(),
            ResolvedRecord::Field(field) => field.kind.as_str(),
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, ResolvedRecord::Symbol(_))
    }
}

impl Serialize for ResolvedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResolvedRecord::Symbol(symbol) => symbol.as_ref().serialize(serializer),
            ResolvedRecord::Field(field) => field.serialize(serializer),
        }
    }
}

/// A resolved record together with the context it was found in
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    pub record: ResolvedRecord,
    pub library: String,
    pub module_name: Option<String>,
}

impl SymbolInfo {
    fn new(record: ResolvedRecord, document: &SymbolDocument, module_name: Option<&str>) -> Self {
        Self {
            record,
            library: document.library().to_string(),
            module_name: module_name.map(str::to_string),
        }
    }

    pub fn format(&self) -> ApiRefResult<FormattedSymbol> {
        format_symbol(&self.record, &self.library, self.module_name.as_deref())
    }

    /// Summary for top-level symbols, full output for fields which are
    /// compact already
    pub fn summarize(&self) -> ApiRefResult<ApiReference> {
        if self.record.is_symbol() {
            Ok(summarize_symbol(&self.record, &self.library, self.module_name.as_deref())?.into())
        } else {
            Ok(self.format()?.into())
        }
    }
}

/// Outcome of a string query
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Single(SymbolInfo),
    /// All symbols contained in a module without a dedicated symbol
    Many(Vec<SymbolInfo>),
}

impl Resolution {
    pub fn into_vec(self) -> Vec<SymbolInfo> {
        match self {
            Resolution::Single(info) => vec![info],
            Resolution::Many(infos) => infos,
        }
    }
}

/// A symbol whose field lookup failed and is waiting for the outcome of the
/// inheritance retry
struct PendingField {
    query: String,
    document: Arc<SymbolDocument>,
    symbol: Arc<SymbolRecord>,
    field: String,
}

enum Step {
    Done(Resolution),
    Inherit {
        pending: PendingField,
        parent_query: String,
    },
}

/// Resolver bound to the corpus of one framework version
#[derive(Debug)]
pub struct ApiReferenceProvider {
    index: IndexStore,
    documents: DocumentCache,
}

impl ApiReferenceProvider {
    /// Open the corpus at `root`, reading its `index.json`
    pub fn create(root: impl Into<PathBuf>) -> ApiRefResult<Self> {
        let root = root.into();
        let index = IndexStore::load(&root)?;
        Ok(Self::from_parts(root, index))
    }

    pub fn from_parts(root: impl Into<PathBuf>, index: IndexStore) -> Self {
        Self {
            index,
            documents: DocumentCache::new(root),
        }
    }

    pub fn root(&self) -> &Path {
        self.documents.root()
    }

    pub fn index(&self) -> &IndexStore {
        &self.index
    }

    pub fn documents(&self) -> &DocumentCache {
        &self.documents
    }

    /// Resolve a query and format every result
    pub async fn find_symbol(&self, query: &str) -> ApiRefResult<Vec<FormattedSymbol>> {
        self.resolve(query)
            .await?
            .into_vec()
            .iter()
            .map(SymbolInfo::format)
            .collect()
    }

    /// Resolve a query; top-level symbols are summarized
    pub async fn find_symbol_and_summarize(&self, query: &str) -> ApiRefResult<Vec<ApiReference>> {
        self.resolve(query)
            .await?
            .into_vec()
            .iter()
            .map(SymbolInfo::summarize)
            .collect()
    }

    pub async fn symbol_for_type_info(&self, node: &TypeInfoNode) -> ApiRefResult<FormattedSymbol> {
        self.resolve_type_info(node).await?.format()
    }

    pub async fn symbol_for_type_info_and_summarize(
        &self,
        node: &TypeInfoNode,
    ) -> ApiRefResult<ApiReference> {
        self.resolve_type_info(node).await?.summarize()
    }

    /// Resolve a free-form query such as `sap.m.Button#text`.
    ///
    /// Inheritance retries are tracked on an explicit stack. When a retry
    /// ends in not-found, the symbol that started it continues with its own
    /// module-containment fallback.
    pub async fn resolve(&self, query: &str) -> ApiRefResult<Resolution> {
        let mut visited = HashSet::new();
        let mut pending: Vec<PendingField> = Vec::new();
        let mut current = query.to_string();

        loop {
            let mut outcome = match self.resolve_step(&current, &mut visited).await {
                Ok(Step::Inherit {
                    pending: waiting,
                    parent_query,
                }) => {
                    tracing::debug!(
                        "Field '{}' not found on {}, trying parent: {parent_query}",
                        waiting.field,
                        waiting.symbol.name()
                    );
                    pending.push(waiting);
                    current = parent_query;
                    continue;
                }
                Ok(Step::Done(resolution)) => Ok(resolution),
                Err(e) => Err(e),
            };

            loop {
                match outcome {
                    Ok(resolution) => return Ok(resolution),
                    Err(e) if !e.is_not_found() => return Err(e),
                    Err(e) => {
                        let Some(waiting) = pending.pop() else {
                            return Err(e);
                        };
                        tracing::debug!("Parent lookup failed: {e}");
                        outcome = self.module_fallback(waiting);
                    }
                }
            }
        }
    }

    async fn resolve_step(&self, query: &str, visited: &mut HashSet<String>) -> ApiRefResult<Step> {
        if !visited.insert(normalize(query)) {
            tracing::warn!("Cyclic inheritance chain while resolving '{query}'");
            return Err(ApiRefError::not_found(format!(
                "Could not find symbol for query '{query}'"
            )));
        }

        let (entry, field) = self.lookup(query)?;
        let (document, symbol) = self.load_symbol(entry).await?;

        let Some(field) = field else {
            let module = symbol.module().map(str::to_string);
            return Ok(Step::Done(Resolution::Single(SymbolInfo::new(
                ResolvedRecord::Symbol(symbol),
                &document,
                module.as_deref(),
            ))));
        };

        if let Some(found) = symbol.find_field(&field) {
            return Ok(Step::Done(Resolution::Single(SymbolInfo::new(
                ResolvedRecord::Field(found),
                &document,
                symbol.module(),
            ))));
        }

        let pending = PendingField {
            query: query.to_string(),
            document,
            symbol,
            field,
        };
        match pending.symbol.extends().and_then(Extends::primary) {
            Some(parent) => {
                let parent_query = format!("{parent}#{}", pending.field);
                Ok(Step::Inherit {
                    pending,
                    parent_query,
                })
            }
            None => self.module_fallback(pending).map(Step::Done),
        }
    }

    /// Find the longest indexed prefix of the query.
    ///
    /// Returns the entry and, if the query had to be shortened, the segment
    /// cut off by the last split.
    fn lookup(&self, query: &str) -> ApiRefResult<(&IndexEntry, Option<String>)> {
        let key = normalize(query);
        let spelled = normalize::dotted(query);
        let spelled_segments: Vec<&str> = spelled.split('.').collect();

        let mut search_key = key.as_str();
        let mut splits = 0;
        loop {
            if let Some(entry) = self.index.get(search_key) {
                // Keep the caller's spelling of the field for messages
                let field = (splits > 0).then(|| {
                    spelled_segments
                        .get(spelled_segments.len() - splits)
                        .copied()
                        .unwrap_or_default()
                        .to_string()
                });
                return Ok((entry, field));
            }
            match search_key.rfind('.') {
                Some(pos) => {
                    search_key = &search_key[..pos];
                    splits += 1;
                }
                None => {
                    return Err(ApiRefError::not_found(format!(
                        "Could not find symbol for query '{query}'"
                    )));
                }
            }
        }
    }

    /// Load the document of an index entry and pick the indexed symbol.
    ///
    /// Hidden symbols are reported as not found.
    async fn load_symbol(
        &self,
        entry: &IndexEntry,
    ) -> ApiRefResult<(Arc<SymbolDocument>, Arc<SymbolRecord>)> {
        let document = self.documents.get(&entry.file_path).await?;
        let symbol = document
            .get(&entry.name)
            .cloned()
            .ok_or_else(|| ApiRefError::IntegrityFault {
                symbol: entry.name.clone(),
                document: entry.file_path.clone(),
            })?;
        if symbol.is_hidden() {
            return Err(ApiRefError::not_found(format!(
                "Symbol '{}' is not public API",
                symbol.name()
            )));
        }
        Ok((document, symbol))
    }

    /// Last resort for a field miss: all symbols of the same document that
    /// belong to the module named by the original query
    fn module_fallback(&self, pending: PendingField) -> ApiRefResult<Resolution> {
        let module_name = normalize_for_module_name(&pending.query);
        let matches: Vec<SymbolInfo> = pending
            .document
            .symbols()
            .filter(|s| s.module().is_some_and(|m| m.to_lowercase() == module_name))
            .map(|s| {
                SymbolInfo::new(
                    ResolvedRecord::Symbol(Arc::clone(s)),
                    &pending.document,
                    Some(&module_name),
                )
            })
            .collect();

        if matches.is_empty() {
            return Err(ApiRefError::not_found(format!(
                "Could not find field '{}' in symbol '{}' of library '{}'",
                pending.field,
                pending.symbol.name(),
                pending.document.library()
            )));
        }
        tracing::debug!(
            "Resolved '{}' to {} symbols of module {module_name}",
            pending.query,
            matches.len()
        );
        Ok(Resolution::Many(matches))
    }

    /// Resolve a type position reported by a static analyzer
    pub async fn resolve_type_info(&self, node: &TypeInfoNode) -> ApiRefResult<SymbolInfo> {
        let target = type_info::locate(node)?;
        let entry = self
            .index
            .get(&normalize(&target.module_name))
            .ok_or_else(|| {
                ApiRefError::not_found(format!(
                    "Could not find symbol for module '{}'",
                    target.module_name
                ))
            })?;
        let (document, symbol) = self.load_symbol(entry).await?;
        type_info::check_owner_kind(&symbol)?;

        let record = type_info::find_for_node(&symbol, target.relevant)?.ok_or_else(|| {
            ApiRefError::not_found(format!(
                "Could not find field '{}' in symbol '{}' of library '{}'",
                target.relevant.name,
                symbol.name(),
                document.library()
            ))
        })?;
        Ok(SymbolInfo::new(record, &document, Some(&entry.name)))
    }
}
