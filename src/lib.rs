//! UI5 API reference lookup.
//!
//! Resolves dotted or slash-separated queries and structured type
//! information against a pre-indexed corpus of UI5 `*.api.json` files.

pub mod config;
pub mod display;
pub mod error;
pub mod io;
pub mod resolve;
pub mod storage;
pub mod symbol;
pub mod types;

// Explicit exports for better API clarity
pub use config::Settings;
pub use display::{ApiReference, FormattedSymbol, LookupReport, create_uri_for_symbol};
pub use error::{ApiRefError, ApiRefResult};
pub use resolve::{
    ApiReferenceProvider, ProviderRegistry, Resolution, ResolvedRecord, SymbolInfo, TypeInfoKind,
    TypeInfoNode, get_api_reference, get_api_reference_for_type_info, get_api_reference_summary,
    get_api_reference_summary_for_type_info,
};
pub use storage::{CorpusProvider, DocumentCache, FixedCorpus, IndexStore, LocalCorpus};
pub use symbol::{FieldKind, FieldRecord, SymbolDocument, SymbolRecord};
pub use types::{CorpusKey, Framework, FrameworkVersion};
