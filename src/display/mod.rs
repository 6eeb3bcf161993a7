//! Output shaping for resolved records.
//!
//! Pruning and summarizing of records, documentation links and the styled
//! terminal rendering used by the CLI.

pub mod format;
pub mod report;
pub mod theme;
pub mod uri;

pub use format::{
    ApiReference, FormattedSymbol, FormattedSymbolSummary, SUMMARY_INFO, SymbolAttributes,
    format_symbol, summarize, summarize_symbol,
};
pub use report::{ApiReferenceResource, LookupReport};
pub use theme::{THEME, Theme};
pub use uri::create_uri_for_symbol;
