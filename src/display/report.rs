//! Lookup results as shown by the CLI

use serde::Serialize;
use std::fmt;

use super::format::{ApiReference, SymbolAttributes};
use super::theme::THEME;
use super::uri::create_uri_for_symbol;
use crate::types::{Framework, FrameworkVersion};

pub const RESOURCE_MIME_TYPE: &str = "application/json";

/// One formatted record plus the documentation link it refers to
#[derive(Debug, Clone, Serialize)]
pub struct ApiReferenceResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
    pub reference: ApiReference,
}

/// All results of one lookup
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    pub framework: Framework,
    pub version: FrameworkVersion,
    pub results: Vec<ApiReferenceResource>,
}

impl LookupReport {
    pub fn new(
        framework: Framework,
        version: FrameworkVersion,
        references: Vec<ApiReference>,
        include_uri: bool,
    ) -> Self {
        let results = references
            .into_iter()
            .map(|reference| ApiReferenceResource {
                uri: include_uri.then(|| create_uri_for_symbol(&reference, framework, &version)),
                mime_type: RESOURCE_MIME_TYPE,
                reference,
            })
            .collect();
        Self {
            framework,
            version,
            results,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl fmt::Display for LookupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.results.len() > 1 {
            writeln!(
                f,
                "{}",
                THEME.apply(
                    &THEME.header,
                    format!(
                        "Found {} symbols in {} {}",
                        self.results.len(),
                        self.framework,
                        self.version
                    )
                )
            )?;
        }
        for (idx, result) in self.results.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            let reference = &result.reference;
            writeln!(
                f,
                "{} {}",
                THEME.apply(&THEME.dim, reference.kind()),
                THEME.apply(&THEME.code, reference.name())
            )?;
            write!(f, "  library: {}", reference.library())?;
            if let Some(module) = reference.module() {
                write!(f, "  module: {module}")?;
            }
            writeln!(f)?;
            if let Some(uri) = &result.uri {
                writeln!(f, "  {}", THEME.apply(&THEME.path, uri))?;
            }
            let body = serde_json::to_string_pretty(reference).map_err(|_| fmt::Error)?;
            for line in body.lines() {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}
