//! Links into the public API documentation

use super::format::SymbolAttributes;
use crate::types::{Framework, FrameworkVersion};

/// Documentation URL of a formatted record
pub fn create_uri_for_symbol(
    symbol: &impl SymbolAttributes,
    framework: Framework,
    version: &FrameworkVersion,
) -> String {
    let entity_path = match symbol.module() {
        Some(module) => module.replace('/', "."),
        // Some namespaces have no module
        None => symbol.name().to_string(),
    };
    let mut url = format!("{}/{version}/api/{entity_path}/", framework.sdk_domain());
    if let Some(export) = symbol.export() {
        url.push_str(export);
        url.push('/');
    }

    let name = symbol.name();
    let suffix = match symbol.kind() {
        "constructor" => "constructor".to_string(),
        "ui5-aggregation" => format!("aggregations/{name}"),
        "ui5-association" => format!("associations/{name}"),
        "method" => format!("methods/{name}"),
        "function" => format!("functions/{name}"),
        "ui5-property" => format!("controlProperties/{name}"),
        "ui5-event" => format!("events/{name}"),
        _ => String::new(),
    };
    url.push_str(&suffix);
    url
}
