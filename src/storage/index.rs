//! Flat symbol index of a corpus
//!
//! Maps a normalized lowercase key to the canonical symbol name and the
//! document that defines it. Persisted as `index.json` next to the
//! documents and read-only once loaded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{ApiRefError, ApiRefResult};
use crate::resolve::normalize::strip_module_prefix;
use crate::symbol::SymbolDocument;

/// File name of the persisted index
pub const INDEX_FILE_NAME: &str = "index.json";

/// Suffix of library documents in a corpus directory
pub const DOCUMENT_SUFFIX: &str = ".api.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// Value of the `name` attribute of the symbol in its document
    pub name: String,
    /// Document path, relative to the corpus root
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexStore {
    entries: HashMap<String, IndexEntry>,
}

/// Index key of a symbol name.
///
/// `module:` names use `/` as separator; they are converted to dotted form.
pub fn index_key(symbol_name: &str) -> String {
    let key = symbol_name.to_lowercase();
    match strip_module_prefix(&key) {
        Some(stripped) => stripped.replace('/', "."),
        None => key,
    }
}

impl IndexStore {
    pub fn from_entries(entries: HashMap<String, IndexEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &IndexEntry)> {
        self.entries.iter()
    }

    /// Add a symbol, applying the duplicate rule.
    ///
    /// An existing key is only replaced when the new symbol's module equals
    /// the key exactly.
    pub fn insert_symbol(&mut self, symbol_name: &str, module: Option<&str>, file_path: &str) {
        let key = index_key(symbol_name);
        if self.entries.contains_key(&key) {
            tracing::debug!("Duplicate symbol name found: {key} in {file_path}");
            if module != Some(key.as_str()) {
                return;
            }
        }
        self.entries.insert(
            key,
            IndexEntry {
                name: symbol_name.to_string(),
                file_path: file_path.to_string(),
            },
        );
    }

    /// Build the index from the given documents, in the given order
    pub fn build(root: &Path, document_paths: &[PathBuf]) -> ApiRefResult<Self> {
        let mut store = Self::default();
        for path in document_paths {
            let content = fs::read_to_string(path).map_err(|e| ApiRefError::DocumentLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            let document =
                SymbolDocument::from_json(&content).map_err(|e| ApiRefError::DocumentLoad {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
            let relative = relative_path(root, path);
            for symbol in document.symbols() {
                store.insert_symbol(symbol.name(), symbol.module(), &relative);
            }
        }
        tracing::info!(
            "Indexed {} symbols from {} documents in {}",
            store.len(),
            document_paths.len(),
            root.display()
        );
        Ok(store)
    }

    /// Build the index from every `*.api.json` file directly inside `root`.
    ///
    /// Documents are processed in file name order so that duplicate
    /// resolution is reproducible.
    pub fn build_from_dir(root: &Path) -> ApiRefResult<Self> {
        let documents = document_paths(root)?;
        Self::build(root, &documents)
    }

    pub fn index_path(root: &Path) -> PathBuf {
        root.join(INDEX_FILE_NAME)
    }

    pub fn exists(root: &Path) -> bool {
        Self::index_path(root).is_file()
    }

    pub fn load(root: &Path) -> ApiRefResult<Self> {
        let path = Self::index_path(root);
        let content = fs::read_to_string(&path).map_err(|e| ApiRefError::IndexLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let entries: HashMap<String, IndexEntry> =
            serde_json::from_str(&content).map_err(|e| ApiRefError::IndexLoad {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        tracing::debug!("Loaded index with {} entries from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn save(&self, root: &Path) -> ApiRefResult<()> {
        let path = Self::index_path(root);
        // Sorted output keeps the artifact diffable
        let sorted: std::collections::BTreeMap<&String, &IndexEntry> =
            self.entries.iter().collect();
        let content = serde_json::to_string_pretty(&sorted).map_err(|e| ApiRefError::IndexWrite {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&path, content).map_err(|e| ApiRefError::IndexWrite {
            path,
            reason: e.to_string(),
        })
    }
}

/// All library documents directly inside `root`, sorted by file name
pub fn document_paths(root: &Path) -> ApiRefResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| ApiRefError::IndexLoad {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;
        let is_document = entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.ends_with(DOCUMENT_SUFFIX));
        if is_document {
            paths.push(entry.into_path());
        }
    }
    Ok(paths)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    // Index entries always use forward slashes
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
