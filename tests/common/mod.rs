#![allow(dead_code)]

use apiref::storage::CORPUS_DIR_NAME;
use apiref::{ApiReferenceProvider, CorpusKey, Framework, FrameworkVersion, IndexStore, LocalCorpus};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FIXTURE_VERSION: &str = "1.120.30";

/// Checked-in corpus with `sap.m` and `sap.ui.core`
pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("corpus")
        .join("openui5-1.120.30")
}

pub fn fixture_key() -> CorpusKey {
    CorpusKey::new(Framework::OpenUI5, version())
}

pub fn version() -> FrameworkVersion {
    FrameworkVersion::parse(FIXTURE_VERSION).expect("fixture version is valid")
}

/// A data directory laid out like `~/.apiref`, holding a copy of the
/// fixture corpus so tests never write next to the checked-in files.
pub struct TestCorpus {
    pub dir: TempDir,
}

impl TestCorpus {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let target = dir
            .path()
            .join(CORPUS_DIR_NAME)
            .join(fixture_key().dir_name());
        fs::create_dir_all(&target).expect("Failed to create corpus dir");
        for entry in fs::read_dir(fixture_dir()).expect("Fixture corpus is missing") {
            let entry = entry.expect("Failed to read fixture entry");
            fs::copy(entry.path(), target.join(entry.file_name()))
                .expect("Failed to copy fixture document");
        }
        Self { dir }
    }

    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn corpus_root(&self) -> PathBuf {
        self.dir
            .path()
            .join(CORPUS_DIR_NAME)
            .join(fixture_key().dir_name())
    }

    pub fn local(&self) -> LocalCorpus {
        LocalCorpus::new(self.data_dir())
    }

    /// Index the corpus and open a resolver on it
    pub fn provider(&self) -> ApiReferenceProvider {
        let root = self.corpus_root();
        let store = IndexStore::build_from_dir(&root).expect("Failed to index fixture corpus");
        store.save(&root).expect("Failed to save index");
        ApiReferenceProvider::create(root).expect("Failed to open provider")
    }
}
