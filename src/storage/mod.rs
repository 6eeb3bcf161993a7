//! Corpus storage: the symbol index, lazily loaded documents and the
//! location of per-version corpora.

pub mod corpus;
pub mod document_cache;
pub mod index;

pub use corpus::{CORPUS_DIR_NAME, CorpusProvider, FixedCorpus, LocalCorpus};
pub use document_cache::DocumentCache;
pub use index::{
    DOCUMENT_SUFFIX, INDEX_FILE_NAME, IndexEntry, IndexStore, document_paths, index_key,
};
