//! Knowledge base operations
//!
//! Every operation is one load → (mutate → save) cycle against a
//! [`DocumentStore`]. Nothing is cached between calls, so the store's
//! content stays the single source of truth.

use serde::Serialize;

use super::document::{
    AppendPlacement, AppendedEntry, CreatedSection, KnowledgeDocument, SectionNumbering,
};
use super::error::KbError;
use super::store::{DocumentStore, FileStore};
use crate::config::Config;

/// Short description of one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub number: u32,
    pub title: String,
    pub entries: usize,
}

/// Knowledge base operations over a store
pub struct KnowledgeBase<S: DocumentStore = FileStore> {
    store: S,
    placement: AppendPlacement,
    numbering: SectionNumbering,
}

impl KnowledgeBase<FileStore> {
    /// Open the file-backed knowledge base described by the config
    pub fn from_config(config: &Config) -> Self {
        Self::new(FileStore::new(config.kb_path()))
            .with_placement(config.kb.append_placement)
            .with_numbering(config.kb.numbering)
    }
}

impl<S: DocumentStore> KnowledgeBase<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            placement: AppendPlacement::default(),
            numbering: SectionNumbering::default(),
        }
    }

    pub fn with_placement(mut self, placement: AppendPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_numbering(mut self, numbering: SectionNumbering) -> Self {
        self.numbering = numbering;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parsed document
    pub fn document(&self) -> Result<KnowledgeDocument, KbError> {
        self.store.load()
    }

    /// Whole knowledge base, re-serialized
    pub fn read_all(&self) -> Result<String, KbError> {
        Ok(self.store.load()?.serialize())
    }

    /// Whole knowledge base exactly as stored
    pub fn raw_text(&self) -> Result<String, KbError> {
        self.store.load_raw()
    }

    /// One section block, looked up by a caller-supplied identifier
    pub fn read_section(&self, number: &str) -> Result<String, KbError> {
        let doc = self.store.load()?;
        let section = doc.get_section(number)?;
        tracing::debug!(section = section.number, "section read");
        Ok(section.to_block())
    }

    /// Number, title and entry count of every section, in document order
    pub fn sections(&self) -> Result<Vec<SectionSummary>, KbError> {
        let doc = self.store.load()?;
        Ok(doc
            .sections()
            .iter()
            .map(|s| SectionSummary {
                number: s.number,
                title: s.title.clone(),
                entries: s.entries.len(),
            })
            .collect())
    }

    /// Add an entry to a section and persist
    ///
    /// Nothing is written when the section does not exist.
    pub fn append_entry(&self, section: i64, entry: &str) -> Result<AppendedEntry, KbError> {
        let mut doc = self.store.load()?;
        let added = doc.append_entry(section, entry, self.placement)?;
        self.store.save(&doc)?;

        tracing::info!(section = added.section, store = %self.store.location(), "entry added");
        Ok(added)
    }

    /// Append a new empty section and persist
    pub fn create_section(&self, title: &str) -> Result<CreatedSection, KbError> {
        let mut doc = self.store.load()?;
        let created = doc.create_section(title, self.numbering);
        self.store.save(&doc)?;

        tracing::info!(
            number = created.number,
            title = %created.title,
            store = %self.store.location(),
            "section created"
        );
        Ok(created)
    }
}
