//! Core module - Business logic
//!
//! The section-structured document model and the operations over it.

pub mod document;
pub mod error;
pub mod kb;
pub mod store;

pub use document::{
    AppendPlacement, AppendedEntry, CreatedSection, KnowledgeDocument, Section, SectionNumbering,
};
pub use error::KbError;
pub use kb::{KnowledgeBase, SectionSummary};
pub use store::{DocumentStore, FileStore, MemoryStore};
