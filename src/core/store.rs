//! Document stores
//!
//! The knowledge base text is re-read on every operation; a store only
//! knows how to fetch and persist it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │          DocumentStore              │
//! │  ┌─────────────┬─────────────┐      │
//! │  │  FileStore  │ MemoryStore │      │
//! │  │ (flat file) │   (tests)   │      │
//! │  └─────────────┴─────────────┘      │
//! └─────────────────────────────────────┘
//! ```

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use super::document::KnowledgeDocument;
use super::error::KbError;

/// Load/save access to the knowledge base text
pub trait DocumentStore: Send + Sync {
    /// Raw text exactly as stored
    fn load_raw(&self) -> Result<String, KbError>;

    /// Replace the stored text
    fn save_raw(&self, content: &str) -> Result<(), KbError>;

    /// Human-readable location (path or label)
    fn location(&self) -> String;

    /// Parsed document
    fn load(&self) -> Result<KnowledgeDocument, KbError> {
        self.load_raw().map(|raw| KnowledgeDocument::parse(&raw))
    }

    /// Serialize and persist a document
    fn save(&self, doc: &KnowledgeDocument) -> Result<(), KbError> {
        self.save_raw(&doc.serialize())
    }
}

/// Knowledge base backed by a single text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create an empty knowledge base file if none exists
    ///
    /// Returns `true` if a file was created.
    pub fn create_if_missing(&self) -> Result<bool, KbError> {
        if self.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        std::fs::write(&self.path, "").map_err(|e| self.io_error(e))?;
        tracing::info!(path = %self.path.display(), "created empty knowledge base");
        Ok(true)
    }

    fn io_error(&self, source: std::io::Error) -> KbError {
        KbError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentStore for FileStore {
    fn load_raw(&self) -> Result<String, KbError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(KbError::DocumentNotFound(self.path.clone()))
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Written to a sibling temp file, then renamed over the target, so a
    /// failed save never leaves a truncated knowledge base behind
    fn save_raw(&self, content: &str) -> Result<(), KbError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        if let Ok(meta) = std::fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| self.io_error(e))?;
        }
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = content.len(), "knowledge base written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory store
///
/// Uses Mutex so it can be shared like a file store. `None` models a
/// missing document.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Mutex::new(Some(content.into())),
        }
    }

    /// A store with no document at all
    pub fn missing() -> Self {
        Self::default()
    }

    /// Current content (for assertions)
    pub fn snapshot(&self) -> Option<String> {
        self.content.lock().map(|c| c.clone()).unwrap_or(None)
    }
}

impl DocumentStore for MemoryStore {
    fn load_raw(&self) -> Result<String, KbError> {
        let content = self.content.lock().map_err(|e| KbError::Io {
            path: PathBuf::from(self.location()),
            source: std::io::Error::new(ErrorKind::Other, format!("Lock error: {}", e)),
        })?;
        content
            .clone()
            .ok_or_else(|| KbError::DocumentNotFound(PathBuf::from(self.location())))
    }

    fn save_raw(&self, new_content: &str) -> Result<(), KbError> {
        let mut content = self.content.lock().map_err(|e| KbError::Io {
            path: PathBuf::from(self.location()),
            source: std::io::Error::new(ErrorKind::Other, format!("Lock error: {}", e)),
        })?;
        *content = Some(new_content.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
