//! Error types for knowledge base operations

use std::path::PathBuf;

use thiserror::Error;

/// Errors from document operations.
///
/// Every variant is a distinct outcome so callers can branch on cause.
/// The backing file is never modified when one of these is returned.
#[derive(Error, Debug)]
pub enum KbError {
    /// Backing file is absent.
    #[error("Knowledge base not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    /// Section identifier is not an integer.
    #[error("Invalid section number: {0}")]
    InvalidSectionNumber(String),

    /// Section identifier is an integer but no such section exists.
    #[error("Section {0} not found")]
    SectionNotFound(i64),

    /// Underlying read or write failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KbError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            KbError::DocumentNotFound(_) => "document_not_found",
            KbError::InvalidSectionNumber(_) => "invalid_section_number",
            KbError::SectionNotFound(_) => "section_not_found",
            KbError::Io { .. } => "io_failure",
        }
    }

    /// Whether the error means "nothing there" rather than "bad input" or I/O
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            KbError::DocumentNotFound(_) | KbError::SectionNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let errors = [
            KbError::DocumentNotFound(PathBuf::from("kb.txt")),
            KbError::InvalidSectionNumber("abc".to_string()),
            KbError::SectionNotFound(5),
            KbError::Io {
                path: PathBuf::from("kb.txt"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            },
        ];

        let mut kinds: Vec<&str> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), 4);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            KbError::InvalidSectionNumber("two".to_string()).to_string(),
            "Invalid section number: two"
        );
        assert_eq!(KbError::SectionNotFound(7).to_string(), "Section 7 not found");
        assert!(KbError::SectionNotFound(7).is_not_found());
        assert!(!KbError::InvalidSectionNumber("x".to_string()).is_not_found());
    }
}
