//! Error types for the PDF writer

use std::io;
use thiserror::Error;

/// Main error type for PDF writing operations
#[derive(Error, Debug)]
pub enum PDFWriteError {
    /// A text line contains a delimiter that the reject policy refuses
    #[error("Line {index} contains unescaped character {character:?}")]
    InvalidLine {
        index: usize,
        character: char,
    },

    /// Layout options are out of range
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Document has no catalog to point the trailer at
    #[error("Document root is not set")]
    MissingRoot,

    /// Object id was reserved but never written
    #[error("Object {0} was reserved but never written")]
    UnresolvedObject(u32),

    /// Object id was written twice
    #[error("Object {0} was already written")]
    DuplicateObject(u32),

    /// Reference to an id that is not part of the document
    #[error("Object {from} references unknown object {to}")]
    DanglingReference {
        from: u32,
        to: u32,
    },

    /// Byte offset does not fit into a 10 digit xref entry
    #[error("Offset {0} does not fit into a cross reference entry")]
    OffsetOverflow(u64),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type for PDF writing operations
pub type PDFWriteResult<T> = Result<T, PDFWriteError>;

impl PDFWriteError {
    /// Create a new invalid layout error
    pub fn invalid_layout(msg: impl Into<String>) -> Self {
        Self::InvalidLayout(msg.into())
    }

    /// Check if error was caused by caller input
    pub fn is_input_error(&self) -> bool {
        matches!(self,
            Self::InvalidLine { .. } |
            Self::InvalidLayout(_)
        )
    }

    /// Check if error is related to document structure
    pub fn is_structure_error(&self) -> bool {
        matches!(self,
            Self::MissingRoot |
            Self::UnresolvedObject(_) |
            Self::DuplicateObject(_) |
            Self::DanglingReference { .. } |
            Self::OffsetOverflow(_)
        )
    }
}

impl From<tempfile::PersistError> for PDFWriteError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::IoError(err.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PDFWriteError::invalid_layout("font size must be positive");
        assert!(matches!(err, PDFWriteError::InvalidLayout(_)));
    }

    #[test]
    fn test_error_categorization() {
        let line_err = PDFWriteError::InvalidLine { index: 2, character: '(' };
        assert!(line_err.is_input_error());
        assert!(!line_err.is_structure_error());

        let struct_err = PDFWriteError::DanglingReference { from: 3, to: 9 };
        assert!(struct_err.is_structure_error());
        assert!(!struct_err.is_input_error());

        let io_err = PDFWriteError::IoError(io::Error::new(io::ErrorKind::Other, "disk"));
        assert!(!io_err.is_input_error());
        assert!(!io_err.is_structure_error());
    }

    #[test]
    fn test_error_display() {
        let err = PDFWriteError::InvalidLine { index: 1, character: ')' };
        assert_eq!(err.to_string(), "Line 1 contains unescaped character ')'");

        let err = PDFWriteError::OffsetOverflow(10_000_000_000);
        assert_eq!(
            err.to_string(),
            "Offset 10000000000 does not fit into a cross reference entry"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let pdf_err: PDFWriteError = io_err.into();
        assert!(matches!(pdf_err, PDFWriteError::IoError(_)));
    }
}
