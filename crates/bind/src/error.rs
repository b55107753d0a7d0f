//! Error types for XML data binding.
//!
//! Read failures abort the whole document: a caller that receives an error
//! from a read must discard any partially populated entity. Write failures
//! only come from the underlying sink.

use thiserror::Error;
use wsbind_support::LexicalError;

/// Errors surfaced by the binding engine.
#[derive(Error, Debug)]
pub enum BindError {
    /// Structural violation: an unexpected or missing tag, an unterminated
    /// document, or XML the tokenizer rejects.
    #[error("malformed document: {message}")]
    MalformedDocument { message: String },

    /// A leaf element's text does not parse as its declared simple type.
    #[error("cannot convert <{element}> to {type_name}: {reason} (text {text:?})")]
    TypeConversion {
        element: String,
        type_name: String,
        text: String,
        reason: String,
    },

    /// A type hint (or a declared type) names a type with no registration.
    #[error("unknown type {{{namespace}}}{name}")]
    UnknownType { namespace: String, name: String },

    /// XML-level failure reported by the tokenizer or emitter.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error on the underlying source or sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BindError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        BindError::MalformedDocument {
            message: message.into(),
        }
    }

    pub(crate) fn unknown_type(namespace: &str, name: &str) -> Self {
        BindError::UnknownType {
            namespace: namespace.to_string(),
            name: name.to_string(),
        }
    }

    pub(crate) fn conversion(element: &str, type_name: &str, err: LexicalError) -> Self {
        BindError::TypeConversion {
            element: element.to_string(),
            type_name: type_name.to_string(),
            text: err.text,
            reason: err.reason,
        }
    }

    /// Returns true for the structural error class.
    pub fn is_malformed(&self) -> bool {
        matches!(self, BindError::MalformedDocument { .. })
    }
}

/// Result type alias for binding operations.
pub type Result<T> = std::result::Result<T, BindError>;
