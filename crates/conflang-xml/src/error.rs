//! Serialization errors.

use std::fmt;

/// Errors that can occur while producing XML.
#[derive(Debug)]
pub enum XmlError {
    /// The requested root element name is not a valid XML name.
    InvalidName(String),
    /// The underlying XML writer failed.
    Write(String),
    /// The writer produced bytes that are not UTF-8.
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlError::InvalidName(name) => write!(f, "invalid XML element name: {:?}", name),
            XmlError::Write(message) => write!(f, "failed to write XML: {}", message),
            XmlError::Utf8(e) => write!(f, "XML output is not valid UTF-8: {}", e),
        }
    }
}

impl std::error::Error for XmlError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            XmlError::Utf8(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::string::FromUtf8Error> for XmlError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        XmlError::Utf8(e)
    }
}
