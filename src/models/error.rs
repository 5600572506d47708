//! Error types for address parsing and arithmetic.

use thiserror::Error;

/// Errors produced by address parsing and CIDR arithmetic.
///
/// `Format` means the input text is not a valid address; the caller decides
/// whether to skip the record or abort the run. `Range` means an arithmetic
/// step would leave the address space, or a prefix length is outside the
/// family width.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum AddrError {
    #[error("Invalid {family} format ({text})")]
    Format { family: &'static str, text: String },
    #[error("{0}")]
    Range(String),
}

impl AddrError {
    pub fn format(family: &'static str, text: &str) -> AddrError {
        AddrError::Format {
            family,
            text: text.to_string(),
        }
    }
}
