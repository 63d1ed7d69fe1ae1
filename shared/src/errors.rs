//! Shared error types for the pronoun survey system

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Unsupported source: {input}")]
    InvalidSourceKind { input: String },
}
