//! # Centralized Error Handling
//!
//! Unified error types for the entire crate using `thiserror`.

use thiserror::Error;

/// Main error type for rustraw operations
#[derive(Error, Debug)]
pub enum StrawError {
    /// I/O errors (file missing, read failures, transport errors)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Container format errors (malformed block, bad magic, decode failures)
    #[error("Format error: {message}")]
    Format { message: String },

    /// Invalid data errors (dimension mismatch, inconsistent index)
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Block-level errors (missing location, failed normalized read)
    #[error("Block error for block {block}: {message}")]
    Block { block: u32, message: String },
}

/// Type alias for Results using StrawError
pub type Result<T> = std::result::Result<T, StrawError>;

impl StrawError {
    /// Create a format error with a message
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create an invalid data error
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a block error
    pub fn block(block: u32, message: impl Into<String>) -> Self {
        Self::Block {
            block,
            message: message.into(),
        }
    }
}
