//! # Rustraw Library Root
//!
//! ## Role
//! Core reading primitives for genome-wide contact-map (Hi-C) datasets:
//! sparse symmetric matrix accumulation and block-spanning contact record
//! streaming. Container parsing, block decompression and normalization-vector
//! computation live in external collaborators; this crate owns only the
//! in-memory accumulation and iteration machinery they plug into.
//!
//! ## Module Structure
//! ```text
//! rustraw
//! ├── error     # Centralized error type (StrawError) and Result alias
//! ├── matrices  # Matrix capability traits + implementations
//! │             #   (sparse symmetric accumulator, dense in-memory)
//! └── reader    # Block layer: contact records, block index, cache,
//!               #   loader trait, block-spanning record iterator
//! ```

pub mod error;
pub mod matrices;
pub mod reader;

// Re-export commonly used types
pub use error::{Result, StrawError};
pub use matrices::{DenseQuery, InMemoryMatrix, SparseSymmetricMatrix, VectorMultiply};
pub use reader::block::{Block, BlockIndex, BlockLocation};
pub use reader::cache::{block_key, BlockCache, CacheConfig};
pub use reader::iterator::ContactRecordIterator;
pub use reader::{BlockReader, ContactRecord, NormalizationType, Unit, Zoom};
