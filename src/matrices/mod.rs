//! # Matrix Capability Traits
//!
//! ## Role
//! Narrow capability traits for the matrix variants used during contact-map
//! processing, plus the implementations themselves.
//!
//! ## Design: Split Capabilities
//! Normalization only ever needs `y = M * x`, while visualization needs
//! random access and value bounds. A single wide matrix interface forces
//! write-only accumulators to stub out queries they cannot answer; splitting
//! the contract means each variant implements exactly what it supports:
//!
//! - [`VectorMultiply`] — matrix-vector product. Implemented by every variant.
//! - [`DenseQuery`] — random access, dimensions, value bounds. Implemented
//!   only by variants that hold a fully addressable matrix.
//!
//! [`SparseSymmetricMatrix`] implements `VectorMultiply` alone; there is no
//! runtime-fatal "not implemented" path anywhere.

pub mod in_memory;
pub mod sparse_symmetric;

pub use in_memory::InMemoryMatrix;
pub use sparse_symmetric::SparseSymmetricMatrix;

/// Matrix-vector multiplication capability.
///
/// The one primitive normalization-vector computation depends on.
pub trait VectorMultiply {
    /// Compute `y = M * x`. The result has the same length as `x`.
    fn multiply(&self, x: &[f64]) -> Vec<f64>;
}

/// Random-access query capability for fully addressable matrices.
pub trait DenseQuery {
    /// Value at `(row, col)`.
    fn get_entry(&self, row: usize, col: usize) -> f32;

    /// Number of rows
    fn row_dimension(&self) -> usize;

    /// Number of columns
    fn column_dimension(&self) -> usize;

    /// Smallest stored value
    fn lower_value(&self) -> f32;

    /// Largest stored value
    fn upper_value(&self) -> f32;
}
