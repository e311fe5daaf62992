//! # Dense In-Memory Matrix
//!
//! Fully addressable row-major backing for small matrices (per-chromosome
//! views, expected-value grids). Answers both capability traits: random
//! access with value bounds, and matrix-vector multiplication.

use crate::matrices::{DenseQuery, VectorMultiply};

/// Dense row-major matrix
#[derive(Clone, Debug)]
pub struct InMemoryMatrix {
    n_rows: usize,
    n_cols: usize,
    data: Vec<f32>,
    lower: f32,
    upper: f32,
}

impl InMemoryMatrix {
    /// Create a zero-filled matrix
    pub fn new(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_rows,
            n_cols,
            data: vec![0.0; n_rows * n_cols],
            lower: f32::MAX,
            upper: f32::MIN,
        }
    }

    /// Set the value at `(row, col)`, updating value bounds.
    ///
    /// NaN values are dropped, matching the accumulator's policy.
    pub fn set_entry(&mut self, row: usize, col: usize, value: f32) {
        if value.is_nan() {
            return;
        }
        let idx = row * self.n_cols + col;
        self.data[idx] = value;
        self.lower = self.lower.min(value);
        self.upper = self.upper.max(value);
    }
}

impl DenseQuery for InMemoryMatrix {
    #[inline]
    fn get_entry(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.n_cols + col]
    }

    fn row_dimension(&self) -> usize {
        self.n_rows
    }

    fn column_dimension(&self) -> usize {
        self.n_cols
    }

    fn lower_value(&self) -> f32 {
        self.lower
    }

    fn upper_value(&self) -> f32 {
        self.upper
    }
}

impl VectorMultiply for InMemoryMatrix {
    fn multiply(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(
            x.len(),
            self.n_cols,
            "vector length {} does not match column dimension {}",
            x.len(),
            self.n_cols
        );
        let mut y = vec![0.0; self.n_rows];
        for row in 0..self.n_rows {
            let offset = row * self.n_cols;
            let mut acc = 0.0;
            for col in 0..self.n_cols {
                acc += self.data[offset + col] as f64 * x[col];
            }
            y[row] = acc;
        }
        y
    }
}
