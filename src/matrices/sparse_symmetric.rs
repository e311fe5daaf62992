//! # Sparse Symmetric Accumulator
//!
//! Accumulates a symmetric contact matrix from a stream of (row, col, value)
//! triples without ever materializing a dense matrix. Only one triangle is
//! stored; [`SparseSymmetricMatrix::multiply`] exploits symmetry to apply
//! each entry to both sides.
//!
//! ## Storage: Bounded Segments
//! Entries live in parallel (rows, cols, values) vectors grouped into
//! fixed-capacity segments. Genome-wide matrices at fine resolutions can
//! exceed what a single contiguous allocation should hold, so when the
//! active segment fills, a fresh segment sized to the same estimate is
//! opened and appends continue there. The overflow check is an explicit
//! capacity predicate, never a fault caught mid-append.

use tracing::warn;

use crate::matrices::VectorMultiply;
use crate::reader::ContactRecord;

/// One bounded slab of entries: three parallel vectors of equal length.
#[derive(Clone, Debug)]
struct Segment {
    rows: Vec<u32>,
    cols: Vec<u32>,
    values: Vec<f32>,
    capacity: usize,
}

impl Segment {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.rows.len() >= self.capacity
    }

    #[inline]
    fn push(&mut self, row: u32, col: u32, value: f32) {
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Sparse symmetric matrix accumulator.
///
/// Append-only: entries are never removed or merged. Duplicate `(row, col)`
/// insertions are retained and contribute additively to any multiply.
#[derive(Clone, Debug)]
pub struct SparseSymmetricMatrix {
    /// Target capacity for each segment, fixed at construction
    num_vals_estimate: usize,

    /// Segments in creation order; appends go to the last one
    segments: Vec<Segment>,
}

impl SparseSymmetricMatrix {
    /// Create an accumulator with one segment pre-sized to `num_vals_estimate`.
    ///
    /// An estimate of zero is clamped to one so a segment can always hold at
    /// least one entry.
    pub fn new(num_vals_estimate: usize) -> Self {
        let num_vals_estimate = num_vals_estimate.max(1);
        Self {
            num_vals_estimate,
            segments: vec![Segment::with_capacity(num_vals_estimate)],
        }
    }

    /// Append one entry of the stored triangle.
    ///
    /// NaN values are silently dropped. When the active segment is full a new
    /// segment is opened transparently; the in-flight entry lands in the new
    /// segment, neither dropped nor duplicated.
    pub fn insert(&mut self, row: u32, col: u32, value: f32) {
        if value.is_nan() {
            return;
        }

        // Explicit capacity predicate, checked before the append
        if self.segments.last().map_or(true, Segment::is_full) {
            if self.segments.len() >= 2 {
                // Beyond the dataset scale this design anticipates
                warn!(
                    segments = self.segments.len() + 1,
                    estimate = self.num_vals_estimate,
                    "opening another sparse matrix segment; dataset exceeds expected scale"
                );
            }
            self.segments
                .push(Segment::with_capacity(self.num_vals_estimate));
        }

        // Guaranteed non-full after the check above
        self.segments
            .last_mut()
            .expect("at least one segment exists")
            .push(row, col, value);
    }

    /// Bulk-load contact records through a compacted-index mapping.
    ///
    /// `index_map[raw_bin]` gives the compacted index for a raw bin, or
    /// `None` when the bin is excluded from this matrix. Records with either
    /// endpoint excluded are skipped entirely. The mapped indices, not the
    /// raw bin numbers, are stored.
    ///
    /// Precondition: `index_map` covers every raw bin appearing in `records`.
    pub fn populate(&mut self, records: &[ContactRecord], index_map: &[Option<u32>]) {
        for rec in records {
            let x = index_map[rec.bin_x as usize];
            let y = index_map[rec.bin_y as usize];
            if let (Some(row), Some(col)) = (x, y) {
                self.insert(row, col, rec.counts);
            }
        }
    }

    /// Total number of stored entries across all segments
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// True if no entries have been stored
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.len() == 0)
    }

    /// Number of backing segments currently open
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    fn multiply_segment(segment: &Segment, x: &[f64], y: &mut [f64]) {
        let n = segment.len();
        for i in 0..n {
            let row = segment.rows[i] as usize;
            let col = segment.cols[i] as usize;
            let value = segment.values[i] as f64;
            assert!(
                row < y.len() && col < y.len(),
                "entry ({row},{col}) out of range for vector of length {}",
                y.len()
            );
            y[row] += x[col] * value;
            if row != col {
                y[col] += x[row] * value;
            }
        }
    }
}

impl VectorMultiply for SparseSymmetricMatrix {
    /// Compute `y = M * x` over the full symmetric matrix.
    ///
    /// Every stored entry contributes `value * x[col]` to `y[row]` and, off
    /// the diagonal, `value * x[row]` to `y[col]`. Segments are walked in
    /// creation order and entries in insertion order, so repeated runs with
    /// the same insertion order produce bit-identical results.
    ///
    /// Panics if any stored index is out of range for `x`: dimensioning is a
    /// caller-guaranteed precondition and violating it is fatal rather than
    /// silently corrupting.
    fn multiply(&self, x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0; x.len()];
        for segment in &self.segments {
            Self::multiply_segment(segment, x, &mut y);
        }
        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Dense reference: apply the symmetric rule entry by entry
    fn dense_multiply(entries: &[(u32, u32, f32)], x: &[f64]) -> Vec<f64> {
        let mut y = vec![0.0; x.len()];
        for &(r, c, v) in entries {
            y[r as usize] += x[c as usize] * v as f64;
            if r != c {
                y[c as usize] += x[r as usize] * v as f64;
            }
        }
        y
    }

    #[test]
    fn test_concrete_scenario() {
        let mut m = SparseSymmetricMatrix::new(16);
        m.insert(0, 1, 2.0);
        m.insert(1, 1, 3.0);
        m.insert(0, 0, 1.0);

        let y = m.multiply(&[1.0, 1.0]);
        assert_eq!(y, vec![3.0, 5.0]);
    }

    #[test]
    fn test_one_hot_matches_dense_reference() {
        let entries = [
            (0u32, 1u32, 2.5f32),
            (2, 3, 1.0),
            (1, 1, 4.0),
            (0, 3, 0.5),
            (3, 3, 2.0),
        ];
        let mut m = SparseSymmetricMatrix::new(8);
        for &(r, c, v) in &entries {
            m.insert(r, c, v);
        }

        for i in 0..4 {
            let mut e = vec![0.0; 4];
            e[i] = 1.0;
            assert_eq!(m.multiply(&e), dense_multiply(&entries, &e));
        }
    }

    #[test]
    fn test_symmetry_single_insert_feeds_both_sides() {
        let mut m = SparseSymmetricMatrix::new(4);
        m.insert(0, 2, 5.0);

        let y = m.multiply(&[1.0, 1.0, 1.0]);
        assert_eq!(y[0], 5.0);
        assert_eq!(y[2], 5.0);
        assert_eq!(y[1], 0.0);
    }

    #[test]
    fn test_nan_is_dropped() {
        let mut m = SparseSymmetricMatrix::new(4);
        m.insert(0, 1, 2.0);
        m.insert(1, 1, f32::NAN);

        assert_eq!(m.len(), 1);
        let y = m.multiply(&[1.0, 1.0]);
        assert_eq!(y, vec![2.0, 2.0]);
    }

    #[test]
    fn test_duplicates_are_additive() {
        let mut m = SparseSymmetricMatrix::new(4);
        m.insert(0, 1, 1.0);
        m.insert(0, 1, 2.0);

        assert_eq!(m.len(), 2);
        let y = m.multiply(&[1.0, 1.0]);
        assert_eq!(y, vec![3.0, 3.0]);
    }

    #[test]
    fn test_segment_overflow_loses_nothing() {
        // Force the capacity boundary with a tiny estimate
        let mut m = SparseSymmetricMatrix::new(3);
        let entries: Vec<(u32, u32, f32)> =
            (0..10).map(|i| (i % 4, (i + 1) % 4, i as f32 + 1.0)).collect();
        for &(r, c, v) in &entries {
            m.insert(r, c, v);
        }

        assert_eq!(m.len(), 10);
        assert!(m.num_segments() > 1);

        let x = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(m.multiply(&x), dense_multiply(&entries, &x));
    }

    #[test]
    fn test_zero_estimate_is_clamped() {
        let mut m = SparseSymmetricMatrix::new(0);
        m.insert(0, 0, 1.0);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_populate_skips_excluded_bins() {
        let records = vec![
            ContactRecord::new(0, 1, 2.0),
            ContactRecord::new(1, 2, 3.0), // bin 2 excluded
            ContactRecord::new(3, 3, 4.0),
        ];
        // Raw bins 0,1,3 compact to 0,1,2; bin 2 is excluded
        let index_map = vec![Some(0), Some(1), None, Some(2)];

        let mut m = SparseSymmetricMatrix::new(8);
        m.populate(&records, &index_map);

        assert_eq!(m.len(), 2);
        // Mapped indices are stored: raw (3,3) landed at compacted (2,2)
        let y = m.multiply(&[0.0, 0.0, 1.0]);
        assert_eq!(y, vec![0.0, 0.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_index_is_fatal() {
        let mut m = SparseSymmetricMatrix::new(4);
        m.insert(5, 0, 1.0);
        m.multiply(&[1.0, 1.0]);
    }
}
