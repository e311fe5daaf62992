//! # Block Reader Layer
//!
//! ## Role
//! Everything between the binary container (external) and matrix
//! construction (external): contact records, the block index and cache,
//! the loader contract, and the block-spanning record iterator.
//!
//! ## Design
//! The core owns no container parsing. A [`BlockReader`] implementation
//! fetches and decodes individual blocks; [`iterator::ContactRecordIterator`]
//! stitches those blocks into one forward-only record stream, consulting the
//! [`cache::BlockCache`] before every fetch.

pub mod block;
pub mod cache;
pub mod iterator;

use std::fmt;

use crate::error::Result;
use block::{Block, BlockLocation};

/// A single observed contact between two genomic bins
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactRecord {
    /// Row bin index
    pub bin_x: u32,
    /// Column bin index
    pub bin_y: u32,
    /// Observed contact frequency
    pub counts: f32,
}

impl ContactRecord {
    pub fn new(bin_x: u32, bin_y: u32, counts: f32) -> Self {
        Self {
            bin_x,
            bin_y,
            counts,
        }
    }
}

/// Which normalization variant of a block to fetch
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NormalizationType {
    /// Raw counts, no normalization
    None,
    /// Vanilla coverage
    Vc,
    /// Square root of vanilla coverage
    VcSqrt,
    /// Knight-Ruiz balancing
    Kr,
    /// SCALE balancing
    Scale,
}

impl fmt::Display for NormalizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            NormalizationType::None => "NONE",
            NormalizationType::Vc => "VC",
            NormalizationType::VcSqrt => "VC_SQRT",
            NormalizationType::Kr => "KR",
            NormalizationType::Scale => "SCALE",
        };
        write!(f, "{tag}")
    }
}

/// Resolution unit: base pairs or restriction fragments
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Unit {
    Bp,
    Frag,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unit::Bp => write!(f, "BP"),
            Unit::Frag => write!(f, "FRAG"),
        }
    }
}

/// A resolution key: unit plus bin size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Zoom {
    pub unit: Unit,
    pub bin_size: u32,
}

impl Zoom {
    pub fn new(unit: Unit, bin_size: u32) -> Self {
        Self { unit, bin_size }
    }
}

impl fmt::Display for Zoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.unit, self.bin_size)
    }
}

/// Collaborator contract: fetch and decode one normalized block.
///
/// Implementations own transport and decompression; failures surface as
/// [`crate::StrawError`] with an I/O or format kind. The core performs no
/// retries; retry policy, if any, belongs to the implementation.
pub trait BlockReader {
    #[allow(clippy::too_many_arguments)]
    fn read_normalized_block(
        &self,
        block_number: u32,
        series_key: &str,
        norm: NormalizationType,
        chr1_idx: usize,
        chr2_idx: usize,
        zoom: &Zoom,
        location: Option<&BlockLocation>,
    ) -> Result<Block>;
}
