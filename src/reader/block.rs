//! # Blocks and the Block Index
//!
//! A block is the stored unit of contact records for a series. The block
//! index enumerates, in a fixed order, which blocks exist for a
//! (chromosome-pair, resolution) series and where each lives in the
//! container.

use std::collections::HashMap;

use crate::reader::ContactRecord;

/// Byte location of a stored block inside the container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLocation {
    /// Byte offset of the block
    pub position: u64,
    /// Compressed size in bytes
    pub size: u32,
}

impl BlockLocation {
    pub fn new(position: u64, size: u32) -> Self {
        Self { position, size }
    }
}

/// A decoded block: zero or more contact records in stored order
#[derive(Clone, Debug, Default)]
pub struct Block {
    /// Block number within the series
    pub number: u32,
    /// Records in the order the block stores them
    pub records: Vec<ContactRecord>,
}

impl Block {
    pub fn new(number: u32, records: Vec<ContactRecord>) -> Self {
        Self { number, records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Ordered enumeration of a series' blocks plus their container locations.
///
/// Iteration consumes blocks strictly in the order they were added. The
/// index is a read-only view once iteration starts: the record iterator
/// snapshots the number list and never mutates the provider.
#[derive(Clone, Debug, Default)]
pub struct BlockIndex {
    numbers: Vec<u32>,
    locations: HashMap<u32, BlockLocation>,
}

impl BlockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block to the enumeration
    pub fn add(&mut self, number: u32, location: BlockLocation) {
        self.numbers.push(number);
        self.locations.insert(number, location);
    }

    /// Snapshot of the block numbers in enumeration order
    pub fn block_numbers(&self) -> Vec<u32> {
        self.numbers.clone()
    }

    /// Container location for a block number, if indexed
    pub fn location(&self, number: u32) -> Option<&BlockLocation> {
        self.locations.get(&number)
    }

    /// Number of blocks in the enumeration
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}
