//! # Contact Record Iterator
//!
//! One forward-only stream of contact records spanning every block of a
//! series. Blocks are fetched lazily, reused from the cache when present,
//! and empty blocks are skipped without surfacing to the caller.
//!
//! ## Design: Explicit State Machine
//! The availability check does real work: it advances to, fetches and
//! decodes the next non-empty block as a side effect. That "peek that
//! prefetches" is modeled as an explicit [`State`] transition rather than
//! buried in a lazy-iterator idiom, so each transition is directly
//! testable.
//!
//! ## Error Policy
//! A fetch failure terminates the stream: the availability check reports
//! "no more" exactly as clean exhaustion does. The underlying error stays
//! queryable through [`ContactRecordIterator::last_error`] for callers
//! that need to tell the two apart.

use std::sync::Arc;

use tracing::{error, warn};

use crate::error::StrawError;
use crate::reader::block::{Block, BlockIndex};
use crate::reader::cache::{block_key, BlockCache};
use crate::reader::{BlockReader, ContactRecord, NormalizationType, Zoom};

/// Iterator lifecycle. Forward-only; `Exhausted` and `Failed` are terminal.
#[derive(Clone, Debug)]
enum State {
    /// Before the first availability check
    NotStarted,
    /// Cursor inside a non-empty block
    WithinBlock { block: Arc<Block>, cursor: usize },
    /// Between blocks, looking for the next non-empty one.
    /// Held only inside an advance call; never observed across calls.
    Seeking,
    /// Enumeration consumed cleanly
    Exhausted,
    /// A block fetch failed; see `last_error`
    Failed,
}

/// Forward iterator over all contact records of a series.
///
/// Holds a single cursor: one availability check / record fetch pair may be
/// in flight at a time (`&mut self` enforces this). Abandoning iteration
/// needs no cleanup; nothing is held open beyond ordinary memory.
pub struct ContactRecordIterator<'a, R: BlockReader> {
    reader: &'a R,
    cache: &'a mut BlockCache,
    /// Local snapshot of the enumeration; cleared on exhaustion
    block_numbers: Vec<u32>,
    index: &'a BlockIndex,
    series_key: String,
    chr1_idx: usize,
    chr2_idx: usize,
    zoom: Zoom,
    norm: NormalizationType,
    /// Position of the next candidate block in `block_numbers`
    next_pos: usize,
    state: State,
    last_error: Option<StrawError>,
}

impl<'a, R: BlockReader> ContactRecordIterator<'a, R> {
    /// Create an iterator positioned before the first block.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reader: &'a R,
        index: &'a BlockIndex,
        series_key: impl Into<String>,
        cache: &'a mut BlockCache,
        chr1_idx: usize,
        chr2_idx: usize,
        zoom: Zoom,
        norm: NormalizationType,
    ) -> Self {
        Self {
            reader,
            cache,
            block_numbers: index.block_numbers(),
            index,
            series_key: series_key.into(),
            chr1_idx,
            chr2_idx,
            zoom,
            norm,
            next_pos: 0,
            state: State::NotStarted,
            last_error: None,
        }
    }

    /// Check whether another record is available, advancing to (and
    /// fetching) the next non-empty block if needed.
    ///
    /// Returns false on clean exhaustion and on fetch failure alike; use
    /// [`last_error`](Self::last_error) to distinguish.
    pub fn has_next(&mut self) -> bool {
        match &self.state {
            State::Exhausted | State::Failed => return false,
            State::WithinBlock { block, cursor } if *cursor < block.records.len() => {
                return true;
            }
            _ => {}
        }

        if self.block_numbers.is_empty() {
            // Degraded input, not an error: nothing was ever enumerated
            if matches!(self.state, State::NotStarted) {
                warn!(
                    series_key = %self.series_key,
                    "no blocks available for series; verify dynamic blocking is not in use"
                );
            }
            self.state = State::Exhausted;
            return false;
        }

        self.state = State::Seeking;
        while self.next_pos < self.block_numbers.len() {
            let number = self.block_numbers[self.next_pos];
            self.next_pos += 1;

            let block = match self.fetch_block(number) {
                Ok(block) => block,
                Err(e) => {
                    error!(
                        series_key = %self.series_key,
                        block = number,
                        error = %e,
                        "error fetching block; terminating stream"
                    );
                    self.last_error = Some(e);
                    self.state = State::Failed;
                    return false;
                }
            };

            if !block.records.is_empty() {
                self.state = State::WithinBlock { block, cursor: 0 };
                return true;
            }
            // Empty block: keep seeking
        }

        // Done with the enumeration; drop the snapshot so nothing can re-scan it
        self.block_numbers.clear();
        self.state = State::Exhausted;
        false
    }

    /// Return the next record, or `None` when no record is available.
    ///
    /// Callers must confirm availability with [`has_next`](Self::has_next)
    /// first; calling this without a pending record yields `None`, never a
    /// panic.
    pub fn next_record(&mut self) -> Option<ContactRecord> {
        if let State::WithinBlock { block, cursor } = &mut self.state {
            if *cursor < block.records.len() {
                let record = block.records[*cursor];
                *cursor += 1;
                return Some(record);
            }
        }
        None
    }

    /// The error that terminated the stream, if any.
    ///
    /// `Some` exactly when a block fetch failed; clean exhaustion leaves
    /// this `None`.
    pub fn last_error(&self) -> Option<&StrawError> {
        self.last_error.as_ref()
    }

    /// Series key this iterator was opened for
    pub fn series_key(&self) -> &str {
        &self.series_key
    }

    /// Consult the cache, falling back to the reader on a miss. Freshly
    /// fetched blocks are cached for later passes.
    fn fetch_block(&mut self, number: u32) -> crate::error::Result<Arc<Block>> {
        let key = block_key(&self.series_key, number, self.norm);
        if let Some(block) = self.cache.get(&key) {
            return Ok(block);
        }

        let block = self.reader.read_normalized_block(
            number,
            &self.series_key,
            self.norm,
            self.chr1_idx,
            self.chr2_idx,
            &self.zoom,
            self.index.location(number),
        )?;
        let block = Arc::new(block);
        self.cache.insert(key, Arc::clone(&block));
        Ok(block)
    }
}

impl<R: BlockReader> Iterator for ContactRecordIterator<'_, R> {
    type Item = ContactRecord;

    fn next(&mut self) -> Option<ContactRecord> {
        if self.has_next() {
            self.next_record()
        } else {
            None
        }
    }
}
