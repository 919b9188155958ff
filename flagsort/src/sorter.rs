//! Sort by applying [`distribute()`] once per key byte, most significant first
//!
//! The top level partitions the whole buffer on key byte 0. Each resulting
//! bucket with more than one record is partitioned again on byte 1, and so on
//! down to byte 3. After that last pass every bucket holds records with equal
//! keys, so the buffer is sorted. Order among equal keys is unspecified.
//!
//! Because the key is exactly four bytes wide, the descent is at most four
//! levels deep. Each level gets its own [`Offsets`] table, all of them living
//! in one fixed-size array on the stack.

use crate::distribute::{distribute, Depth, Offsets};
use crate::err::Error;
use crate::layout::KeyLayout;
use crate::records::{KeyedRecords, KeyedSlice, StridedRecords};
use std::ops::Range;

/// Sorter configuration for in-place American flag sort on `u32` keys
///
/// The default configuration can be used directly via the crate-level
/// [`crate::sort_by_u32_key()`], [`crate::sort_by_key()`] and
/// [`crate::sort_records()`] functions.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FlagSort {
    /// Find the largest key first and skip passes on always-zero bytes
    skip_zero_high_bytes: bool,
}

impl FlagSort {
    /// Create a new [`FlagSort`] with default settings.
    pub fn new() -> Self {
        Self {
            skip_zero_high_bytes: true,
        }
    }

    /// Choose whether to skip passes over high key bytes that are zero in
    /// every record.
    ///
    /// When enabled (the default) a preliminary scan finds the largest key,
    /// and sorting starts at its most significant nonzero byte. When disabled
    /// all four passes always run. Both produce sorted output.
    pub fn skip_zero_high_bytes(&mut self, skip: bool) -> &mut Self {
        self.skip_zero_high_bytes = skip;
        self
    }

    /// Sort any [`KeyedRecords`] buffer in place by ascending key.
    pub fn sort<R: KeyedRecords + ?Sized>(&self, records: &mut R) {
        let count = records.len();
        if count < 2 {
            return;
        }

        let start = if self.skip_zero_high_bytes {
            match start_depth(records) {
                Some(depth) => depth,
                None => {
                    tracing::debug!(count, "all keys are zero, nothing to sort");
                    return;
                }
            }
        } else {
            Depth::FIRST
        };
        tracing::debug!(count, start_depth = start.index(), "flag sort");

        let mut tables: [Offsets; Depth::COUNT] = std::array::from_fn(|_| Offsets::new());
        sort_range(records, 0..count, start, &mut tables[start.index()..]);
    }

    /// Sort a slice of typed records by the key that `key` extracts.
    pub fn sort_by_key<T, F: Fn(&T) -> u32>(&self, items: &mut [T], key: F) {
        self.sort(&mut KeyedSlice::new(items, key));
    }

    /// Sort the first `count` records of a byte buffer described by `layout`.
    ///
    /// Returns an error, without modifying the buffer, if it holds fewer
    /// than `count` records.
    pub fn sort_bytes(
        &self,
        buffer: &mut [u8],
        count: usize,
        layout: KeyLayout,
    ) -> Result<(), Error> {
        let mut records = StridedRecords::new(buffer, count, layout)?;
        self.sort(&mut records);
        Ok(())
    }
}

impl Default for FlagSort {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the first depth whose key byte is nonzero in at least one record.
///
/// Returns `None` when every key is zero.
fn start_depth<R: KeyedRecords + ?Sized>(records: &R) -> Option<Depth> {
    let max = (0..records.len()).map(|i| records.key(i)).max()?;
    if max == 0 {
        return None;
    }
    Depth::new((max.leading_zeros() / 8) as usize)
}

/// Partition `range` at `depth`, then descend into every bucket that still
/// holds more than one record.
///
/// `tables` holds one scratch [`Offsets`] for this level and each deeper one.
fn sort_range<R: KeyedRecords + ?Sized>(
    records: &mut R,
    range: Range<usize>,
    depth: Depth,
    tables: &mut [Offsets],
) {
    let Some((offsets, deeper)) = tables.split_first_mut() else {
        return;
    };
    distribute(records, range.clone(), depth, offsets);

    let Some(next) = depth.next() else {
        return;
    };
    for bucket in offsets.buckets_at_least(2) {
        let sub_range = range.start + bucket.start..range.start + bucket.end;
        sort_range(records, sub_range, next, deeper);
    }
}
