//! One in-place counting partition on a single key byte
//!
//! This is the American flag sort step. A sub-range of records is grouped by
//! one byte of their keys into 256 contiguous buckets, in ascending byte
//! order, without any scratch space beyond two fixed-size tables.
//!
//! The first pass counts bucket sizes and the prefix sums of those counts
//! give each bucket's boundaries, recorded in an [`Offsets`] table. The
//! second pass walks the range once. A record already inside its bucket is
//! left alone. Any other record is swapped into the next unfilled slot of its
//! own bucket, and whatever was displaced lands at the current position to be
//! examined in turn. Each swap fills one slot for good, so the walk ends after
//! at most one swap per record and exactly one advance per position.

use crate::records::KeyedRecords;
use std::ops::Range;

/// Number of distinct key byte values, and so the number of buckets per pass
pub(crate) const NUM_BUCKETS: usize = 256;

/// Which byte of the 32-bit key a pass partitions on
///
/// Depth 0 is the most significant byte and depth 3 the least significant.
#[cfg_attr(feature = "distribute", visibility::make(pub))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub(crate) struct Depth(u8);

impl Depth {
    /// Number of key bytes, and so the number of possible depths
    pub(crate) const COUNT: usize = 4;

    /// Most significant byte, where every sort begins by default
    pub(crate) const FIRST: Depth = Depth(0);

    /// A depth from its index, if the index is below [`Depth::COUNT`].
    #[cfg_attr(feature = "distribute", visibility::make(pub))]
    pub(crate) fn new(depth: usize) -> Option<Self> {
        u8::try_from(depth)
            .ok()
            .filter(|&d| usize::from(d) < Self::COUNT)
            .map(Depth)
    }

    /// Index of this depth, from 0 to 3.
    #[cfg_attr(feature = "distribute", visibility::make(pub))]
    pub(crate) fn index(self) -> usize {
        usize::from(self.0)
    }

    /// The depth one byte less significant than this one, if any.
    pub(crate) fn next(self) -> Option<Self> {
        Self::new(self.index() + 1)
    }

    /// Extract this depth's byte from a key.
    #[cfg_attr(feature = "distribute", visibility::make(pub))]
    #[inline(always)]
    pub(crate) fn key_byte(self, key: u32) -> u8 {
        let shift = (3 - u32::from(self.0)) * 8;
        ((key >> shift) & 0xff) as u8
    }
}

/// Bucket boundaries produced by [`distribute()`]
///
/// Entry `b` is the start of the bucket holding key byte `b`, and entry 256
/// is the end of the last bucket, equal to the length of the distributed
/// range. Positions are relative to the start of that range. Entries never
/// decrease.
#[cfg_attr(feature = "distribute", visibility::make(pub))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Offsets([usize; NUM_BUCKETS + 1]);

impl Offsets {
    /// An all-zero table, describing 256 empty buckets.
    #[cfg_attr(feature = "distribute", visibility::make(pub))]
    pub(crate) const fn new() -> Self {
        Self([0; NUM_BUCKETS + 1])
    }

    /// Relative item range of the bucket for key byte `byte`.
    #[cfg_attr(feature = "distribute", visibility::make(pub))]
    #[inline(always)]
    pub(crate) fn bucket(&self, byte: usize) -> Range<usize> {
        self.0[byte]..self.0[byte + 1]
    }

    /// Total number of records covered by this table
    #[cfg(any(test, feature = "distribute"))]
    #[cfg_attr(feature = "distribute", visibility::make(pub))]
    pub(crate) fn total(&self) -> usize {
        self.0[NUM_BUCKETS]
    }

    /// Raw table of all 257 boundaries
    #[cfg(any(test, feature = "distribute"))]
    #[cfg_attr(feature = "distribute", visibility::make(pub))]
    pub(crate) fn as_array(&self) -> &[usize; NUM_BUCKETS + 1] {
        &self.0
    }

    /// Relative ranges of every bucket holding at least `min_len` records,
    /// in ascending key byte order.
    #[cfg_attr(feature = "distribute", visibility::make(pub))]
    pub(crate) fn buckets_at_least(
        &self,
        min_len: usize,
    ) -> impl Iterator<Item = Range<usize>> + '_ {
        self.0
            .windows(2)
            .map(|pair| pair[0]..pair[1])
            .filter(move |bucket| bucket.len() >= min_len)
    }

    /// Replace the table with the running sum of `counts`.
    fn fill_from_counts(&mut self, counts: &[usize; NUM_BUCKETS]) {
        let mut sum = 0;
        for (offset, count) in self.0.iter_mut().zip(counts.iter()) {
            *offset = sum;
            sum += count;
        }
        self.0[NUM_BUCKETS] = sum;
    }
}

impl Default for Offsets {
    fn default() -> Self {
        Self::new()
    }
}

/// Partition `range` of `records` by the key byte selected with `depth`.
///
/// Afterward, every record whose selected byte equals `b` sits in
/// `offsets.bucket(b)` (relative to `range.start`) and buckets appear in
/// ascending order of `b`. Records outside `range` are untouched. An empty
/// range leaves the records alone and writes an all-zero table.
///
/// Panics if `range` extends past the end of `records`.
#[cfg_attr(feature = "distribute", visibility::make(pub))]
pub(crate) fn distribute<R: KeyedRecords + ?Sized>(
    records: &mut R,
    range: Range<usize>,
    depth: Depth,
    offsets: &mut Offsets,
) {
    assert!(range.end <= records.len());
    let base = range.start;
    let count = range.len();

    let mut counts = [0usize; NUM_BUCKETS];
    for index in range {
        counts[usize::from(depth.key_byte(records.key(index)))] += 1;
    }
    offsets.fill_from_counts(&counts);

    // From here on, counts[b] is the number of slots in bucket b that have
    // not yet been filled by a swap. The next one is at bucket.end - counts[b].
    let mut idx = 0;
    while idx < count {
        let byte = usize::from(depth.key_byte(records.key(base + idx)));
        let bucket = offsets.bucket(byte);

        if bucket.contains(&idx) {
            idx += 1;
            continue;
        }

        debug_assert!(counts[byte] > 0);
        let swap_idx = bucket.end - counts[byte];
        records.swap(base + idx, base + swap_idx);
        counts[byte] -= 1;
    }
}
