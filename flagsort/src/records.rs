//! Record buffers the sorter can permute
//!
//! The sort only ever needs three things from a buffer: how many records it
//! holds, the key of the record at some position, and a way to exchange two
//! whole records. [`KeyedRecords`] captures exactly that, with positions as
//! plain indices into one arena. No reference to an individual record
//! outlives a single call, so the permutation stays in safe code without
//! giving up the in-place swap.
//!
//! Two buffers are provided: [`StridedRecords`] for opaque byte records
//! described by a [`KeyLayout`], and [`KeyedSlice`] for typed slices with a
//! key extraction function.

use crate::err::Error;
use crate::layout::KeyLayout;

/// An indexable arena of records, each carrying a `u32` sort key
pub trait KeyedRecords {
    /// Number of records in the buffer
    fn len(&self) -> usize;

    /// True if the buffer holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sort key of the record at `index`.
    ///
    /// Panics if `index >= self.len()`.
    fn key(&self, index: usize) -> u32;

    /// Exchange the complete records at positions `a` and `b`.
    ///
    /// Panics if either index is out of range. Swapping a position with
    /// itself has no effect.
    fn swap(&mut self, a: usize, b: usize);
}

/// A byte buffer viewed as `count` opaque records of `layout.stride()` bytes
///
/// Bytes past the last record are left alone.
#[derive(Debug)]
pub struct StridedRecords<'a> {
    /// Exactly `count * stride` bytes of record storage
    bytes: &'a mut [u8],
    /// Record size and key location
    layout: KeyLayout,
    /// Number of records
    count: usize,
}

impl<'a> StridedRecords<'a> {
    /// View the first `count` records of `bytes` using `layout`.
    ///
    /// Fails if the buffer can't hold `count` records.
    pub fn new(bytes: &'a mut [u8], count: usize, layout: KeyLayout) -> Result<Self, Error> {
        let needed = layout.records_len(count)?;
        let actual = bytes.len();
        match bytes.get_mut(..needed) {
            Some(bytes) => Ok(Self {
                bytes,
                layout,
                count,
            }),
            None => Err(Error::BufferTooShort { needed, actual }),
        }
    }

    /// The layout these records were described with
    pub fn layout(&self) -> KeyLayout {
        self.layout
    }

    /// Byte range of the record at `index`
    #[inline(always)]
    fn record(&self, index: usize) -> &[u8] {
        let start = index * self.layout.stride();
        &self.bytes[start..start + self.layout.stride()]
    }
}

impl<'a> KeyedRecords for StridedRecords<'a> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    fn key(&self, index: usize) -> u32 {
        self.layout.key(self.record(index))
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let stride = self.layout.stride();
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.bytes.split_at_mut(hi * stride);
        head[lo * stride..(lo + 1) * stride].swap_with_slice(&mut tail[..stride]);
    }
}

/// A typed slice paired with a function extracting each element's key
pub struct KeyedSlice<'a, T, F> {
    /// Records, permuted in place
    items: &'a mut [T],
    /// Key extraction function
    key: F,
}

impl<'a, T, F: Fn(&T) -> u32> KeyedSlice<'a, T, F> {
    /// Wrap `items`, reading each record's key with `key`.
    pub fn new(items: &'a mut [T], key: F) -> Self {
        Self { items, key }
    }
}

impl<'a, T, F> std::fmt::Debug for KeyedSlice<'a, T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedSlice")
            .field("len", &self.items.len())
            .finish_non_exhaustive()
    }
}

impl<'a, T, F: Fn(&T) -> u32> KeyedRecords for KeyedSlice<'a, T, F> {
    #[inline(always)]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline(always)]
    fn key(&self, index: usize) -> u32 {
        (self.key)(&self.items[index])
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }
}
