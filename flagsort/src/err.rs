//! Error types for the `flagsort` crate

/// Errors applicable to describing a buffer of strided records
///
/// Sorting itself never fails. These errors come from validating the
/// `(stride, offset)` key layout and the byte buffer before any record
/// is touched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Records must be at least one byte wide.
    #[error("record stride must be nonzero")]
    ZeroStride,

    /// The four key bytes don't fit inside a single record.
    ///
    /// A key at `offset` occupies bytes `offset..offset + 4`, which must
    /// lie within `0..stride`.
    #[error("u32 key at byte offset {offset} does not fit in a {stride} byte record")]
    KeyOutOfBounds {
        /// Byte offset of the key within each record
        offset: usize,
        /// Size of each record, in bytes
        stride: usize,
    },

    /// The total buffer size for `count` records can't be represented.
    #[error("{count} records of {stride} bytes overflow the address space")]
    SizeOverflow {
        /// Number of records requested
        count: usize,
        /// Size of each record, in bytes
        stride: usize,
    },

    /// The byte buffer is smaller than `count * stride`.
    #[error("record buffer holds {actual} bytes but {needed} are required")]
    BufferTooShort {
        /// Bytes required to hold every record
        needed: usize,
        /// Bytes actually available
        actual: usize,
    },
}
