//! Key accessor for opaque fixed-size records
//!
//! A [`KeyLayout`] says where a `u32` sort key lives inside each record of a
//! byte buffer: records are `stride` bytes apart and the key occupies the
//! four bytes starting at `offset`. Everything else in a record is opaque
//! and only ever moves as part of a whole record.

use crate::err::Error;

/// Size of the sort key, in bytes
pub(crate) const KEY_SIZE: usize = std::mem::size_of::<u32>();

/// Byte order used to interpret the four key bytes of each record
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum ByteOrder {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
    /// Whatever the host uses, matching a `u32` field in a `#[repr(C)]` struct
    #[default]
    Native,
}

impl ByteOrder {
    /// Assemble a key from its four stored bytes.
    #[inline(always)]
    fn decode(self, bytes: [u8; KEY_SIZE]) -> u32 {
        match self {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Native => u32::from_ne_bytes(bytes),
        }
    }
}

/// Validated location of a `u32` key within records of a fixed size
///
/// Construction guarantees `stride > 0` and `offset + 4 <= stride`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct KeyLayout {
    /// Size of one record, in bytes
    stride: usize,
    /// Byte offset of the key within each record
    offset: usize,
    /// How the key bytes are interpreted
    byte_order: ByteOrder,
}

impl KeyLayout {
    /// Describe records of `stride` bytes with a native-endian key at `offset`.
    pub fn new(stride: usize, offset: usize) -> Result<Self, Error> {
        if stride == 0 {
            return Err(Error::ZeroStride);
        }
        match offset.checked_add(KEY_SIZE) {
            Some(end) if end <= stride => Ok(Self {
                stride,
                offset,
                byte_order: ByteOrder::default(),
            }),
            _ => Err(Error::KeyOutOfBounds { offset, stride }),
        }
    }

    /// Select a different [`ByteOrder`] for reading keys.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Size of one record, in bytes
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Byte offset of the key within each record
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Byte order used to read keys
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Number of bytes occupied by `count` records.
    pub fn records_len(&self, count: usize) -> Result<usize, Error> {
        count.checked_mul(self.stride).ok_or(Error::SizeOverflow {
            count,
            stride: self.stride,
        })
    }

    /// Read the key out of a single record.
    ///
    /// `record` must be at least `offset + 4` bytes long, which holds for
    /// any record of this layout's stride.
    #[inline(always)]
    pub fn key(&self, record: &[u8]) -> u32 {
        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&record[self.offset..self.offset + KEY_SIZE]);
        self.byte_order.decode(bytes)
    }
}

#[cfg(test)]
mod test {
    #![allow(clippy::unwrap_used)]

    use super::{ByteOrder, KeyLayout};
    use crate::Error;

    #[test]
    fn rejects_bad_layouts() {
        assert_eq!(KeyLayout::new(0, 0), Err(Error::ZeroStride));
        assert_eq!(
            KeyLayout::new(7, 4),
            Err(Error::KeyOutOfBounds {
                offset: 4,
                stride: 7
            })
        );
        assert_eq!(
            KeyLayout::new(8, usize::MAX - 1),
            Err(Error::KeyOutOfBounds {
                offset: usize::MAX - 1,
                stride: 8
            })
        );
        assert!(KeyLayout::new(4, 0).is_ok());
        assert!(KeyLayout::new(8, 4).is_ok());
    }

    #[test]
    fn reads_key_in_each_byte_order() {
        let record = [0xaa, 0x01, 0x02, 0x03, 0x04, 0xbb];
        let layout = KeyLayout::new(6, 1).unwrap();
        assert_eq!(layout.byte_order(), ByteOrder::Native);
        assert_eq!(
            layout.with_byte_order(ByteOrder::Little).key(&record),
            0x04030201
        );
        assert_eq!(
            layout.with_byte_order(ByteOrder::Big).key(&record),
            0x01020304
        );
        assert_eq!(
            layout.key(&record),
            u32::from_ne_bytes([0x01, 0x02, 0x03, 0x04])
        );
    }

    #[test]
    fn records_len_overflow() {
        let layout = KeyLayout::new(16, 0).unwrap();
        assert_eq!(layout.records_len(3), Ok(48));
        assert_eq!(
            layout.records_len(usize::MAX / 8),
            Err(Error::SizeOverflow {
                count: usize::MAX / 8,
                stride: 16
            })
        );
    }
}
