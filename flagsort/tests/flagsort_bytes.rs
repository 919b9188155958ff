//! Sorting opaque byte records through the `(stride, offset)` interface

use bytemuck::{Pod, Zeroable};
use flagsort::{ByteOrder, Error, FlagSort, KeyLayout};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::mem::{offset_of, size_of};

/// An entry with an id, which we want to preserve, and a key to sort on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
struct Entry {
    id: u32,
    key: u32,
}

const STRIDE: usize = size_of::<Entry>();
const OFFSET: usize = offset_of!(Entry, key);

fn entries(keys: &[u32]) -> Vec<Entry> {
    keys.iter()
        .enumerate()
        .map(|(id, &key)| Entry {
            id: id as u32,
            key,
        })
        .collect()
}

fn sort_entries(entries: &mut [Entry]) {
    let count = entries.len();
    flagsort::sort_by_u32_key(bytemuck::cast_slice_mut(entries), count, STRIDE, OFFSET).unwrap();
}

fn assert_sorted(entries: &[Entry]) {
    for pair in entries.windows(2) {
        assert!(pair[0].key <= pair[1].key, "{:?} out of order", pair);
    }
}

/// Every record must still be present exactly once, byte for byte.
fn assert_same_records(before: &[u8], after: &[u8], stride: usize) {
    let mut before: Vec<&[u8]> = before.chunks_exact(stride).collect();
    let mut after: Vec<&[u8]> = after.chunks_exact(stride).collect();
    before.sort_unstable();
    after.sort_unstable();
    assert_eq!(before, after);
}

#[test]
fn four_record_scenario() {
    let mut list = entries(&[5, 3, 3, 0]);
    sort_entries(&mut list);

    let keys: Vec<u32> = list.iter().map(|e| e.key).collect();
    assert_eq!(keys, vec![0, 3, 3, 5]);
    assert_eq!(list[0].id, 3);
    assert_eq!(list[3].id, 0);
    let mut middle = [list[1].id, list[2].id];
    middle.sort_unstable();
    assert_eq!(middle, [1, 2]);
}

#[test]
fn empty_and_single() {
    let mut nothing: [u8; 0] = [];
    flagsort::sort_by_u32_key(&mut nothing, 0, STRIDE, OFFSET).unwrap();

    let mut one = entries(&[0xdead_beef]);
    let copy = one.clone();
    sort_entries(&mut one);
    assert_eq!(one, copy);
}

#[test]
fn zero_count_ignores_buffer_contents() {
    let mut bytes = [0xffu8; 3];
    flagsort::sort_by_u32_key(&mut bytes, 0, STRIDE, OFFSET).unwrap();
    assert_eq!(bytes, [0xff; 3]);
}

#[test]
fn invalid_layouts_are_rejected() {
    let mut bytes = [0u8; 64];
    assert_eq!(
        flagsort::sort_by_u32_key(&mut bytes, 8, 0, 0),
        Err(Error::ZeroStride)
    );
    assert_eq!(
        flagsort::sort_by_u32_key(&mut bytes, 8, 8, 5),
        Err(Error::KeyOutOfBounds {
            offset: 5,
            stride: 8
        })
    );
    assert_eq!(
        flagsort::sort_by_u32_key(&mut bytes, 9, 8, 4),
        Err(Error::BufferTooShort {
            needed: 72,
            actual: 64
        })
    );
    assert_eq!(
        flagsort::sort_by_u32_key(&mut bytes, usize::MAX, 8, 4),
        Err(Error::SizeOverflow {
            count: usize::MAX,
            stride: 8
        })
    );
    assert_eq!(bytes, [0u8; 64]);
}

#[test]
fn all_equal_keys() {
    let mut list = entries(&[0x0102_0304; 1000]);
    let before = list.clone();
    sort_entries(&mut list);
    assert_sorted(&list);
    assert_same_records(
        bytemuck::cast_slice(before.as_slice()),
        bytemuck::cast_slice(list.as_slice()),
        STRIDE,
    );
}

#[test]
fn already_sorted_stays_sorted() {
    let keys: Vec<u32> = (0..10_000u32).map(|i| i * 401).collect();
    let mut list = entries(&keys);
    let before = list.clone();
    sort_entries(&mut list);
    // Keys are distinct, so the result must be identical.
    assert_eq!(list, before);

    sort_entries(&mut list);
    assert_eq!(list, before);
}

#[test]
fn large_random_input() {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<u32> = (0..200_000).map(|_| rng.gen()).collect();
    let mut list = entries(&keys);
    sort_entries(&mut list);

    assert_sorted(&list);
    let mut ids: Vec<u32> = list.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    assert!(ids.iter().copied().eq(0..200_000u32));
    for entry in &list {
        assert_eq!(keys[entry.id as usize], entry.key);
    }
}

#[test]
fn padded_records_move_whole() {
    // 13 byte records: a tag byte, a little-endian key at offset 1, then the
    // record's original index. Any partial copy would break a record apart.
    const STRIDE: usize = 13;
    let mut rng = StdRng::seed_from_u64(7);
    let count = 5000;
    let mut bytes = Vec::with_capacity(count * STRIDE + 5);
    for i in 0..count {
        let tag = (i % 251) as u8;
        bytes.push(tag);
        bytes.extend_from_slice(&rng.gen_range(0..1u32 << 20).to_le_bytes());
        bytes.extend_from_slice(&(i as u64).to_le_bytes());
    }
    bytes.extend_from_slice(&[0xee; 5]);
    let before = bytes.clone();

    let layout = KeyLayout::new(STRIDE, 1)
        .unwrap()
        .with_byte_order(ByteOrder::Little);
    FlagSort::new().sort_bytes(&mut bytes, count, layout).unwrap();

    let record_bytes = count * STRIDE;
    assert_eq!(&bytes[record_bytes..], &[0xee; 5]);
    assert_same_records(&before[..record_bytes], &bytes[..record_bytes], STRIDE);
    let keys: Vec<u32> = bytes[..record_bytes]
        .chunks_exact(STRIDE)
        .map(|r| layout.key(r))
        .collect();
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn big_endian_keys() {
    let keys = [0x0100_0000u32, 0x0000_0001, 0x0000_0100, 0x00ff_0000, 0];
    let mut bytes: Vec<u8> = keys.iter().flat_map(|k| k.to_be_bytes()).collect();
    let layout = KeyLayout::new(4, 0)
        .unwrap()
        .with_byte_order(ByteOrder::Big);
    FlagSort::new()
        .skip_zero_high_bytes(false)
        .sort_bytes(&mut bytes, keys.len(), layout)
        .unwrap();

    let sorted: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|r| u32::from_be_bytes(r.try_into().unwrap()))
        .collect();
    assert_eq!(sorted, vec![0, 1, 0x100, 0x00ff_0000, 0x0100_0000]);
}
