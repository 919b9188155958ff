//! Fuzzer for the whole sort over strided byte records.
//!
//! Any layout the fuzzer picks is either rejected up front or sorted into a
//! permutation of the input records that agrees with a reference sort.

#![no_main]
use arbitrary::Arbitrary;
use flagsort::{ByteOrder, FlagSort, KeyLayout};
use libfuzzer_sys::fuzz_target;

#[derive(Clone, Debug, Arbitrary)]
struct Input {
    stride: u8,
    offset: u8,
    big_endian: bool,
    full_passes: bool,
    count: u16,
    bytes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let byte_order = if input.big_endian {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };
    let layout = match KeyLayout::new(input.stride.into(), input.offset.into()) {
        Ok(layout) => layout.with_byte_order(byte_order),
        Err(_) => {
            assert!(input.stride == 0 || usize::from(input.offset) + 4 > usize::from(input.stride));
            return;
        }
    };
    let stride = layout.stride();
    let count = usize::from(input.count);

    let mut sorted = input.bytes.clone();
    let result = FlagSort::new()
        .skip_zero_high_bytes(!input.full_passes)
        .sort_bytes(&mut sorted, count, layout);
    if result.is_err() {
        assert!(count * stride > input.bytes.len());
        assert_eq!(sorted, input.bytes);
        return;
    }

    let record_bytes = count * stride;
    assert_eq!(sorted[record_bytes..], input.bytes[record_bytes..]);

    let mut expected: Vec<&[u8]> = input.bytes[..record_bytes].chunks_exact(stride).collect();
    expected.sort_by_key(|r| layout.key(r));
    let actual: Vec<&[u8]> = sorted[..record_bytes].chunks_exact(stride).collect();

    // Same key sequence, and the same records up to the order of equal keys.
    let expected_keys: Vec<u32> = expected.iter().map(|r| layout.key(r)).collect();
    let actual_keys: Vec<u32> = actual.iter().map(|r| layout.key(r)).collect();
    assert_eq!(expected_keys, actual_keys);

    let mut expected = expected;
    let mut actual = actual;
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(expected, actual);
});
