//! Fuzzer for the single-pass "distribute" API.
//!
//! Checks the partition contract on an arbitrary sub-range: records outside
//! the range stay put, records inside end up grouped by key byte in
//! ascending order, and the offsets table describes exactly those groups.

#![no_main]
use arbitrary::Arbitrary;
use flagsort::{distribute, Depth, KeyedSlice, Offsets};
use libfuzzer_sys::fuzz_target;

#[derive(Clone, Debug, Arbitrary)]
struct Input {
    depth: u8,
    start: u16,
    end: u16,
    keys: Vec<u32>,
}

fuzz_target!(|input: Input| {
    let depth = Depth::new(usize::from(input.depth % 4)).expect("depth is below 4");
    let len = input.keys.len();
    let start = usize::from(input.start).min(len);
    let end = usize::from(input.end).clamp(start, len);

    let mut keys = input.keys.clone();
    let mut offsets = Offsets::new();
    distribute(
        &mut KeyedSlice::new(&mut keys, |k: &u32| *k),
        start..end,
        depth,
        &mut offsets,
    );

    assert_eq!(keys[..start], input.keys[..start]);
    assert_eq!(keys[end..], input.keys[end..]);

    let table = offsets.as_array();
    assert_eq!(table[0], 0);
    assert_eq!(offsets.total(), end - start);
    assert!(table.windows(2).all(|pair| pair[0] <= pair[1]));
    for byte in 0..256 {
        for idx in offsets.bucket(byte) {
            assert_eq!(usize::from(depth.key_byte(keys[start + idx])), byte);
        }
    }

    let mut before = input.keys[start..end].to_vec();
    let mut after = keys[start..end].to_vec();
    before.sort_unstable();
    after.sort_unstable();
    assert_eq!(before, after);
});
