#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(noop_method_call)]
#![warn(unreachable_pub)]
#![warn(clippy::all)]
#![deny(clippy::cast_lossless)]
#![deny(clippy::checked_conversions)]
#![warn(clippy::cognitive_complexity)]
#![deny(clippy::debug_assert_with_mut_call)]
#![deny(clippy::exhaustive_enums)]
#![deny(clippy::exhaustive_structs)]
#![deny(clippy::expl_impl_clone_on_copy)]
#![deny(clippy::fallible_impl_from)]
#![deny(clippy::implicit_clone)]
#![deny(clippy::large_stack_arrays)]
#![deny(clippy::missing_docs_in_private_items)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::trait_duplication_in_bounds)]
#![deny(clippy::unnecessary_wraps)]
#![warn(clippy::unseparated_literal_suffix)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::mod_module_files)]
#![allow(clippy::uninlined_format_args)]
#![forbid(unsafe_code)]

mod distribute;
mod err;
mod layout;
mod records;
mod sorter;

// Export the single-pass API only to the fuzzer.
// (This is not stable; you should not use it except for testing.)
#[cfg(feature = "distribute")]
pub use distribute::{distribute, Depth, Offsets};

pub use err::Error;
pub use layout::{ByteOrder, KeyLayout};
pub use records::{KeyedRecords, KeyedSlice, StridedRecords};
pub use sorter::FlagSort;

/// Sort `count` records of `stride` bytes in place by the native-endian
/// `u32` key found `offset` bytes into each record.
///
/// Records are moved whole; their contents are never altered. Order among
/// records with equal keys is unspecified. Any bytes in `buffer` past the
/// last record are left alone.
///
/// Returns an error, leaving `buffer` untouched, if `stride` is zero, the key
/// does not fit inside a record, or `buffer` is shorter than
/// `count * stride` bytes.
///
/// Uses default [`FlagSort`] options.
pub fn sort_by_u32_key(
    buffer: &mut [u8],
    count: usize,
    stride: usize,
    offset: usize,
) -> Result<(), Error> {
    FlagSort::new().sort_bytes(buffer, count, KeyLayout::new(stride, offset)?)
}

/// Sort a slice in place by the `u32` key that `key` extracts from each item.
///
/// Order among items with equal keys is unspecified.
///
/// Uses default [`FlagSort`] options.
pub fn sort_by_key<T, F: Fn(&T) -> u32>(items: &mut [T], key: F) {
    FlagSort::new().sort_by_key(items, key);
}

/// Sort any [`KeyedRecords`] buffer in place by ascending key.
///
/// Uses default [`FlagSort`] options.
pub fn sort_records<R: KeyedRecords + ?Sized>(records: &mut R) {
    FlagSort::new().sort(records);
}
