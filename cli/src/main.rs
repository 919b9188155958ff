use anyhow::{bail, Context};
use bytemuck::{Pod, Zeroable};
use clap::Parser;
use flagsort::{FlagSort, KeyLayout};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::mem::{offset_of, size_of};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// An entry with id, which we want to preserve, and key, which we want to sort on.
///
/// Stored at the start of each record; any remaining record bytes are padding.
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C)]
struct Entry {
    id: u32,
    key: u32,
}

/// Sort randomly keyed records in place and check the result.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Number of records to sort
    #[arg(short, long, default_value_t = 1_000_000)]
    count: usize,

    /// Seed for the random keys
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Bytes per record, at least the 8 byte entry header
    #[arg(long, default_value_t = size_of::<Entry>())]
    stride: usize,

    /// Always run all four passes instead of skipping all-zero high key bytes
    #[arg(long, default_value_t = false)]
    full_passes: bool,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    if args.stride < size_of::<Entry>() {
        bail!(
            "stride {} is smaller than the {} byte entry",
            args.stride,
            size_of::<Entry>()
        );
    }
    let layout = KeyLayout::new(args.stride, offset_of!(Entry, key))?;

    // Allocate space for the records
    let len = layout.records_len(args.count)?;
    let mut records = Vec::new();
    records.try_reserve_exact(len).context("Out of Memory")?;
    records.resize(len, 0u8);

    // Fill it in with sequential ids and random keys
    let mut rng = StdRng::seed_from_u64(args.seed);
    for (id, record) in records.chunks_exact_mut(args.stride).enumerate() {
        let id = u32::try_from(id).context("record id overflows u32")?;
        let entry = Entry { id, key: rng.gen() };
        fill_record(record, &entry);
    }

    // Run the flag sort, the interface requires only byte sizes and offsets
    let start = Instant::now();
    FlagSort::new()
        .skip_zero_high_bytes(!args.full_passes)
        .sort_bytes(&mut records, args.count, layout)?;
    let elapsed = start.elapsed();

    // Validate that the array is sorted and every record is still intact
    let mut previous = 0u32;
    for record in records.chunks_exact(args.stride) {
        let entry: Entry = bytemuck::pod_read_unaligned(&record[..size_of::<Entry>()]);
        if entry.key < previous {
            bail!("Not Sorted");
        }
        if !padding_matches(record, entry.id) {
            bail!("record {} was torn apart while sorting", entry.id);
        }
        previous = entry.key;
    }

    tracing::info!("{} entries sorted in {} ms", args.count, elapsed.as_millis());
    Ok(())
}

/// Write the entry header, then repeat the id's bytes through the padding.
fn fill_record(record: &mut [u8], entry: &Entry) {
    let (header, padding) = record.split_at_mut(size_of::<Entry>());
    header.copy_from_slice(bytemuck::bytes_of(entry));
    for (byte, id_byte) in padding.iter_mut().zip(entry.id.to_le_bytes().iter().cycle()) {
        *byte = *id_byte;
    }
}

/// Check the padding written by [`fill_record`] still belongs to `id`.
fn padding_matches(record: &[u8], id: u32) -> bool {
    record[size_of::<Entry>()..]
        .iter()
        .zip(id.to_le_bytes().iter().cycle())
        .all(|(byte, id_byte)| byte == id_byte)
}
