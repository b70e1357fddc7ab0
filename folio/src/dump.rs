use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use folio_codec::{try_decode, EncodedContent};
use tracing::{debug, info};

use crate::transcode::read_envelope;

#[derive(Clone, Copy, Subcommand)]
pub enum Dump {
    /// Dump summarising information about the envelope.
    Summary,

    /// Dump one line per stored chunk, in storage order.
    Chunks,

    /// Check the envelope's bookkeeping without decompressing.
    Validate,

    /// Decompress every chunk and discard the result. Used for diagnosing corrupt envelopes or
    /// measuring decompression speed.
    TestDecompression,
}

pub fn dump(filename: &Path, what: Dump) -> anyhow::Result<()> {
    info!(?filename, "Opening envelope");
    let envelope = read_envelope(filename)?;

    match what {
        Dump::Summary => print_summary(&envelope),
        Dump::Chunks => {
            debug!("Printing chunk table");
            println!("{:>6} {:>10} {:>10}", "index", "original", "compressed");
            for chunk in &envelope.chunks {
                println!(
                    "{:6} {:10} {:10}",
                    chunk.index, chunk.original_size, chunk.compressed_size
                );
            }
        }
        Dump::Validate => {
            envelope.validate().context("envelope is invalid")?;
            println!("ok");
        }
        Dump::TestDecompression => {
            let decoded = try_decode(&envelope).context("cannot decompress envelope")?;
            info!(
                "Decompressed {} chunks into {} bytes | {:.2} MiB",
                envelope.chunks.len(),
                decoded.len(),
                decoded.len() as f64 / 1024.0 / 1024.0
            );
        }
    }

    Ok(())
}

fn print_summary(envelope: &EncodedContent) {
    let stats = envelope.stats();
    println!("compression:      {}", envelope.compression);
    println!("chunk size:       {} bytes", envelope.chunk_size_bytes);
    println!("chunks:           {}", stats.chunk_count);
    println!("original size:    {} bytes", stats.original_size_bytes);
    println!("compressed size:  {} bytes", stats.compressed_size_bytes);
    println!("ratio:            {:.3}", stats.ratio);
}
