use std::{
    fs,
    io::{self, Write},
    num::NonZeroU32,
    path::Path,
};

use anyhow::Context;
use folio_codec::{encode, try_decode, EncodedContent};
use tracing::{debug, info};

pub fn read_envelope(filename: &Path) -> anyhow::Result<EncodedContent> {
    debug!(?filename, "Reading envelope");
    let bytes = fs::read(filename).with_context(|| format!("cannot read {filename:?}"))?;
    EncodedContent::from_bytes(&bytes).with_context(|| format!("{filename:?} is not a valid envelope"))
}

pub fn encode_file(input: &Path, output: &Path, chunk_size: NonZeroU32) -> anyhow::Result<()> {
    let plaintext = fs::read(input).with_context(|| format!("cannot read {input:?}"))?;
    let encoded = encode(&plaintext, chunk_size).context("cannot encode content")?;
    let bytes = encoded.to_bytes().context("cannot serialize envelope")?;
    fs::write(output, &bytes).with_context(|| format!("cannot write {output:?}"))?;

    let stats = encoded.stats();
    info!(
        "Wrote {} chunks to {output:?} ({} -> {} bytes, ratio {:.3})",
        stats.chunk_count, stats.original_size_bytes, stats.compressed_size_bytes, stats.ratio
    );
    Ok(())
}

pub fn decode_file(input: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let encoded = read_envelope(input)?;
    let plaintext = try_decode(&encoded).context("cannot decode envelope")?;
    match output {
        Some(output) => {
            fs::write(output, &plaintext).with_context(|| format!("cannot write {output:?}"))?
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&plaintext)?;
            stdout.flush()?;
        }
    }
    debug!("Decoded {} bytes", plaintext.len());
    Ok(())
}
