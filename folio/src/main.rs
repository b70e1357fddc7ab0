mod dump;
mod render;
mod transcode;

use std::{num::NonZeroU32, path::PathBuf};

use clap::{Parser, Subcommand};
use dump::{dump, Dump};
use folio_codec::DEFAULT_CHUNK_SIZE;
use tracing::{error, info, metadata::LevelFilter};
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Subcommand)]
enum Command {
    /// Split a file into independently compressed chunks and write the resulting envelope.
    Encode {
        /// File with the plaintext article body.
        input: PathBuf,
        /// Where to write the envelope.
        output: PathBuf,

        /// Plaintext bytes per chunk.
        #[clap(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: NonZeroU32,
    },

    /// Reassemble the original bytes from an envelope.
    ///
    /// Unlike the read path of the article store, this fails loudly on a damaged envelope.
    Decode {
        /// Envelope to read.
        input: PathBuf,

        /// Write the bytes here instead of stdout.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Read data from an envelope.
    Dump {
        /// Envelope to read from.
        filename: PathBuf,

        /// Which part to dump into stdout.
        #[clap(subcommand)]
        what: Dump,
    },

    /// Print the API response an article with this content would produce.
    Render {
        /// Envelope holding the article body. A missing file counts as an article without
        /// chunked content.
        input: PathBuf,

        /// Plain-text body to fall back to, as stored by records that predate chunking.
        #[clap(long)]
        legacy: Option<PathBuf>,

        /// Title to put in the response.
        #[clap(long, default_value = "Untitled")]
        title: String,
    },
}

#[derive(Parser)]
#[clap(version, about = "Tools for chunked article content envelopes")]
struct Args {
    /// Tool to run.
    #[clap(subcommand)]
    command: Command,
}

fn fallible_main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Encode {
            input,
            output,
            chunk_size,
        } => transcode::encode_file(&input, &output, chunk_size)?,
        Command::Decode { input, output } => transcode::decode_file(&input, output.as_deref())?,
        Command::Dump { filename, what } => dump(&filename, what)?,
        Command::Render {
            input,
            legacy,
            title,
        } => render::render(&input, legacy.as_deref(), title)?,
    }

    Ok(())
}

fn main() {
    let subscriber = tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .from_env_lossy(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        );
    tracing::subscriber::set_global_default(subscriber)
        .expect("cannot set default tracing subscriber");

    info!("folio version {}", env!("CARGO_PKG_VERSION"));

    if let Err(err) = fallible_main() {
        error!("in fallible_main: {err:?}");
        std::process::exit(1);
    }
}
