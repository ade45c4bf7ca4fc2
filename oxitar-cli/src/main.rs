//! OxiTar CLI - inspect and stream single TAR members
//!
//! Works on one entry at a time: the caller names the byte offset of the
//! entry's header block and the tool reads that entry only.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{CatOptions, cmd_cat, cmd_info};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxitar")]
#[command(author, version, about = "Bounded reader for single TAR entries")]
#[command(long_about = "
OxiTar reads one member of a TAR archive without loading the rest of it.
Entries are addressed by the byte offset of their header block (0 for the
first entry; later entries start on 512-byte boundaries).

Examples:
  oxitar info archive.tar
  oxitar info archive.tar --offset 3584 --json
  oxitar cat archive.tar > first-file
  oxitar cat archive.tar --offset 3584 --limit 100

Set RUST_LOG=debug (or trace) to see reader events on stderr.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header of one entry
    #[command(alias = "i")]
    Info {
        /// Archive file to inspect
        archive: PathBuf,

        /// Byte offset of the entry's header block
        #[arg(short, long, default_value_t = 0)]
        offset: u64,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Write one entry's payload to stdout
    #[command(alias = "c")]
    Cat {
        /// Archive file to read
        archive: PathBuf,

        /// Byte offset of the entry's header block
        #[arg(short, long, default_value_t = 0)]
        offset: u64,

        /// Stop after this many bytes
        #[arg(short, long)]
        limit: Option<u64>,

        /// Maximum bytes per read
        #[arg(long, default_value_t = 8192)]
        chunk_size: usize,

        /// Print entry details to stderr
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Info {
            archive,
            offset,
            json,
        } => cmd_info(&archive, offset, json),
        Commands::Cat {
            archive,
            offset,
            limit,
            chunk_size,
            verbose,
        } => cmd_cat(
            &archive,
            &CatOptions {
                offset,
                limit,
                chunk_size,
                verbose,
            },
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
