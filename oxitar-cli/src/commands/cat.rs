//! Cat command implementation.

use crate::utils::open_at;
use oxitar_archive::{OxiTarError, open_entry};
use std::io::{self, Write};
use std::path::Path;

/// Options for streaming an entry's payload.
pub struct CatOptions {
    pub offset: u64,
    pub limit: Option<u64>,
    pub chunk_size: usize,
    pub verbose: bool,
}

pub fn cmd_cat(archive: &Path, options: &CatOptions) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = open_at(archive, options.offset)?;
    let mut entry = open_entry(&mut reader)?.ok_or_else(|| {
        OxiTarError::invalid_header(format!("no entry at offset {}", options.offset))
    })?;

    if options.verbose {
        let name = entry
            .full_name()
            .unwrap_or_else(|e| format!("<{}>", e));
        eprintln!(
            "{}: {} ({} bytes at offset {})",
            name,
            entry.header().entry_type(),
            entry.size(),
            entry.data_offset()
        );
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = copy_payload(
        |max, buf| entry.read_partial_into(max, buf),
        &mut out,
        options.chunk_size,
        options.limit,
    )?;
    out.flush()?;
    entry.close();

    if options.verbose {
        eprintln!("{} bytes written", written);
    }

    Ok(())
}

/// Drive a partial-read function until the entry ends or `limit` bytes have
/// been written, reusing one buffer throughout.
fn copy_payload<F, W>(
    mut read_partial: F,
    out: &mut W,
    chunk_size: usize,
    limit: Option<u64>,
) -> Result<u64, Box<dyn std::error::Error>>
where
    F: FnMut(usize, &mut Vec<u8>) -> oxitar_archive::Result<usize>,
    W: Write,
{
    let chunk_size = chunk_size.max(1);
    let mut buf = Vec::with_capacity(chunk_size);
    let mut written = 0u64;

    loop {
        let want = match limit {
            Some(limit) => (limit - written).min(chunk_size as u64) as usize,
            None => chunk_size,
        };
        if want == 0 {
            break;
        }

        match read_partial(want, &mut buf) {
            Ok(n) => {
                out.write_all(&buf)?;
                written += n as u64;
            }
            Err(e) if e.is_end_of_entry() => break,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(written)
}
