//! Utility functions for the CLI.

use oxitar_archive::EntrySource;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open an archive file and position it at a header block.
pub fn open_at(archive: &Path, offset: u64) -> std::io::Result<BufReader<File>> {
    let file = File::open(archive)?;
    let mut reader = BufReader::new(file);
    reader.seek_to(offset)?;
    Ok(reader)
}

/// Render Unix permission bits as `rwxr-xr-x`.
pub fn format_mode(mode: u32) -> String {
    let mut s = String::with_capacity(9);
    for shift in [6u32, 3, 0] {
        let bits = (mode >> shift) & 0o7;
        s.push(if bits & 0o4 != 0 { 'r' } else { '-' });
        s.push(if bits & 0o2 != 0 { 'w' } else { '-' });
        s.push(if bits & 0o1 != 0 { 'x' } else { '-' });
    }
    s
}
