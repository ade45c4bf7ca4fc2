//! TAR entry access.
//!
//! This module provides:
//! - [`TarHeader`]: decoding of a single 512-byte header block (UStar and
//!   pre-POSIX layouts, octal and GNU base-256 numbers)
//! - [`TarEntry`]: a bounded, rewindable reader over one member's payload
//! - [`open_entry`]: read the header at the current position and open a
//!   reader over the payload behind it

mod entry;
mod header;

pub use entry::TarEntry;
pub use header::{NAME_LEN, PREFIX_LEN, TarHeader};

use log::trace;
use oxitar_core::error::{OxiTarError, Result};
use oxitar_core::traits::{EntrySource, read_up_to};

/// TAR block size.
pub const BLOCK_SIZE: usize = 512;

/// Read one header block at the source's current position and open a reader
/// over the payload that follows it.
///
/// Returns `Ok(None)` when the source is already exhausted or the block is
/// the all-zero end-of-archive marker. This reads a single header only;
/// moving on to later entries is left to the caller.
pub fn open_entry<S: EntrySource + ?Sized>(source: &mut S) -> Result<Option<TarEntry<'_, S>>> {
    let mut block = [0u8; BLOCK_SIZE];
    let n = read_up_to(&mut *source, &mut block)?;
    if n == 0 {
        return Ok(None);
    }
    if n < BLOCK_SIZE {
        return Err(OxiTarError::unexpected_eof((BLOCK_SIZE - n) as u64));
    }

    match TarHeader::from_block(&block)? {
        Some(header) => {
            trace!(
                "tar header: typeflag {:#04x}, size {}",
                header.typeflag, header.size
            );
            TarEntry::new(header, source).map(Some)
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Seek, SeekFrom};

    /// Create a minimal TAR archive for testing.
    fn create_test_tar() -> Vec<u8> {
        let mut tar = vec![0u8; BLOCK_SIZE * 4];

        // Header block for "test.txt"
        let name = b"test.txt";
        tar[..name.len()].copy_from_slice(name);

        // Mode: 0644
        tar[100..107].copy_from_slice(b"0000644");

        // Size: 13 bytes ("Hello, TAR!\n\0")
        tar[124..135].copy_from_slice(b"00000000015");

        // Mtime: some timestamp
        tar[136..147].copy_from_slice(b"14723456700");

        // Typeflag: regular file
        tar[156] = b'0';

        // Calculate checksum
        tar[148..156].copy_from_slice(b"        ");
        let checksum: u32 = tar[..BLOCK_SIZE].iter().map(|&b| b as u32).sum();
        let checksum_str = format!("{:06o}\0 ", checksum);
        tar[148..156].copy_from_slice(checksum_str.as_bytes());

        // Data block
        let data = b"Hello, TAR!\n\0";
        tar[BLOCK_SIZE..BLOCK_SIZE + data.len()].copy_from_slice(data);

        // Two zero blocks mark end of archive
        // (already zeroed)

        tar
    }

    #[test]
    fn test_open_entry() {
        let mut cursor = Cursor::new(create_test_tar());
        let mut entry = open_entry(&mut cursor).unwrap().unwrap();

        assert_eq!(entry.full_name().unwrap(), "test.txt");
        assert_eq!(entry.size(), 13);
        assert_eq!(entry.data_offset(), BLOCK_SIZE as u64);
        assert!(entry.is_file());
        assert_eq!(entry.read(None).unwrap(), b"Hello, TAR!\n\0");
    }

    #[test]
    fn test_open_entry_end_marker() {
        let mut cursor = Cursor::new(create_test_tar());
        cursor.seek(SeekFrom::Start(2 * BLOCK_SIZE as u64)).unwrap();
        assert!(open_entry(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_open_entry_empty_source() {
        let mut cursor = Cursor::new(Vec::new());
        assert!(open_entry(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn test_open_entry_short_block() {
        let mut tar = create_test_tar();
        tar.truncate(100);
        let mut cursor = Cursor::new(tar);
        let err = open_entry(&mut cursor).unwrap_err();
        assert!(matches!(err, OxiTarError::UnexpectedEof { expected: 412 }));
    }
}
