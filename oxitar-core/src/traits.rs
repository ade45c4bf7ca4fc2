//! Byte source abstraction driven by entry readers.
//!
//! An entry reader needs exactly three things from the stream that holds the
//! archive: read at the current position, jump to an absolute offset, and
//! report where it currently is. [`EntrySource`] names that capability so the
//! parent can be a file, an in-memory buffer, or a network-backed object.

use std::io::{self, Read, Seek, SeekFrom};

/// A positioned byte stream an entry reader can drive.
///
/// Every [`Read`] + [`Seek`] type gets this trait for free. Sources that
/// cannot implement `Seek` in full (ranged HTTP bodies, for example) can
/// implement it directly.
pub trait EntrySource {
    /// Read into `buf` from the current position with a single underlying
    /// read, returning the number of bytes read. `Ok(0)` means the source
    /// has no more data.
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Move the cursor to an absolute offset.
    fn seek_to(&mut self, offset: u64) -> io::Result<()>;

    /// Report the current absolute offset.
    fn position(&mut self) -> io::Result<u64>;
}

impl<T: Read + Seek + ?Sized> EntrySource for T {
    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }

    fn seek_to(&mut self, offset: u64) -> io::Result<()> {
        self.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn position(&mut self) -> io::Result<u64> {
        self.stream_position()
    }
}

/// Fill `buf` from `source`, stopping early only when the source runs dry.
///
/// Returns the number of bytes placed in `buf`.
pub fn read_up_to<S: EntrySource + ?Sized>(source: &mut S, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read_some(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
