//! Bounded reader over one TAR member's payload.
//!
//! A [`TarEntry`] borrows the archive stream, which must already sit at the
//! first payload byte, and exposes exactly `header.size` bytes of it. It
//! never reads into the padding that follows, and never moves the stream
//! past the entry on close; advancing to the next header is the owner's job.
//!
//! Two read forms exist with deliberately different end-of-entry behavior:
//!
//! - [`TarEntry::read`] fills the request as far as the entry allows and
//!   returns an empty vector once the entry is exhausted.
//! - [`TarEntry::read_partial`] performs at most one read on the source and
//!   fails with [`OxiTarError::EndOfEntry`] once the entry is exhausted, so
//!   polling callers can tell "nothing left" from "asked for nothing".

use super::header::TarHeader;
use log::{debug, trace, warn};
use oxitar_core::error::{OxiTarError, Result};
use oxitar_core::traits::{EntrySource, read_up_to};
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

/// Largest buffer growth step for [`TarEntry::read`]. The declared size
/// comes from the archive and is not trusted for allocation.
const READ_CHUNK: usize = 64 * 1024;

/// Reader over a single TAR member's payload.
///
/// Inherent [`read`](TarEntry::read) and [`seek`](TarEntry::seek) shadow the
/// `std::io` trait methods of the same name; call those through the trait
/// (`Read::read(&mut entry, buf)`) or hand the entry to `io::copy`.
pub struct TarEntry<'a, S: EntrySource + ?Sized> {
    header: TarHeader,
    source: &'a mut S,
    start: u64,
    read: u64,
    closed: bool,
}

impl<'a, S: EntrySource + ?Sized> TarEntry<'a, S> {
    /// Create a reader over the payload starting at the source's current
    /// position.
    pub fn new(header: TarHeader, source: &'a mut S) -> Result<Self> {
        let start = source.position()?;
        debug!(
            "tar entry opened at offset {} with {} payload bytes",
            start, header.size
        );
        Ok(Self {
            header,
            source,
            start,
            read: 0,
            closed: false,
        })
    }

    /// Get the header this reader was built from.
    pub fn header(&self) -> &TarHeader {
        &self.header
    }

    /// Declared payload size.
    pub fn size(&self) -> u64 {
        self.header.size
    }

    /// Absolute offset of the first payload byte in the source.
    pub fn data_offset(&self) -> u64 {
        self.start
    }

    /// Full path of the entry, `prefix/name`.
    ///
    /// Validated on every call; a corrupt name never blocks reading the
    /// payload.
    pub fn full_name(&self) -> Result<String> {
        self.header.full_name()
    }

    /// Full path of the entry as raw bytes.
    pub fn full_name_bytes(&self) -> Result<Vec<u8>> {
        self.header.full_name_bytes()
    }

    /// Check if the entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.header.entry_type().is_dir()
    }

    /// Check if the entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.header.entry_type().is_file()
    }

    /// Check if the entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.header.entry_type().is_symlink()
    }

    /// Check if [`close`](TarEntry::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of payload bytes consumed so far.
    ///
    /// Unlike [`pos`](TarEntry::pos) this stays readable after close.
    pub fn bytes_read(&self) -> u64 {
        self.read
    }

    /// Current position inside the payload.
    pub fn pos(&self) -> Result<u64> {
        self.ensure_open()?;
        Ok(self.read)
    }

    /// Check whether the whole payload has been consumed.
    pub fn is_eof(&self) -> Result<bool> {
        self.ensure_open()?;
        Ok(self.read >= self.header.size)
    }

    /// Read one byte, or `None` at the end of the entry.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        self.ensure_open()?;
        if self.remaining() == 0 {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match self.source.read_some(&mut byte) {
            Ok(0) => {
                self.note_truncated();
                Ok(None)
            }
            Ok(_) => {
                self.read += 1;
                Ok(Some(byte[0]))
            }
            Err(e) => Err(self.resync(e)),
        }
    }

    /// Read up to `max` bytes, or everything that is left with `None`.
    ///
    /// At the end of the entry this returns an empty vector. The request is
    /// clamped to the entry boundary. If the source ends early the bytes
    /// that were available are returned.
    pub fn read(&mut self, max: Option<usize>) -> Result<Vec<u8>> {
        self.ensure_open()?;

        let want = self.clamp(max.map_or(u64::MAX, |n| n as u64));
        let mut buf = Vec::new();
        let mut truncated = false;
        while (buf.len() as u64) < want {
            let chunk = (want - buf.len() as u64).min(READ_CHUNK as u64) as usize;
            let filled = buf.len();
            buf.resize(filled + chunk, 0);
            let got = match read_up_to(&mut *self.source, &mut buf[filled..]) {
                Ok(n) => n,
                Err(e) => return Err(self.resync(e)),
            };
            buf.truncate(filled + got);
            if got < chunk {
                truncated = true;
                break;
            }
        }

        self.read += buf.len() as u64;
        if truncated {
            self.note_truncated();
        }
        trace!("tar entry read {} bytes, now at {}", buf.len(), self.read);
        Ok(buf)
    }

    /// Read whatever a single source read yields, up to `max` bytes.
    ///
    /// Fails with [`OxiTarError::EndOfEntry`] when the entry is exhausted and
    /// `max > 0`. `max == 0` always succeeds with an empty result.
    pub fn read_partial(&mut self, max: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.read_partial_into(max, &mut buf)?;
        Ok(buf)
    }

    /// [`read_partial`](TarEntry::read_partial) into a caller-owned buffer.
    ///
    /// The buffer's previous contents are replaced by the bytes read; its
    /// allocation is reused. Returns the number of bytes read.
    pub fn read_partial_into(&mut self, max: usize, buf: &mut Vec<u8>) -> Result<usize> {
        self.ensure_open()?;
        buf.clear();
        if max == 0 {
            return Ok(0);
        }

        let remaining = self.remaining();
        if remaining == 0 {
            return Err(OxiTarError::EndOfEntry);
        }

        buf.resize(self.clamp(max as u64) as usize, 0);
        let n = match self.fill_partial(buf) {
            Ok(n) => n,
            Err(e) => {
                buf.clear();
                return Err(e);
            }
        };
        buf.truncate(n);
        if n == 0 {
            self.note_truncated();
            return Err(OxiTarError::unexpected_eof(remaining));
        }
        Ok(n)
    }

    /// Go back to the first payload byte.
    pub fn rewind(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.source.seek_to(self.start)?;
        self.read = 0;
        trace!("tar entry rewound to offset {}", self.start);
        Ok(())
    }

    /// Move to a position inside the payload.
    ///
    /// Offsets are relative to the entry. Positions past the end are clamped
    /// to the end; positions before the start fail with
    /// [`OxiTarError::InvalidSeek`]. Returns the new position.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.seek_within(pos)
    }

    /// Close the reader.
    ///
    /// The source stays wherever the last read left it. Closing twice is a
    /// no-op.
    pub fn close(&mut self) {
        if !self.closed {
            debug!(
                "tar entry at offset {} closed after {} of {} bytes",
                self.start, self.read, self.header.size
            );
            self.closed = true;
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(OxiTarError::ClosedReader)
        } else {
            Ok(())
        }
    }

    fn remaining(&self) -> u64 {
        self.header.size - self.read
    }

    fn clamp(&self, requested: u64) -> u64 {
        requested.min(self.remaining())
    }

    /// One source read into `buf`, bounded by the entry.
    fn fill_partial(&mut self, buf: &mut [u8]) -> Result<usize> {
        let len = self.clamp(buf.len() as u64) as usize;
        if len == 0 {
            return Ok(0);
        }
        match self.source.read_some(&mut buf[..len]) {
            Ok(n) => {
                self.read += n as u64;
                Ok(n)
            }
            Err(e) => Err(self.resync(e)),
        }
    }

    fn seek_within(&mut self, pos: SeekFrom) -> Result<u64> {
        self.ensure_open()?;

        let size = i128::from(self.header.size);
        let target = match pos {
            SeekFrom::Start(n) => i128::from(n),
            SeekFrom::Current(delta) => i128::from(self.read) + i128::from(delta),
            SeekFrom::End(delta) => size + i128::from(delta),
        };
        if target < 0 {
            let offset = i64::try_from(target).unwrap_or(i64::MIN);
            return Err(OxiTarError::invalid_seek(offset));
        }

        let new_pos = target.min(size) as u64;
        self.source.seek_to(self.start + new_pos)?;
        self.read = new_pos;
        trace!("tar entry seeked to {}", new_pos);
        Ok(new_pos)
    }

    /// Put the source cursor back where `read` says it is after a failed
    /// read, then hand the original error back.
    fn resync(&mut self, err: io::Error) -> OxiTarError {
        if let Err(seek_err) = self.source.seek_to(self.start + self.read) {
            warn!(
                "tar entry could not restore source offset {}: {}",
                self.start + self.read,
                seek_err
            );
        }
        OxiTarError::Io(err)
    }

    fn note_truncated(&self) {
        debug!(
            "tar entry source ended {} bytes before the declared size {}",
            self.remaining(),
            self.header.size
        );
    }
}

impl<S: EntrySource + ?Sized> Read for TarEntry<'_, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.ensure_open()?;
        Ok(self.fill_partial(buf)?)
    }
}

impl<S: EntrySource + ?Sized> Seek for TarEntry<'_, S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(self.seek_within(pos)?)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.pos()?)
    }
}

impl<S: EntrySource + ?Sized> fmt::Debug for TarEntry<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TarEntry")
            .field("header", &self.header)
            .field("start", &self.start)
            .field("read", &self.read)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
