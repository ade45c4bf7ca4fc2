//! # OxiTar Archive
//!
//! Bounded access to single members of TAR archives.
//!
//! ## Example
//!
//! ```rust
//! use oxitar_archive::tar::{BLOCK_SIZE, TarEntry, TarHeader};
//! use std::io::Cursor;
//!
//! // A header block would normally precede the payload; here the caller
//! // already knows the header and positions the stream itself.
//! let mut data = vec![0u8; BLOCK_SIZE];
//! data.extend_from_slice(b"hello, world");
//! let mut cursor = Cursor::new(data);
//! cursor.set_position(BLOCK_SIZE as u64);
//!
//! let header = TarHeader::new("greeting.txt", 5, b'0');
//! let mut entry = TarEntry::new(header, &mut cursor).unwrap();
//!
//! assert_eq!(entry.read(None).unwrap(), b"hello");
//! assert!(entry.is_eof().unwrap());
//! assert!(entry.read_partial(1).unwrap_err().is_end_of_entry());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod tar;

pub use oxitar_core::{EntrySource, EntryType, OxiTarError, Result};
pub use tar::{BLOCK_SIZE, TarEntry, TarHeader, open_entry};
