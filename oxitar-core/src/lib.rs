//! # OxiTar Core
//!
//! Core components shared by the OxiTar crates.
//!
//! - [`error`]: Error types
//! - [`entry`]: Entry type classification
//! - [`traits`]: The byte source an entry reader drives
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ CLI                                                     │
//! │     oxitar info / oxitar cat                            │
//! ├─────────────────────────────────────────────────────────┤
//! │ Container                                               │
//! │     TAR header decoding, bounded entry reader           │
//! ├─────────────────────────────────────────────────────────┤
//! │ Core (this crate)                                       │
//! │     OxiTarError, EntryType, EntrySource                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxitar_core::{EntrySource, EntryType};
//! use std::io::Cursor;
//!
//! let mut source = Cursor::new(b"payload".to_vec());
//! let mut buf = [0u8; 3];
//! let n = source.read_some(&mut buf).unwrap();
//! assert_eq!(&buf[..n], b"pay");
//!
//! assert!(EntryType::from_typeflag(b'5').is_dir());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod entry;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use entry::EntryType;
pub use error::{OxiTarError, Result};
pub use traits::{EntrySource, read_up_to};
