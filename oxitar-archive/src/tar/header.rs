//! TAR header block decoding.
//!
//! Only the fields an entry reader relies on are interpreted strictly: name,
//! prefix, size and type flag. Mode, mtime and link name are decoded for
//! display. The checksum field is skipped.

use super::BLOCK_SIZE;
use oxitar_core::EntryType;
use oxitar_core::error::{OxiTarError, Result};

/// Length of the `name` field.
pub const NAME_LEN: usize = 100;

/// Length of the ustar `prefix` field.
pub const PREFIX_LEN: usize = 155;

/// POSIX ustar magic including its terminator.
const USTAR_MAGIC: &[u8; 6] = b"ustar\0";

/// TAR header.
///
/// `name` and `prefix` hold the raw field bytes with trailing NUL padding
/// removed. Anything left after an interior NUL is what [`full_name`]
/// rejects as corruption.
///
/// [`full_name`]: TarHeader::full_name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarHeader {
    /// Raw name field.
    pub name: Vec<u8>,
    /// Raw ustar prefix field, empty for pre-POSIX headers.
    pub prefix: Vec<u8>,
    /// File mode.
    pub mode: u32,
    /// Declared payload size in bytes.
    pub size: u64,
    /// Modification time (Unix seconds).
    pub mtime: u64,
    /// Type flag.
    pub typeflag: u8,
    /// Link name.
    pub linkname: String,
    /// POSIX ustar indicator.
    pub ustar: bool,
}

impl TarHeader {
    /// Create a header for a member of the given type.
    pub fn new(name: impl Into<Vec<u8>>, size: u64, typeflag: u8) -> Self {
        Self {
            name: name.into(),
            prefix: Vec::new(),
            mode: 0o644,
            size,
            mtime: 0,
            typeflag,
            linkname: String::new(),
            ustar: true,
        }
    }

    /// Set the ustar prefix.
    pub fn with_prefix(mut self, prefix: impl Into<Vec<u8>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Read a TAR header from a block.
    ///
    /// Returns `Ok(None)` for an all-zero block, which marks the end of an
    /// archive.
    pub fn from_block(block: &[u8; BLOCK_SIZE]) -> Result<Option<Self>> {
        if block.iter().all(|&b| b == 0) {
            return Ok(None);
        }

        let name = Self::trim_padding(&block[0..NAME_LEN]);
        let mode = Self::parse_octal(&block[100..108])?;
        let size = Self::parse_numeric(&block[124..136])?;
        let mtime = Self::parse_numeric(&block[136..148])?;
        let typeflag = block[156];
        let linkname = Self::parse_string(&block[157..257]);

        // GNU "ustar  \0" reuses the prefix area for atime/ctime.
        let ustar = &block[257..263] == USTAR_MAGIC;
        let prefix = if ustar {
            Self::trim_padding(&block[345..345 + PREFIX_LEN])
        } else {
            Vec::new()
        };

        Ok(Some(Self {
            name,
            prefix,
            mode,
            size,
            mtime,
            typeflag,
            linkname,
            ustar,
        }))
    }

    /// Get entry type.
    pub fn entry_type(&self) -> EntryType {
        EntryType::from_typeflag(self.typeflag)
    }

    /// Payload size rounded up to the block boundary.
    ///
    /// This is how far past the header an archive scanner has to move to
    /// reach the next header.
    pub fn padded_size(&self) -> u64 {
        self.size.div_ceil(BLOCK_SIZE as u64) * BLOCK_SIZE as u64
    }

    /// Compose `prefix/name` as raw bytes.
    ///
    /// Fails with [`OxiTarError::CorruptArchive`] if the composed name has
    /// a NUL byte followed by anything other than NUL padding. A prefix
    /// ending in NUL counts, since the separator and name follow it.
    pub fn full_name_bytes(&self) -> Result<Vec<u8>> {
        let mut full = Vec::with_capacity(self.prefix.len() + 1 + self.name.len());
        if !self.prefix.is_empty() {
            full.extend_from_slice(&self.prefix);
            full.push(b'/');
        }
        full.extend_from_slice(&self.name);

        let end = Self::terminated(&full)?.len();
        full.truncate(end);
        Ok(full)
    }

    /// Compose `prefix/name`, replacing invalid UTF-8 lossily.
    pub fn full_name(&self) -> Result<String> {
        let bytes = self.full_name_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Cut a field at its terminator, rejecting content after it.
    fn terminated(field: &[u8]) -> Result<&[u8]> {
        match field.iter().position(|&b| b == 0) {
            None => Ok(field),
            Some(end) if field[end..].iter().all(|&b| b == 0) => Ok(&field[..end]),
            Some(_) => Err(OxiTarError::null_byte_in_name()),
        }
    }

    /// Strip trailing NUL padding, keeping interior bytes as-is.
    fn trim_padding(data: &[u8]) -> Vec<u8> {
        let end = data.iter().rposition(|&b| b != 0).map_or(0, |p| p + 1);
        data[..end].to_vec()
    }

    /// Parse a null-terminated string.
    fn parse_string(data: &[u8]) -> String {
        let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
        String::from_utf8_lossy(&data[..end]).into_owned()
    }

    /// Parse an octal number.
    fn parse_octal(data: &[u8]) -> Result<u32> {
        let value = Self::parse_numeric(data)?;
        u32::try_from(value)
            .map_err(|_| OxiTarError::invalid_header(format!("Octal value too large: {}", value)))
    }

    /// Parse a numeric field, octal text or GNU base-256.
    fn parse_numeric(data: &[u8]) -> Result<u64> {
        if data.first().is_some_and(|&b| b & 0x80 != 0) {
            return Self::parse_base256(data);
        }

        let s = Self::parse_string(data);
        let s = s.trim_matches(|c: char| c == ' ' || c == '\0');
        if s.is_empty() {
            return Ok(0);
        }
        u64::from_str_radix(s, 8)
            .map_err(|_| OxiTarError::invalid_header(format!("Invalid octal: {}", s)))
    }

    /// Parse a GNU base-256 field (high bit of the first byte set).
    fn parse_base256(data: &[u8]) -> Result<u64> {
        if data[0] & 0x40 != 0 {
            return Err(OxiTarError::invalid_header("Negative base-256 value"));
        }

        let mut value: u64 = u64::from(data[0] & 0x3f);
        for &b in &data[1..] {
            value = value
                .checked_mul(256)
                .and_then(|v| v.checked_add(u64::from(b)))
                .ok_or_else(|| OxiTarError::invalid_header("Base-256 value overflows u64"))?;
        }
        Ok(value)
    }
}
