//! Archive entry types.
//!
//! This module defines [`EntryType`], the classification of a tar member
//! derived from the single type-flag byte of its header.

/// Entry type (file, directory, symlink, or anything else).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    /// Regular file.
    #[default]
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
    /// Any other member kind (hard links, devices, FIFOs, extension headers),
    /// carrying the raw type flag.
    Other(u8),
}

impl EntryType {
    /// Classify a tar type-flag byte.
    ///
    /// Both `'0'` and the pre-POSIX NUL flag denote a regular file.
    pub fn from_typeflag(flag: u8) -> Self {
        match flag {
            b'0' | 0 => Self::File,
            b'5' => Self::Directory,
            b'2' => Self::Symlink,
            other => Self::Other(other),
        }
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink)
    }

    /// Get the type name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Symlink => "symlink",
            Self::Other(_) => "other",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Other(flag) if flag.is_ascii_graphic() => {
                write!(f, "other ('{}')", *flag as char)
            }
            Self::Other(flag) => write!(f, "other ({:#04x})", flag),
            _ => write!(f, "{}", self.name()),
        }
    }
}
