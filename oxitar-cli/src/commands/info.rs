//! Info command implementation.

use crate::utils::{format_mode, open_at};
use oxitar_archive::{EntrySource, OxiTarError, TarEntry, open_entry};
use serde::Serialize;
use std::path::Path;

/// JSON serializable view of one entry's header.
#[derive(Debug, Serialize)]
struct EntryInfo {
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name_error: Option<String>,
    entry_type: String,
    size: u64,
    padded_size: u64,
    header_offset: u64,
    data_offset: u64,
    mode: String,
    mode_octal: String,
    mtime: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    link_target: String,
    ustar: bool,
}

impl EntryInfo {
    fn from_entry<S: EntrySource + ?Sized>(entry: &TarEntry<'_, S>, header_offset: u64) -> Self {
        let header = entry.header();
        let (name, name_error) = match entry.full_name() {
            Ok(name) => (Some(name), None),
            Err(e) => (None, Some(e.to_string())),
        };

        Self {
            name,
            name_error,
            entry_type: header.entry_type().to_string(),
            size: header.size,
            padded_size: header.padded_size(),
            header_offset,
            data_offset: entry.data_offset(),
            mode: format_mode(header.mode),
            mode_octal: format!("{:o}", header.mode),
            mtime: header.mtime,
            link_target: header.linkname.clone(),
            ustar: header.ustar,
        }
    }
}

pub fn cmd_info(archive: &Path, offset: u64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = open_at(archive, offset)?;
    let entry = open_entry(&mut reader)?
        .ok_or_else(|| OxiTarError::invalid_header(format!("no entry at offset {}", offset)))?;
    let info = EntryInfo::from_entry(&entry, offset);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Entry Information");
    println!("=================");
    println!("Archive: {}", archive.display());
    match (&info.name, &info.name_error) {
        (Some(name), _) => println!("Name: {}", name),
        (None, Some(err)) => println!("Name: <{}>", err),
        (None, None) => println!("Name: <unknown>"),
    }
    println!("Type: {}", info.entry_type);
    println!("Size: {} bytes ({} with padding)", info.size, info.padded_size);
    println!("Header offset: {}", info.header_offset);
    println!("Data offset: {}", info.data_offset);
    println!("Mode: {} ({})", info.mode, info.mode_octal);
    println!("Modification time: {} (Unix timestamp)", info.mtime);
    if !info.link_target.is_empty() {
        println!("Link target: {}", info.link_target);
    }
    println!("Format: {}", if info.ustar { "ustar" } else { "pre-POSIX" });

    Ok(())
}
