//! Shared helpers for building TAR bytes in memory.

#![allow(dead_code)]

use oxitar_archive::tar::{BLOCK_SIZE, TarEntry, open_entry};
use std::io::Cursor;

/// Build a ustar header block.
pub fn header_block(name: &[u8], prefix: &[u8], size: u64, typeflag: u8) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];

    block[..name.len()].copy_from_slice(name);
    write_octal(&mut block[100..108], 0o644);
    write_octal(&mut block[108..116], 1000);
    write_octal(&mut block[116..124], 1000);
    write_octal(&mut block[124..136], size);
    write_octal(&mut block[136..148], 1_700_000_000);
    block[156] = typeflag;
    block[257..263].copy_from_slice(b"ustar\0");
    block[263..265].copy_from_slice(b"00");
    block[345..345 + prefix.len()].copy_from_slice(prefix);

    block[148..156].copy_from_slice(b"        ");
    let checksum: u32 = block.iter().map(|&b| b as u32).sum();
    let checksum_str = format!("{:06o}\0 ", checksum);
    block[148..156].copy_from_slice(checksum_str.as_bytes());

    block
}

fn write_octal(field: &mut [u8], value: u64) {
    let s = format!("{:0width$o}", value, width = field.len() - 1);
    field[..s.len()].copy_from_slice(s.as_bytes());
}

/// Header, payload, and padding for one member.
pub fn member(name: &str, typeflag: u8, payload: &[u8]) -> Vec<u8> {
    let mut tar = header_block(name.as_bytes(), b"", payload.len() as u64, typeflag).to_vec();
    tar.extend_from_slice(payload);
    let padding = (BLOCK_SIZE - payload.len() % BLOCK_SIZE) % BLOCK_SIZE;
    tar.resize(tar.len() + padding, 0);
    tar
}

/// A complete archive holding the given members and the end marker.
pub fn archive(members: &[Vec<u8>]) -> Vec<u8> {
    let mut tar: Vec<u8> = members.concat();
    tar.resize(tar.len() + 2 * BLOCK_SIZE, 0);
    tar
}

/// The 2600-byte lowercase alphabet payload.
pub fn alphabet_contents() -> Vec<u8> {
    (b'a'..=b'z').collect::<Vec<u8>>().repeat(100)
}

/// Open the first member of `cursor`, panicking if there is none.
pub fn first_entry(cursor: &mut Cursor<Vec<u8>>) -> TarEntry<'_, Cursor<Vec<u8>>> {
    open_entry(cursor)
        .expect("header should parse")
        .expect("archive should hold an entry")
}
