//! Hand-built archives for unit tests

use crate::wad::{kind, Head, LumpEntry};
use std::vec::Vec;

pub fn name_field(name: &[u8]) -> [u8; 16] {
    let mut field = [0u8; 16];
    field[..name.len()].copy_from_slice(name);
    field
}

/// Pixel value stored at `index` of mip level `level`
pub fn pixel(level: usize, index: usize) -> u8 {
    (index * 7 + level * 31) as u8
}

pub fn palette(colors: u16) -> Vec<[u8; 3]> {
    (0..colors)
        .map(|i| [i as u8, (i >> 1) as u8, 255 - i as u8])
        .collect()
}

/// A texture record with contiguous levels followed by its palette
pub fn miptex_bytes(name: &[u8], width: u32, height: u32, colors: u16) -> Vec<u8> {
    let mut miptex = Vec::new();

    miptex.extend(name_field(name));
    miptex.extend(width.to_le_bytes());
    miptex.extend(height.to_le_bytes());

    let mut offset: u32 = 40;

    for level in 0..4 {
        miptex.extend(offset.to_le_bytes());
        offset += (width >> level) * (height >> level);
    }

    for level in 0..4 {
        let len = ((width >> level) * (height >> level)) as usize;
        miptex.extend((0..len).map(|i| pixel(level, i)));
    }

    miptex.extend(colors.to_le_bytes());
    miptex.extend(palette(colors).into_iter().flatten());

    miptex
}

pub fn entry_bytes(
    offset: u32,
    disk_size: i32,
    size: i32,
    lump_kind: u8,
    name: &[u8],
) -> Vec<u8> {
    let mut entry = Vec::new();

    entry.extend(offset.to_le_bytes());
    entry.extend(disk_size.to_le_bytes());
    entry.extend(size.to_le_bytes());
    entry.push(lump_kind);
    entry.push(0u8);
    entry.extend([0; 2]);
    entry.extend(name_field(name));

    entry
}

/// Lay out a header, the payloads back to back, then the directory
pub fn wad_bytes(magic: &[u8; 4], lumps: &[(&[u8], Vec<u8>)]) -> Vec<u8> {
    let mut wad = Vec::new();
    let payload_len: usize = lumps.iter().map(|(_, payload)| payload.len()).sum();
    let directory_offset = (Head::SIZE + payload_len) as u32;

    wad.extend(magic);
    wad.extend((lumps.len() as u32).to_le_bytes());
    wad.extend(directory_offset.to_le_bytes());

    let mut offsets = Vec::new();

    for (_, payload) in lumps {
        offsets.push(wad.len() as u32);
        wad.extend(payload);
    }

    for ((name, payload), offset) in lumps.iter().zip(offsets) {
        let len = payload.len() as i32;
        wad.extend(entry_bytes(offset, len, len, kind::TEXTURE, name));
    }

    wad
}

/// Archive holding one 16x16 texture per name
pub fn textures_wad(names: &[&[u8]]) -> Vec<u8> {
    let lumps: Vec<(&[u8], Vec<u8>)> = names
        .iter()
        .map(|&name| (name, miptex_bytes(name, 16, 16, 256)))
        .collect();

    wad_bytes(b"WAD3", &lumps)
}

/// Position of directory slot `index` within an archive built above
pub fn slot_pos(wad: &[u8], index: usize) -> usize {
    let mut offset = [0u8; 4];
    offset.copy_from_slice(&wad[8..12]);
    u32::from_le_bytes(offset) as usize + index * LumpEntry::SIZE
}

/// Overwrite a little-endian `u32` in place
pub fn poke_u32(bytes: &mut [u8], pos: usize, value: u32) {
    bytes[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
}
