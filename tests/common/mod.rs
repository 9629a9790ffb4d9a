//! Synthetic archives shared by the integration tests

#![allow(dead_code)]

pub const TEXTURE: u8 = b'C';
pub const HEADER_SIZE: usize = 12;
pub const ENTRY_SIZE: usize = 32;

pub fn name_field(name: &str) -> [u8; 16] {
    let mut field = [0u8; 16];
    field[..name.len()].copy_from_slice(name.as_bytes());
    field
}

/// Texture lump with contiguous levels and a `colors`-entry palette
pub fn miptex(name: &str, width: u32, height: u32, colors: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    let mut offset = 40u32;

    bytes.extend(name_field(name));
    bytes.extend(width.to_le_bytes());
    bytes.extend(height.to_le_bytes());

    for level in 0..4 {
        bytes.extend(offset.to_le_bytes());
        offset += (width >> level) * (height >> level);
    }

    for level in 0..4u32 {
        let len = (width >> level) * (height >> level);
        bytes.extend((0..len).map(|i| (i * 3 + level * 17) as u8));
    }

    bytes.extend(colors.to_le_bytes());

    for i in 0..colors {
        bytes.extend([i as u8, 128u8.wrapping_add(i as u8), !(i as u8)]);
    }

    bytes
}

/// Lump descriptor for [`build`]
pub struct Lump {
    pub name: String,
    pub payload: Vec<u8>,
    pub kind: u8,
}

impl Lump {
    pub fn texture(name: &str, width: u32, height: u32) -> Self {
        Lump {
            name: name.to_string(),
            payload: miptex(name, width, height, 256),
            kind: TEXTURE,
        }
    }
}

/// Header, payloads back to back, then the directory
pub fn build(magic: &[u8; 4], lumps: &[Lump]) -> Vec<u8> {
    let payload_len: usize = lumps.iter().map(|l| l.payload.len()).sum();
    let mut wad = Vec::new();

    wad.extend(magic);
    wad.extend((lumps.len() as u32).to_le_bytes());
    wad.extend(((HEADER_SIZE + payload_len) as u32).to_le_bytes());

    let mut offsets = Vec::with_capacity(lumps.len());

    for lump in lumps {
        offsets.push(wad.len() as u32);
        wad.extend(&lump.payload);
    }

    for (lump, offset) in lumps.iter().zip(offsets) {
        let size = lump.payload.len() as i32;

        wad.extend(offset.to_le_bytes());
        wad.extend(size.to_le_bytes());
        wad.extend(size.to_le_bytes());
        wad.push(lump.kind);
        wad.push(0);
        wad.extend([0u8; 2]);
        wad.extend(name_field(&lump.name));
    }

    wad
}

/// WAD3 archive with `count` textures of `size` by `size` pixels
pub fn textures(count: usize, size: u32) -> Vec<u8> {
    let lumps: Vec<Lump> = (0..count)
        .map(|i| Lump::texture(&format!("tex{i:03}"), size, size))
        .collect();

    build(b"WAD3", &lumps)
}

pub fn slot_pos(wad: &[u8], index: usize) -> usize {
    read_u32(wad, 8) as usize + index * ENTRY_SIZE
}

pub fn read_u32(bytes: &[u8], pos: usize) -> u32 {
    let mut buf = [0u8; 4];
    buf.copy_from_slice(&bytes[pos..pos + 4]);
    u32::from_le_bytes(buf)
}

pub fn write_u32(bytes: &mut [u8], pos: usize, value: u32) {
    bytes[pos..pos + 4].copy_from_slice(&value.to_le_bytes());
}
