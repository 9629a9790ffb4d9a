use alloc::string::String;
use core::fmt;
use core::mem::size_of;

use crate::error::{ParseError, ParseResult};
use crate::{name_from_bytes, MAX_LUMP_SIZE};

/// Identifier at the start of every archive
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Magic {
    /// Quake
    Wad2,
    /// Half-Life and other GoldSrc games
    Wad3,
}

impl Magic {
    pub fn from_bytes(bytes: [u8; 4]) -> Option<Magic> {
        match &bytes {
            b"WAD2" => Some(Magic::Wad2),
            b"WAD3" => Some(Magic::Wad3),
            _ => None,
        }
    }

    pub fn bytes(self) -> [u8; 4] {
        match self {
            Magic::Wad2 => *b"WAD2",
            Magic::Wad3 => *b"WAD3",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Magic::Wad2 => "WAD2",
            Magic::Wad3 => "WAD3",
        }
    }
}

impl fmt::Display for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Archive header: identifier, lump count and directory offset
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Head {
    magic: Magic,
    entry_count: u32,
    directory_offset: u32,
}

impl Head {
    /// Size of the header on disk
    pub const SIZE: usize = 12;

    pub fn new(magic: Magic, entry_count: u32, directory_offset: u32) -> Self {
        Head {
            magic,
            entry_count,
            directory_offset,
        }
    }

    pub fn magic(&self) -> Magic {
        self.magic
    }

    pub fn entry_count(&self) -> u32 {
        self.entry_count
    }

    pub fn directory_offset(&self) -> u32 {
        self.directory_offset
    }
}

impl TryFrom<[u8; Head::SIZE]> for Head {
    type Error = ParseError;

    fn try_from(bytes: [u8; Head::SIZE]) -> ParseResult<Self> {
        let (magic_bytes, rest) = bytes.split_at(4);
        let mut magic_array = [0u8; 4];
        magic_array.copy_from_slice(magic_bytes);

        let magic = Magic::from_bytes(magic_array)
            .ok_or(ParseError::InvalidMagic(magic_array))?;

        let (count_bytes, offset_bytes) = rest.split_at(4);
        let mut u32_buf = [0u8; 4];

        u32_buf.copy_from_slice(count_bytes);
        let entry_count = u32::from_le_bytes(u32_buf);

        u32_buf.copy_from_slice(offset_bytes);
        let directory_offset = u32::from_le_bytes(u32_buf);

        Ok(Head::new(magic, entry_count, directory_offset))
    }
}

/// What a lump holds according to its type tag.  The same tag means
/// different things in Quake and GoldSrc archives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum LumpKind {
    Palette,
    StatusBar,
    MipTexture,
    Flat,
    Cache,
    Decal,
    Texture,
    Font,
    Other(u8),
}

impl LumpKind {
    pub fn classify(tag: u8, magic: Magic) -> LumpKind {
        match magic {
            Magic::Wad2 => match tag {
                kind::PALETTE => LumpKind::Palette,
                kind::SBAR => LumpKind::StatusBar,
                kind::MIPTEX => LumpKind::MipTexture,
                kind::FLAT => LumpKind::Flat,
                other => LumpKind::Other(other),
            },
            Magic::Wad3 => match tag {
                kind::CACHE => LumpKind::Cache,
                kind::DECAL => LumpKind::Decal,
                kind::TEXTURE => LumpKind::Texture,
                kind::FONT => LumpKind::Font,
                other => LumpKind::Other(other),
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LumpKind::Palette => "palette",
            LumpKind::StatusBar => "sbar",
            LumpKind::MipTexture => "miptex",
            LumpKind::Flat => "flat",
            LumpKind::Cache => "cache",
            LumpKind::Decal => "decal",
            LumpKind::Texture => "texture",
            LumpKind::Font => "font",
            LumpKind::Other(_) => "n/a",
        }
    }
}

/// Raw type tags found in directory entries
pub mod kind {
    pub const PALETTE: u8 = 0x40;
    pub const SBAR: u8 = 0x42;
    pub const MIPTEX: u8 = 0x44;
    pub const FLAT: u8 = 0x45;

    pub const CACHE: u8 = b'@';
    pub const DECAL: u8 = b'B';
    pub const TEXTURE: u8 = b'C';
    pub const FONT: u8 = b'F';
}

/// Provides the location of a lump within a WAD archive, its on-disk and
/// decoded sizes, name (16 bytes, null-terminated), type tag and compression
/// tag
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct LumpEntry {
    offset: u32,
    disk_size: i32,
    size: i32,
    lump_kind: u8,
    compression: u8, // 0 - uncompressed, other values never decoded
    _padding: [u8; 2],
    name: [u8; 16],
}

impl LumpEntry {
    pub const SIZE: usize = size_of::<LumpEntry>();

    #[cfg(test)]
    pub(crate) fn from_config(config: EntryConfig) -> LumpEntry {
        LumpEntry {
            offset: config.offset,
            disk_size: config.disk_size,
            size: config.size,
            lump_kind: config.lump_kind,
            compression: config.compression,
            _padding: [0; 2],
            name: config.name,
        }
    }

    /// Check the entry before anything it points to is touched.  The format
    /// has no checksums, so zero or oversized fields are the only sign of
    /// corruption.  Sizes are signed on disk and negative ones pass.
    pub fn validate(&self, index: u32) -> ParseResult<()> {
        let (offset, disk_size, size) = (self.offset, self.disk_size, self.size);

        if offset == 0 || disk_size == 0 || size == 0 {
            return Err(ParseError::MalformedLump { index });
        }

        let max = MAX_LUMP_SIZE as i32;

        if size >= max {
            return Err(ParseError::LumpTooLarge {
                index,
                // size >= max > 0
                excess: size.abs_diff(max),
            });
        }

        Ok(())
    }

    /// Name in raw bytes
    pub fn name(&self) -> [u8; 16] {
        self.name
    }

    /// Name up to its null terminator, with invalid UTF-8 replaced
    pub fn name_to_string(&self) -> String {
        name_from_bytes(&self.name)
    }

    /// Archive offset of lump
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of lump on disk in bytes
    pub fn disk_size(&self) -> i32 {
        self.disk_size
    }

    /// Length of lump once decoded
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Lump kind as a byte
    pub fn kind_tag(&self) -> u8 {
        self.lump_kind
    }

    pub fn kind(&self, magic: Magic) -> LumpKind {
        LumpKind::classify(self.lump_kind, magic)
    }

    pub fn compression(&self) -> u8 {
        self.compression
    }
}

impl From<[u8; size_of::<LumpEntry>()]> for LumpEntry {
    fn from(bytes: [u8; size_of::<LumpEntry>()]) -> Self {
        let mut u32_buf = [0u8; 4];

        u32_buf.copy_from_slice(&bytes[0..4]);
        let offset = u32::from_le_bytes(u32_buf);

        u32_buf.copy_from_slice(&bytes[4..8]);
        let disk_size = i32::from_le_bytes(u32_buf);

        u32_buf.copy_from_slice(&bytes[8..12]);
        let size = i32::from_le_bytes(u32_buf);

        let mut name = [0u8; 16];
        name.copy_from_slice(&bytes[16..]);

        LumpEntry {
            offset,
            disk_size,
            size,
            lump_kind: bytes[12],
            compression: bytes[13],
            _padding: [bytes[14], bytes[15]],
            name,
        }
    }
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EntryConfig {
    pub offset: u32,
    pub disk_size: i32,
    pub size: i32,
    pub lump_kind: u8,
    pub compression: u8,
    pub name: [u8; 16],
}
