use alloc::borrow::Cow;
use alloc::string::String;
use core::mem::size_of;

use crate::wad::LumpKind;
use crate::{name_from_bytes, Color, MIP_LEVELS};

/// One mip level: palette indices, row-major with no row padding.  Levels
/// decoded from an archive borrow their pixels from the archive buffer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Image<'a> {
    width: u32,
    height: u32,
    pixels: Cow<'a, [u8]>,
}

impl<'a> Image<'a> {
    /// Wrap `pixels` as a `width` by `height` image.  Returns `None` when the
    /// pixel count does not match the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        pixels: impl Into<Cow<'a, [u8]>>,
    ) -> Option<Self> {
        let pixels = pixels.into();
        let expected = u64::from(width) * u64::from(height);

        if pixels.len() as u64 != expected {
            return None;
        }

        Some(Image {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Whether the pixels live in the archive buffer rather than on the heap
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    pub fn into_owned(self) -> Image<'static> {
        Image {
            width: self.width,
            height: self.height,
            pixels: Cow::Owned(self.pixels.into_owned()),
        }
    }
}

/// Texture header as stored at the start of a texture lump
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(C, packed)]
pub struct MipTextureHead {
    pub(crate) name: [u8; 16],
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) offsets: [u32; MIP_LEVELS],
}

impl MipTextureHead {
    pub const SIZE: usize = size_of::<MipTextureHead>();

    pub fn name(&self) -> [u8; 16] {
        self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Level offsets, relative to the start of the header
    pub fn offsets(&self) -> [u32; MIP_LEVELS] {
        self.offsets
    }

    /// A header with a zero dimension or no first level is a corrupt one
    pub fn is_valid(&self) -> bool {
        let (width, height, offsets) = (self.width, self.height, self.offsets);
        width != 0 && height != 0 && offsets[0] != 0
    }

    /// Dimensions of mip level `level`, each halved `level` times and
    /// rounded down
    pub fn level_size(&self, level: usize) -> (u32, u32) {
        let (width, height) = (self.width, self.height);
        (width >> level, height >> level)
    }
}

impl From<[u8; size_of::<MipTextureHead>()]> for MipTextureHead {
    fn from(bytes: [u8; size_of::<MipTextureHead>()]) -> Self {
        let mut name = [0u8; 16];
        name.copy_from_slice(&bytes[..16]);

        let mut fields = bytes[16..].chunks_exact(4).map(|chunk| {
            let mut u32_buf = [0u8; 4];
            u32_buf.copy_from_slice(chunk);
            u32::from_le_bytes(u32_buf)
        });

        let mut next = || fields.next().unwrap_or(0);
        let width = next();
        let height = next();
        let offsets = [next(), next(), next(), next()];

        MipTextureHead {
            name,
            width,
            height,
            offsets,
        }
    }
}

/// A decoded texture: all four mip levels and the palette stored after them.
/// Pixels and palette are views into the archive buffer.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TextureRecord<'a> {
    index: u32,
    kind: LumpKind,
    name: String,
    width: u32,
    height: u32,
    mips: [Image<'a>; MIP_LEVELS],
    palette: &'a [Color],
}

impl<'a> TextureRecord<'a> {
    pub(crate) fn from_parts(
        index: u32,
        kind: LumpKind,
        head: &MipTextureHead,
        mips: [Image<'a>; MIP_LEVELS],
        palette: &'a [Color],
    ) -> Self {
        TextureRecord {
            index,
            kind,
            name: name_from_bytes(&head.name),
            width: head.width,
            height: head.height,
            mips,
            palette,
        }
    }

    /// Directory slot the texture was read from
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn kind(&self) -> LumpKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mip(&self, index: usize) -> &Image<'a> {
        if index < MIP_LEVELS {
            &self.mips[index]
        } else {
            panic!("Outside mip bounds ([0..{}])", MIP_LEVELS);
        }
    }

    pub fn mips(&self) -> &[Image<'a>; MIP_LEVELS] {
        &self.mips
    }

    pub fn palette(&self) -> &'a [Color] {
        self.palette
    }

    /// Color count as stored in the archive
    pub fn palette_len(&self) -> u16 {
        // Decoded from a u16 count
        self.palette.len() as u16
    }
}

impl<'r, 'a> IntoIterator for &'r TextureRecord<'a> {
    type Item = &'r Image<'a>;
    type IntoIter = core::slice::Iter<'r, Image<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.mips.iter()
    }
}
