use crate::error::{OutOfBounds, ParseError, ParseResult};
use crate::lump::{Image, MipTextureHead, TextureRecord};
use crate::source::ByteSource;
use crate::wad::{LumpEntry, LumpKind};
use crate::{Color, MIP_LEVELS};
use alloc::vec::Vec;
use core::mem::size_of;
use core::slice;

/// Decode the texture a validated directory entry points at.  `index` is the
/// entry's directory slot and only serves to label errors and the result.
///
/// Levels and palette borrow from `source`, so entries that point at the same
/// bytes cost no more memory than one.
pub fn decode_mip_texture<'a>(
    source: &ByteSource<'a>,
    entry: &LumpEntry,
    index: u32,
    kind: LumpKind,
) -> ParseResult<TextureRecord<'a>> {
    let out_of_range = move |range: OutOfBounds| ParseError::OutOfRangeRead {
        index,
        range,
    };

    let lump_start = u64::from(entry.offset());

    let head_bytes: [u8; size_of::<MipTextureHead>()] =
        source.array(lump_start).map_err(out_of_range)?;
    let head = MipTextureHead::from(head_bytes);

    if !head.is_valid() {
        return Err(ParseError::MalformedTexture { index });
    }

    let offsets = head.offsets();
    let mut levels = Vec::with_capacity(MIP_LEVELS);
    let mut level_end = 0u64;

    // Every offset is relative to the header, never to the previous level
    for (level, &offset) in offsets.iter().enumerate() {
        let (width, height) = head.level_size(level);
        let length = u64::from(width) * u64::from(height);
        let pix_start = lump_start + u64::from(offset);

        let pixels = source.slice(pix_start, length).map_err(out_of_range)?;
        level_end = pix_start + length;

        let image = Image::new(width, height, pixels)
            .ok_or(ParseError::MalformedTexture { index })?;
        levels.push(image);
    }

    let palette = decode_palette(source, level_end).map_err(out_of_range)?;

    let mips: [Image; MIP_LEVELS] = levels
        .try_into()
        .map_err(|_| ParseError::MalformedTexture { index })?;

    let texture =
        TextureRecord::from_parts(index, kind, &head, mips, palette);

    log::trace!(
        "Lump #{index}: texture `{}` {}x{}, {} colors",
        texture.name(),
        texture.width(),
        texture.height(),
        texture.palette_len()
    );

    Ok(texture)
}

/// Read the color count at `start` and view the RGB triples following it
fn decode_palette<'a>(
    source: &ByteSource<'a>,
    start: u64,
) -> Result<&'a [Color], OutOfBounds> {
    let count = source.u16_le(start)?;
    let body_start = start + size_of::<u16>() as u64;
    let body_len = u64::from(count) * size_of::<Color>() as u64;
    let body = source.slice(body_start, body_len)?;

    // SAFETY: `Color` is `[u8; 3]`, with alignment 1 and no padding, and
    // `body` is exactly `count` colors long
    Ok(unsafe {
        slice::from_raw_parts(body.as_ptr().cast::<Color>(), usize::from(count))
    })
}
