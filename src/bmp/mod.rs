//! 8-bit palettized BMP files
//!
//! Only the uncompressed `BITMAPINFOHEADER` flavor is written or read.  Rows
//! are stored bottom-up and padded to a multiple of 4 bytes; the palette
//! always has 256 entries.

use crate::error::{ExportError, ExportResult};
use crate::lump::Image;
use crate::Color;
use std::boxed::Box;
use std::io::{self, Read, Write};
use std::string::ToString;
use std::vec::Vec;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
/// `BITMAPV5HEADER`, the largest info header in use
const MAX_INFO_HEADER_SIZE: u32 = 124;
const PALETTE_ENTRIES: u32 = 256;
const PALETTE_SIZE: u32 = PALETTE_ENTRIES * 4;
const BIT_DEPTH: u16 = 8;
const BI_RGB: u32 = 0;
const MAGIC: [u8; 2] = *b"BM";

/// Bytes per stored row for an 8-bit image `width` pixels wide
pub fn row_stride(width: u32) -> u32 {
    (width + 3) & !3
}

/// Write `image` as an 8-bit BMP.  Palettes shorter than 256 colors are
/// padded with black, longer ones are cut off.
pub fn write(
    writer: &mut impl Write,
    image: &Image<'_>,
    palette: &[Color],
) -> io::Result<()> {
    let too_large = || {
        io::Error::new(io::ErrorKind::InvalidInput, "Image too large for BMP")
    };

    let (width, height) = (image.width(), image.height());
    let signed_width = i32::try_from(width).map_err(|_| too_large())?;
    let signed_height = i32::try_from(height).map_err(|_| too_large())?;
    let stride = row_stride(width);

    let bits_size = stride.checked_mul(height).ok_or_else(too_large)?;
    let bits_offset = FILE_HEADER_SIZE + INFO_HEADER_SIZE + PALETTE_SIZE;
    let file_size = bits_offset.checked_add(bits_size).ok_or_else(too_large)?;

    let mut header = Vec::with_capacity(bits_offset as usize);

    header.extend(MAGIC);
    header.extend(file_size.to_le_bytes());
    header.extend([0u8; 4]);
    header.extend(bits_offset.to_le_bytes());

    header.extend(INFO_HEADER_SIZE.to_le_bytes());
    header.extend(signed_width.to_le_bytes());
    header.extend(signed_height.to_le_bytes());
    header.extend(1u16.to_le_bytes());
    header.extend(BIT_DEPTH.to_le_bytes());
    header.extend(BI_RGB.to_le_bytes());
    header.extend(bits_size.to_le_bytes());
    header.extend(0i32.to_le_bytes());
    header.extend(0i32.to_le_bytes());
    header.extend(PALETTE_ENTRIES.to_le_bytes());
    header.extend(0u32.to_le_bytes());

    let padding = [0u8; 4];

    for i in 0..PALETTE_ENTRIES as usize {
        let [r, g, b] = palette.get(i).copied().unwrap_or_default();
        header.extend([b, g, r, 0]);
    }

    writer.write_all(&header)?;

    let row_padding = &padding[..(stride - width) as usize];

    if width > 0 {
        for row in image.pixels().chunks_exact(width as usize).rev() {
            writer.write_all(row)?;
            writer.write_all(row_padding)?;
        }
    }

    Ok(())
}

fn bad_bitmap(msg: &str) -> ExportError {
    ExportError::Bitmap(msg.to_string())
}

fn le_u16(bytes: &[u8], pos: usize) -> u16 {
    u16::from_le_bytes([bytes[pos], bytes[pos + 1]])
}

fn le_u32(bytes: &[u8], pos: usize) -> u32 {
    let mut u32_buf = [0u8; 4];
    u32_buf.copy_from_slice(&bytes[pos..pos + 4]);
    u32::from_le_bytes(u32_buf)
}

/// Read an 8-bit uncompressed BMP back into an image and its palette
pub fn read(
    reader: &mut impl Read,
) -> ExportResult<(Image<'static>, Vec<Color>)> {
    let mut file_header = [0u8; FILE_HEADER_SIZE as usize];
    reader.read_exact(&mut file_header)?;

    if file_header[..2] != MAGIC {
        return Err(bad_bitmap("Not a BMP file"));
    }

    let bits_offset = le_u32(&file_header, 10);

    let mut info_size_bytes = [0u8; 4];
    reader.read_exact(&mut info_size_bytes)?;
    let info_size = u32::from_le_bytes(info_size_bytes);

    if !(INFO_HEADER_SIZE..=MAX_INFO_HEADER_SIZE).contains(&info_size) {
        return Err(ExportError::Bitmap(format!(
            "Unsupported BMP info header size: {info_size}"
        )));
    }

    let mut info = vec![0u8; info_size as usize];
    info[..4].copy_from_slice(&info_size_bytes);
    reader.read_exact(&mut info[4..])?;

    let width = le_u32(&info, 4) as i32;
    let height = le_u32(&info, 8) as i32;
    let planes = le_u16(&info, 12);
    let bit_depth = le_u16(&info, 14);
    let compression = le_u32(&info, 16);
    let mut colors_used = le_u32(&info, 32);

    if planes != 1 {
        return Err(bad_bitmap("Unsupported BMP plane count"));
    }

    if bit_depth != BIT_DEPTH {
        return Err(ExportError::Bitmap(format!(
            "Invalid bit depth: {bit_depth}"
        )));
    }

    if compression != BI_RGB {
        return Err(ExportError::Bitmap(format!(
            "Invalid bit compression: {compression}"
        )));
    }

    if width < 0 {
        return Err(bad_bitmap("Negative BMP width"));
    }

    if colors_used == 0 || colors_used > PALETTE_ENTRIES {
        colors_used = PALETTE_ENTRIES;
    }

    let mut palette_bytes = vec![0u8; colors_used as usize * 4];
    reader.read_exact(&mut palette_bytes)?;

    let palette = palette_bytes
        .chunks_exact(4)
        .map(|quad| [quad[2], quad[1], quad[0]])
        .collect();

    // Skip anything between the palette and the pixel data
    let consumed = u64::from(FILE_HEADER_SIZE)
        + u64::from(info_size)
        + palette_bytes.len() as u64;
    let gap = u64::from(bits_offset)
        .checked_sub(consumed)
        .ok_or_else(|| bad_bitmap("BMP pixel data overlaps its headers"))?;
    io::copy(&mut reader.by_ref().take(gap), &mut io::sink())?;

    let width = width as u32;
    let top_down = height < 0;
    let height = height.unsigned_abs();
    let stride = row_stride(width) as usize;
    let bits_size = u64::from(row_stride(width)) * u64::from(height);

    // The buffer only grows with the bytes actually present
    let mut rows = Vec::new();
    reader.by_ref().take(bits_size).read_to_end(&mut rows)?;

    if (rows.len() as u64) < bits_size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "BMP pixel data cut short",
        )
        .into());
    }

    let mut pixels = Vec::with_capacity(width as usize * height as usize);

    if stride > 0 {
        let stored: Box<dyn Iterator<Item = &[u8]>> = if top_down {
            Box::new(rows.chunks_exact(stride))
        } else {
            Box::new(rows.chunks_exact(stride).rev())
        };

        for row in stored {
            pixels.extend_from_slice(&row[..width as usize]);
        }
    }

    let image = Image::new(width, height, pixels)
        .ok_or_else(|| bad_bitmap("BMP pixel count mismatch"))?;

    Ok((image, palette))
}
