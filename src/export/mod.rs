//! Writing decoded textures out as image files

use crate::bmp;
use crate::error::{ExportError, ExportResult};
use crate::lump::{Image, TextureRecord};
use crate::{Color, MIP_LEVELS};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::string::String;
use std::vec::Vec;

/// File name suffix for each mip level
pub const LEVEL_SUFFIXES: [&str; MIP_LEVELS] =
    ["", "_medium", "_small", "_smallest"];

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ImageFormat {
    #[default]
    Bmp,
    #[cfg(feature = "png")]
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            #[cfg(feature = "png")]
            ImageFormat::Png => "png",
        }
    }

    fn write(
        self,
        writer: &mut impl Write,
        image: &Image<'_>,
        palette: &[Color],
    ) -> ExportResult<()> {
        match self {
            ImageFormat::Bmp => Ok(bmp::write(writer, image, palette)?),
            #[cfg(feature = "png")]
            ImageFormat::Png => write_png(writer, image, palette),
        }
    }
}

/// File name (without directory) of `texture`'s mip level `level`
pub fn file_name(
    texture: &TextureRecord<'_>,
    level: usize,
    format: ImageFormat,
) -> String {
    let mut stem: String = texture
        .name()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.is_empty() {
        stem = format!("lump{}", texture.index());
    }

    format!("{stem}{}.{}", LEVEL_SUFFIXES[level], format.extension())
}

/// Write the first `levels` mip levels of every texture into `dir`,
/// creating it if needed.  Returns the paths written, in texture order.
pub fn export_textures(
    textures: &[TextureRecord<'_>],
    dir: impl AsRef<Path>,
    levels: u32,
    format: ImageFormat,
) -> ExportResult<Vec<PathBuf>> {
    if levels == 0 || levels as usize > MIP_LEVELS {
        return Err(ExportError::InvalidMipLevel(levels));
    }

    let dir = dir.as_ref();
    create_dir_all(dir)?;

    let mut written = Vec::with_capacity(textures.len() * levels as usize);

    for texture in textures {
        for (level, image) in
            texture.mips().iter().enumerate().take(levels as usize)
        {
            if image.width() == 0 || image.height() == 0 {
                log::warn!(
                    "Skipping empty mip level {level} of `{}` ({}x{})",
                    texture.name(),
                    texture.width(),
                    texture.height()
                );
                continue;
            }

            let path = dir.join(file_name(texture, level, format));
            let mut writer = BufWriter::new(File::create(&path)?);
            format.write(&mut writer, image, texture.palette())?;
            writer.flush()?;

            log::trace!("Wrote {}", path.display());
            written.push(path);
        }
    }

    log::debug!(
        "Exported {} image(s) from {} texture(s) to {}",
        written.len(),
        textures.len(),
        dir.display()
    );

    Ok(written)
}

#[cfg(feature = "png")]
fn write_png(
    writer: &mut impl Write,
    image: &Image<'_>,
    palette: &[Color],
) -> ExportResult<()> {
    use png::{BitDepth, ColorType, Encoder};

    let mut plte: Vec<u8> = palette.iter().take(256).flatten().copied().collect();
    plte.resize(256 * 3, 0);

    let mut encoder = Encoder::new(writer, image.width(), image.height());
    encoder.set_color(ColorType::Indexed);
    encoder.set_depth(BitDepth::Eight);
    encoder.set_palette(plte);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.pixels())?;
    writer.finish()?;

    Ok(())
}
