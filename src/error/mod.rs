use core::fmt;

#[cfg(feature = "std")]
use std::{io, string::String};

/// A byte range that does not fit inside the archive buffer
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OutOfBounds {
    pub offset: u64,
    pub len: u64,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} bytes at offset {:#010x}", self.len, self.offset)
    }
}

/// Category of a parse failure, without its details
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ErrorKind {
    InvalidMagic,
    TruncatedHeader,
    DirectoryOutOfRange,
    MalformedLump,
    LumpTooLarge,
    MalformedTexture,
    OutOfRangeRead,
}

/// Structural problem found in an archive.  All of these are permanent for a
/// given buffer, so none are worth retrying.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ParseError {
    InvalidMagic([u8; 4]),
    TruncatedHeader {
        len: usize,
    },
    DirectoryOutOfRange {
        index: u32,
        slot: OutOfBounds,
    },
    MalformedLump {
        index: u32,
    },
    LumpTooLarge {
        index: u32,
        excess: u32,
    },
    MalformedTexture {
        index: u32,
    },
    OutOfRangeRead {
        index: u32,
        range: OutOfBounds,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidMagic(_) => ErrorKind::InvalidMagic,
            ParseError::TruncatedHeader { .. } => ErrorKind::TruncatedHeader,
            ParseError::DirectoryOutOfRange { .. } => {
                ErrorKind::DirectoryOutOfRange
            }
            ParseError::MalformedLump { .. } => ErrorKind::MalformedLump,
            ParseError::LumpTooLarge { .. } => ErrorKind::LumpTooLarge,
            ParseError::MalformedTexture { .. } => ErrorKind::MalformedTexture,
            ParseError::OutOfRangeRead { .. } => ErrorKind::OutOfRangeRead,
        }
    }

    /// Directory slot the failure belongs to, if it happened past the header
    pub fn lump_index(&self) -> Option<u32> {
        match *self {
            ParseError::InvalidMagic(_) | ParseError::TruncatedHeader { .. } => {
                None
            }
            ParseError::DirectoryOutOfRange { index, .. }
            | ParseError::MalformedLump { index }
            | ParseError::LumpTooLarge { index, .. }
            | ParseError::MalformedTexture { index }
            | ParseError::OutOfRangeRead { index, .. } => Some(index),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseError::InvalidMagic(magic) => {
                write!(f, "Invalid WAD id `")?;

                for &b in magic {
                    if b.is_ascii_graphic() {
                        write!(f, "{}", char::from(b))?;
                    } else {
                        write!(f, "\\x{b:02x}")?;
                    }
                }

                write!(f, "`")
            }
            ParseError::TruncatedHeader { len } => {
                write!(f, "File too short for a WAD header ({len} bytes)")
            }
            ParseError::DirectoryOutOfRange { index, slot } => write!(
                f,
                "Lump #{index}: directory entry out of range of the file \
                ({slot})"
            ),
            ParseError::MalformedLump { index } => {
                write!(f, "Lump #{index}: corrupted lump information")
            }
            ParseError::LumpTooLarge { index, excess } => write!(
                f,
                "Lump #{index} doesn't fit into max size ({} bytes), \
                {excess} bytes exceeded",
                crate::MAX_LUMP_SIZE
            ),
            ParseError::MalformedTexture { index } => {
                write!(f, "Lump #{index}: corrupted texture header")
            }
            ParseError::OutOfRangeRead { index, range } => write!(
                f,
                "Lump #{index}: texture data out of range of the file \
                ({range})"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

pub type ParseResult<T> = core::result::Result<T, ParseError>;

#[cfg(feature = "std")]
#[derive(Debug)]
pub enum ExportError {
    Io(io::Error),
    #[cfg(feature = "png")]
    Png(png::EncodingError),
    InvalidMipLevel(u32),
    Bitmap(String),
}

#[cfg(feature = "std")]
impl From<io::Error> for ExportError {
    fn from(err: io::Error) -> ExportError {
        ExportError::Io(err)
    }
}

#[cfg(feature = "png")]
impl From<png::EncodingError> for ExportError {
    fn from(err: png::EncodingError) -> ExportError {
        ExportError::Png(err)
    }
}

#[cfg(feature = "std")]
impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "{err}"),
            #[cfg(feature = "png")]
            ExportError::Png(err) => write!(f, "{err}"),
            ExportError::InvalidMipLevel(level) => write!(
                f,
                "Invalid mip level count {level}, expected 1 to {}",
                crate::MIP_LEVELS
            ),
            ExportError::Bitmap(msg) => write!(f, "{msg}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            #[cfg(feature = "png")]
            ExportError::Png(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
pub type ExportResult<T> = core::result::Result<T, ExportError>;
