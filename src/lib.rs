#![no_std]

#[cfg(all(not(feature = "std"), not(feature = "alloc_fills")))]
compile_error!("Must use feature 'std' or include 'alloc_fills'");

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
extern crate alloc;

mod common;
mod error;

pub mod archive;
pub mod dump;
pub mod lump;
pub mod source;
pub mod wad;

#[cfg(feature = "std")]
pub mod bmp;

#[cfg(feature = "std")]
pub mod export;

#[cfg(test)]
mod testing;

pub use archive::{parse, parse_with_progress, Archive, ArchiveParse, Outcome};

#[cfg(feature = "parallel")]
pub use archive::parse_parallel;

pub use common::{name_from_bytes, Color, MAX_LUMP_SIZE, MIP_LEVELS};
pub use error::{ErrorKind, OutOfBounds, ParseError, ParseResult};

#[cfg(feature = "std")]
pub use error::{ExportError, ExportResult};
