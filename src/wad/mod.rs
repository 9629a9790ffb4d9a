//! Archive header and lump directory

mod parse;
mod repr;

pub use parse::{read_directory, read_entry, read_header, slots_in_range};
pub use repr::{kind, Head, LumpEntry, LumpKind, Magic};

#[cfg(test)]
pub(crate) use repr::EntryConfig;

#[cfg(test)]
mod repr_test;
