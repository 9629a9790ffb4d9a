use crate::error::{ParseError, ParseResult};
use crate::source::ByteSource;
use crate::wad::repr::{Head, LumpEntry};
use alloc::vec::Vec;
use core::mem::size_of;

/// Read and check the header at the start of an archive
pub fn read_header(source: &ByteSource) -> ParseResult<Head> {
    let header_bytes: [u8; Head::SIZE] =
        source.array(0).map_err(|_| ParseError::TruncatedHeader {
            len: source.len(),
        })?;

    let header = Head::try_from(header_bytes)?;

    log::debug!(
        "{} header: {} lumps, directory at {:#010x}",
        header.magic(),
        header.entry_count(),
        header.directory_offset()
    );

    Ok(header)
}

/// Number of directory slots, counting from the first, that lie entirely
/// inside the buffer.  Never more than the header claims.
pub fn slots_in_range(source: &ByteSource, header: &Head) -> u32 {
    const WAD_ENTRY_SIZE: u64 = size_of::<LumpEntry>() as u64;
    let dir_offset = u64::from(header.directory_offset());
    let available = (source.len() as u64).saturating_sub(dir_offset);
    let fitting = available / WAD_ENTRY_SIZE;

    u32::try_from(fitting)
        .unwrap_or(u32::MAX)
        .min(header.entry_count())
}

/// Read directory slot `index` and check it for signs of corruption
pub fn read_entry(
    source: &ByteSource,
    header: &Head,
    index: u32,
) -> ParseResult<LumpEntry> {
    const WAD_ENTRY_SIZE: u64 = size_of::<LumpEntry>() as u64;
    let slot_pos = u64::from(header.directory_offset())
        + u64::from(index) * WAD_ENTRY_SIZE;

    let entry_bytes: [u8; size_of::<LumpEntry>()] = source
        .array(slot_pos)
        .map_err(|slot| ParseError::DirectoryOutOfRange { index, slot })?;

    let entry = LumpEntry::from(entry_bytes);
    entry.validate(index)?;

    if entry.compression() != 0 {
        log::warn!(
            "Lump #{index} `{}` has compression tag {}, reading it as \
            uncompressed",
            entry.name_to_string(),
            entry.compression()
        );
    }

    Ok(entry)
}

/// Read every directory entry, stopping at the first bad one
pub fn read_directory(
    source: &ByteSource,
    header: &Head,
) -> ParseResult<Vec<LumpEntry>> {
    let capacity = slots_in_range(source, header) as usize;
    let mut entries = Vec::<LumpEntry>::with_capacity(capacity);

    for index in 0..header.entry_count() {
        entries.push(read_entry(source, header, index)?);
    }

    Ok(entries)
}
