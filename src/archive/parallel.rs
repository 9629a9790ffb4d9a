use super::{process_slot, ArchiveParse, Collector, Slot};
use crate::source::ByteSource;
use crate::wad;
use alloc::vec::Vec;
use rayon::prelude::*;

/// Parse a whole archive, decoding lumps on the rayon thread pool.
///
/// Slots are decoded independently and collected by index, then replayed in
/// directory order, so the result (including which error is reported) is the
/// same as [`parse`](super::parse) gives.
pub fn parse_parallel(bytes: &[u8]) -> ArchiveParse<'_> {
    let source = ByteSource::new(bytes);

    let header = match wad::read_header(&source) {
        Ok(header) => header,
        Err(err) => {
            log::error!("{err}");
            return ArchiveParse::header_rejected(err);
        }
    };

    // Slots past this point cannot be read, the first of them fails the parse
    let in_range = wad::slots_in_range(&source, &header);

    let slots: Vec<Slot> = (0..in_range)
        .into_par_iter()
        .map(|index| process_slot(&source, &header, index))
        .collect();

    let mut collector = Collector::new(header, slots.len());
    let mut ok = true;

    for slot in slots {
        ok = collector.push(slot);

        if !ok {
            break;
        }
    }

    if ok && in_range < header.entry_count() {
        collector.push(process_slot(&source, &header, in_range));
    }

    collector.finish()
}
