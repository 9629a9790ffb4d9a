//! Whole-archive parsing
//!
//! A parse walks the directory in order and decodes every entry as a mip
//! texture.  The first structural problem ends the pass; textures decoded
//! before it are kept in the [`ArchiveParse`] for diagnostics but are never
//! handed out as an [`Archive`].

#[cfg(feature = "parallel")]
mod parallel;

#[cfg(feature = "parallel")]
pub use parallel::parse_parallel;

use crate::error::{ParseError, ParseResult};
use crate::lump::{decode_mip_texture, TextureRecord};
use crate::source::ByteSource;
use crate::wad::{self, Head, LumpEntry, Magic};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(not(feature = "std"))]
use hashbrown::HashMap;

/// Position of the parse, handed to progress callbacks before each lump
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Progress {
    pub index: u32,
    pub total: u32,
}

/// How a parse ended
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Outcome {
    Complete,
    Failed(ParseError),
}

/// Everything a single parse pass produced
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ArchiveParse<'a> {
    stage: Stage<'a>,
}

/// How far a parse got.  A walk of the directory only starts once the header
/// is accepted, so a missing header always comes with its error.
#[derive(Clone, PartialEq, Eq, Debug)]
enum Stage<'a> {
    HeaderRejected(ParseError),
    Walked(Walk<'a>),
}

#[derive(Clone, PartialEq, Eq, Debug)]
struct Walk<'a> {
    header: Head,
    entries: Vec<LumpEntry>,
    textures: Vec<TextureRecord<'a>>,
    failure: Option<ParseError>,
}

impl<'a> ArchiveParse<'a> {
    fn header_rejected(error: ParseError) -> Self {
        ArchiveParse {
            stage: Stage::HeaderRejected(error),
        }
    }

    fn walk(&self) -> Option<&Walk<'a>> {
        match &self.stage {
            Stage::HeaderRejected(_) => None,
            Stage::Walked(walk) => Some(walk),
        }
    }

    /// Header, unless the parse failed while reading it
    pub fn header(&self) -> Option<&Head> {
        self.walk().map(|walk| &walk.header)
    }

    /// Directory entries that passed validation, in directory order
    pub fn entries(&self) -> &[LumpEntry] {
        self.walk().map_or(&[][..], |walk| &walk.entries[..])
    }

    pub fn outcome(&self) -> Outcome {
        match self.error() {
            None => Outcome::Complete,
            Some(err) => Outcome::Failed(err.clone()),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error().is_none()
    }

    pub fn error(&self) -> Option<&ParseError> {
        match &self.stage {
            Stage::HeaderRejected(err) => Some(err),
            Stage::Walked(walk) => walk.failure.as_ref(),
        }
    }

    /// Decoded textures, only when every lump was processed
    pub fn textures(&self) -> Option<&[TextureRecord<'a>]> {
        match &self.stage {
            Stage::Walked(Walk {
                textures,
                failure: None,
                ..
            }) => Some(textures),
            _ => None,
        }
    }

    /// Textures decoded before the parse stopped, whatever its outcome.
    /// Not meant for export when the parse failed.
    pub fn decoded_textures(&self) -> &[TextureRecord<'a>] {
        self.walk().map_or(&[][..], |walk| &walk.textures[..])
    }

    pub fn into_result(self) -> ParseResult<Archive<'a>> {
        match self.stage {
            Stage::HeaderRejected(err) => Err(err),
            Stage::Walked(Walk {
                failure: Some(err),
                ..
            }) => Err(err),
            Stage::Walked(Walk {
                header,
                entries,
                textures,
                failure: None,
            }) => Ok(Archive::new(header, entries, textures)),
        }
    }
}

/// A fully and successfully parsed archive
#[derive(Clone, Debug)]
pub struct Archive<'a> {
    header: Head,
    entries: Vec<LumpEntry>,
    textures: Vec<TextureRecord<'a>>,
    by_name: HashMap<String, usize>,
    duplicates: Vec<String>,
}

impl<'a> Archive<'a> {
    fn new(
        header: Head,
        entries: Vec<LumpEntry>,
        textures: Vec<TextureRecord<'a>>,
    ) -> Self {
        let mut by_name = HashMap::with_capacity(textures.len());
        let mut duplicates = Vec::new();

        for (position, texture) in textures.iter().enumerate() {
            let name = texture.name().to_string();

            if by_name.contains_key(&name) {
                log::warn!("Duplicate texture name `{name}`");
                duplicates.push(name);
            } else {
                by_name.insert(name, position);
            }
        }

        Archive {
            header,
            entries,
            textures,
            by_name,
            duplicates,
        }
    }

    pub fn header(&self) -> &Head {
        &self.header
    }

    pub fn magic(&self) -> Magic {
        self.header.magic()
    }

    pub fn entries(&self) -> &[LumpEntry] {
        &self.entries
    }

    pub fn textures(&self) -> &[TextureRecord<'a>] {
        &self.textures
    }

    pub fn into_textures(self) -> Vec<TextureRecord<'a>> {
        self.textures
    }

    /// First texture named `name`
    pub fn find(&self, name: &str) -> Option<&TextureRecord<'a>> {
        self.by_name.get(name).map(|&position| &self.textures[position])
    }

    /// Names used by more than one texture, once per extra occurrence.  Only
    /// the first of each is reachable through [`Archive::find`].
    pub fn duplicate_names(&self) -> &[String] {
        &self.duplicates
    }
}

/// Result of processing one directory slot
enum Slot<'a> {
    Rejected(ParseError),
    Accepted(LumpEntry, ParseResult<TextureRecord<'a>>),
}

fn process_slot<'a>(
    source: &ByteSource<'a>,
    header: &Head,
    index: u32,
) -> Slot<'a> {
    log::trace!("Processing lump #{index}");

    match wad::read_entry(source, header, index) {
        Err(err) => Slot::Rejected(err),
        Ok(entry) => {
            let kind = entry.kind(header.magic());
            let texture = decode_mip_texture(source, &entry, index, kind);
            Slot::Accepted(entry, texture)
        }
    }
}

/// Accumulates slots in directory order until the first failure
struct Collector<'a> {
    header: Head,
    entries: Vec<LumpEntry>,
    textures: Vec<TextureRecord<'a>>,
    failure: Option<ParseError>,
}

impl<'a> Collector<'a> {
    fn new(header: Head, capacity: usize) -> Self {
        Collector {
            header,
            entries: Vec::with_capacity(capacity),
            textures: Vec::with_capacity(capacity),
            failure: None,
        }
    }

    /// Record the next slot.  Returns `false` once the parse has failed.
    fn push(&mut self, slot: Slot<'a>) -> bool {
        if self.failure.is_some() {
            return false;
        }

        match slot {
            Slot::Rejected(err) => {
                self.failure = Some(err);
            }
            Slot::Accepted(entry, texture) => {
                self.entries.push(entry);

                match texture {
                    Ok(texture) => self.textures.push(texture),
                    Err(err) => self.failure = Some(err),
                }
            }
        }

        self.failure.is_none()
    }

    fn finish(self) -> ArchiveParse<'a> {
        match &self.failure {
            None => log::debug!(
                "Parsed {} textures from {} lumps",
                self.textures.len(),
                self.header.entry_count()
            ),
            Some(err) => log::error!("{err}"),
        }

        ArchiveParse {
            stage: Stage::Walked(Walk {
                header: self.header,
                entries: self.entries,
                textures: self.textures,
                failure: self.failure,
            }),
        }
    }
}

/// Parse a whole archive held in memory.  Decoded textures borrow from
/// `bytes`.
pub fn parse(bytes: &[u8]) -> ArchiveParse<'_> {
    parse_with_progress(bytes, |_| {})
}

/// Parse a whole archive, calling `progress` before each lump is processed
pub fn parse_with_progress(
    bytes: &[u8],
    mut progress: impl FnMut(Progress),
) -> ArchiveParse<'_> {
    let source = ByteSource::new(bytes);

    let header = match wad::read_header(&source) {
        Ok(header) => header,
        Err(err) => {
            log::error!("{err}");
            return ArchiveParse::header_rejected(err);
        }
    };

    let total = header.entry_count();
    let capacity = wad::slots_in_range(&source, &header) as usize;
    let mut collector = Collector::new(header, capacity);

    for index in 0..total {
        progress(Progress { index, total });

        if !collector.push(process_slot(&source, &header, index)) {
            break;
        }
    }

    collector.finish()
}
