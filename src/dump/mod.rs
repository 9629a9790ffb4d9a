//! Human-readable reports on an archive's header, directory and textures
//!
//! Each report is a [`Display`](core::fmt::Display) adapter, so it can be
//! printed, logged or written into a string.

use crate::archive::Archive;
use crate::lump::TextureRecord;
use crate::wad::{Head, LumpEntry, Magic};
use core::fmt;

pub struct HeaderReport<'a>(pub &'a Head);

impl fmt::Display for HeaderReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let head = self.0;

        writeln!(f)?;
        writeln!(f, " Wad information:")?;
        writeln!(f)?;
        writeln!(f, "        Identification: {}", head.magic())?;
        writeln!(f, "       Number of lumps: {}", head.entry_count())?;
        writeln!(
            f,
            "   Offset to infotable: {:#010x}",
            head.directory_offset()
        )
    }
}

pub struct LumpTable<'a> {
    pub magic: Magic,
    pub entries: &'a [LumpEntry],
}

impl fmt::Display for LumpTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, " Lump information:")?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<4} {:<16} {:<16} {:<16} {:<10} {:<11} Name",
            "ID", "Offset", "Disk (KiB)", "Size (KiB)", "Type", "Compression"
        )?;

        let mut disk_total = 0i64;

        for (n, entry) in self.entries.iter().enumerate() {
            disk_total += i64::from(entry.disk_size());

            write!(
                f,
                "{:<4} {:<16} {:<16.3} {:<16.3} {:<10} ",
                n + 1,
                format!("{:#010x}", entry.offset()),
                kib(i64::from(entry.disk_size())),
                kib(i64::from(entry.size())),
                entry.kind(self.magic).name(),
            )?;

            match entry.compression() {
                0 => write!(f, "{:<11} ", "n/a")?,
                tag => write!(f, "{:<11} ", tag)?,
            }

            writeln!(f, "{}", PrintableName(&entry.name()))?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Total size of data inside lumps: {:.3} KiB",
            kib(disk_total)
        )
    }
}

pub struct TextureTable<'a>(pub &'a [TextureRecord<'a>]);

impl fmt::Display for TextureTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, " Texture data:")?;
        writeln!(f)?;
        writeln!(f, "{:<4} {:<11} {:<7} Name", "ID", "Resolution", "Colors")?;

        for (n, texture) in self.0.iter().enumerate() {
            writeln!(
                f,
                "{:<4} {:<11} {:<7} {}.bmp",
                n + 1,
                format!("{}x{}", texture.width(), texture.height()),
                texture.palette_len(),
                texture.name()
            )?;
        }

        Ok(())
    }
}

/// Header, directory and texture reports in sequence
pub struct ArchiveReport<'a>(pub &'a Archive<'a>);

impl fmt::Display for ArchiveReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let archive = self.0;

        write!(f, "{}", HeaderReport(archive.header()))?;
        write!(
            f,
            "{}",
            LumpTable {
                magic: archive.magic(),
                entries: archive.entries(),
            }
        )?;
        write!(f, "{}", TextureTable(archive.textures()))
    }
}

/// Name field up to its null terminator, with unprintable bytes shown as `?`
struct PrintableName<'a>(&'a [u8]);

impl fmt::Display for PrintableName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use fmt::Write;

        for &b in self.0.iter().take_while(|&&b| b != 0) {
            if (b' '..=b'~').contains(&b) {
                f.write_char(char::from(b))?;
            } else {
                f.write_char('?')?;
            }
        }

        Ok(())
    }
}

fn kib(bytes: i64) -> f64 {
    bytes as f64 / 1024.0
}
