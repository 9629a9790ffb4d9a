use super::repr::{kind, EntryConfig, Head, LumpEntry, LumpKind, Magic};
use crate::error::{ErrorKind, ParseError};
use crate::MAX_LUMP_SIZE;
use std::string::String;

#[test]
fn construct_head() {
    let expected_count = 13;
    let expected_dir_offset = 43234;
    let head = Head::new(Magic::Wad3, expected_count, expected_dir_offset);
    assert_eq!(head.magic(), Magic::Wad3);
    assert_eq!(head.entry_count(), expected_count);
    assert_eq!(head.directory_offset(), expected_dir_offset);
}

#[test]
fn parse_good_head() {
    let expected_count: u32 = 37;
    let expected_dir_offset: u32 = 600;

    for magic in [Magic::Wad2, Magic::Wad3] {
        let mut bytes = [0; Head::SIZE];
        bytes[0..4].copy_from_slice(&magic.bytes());
        bytes[4..8].copy_from_slice(&expected_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&expected_dir_offset.to_le_bytes());

        let head: Head = bytes.try_into().unwrap();

        assert_eq!(head.magic(), magic);
        assert_eq!(head.entry_count(), expected_count);
        assert_eq!(head.directory_offset(), expected_dir_offset);
    }
}

#[test]
fn parse_bad_head() {
    let mut bytes = [0; Head::SIZE];
    bytes[0..4].copy_from_slice(b"WAD9");

    let err = Head::try_from(bytes).unwrap_err();

    assert_eq!(err, ParseError::InvalidMagic(*b"WAD9"));
}

#[test]
fn magic_is_case_sensitive() {
    assert_eq!(Magic::from_bytes(*b"wad3"), None);
    assert_eq!(Magic::from_bytes(*b"WAD3"), Some(Magic::Wad3));
}

#[test]
fn header_sizes() {
    assert_eq!(Head::SIZE, 12);
    assert_eq!(LumpEntry::SIZE, 32);
}

fn config() -> EntryConfig {
    EntryConfig {
        offset: 200,
        disk_size: 111,
        size: 111,
        lump_kind: kind::TEXTURE,
        compression: 0,
        name: *b"hello\0\0\0\0\0\0\0\0\0\0\0",
    }
}

#[test]
fn construct_entry() {
    let entry = LumpEntry::from_config(config());

    assert_eq!(entry.name(), *b"hello\0\0\0\0\0\0\0\0\0\0\0");
    assert_eq!(entry.offset(), 200);
    assert_eq!(entry.disk_size(), 111);
    assert_eq!(entry.size(), 111);
    assert_eq!(entry.kind_tag(), kind::TEXTURE);
    assert_eq!(entry.kind(Magic::Wad3), LumpKind::Texture);
    assert_eq!(entry.name_to_string(), String::from("hello"));
    assert!(entry.validate(0).is_ok());
}

#[test]
fn parse_good_entry() {
    let expected_offset: u32 = 20049;
    let expected_disk_size: i32 = 3001;
    let expected_size: i32 = 3002;
    let expected_name = *b"howdy_partner\0\0\0";

    let mut bytes = [0; LumpEntry::SIZE];
    bytes[0..4].copy_from_slice(&expected_offset.to_le_bytes());
    bytes[4..8].copy_from_slice(&expected_disk_size.to_le_bytes());
    bytes[8..12].copy_from_slice(&expected_size.to_le_bytes());
    bytes[12] = kind::MIPTEX;
    bytes[13] = 0u8;
    bytes[16..].copy_from_slice(&expected_name);

    let entry = LumpEntry::from(bytes);

    assert_eq!(entry.name(), expected_name);
    assert_eq!(entry.offset(), expected_offset);
    assert_eq!(entry.disk_size(), expected_disk_size);
    assert_eq!(entry.size(), expected_size);
    assert_eq!(entry.kind(Magic::Wad2), LumpKind::MipTexture);
    assert_eq!(entry.compression(), 0);
}

#[test]
fn zero_fields_are_malformed() {
    let zero_offset = EntryConfig {
        offset: 0,
        ..config()
    };
    let zero_disk_size = EntryConfig {
        disk_size: 0,
        ..config()
    };
    let zero_size = EntryConfig {
        size: 0,
        ..config()
    };
    for config in [zero_offset, zero_disk_size, zero_size] {
        let e = LumpEntry::from_config(config).validate(7).unwrap_err();
        assert_eq!(e, ParseError::MalformedLump { index: 7 });
    }
}

#[test]
fn negative_sizes_are_accepted() {
    let negative_size = EntryConfig {
        size: -4,
        ..config()
    };
    let negative_disk_size = EntryConfig {
        disk_size: -5,
        ..config()
    };
    let both = EntryConfig {
        disk_size: i32::MIN,
        size: i32::MIN,
        ..config()
    };

    for config in [negative_size, negative_disk_size, both] {
        assert!(LumpEntry::from_config(config).validate(0).is_ok());
    }
}

#[test]
fn size_bound_is_exclusive() {
    let below = EntryConfig {
        size: MAX_LUMP_SIZE as i32 - 1,
        ..config()
    };
    assert!(LumpEntry::from_config(below).validate(0).is_ok());

    let at = EntryConfig {
        size: MAX_LUMP_SIZE as i32,
        ..config()
    };
    let e = LumpEntry::from_config(at).validate(3).unwrap_err();
    assert_eq!(e, ParseError::LumpTooLarge { index: 3, excess: 0 });

    let above = EntryConfig {
        size: MAX_LUMP_SIZE as i32 + 1000,
        ..config()
    };
    let e = LumpEntry::from_config(above).validate(4).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::LumpTooLarge);
    assert_eq!(e, ParseError::LumpTooLarge { index: 4, excess: 1000 });
}

#[test]
fn compressed_entry_is_accepted() {
    let compressed = EntryConfig {
        compression: 1,
        ..config()
    };
    let entry = LumpEntry::from_config(compressed);
    assert_eq!(entry.compression(), 1);
    assert!(entry.validate(0).is_ok());
}

#[test]
fn lump_kind_depends_on_magic() {
    assert_eq!(LumpKind::classify(0x40, Magic::Wad2), LumpKind::Palette);
    assert_eq!(LumpKind::classify(0x40, Magic::Wad3), LumpKind::Cache);
    assert_eq!(LumpKind::classify(0x42, Magic::Wad2), LumpKind::StatusBar);
    assert_eq!(LumpKind::classify(0x42, Magic::Wad3), LumpKind::Decal);
    assert_eq!(LumpKind::classify(0x43, Magic::Wad3), LumpKind::Texture);
    assert_eq!(LumpKind::classify(0x46, Magic::Wad3), LumpKind::Font);
    assert_eq!(LumpKind::classify(0x43, Magic::Wad2), LumpKind::Other(0x43));
    assert_eq!(LumpKind::Other(9).name(), "n/a");
    assert_eq!(LumpKind::Texture.name(), "texture");
}
