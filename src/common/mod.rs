use alloc::string::String;

/// RGB triple as stored in a texture palette
pub type Color = [u8; 3];

/// Number of mip levels stored with every texture
pub const MIP_LEVELS: usize = 4;

/// Largest decoded lump size accepted, a 640x480 texture with all its mips
/// plus some slack
pub const MAX_LUMP_SIZE: u32 = 640 * 480 * 85 / 64;

/// Interpret a fixed-size name field.  The name ends at the first null byte,
/// or at the end of the field if there is none; bytes that are not valid
/// UTF-8 are replaced.
pub fn name_from_bytes(slice: &[u8]) -> String {
    let mut len = 0;

    while len < slice.len() {
        if slice[len] == 0u8 {
            break;
        }

        len += 1;
    }

    String::from_utf8_lossy(&slice[..len]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_stops_at_null() {
        assert_eq!(name_from_bytes(b"TEST\0\0garbage\0\0\0"), "TEST");
    }

    #[test]
    fn name_fills_field() {
        assert_eq!(name_from_bytes(b"in_16_characters"), "in_16_characters");
    }

    #[test]
    fn name_replaces_bad_utf8() {
        assert_eq!(name_from_bytes(b"a\xffb\0"), "a\u{fffd}b");
    }

    #[test]
    fn max_lump_size() {
        assert_eq!(MAX_LUMP_SIZE, 408_000);
    }
}
