//! Bounds-checked access to an archive held in memory

use crate::error::OutOfBounds;

/// Read-only view of a whole archive.  Every accessor takes an absolute
/// offset and fails with [`OutOfBounds`] instead of reading past the end.
#[derive(Clone, Copy, Debug)]
pub struct ByteSource<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteSource<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Check that `len` bytes starting at `offset` lie inside the buffer,
    /// returning the range as `usize` bounds
    pub fn check(
        &self,
        offset: u64,
        len: u64,
    ) -> Result<(usize, usize), OutOfBounds> {
        let bounds = OutOfBounds { offset, len };
        let end = offset.checked_add(len).ok_or(bounds)?;

        if end > self.bytes.len() as u64 {
            return Err(bounds);
        }

        // end fits in the buffer length, so both fit in usize
        Ok((offset as usize, end as usize))
    }

    pub fn slice(&self, offset: u64, len: u64) -> Result<&'a [u8], OutOfBounds> {
        let (start, end) = self.check(offset, len)?;
        Ok(&self.bytes[start..end])
    }

    pub fn array<const N: usize>(
        &self,
        offset: u64,
    ) -> Result<[u8; N], OutOfBounds> {
        let slice = self.slice(offset, N as u64)?;
        let mut array = [0u8; N];
        array.copy_from_slice(slice);
        Ok(array)
    }

    pub fn u16_le(&self, offset: u64) -> Result<u16, OutOfBounds> {
        self.array(offset).map(u16::from_le_bytes)
    }

    pub fn u32_le(&self, offset: u64) -> Result<u32, OutOfBounds> {
        self.array(offset).map(u32::from_le_bytes)
    }

    pub fn i32_le(&self, offset: u64) -> Result<i32, OutOfBounds> {
        self.array(offset).map(i32::from_le_bytes)
    }
}

impl<'a> From<&'a [u8]> for ByteSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}
