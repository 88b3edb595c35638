//! Optional file header.
//!
//! The legacy format is a bare concatenation of records; consumers infer the record count from
//! the file length, and can't tell a truncated file from a complete one. [Framing::Headered]
//! prefixes the records with a small header so readers can check both the layout and the count.
//! It is opt-in; [Framing::Raw] output stays byte-for-byte compatible with existing loaders.
//!
//! # Header Layout
//!
//! ```text
//! [u8; 4]  magic         "VBUF"
//! u16      version       1
//! u16      stride        36
//! u32      record count
//! u32      reserved      0
//! ```
//!
//! All fields are little-endian.

use crate::{error::DecodeError, record::RECORD_SIZE};

/// Leading bytes of a headered vertex buffer.
pub const MAGIC: [u8; 4] = *b"VBUF";

/// The only header version this crate reads & writes.
pub const VERSION: u16 = 1;

/// Size in bytes of an encoded [Header].
pub const HEADER_SIZE: usize = 16;

/// How records are framed in the output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Framing {
    /// Records only; compatible with GameMaker's `buffer_load`.
    #[default]
    Raw,
    /// A [Header] followed by the records.
    Headered,
}

impl Framing {
    /// Guess the framing of `bytes` by looking for [MAGIC].
    ///
    /// A raw buffer whose first normal happens to encode as `"VBUF"` (`x ≈ 1.365e4`) would be
    /// misdetected; real unit normals never do.
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&MAGIC) {
            Self::Headered
        } else {
            Self::Raw
        }
    }

    /// Bytes written before the first record.
    #[inline]
    pub const fn prefix_len(self) -> usize {
        match self {
            Self::Raw => 0,
            Self::Headered => HEADER_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
    pub version: u16,
    pub stride: u16,
    pub record_count: u32,
}

impl Header {
    pub fn new(record_count: u32) -> Self {
        Self {
            version: VERSION,
            stride: RECORD_SIZE as u16,
            record_count,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4..6].copy_from_slice(&self.version.to_le_bytes());
        out[6..8].copy_from_slice(&self.stride.to_le_bytes());
        out[8..12].copy_from_slice(&self.record_count.to_le_bytes());
        // 12..16 reserved
        out
    }

    /// Parse and validate a header.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Result<Self, DecodeError> {
        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != MAGIC {
            return Err(DecodeError::Magic {
                expected: MAGIC,
                found: magic,
            });
        }
        let header = Self {
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
            stride: u16::from_le_bytes([bytes[6], bytes[7]]),
            record_count: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
        };
        if header.version != VERSION {
            return Err(DecodeError::Version(header.version));
        }
        if header.stride as usize != RECORD_SIZE {
            return Err(DecodeError::Stride(header.stride));
        }
        Ok(header)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header_bytes() {
        let bytes = Header::new(3).to_bytes();
        assert_eq!(&bytes[..4], b"VBUF");
        assert_eq!(&bytes[4..8], &[1, 0, 36, 0]);
        assert_eq!(&bytes[8..], &[3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Header::from_bytes(&bytes).unwrap(), Header::new(3));
        assert_eq!(Framing::detect(&bytes), Framing::Headered);
    }

    #[test]
    fn rejects_foreign_headers() {
        let mut bytes = Header::new(1).to_bytes();
        bytes[6] = 40;
        assert!(matches!(Header::from_bytes(&bytes), Err(DecodeError::Stride(40))));
        bytes[0] = b'X';
        assert!(matches!(Header::from_bytes(&bytes), Err(DecodeError::Magic { .. })));
        assert_eq!(Framing::detect(&bytes), Framing::Raw);
    }

    #[test]
    fn magic_as_a_normal() {
        let x = f32::from_le_bytes(MAGIC);
        assert!((x - 1.365e4).abs() < 5.0);
        assert_eq!(Framing::detect(&x.to_le_bytes()), Framing::Headered);
        assert_eq!(Framing::detect(&1.0f32.to_le_bytes()), Framing::Raw);
    }
}
