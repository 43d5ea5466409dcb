//! Canonical byte encoding shared by arguments, code descriptors, the body
//! and the header.
//!
//! The layout follows the network's `bytesrepr` conventions:
//!
//! - fixed-width integers are little-endian;
//! - variable-length byte strings and UTF-8 strings carry a `u32` length
//!   prefix;
//! - sequences carry a `u32` element count;
//! - fixed-size hashes are written raw, without a prefix.
//!
//! The hashes that give a deploy its identity are computed over exactly these
//! bytes, so nothing here may depend on platform, allocation or map order.

use thiserror::Error;

/// A value failed to encode or decode canonically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    #[error("argument name must not be empty")]
    EmptyArgName,

    #[error("duplicate argument name: {0}")]
    DuplicateArgName(String),

    #[error("{width} value {value:?} is negative")]
    NegativeUnsigned { width: &'static str, value: String },

    #[error("{width} value {value:?} is not a decimal integer")]
    InvalidDecimal { width: &'static str, value: String },

    #[error("{width} value {value} does not fit in {bits} bits")]
    Overflow {
        width: &'static str,
        value: String,
        bits: usize,
    },

    #[error("list mixes element types: expected tag {expected}, found tag {found}")]
    HeterogeneousList { expected: u8, found: u8 },

    #[error("invalid access rights {0:#04x}")]
    InvalidAccessRights(u8),

    #[error("length {0} does not fit in a u32 prefix")]
    TooLong(usize),

    #[error("expected a {expected}-byte hash, got {actual} bytes")]
    InvalidHashLength { expected: usize, actual: usize },

    #[error("unknown type tag {0}")]
    UnknownTag(u8),

    #[error("invalid flag byte {0}")]
    InvalidFlag(u8),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("string is not valid UTF-8")]
    InvalidUtf8,

    #[error("integer encoding is not minimal")]
    NonCanonicalInteger,

    #[error("value nesting exceeds {0} levels")]
    NestingTooDeep(usize),
}

/// Types with a canonical wire encoding.
pub trait ToBytes {
    /// Appends the canonical encoding of `self` to `buf`.
    fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError>;

    /// Returns the canonical encoding of `self`.
    fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        let mut buf = Vec::with_capacity(64);
        self.write_bytes(&mut buf)?;
        Ok(buf)
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Writes a `u32` length or count prefix.
pub(crate) fn write_len(buf: &mut Vec<u8>, len: usize) -> Result<(), EncodingError> {
    let len = u32::try_from(len).map_err(|_| EncodingError::TooLong(len))?;
    buf.extend_from_slice(&len.to_le_bytes());
    Ok(())
}

/// Writes a length-prefixed byte string.
pub(crate) fn write_bytes(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<(), EncodingError> {
    write_len(buf, bytes.len())?;
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Writes a length-prefixed UTF-8 string.
pub(crate) fn write_string(buf: &mut Vec<u8>, s: &str) -> Result<(), EncodingError> {
    write_bytes(buf, s.as_bytes())
}

pub(crate) fn write_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_le_bytes());
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Cursor over canonical bytes. Every read is bounds-checked.
pub(crate) struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], EncodingError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(EncodingError::UnexpectedEof)?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8, EncodingError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], EncodingError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32, EncodingError> {
        self.read_array::<4>().map(u32::from_le_bytes)
    }

    pub(crate) fn read_i32(&mut self) -> Result<i32, EncodingError> {
        self.read_array::<4>().map(i32::from_le_bytes)
    }

    pub(crate) fn read_u64(&mut self) -> Result<u64, EncodingError> {
        self.read_array::<8>().map(u64::from_le_bytes)
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64, EncodingError> {
        self.read_array::<8>().map(i64::from_le_bytes)
    }

    pub(crate) fn read_len(&mut self) -> Result<usize, EncodingError> {
        self.read_u32().map(|len| len as usize)
    }

    pub(crate) fn read_slice(&mut self, n: usize) -> Result<&'a [u8], EncodingError> {
        self.take(n)
    }

    pub(crate) fn read_bytes(&mut self) -> Result<Vec<u8>, EncodingError> {
        let len = self.read_len()?;
        Ok(self.take(len)?.to_vec())
    }

    pub(crate) fn read_string(&mut self) -> Result<String, EncodingError> {
        String::from_utf8(self.read_bytes()?).map_err(|_| EncodingError::InvalidUtf8)
    }

    /// Fails unless every input byte has been consumed.
    pub(crate) fn finish(self) -> Result<(), EncodingError> {
        match self.bytes.len() - self.pos {
            0 => Ok(()),
            rest => Err(EncodingError::TrailingBytes(rest)),
        }
    }
}

// ---------------------------------------------------------------------------
// Serde helpers: byte fields as hex strings
// ---------------------------------------------------------------------------

/// Serde helper for byte fields that should read as hex in JSON.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Code {
///     #[serde(with = "crate::deploy::codec::hex_bytes")]
///     module_bytes: Vec<u8>,
/// }
/// ```
pub mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        hex::decode(hex_str).map_err(serde::de::Error::custom)
    }
}

/// Serde helper for fixed-size byte arrays that should read as hex in JSON.
pub mod hex_array {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer, const N: usize>(
        bytes: &[u8; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(
        deserializer: D,
    ) -> Result<[u8; N], D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        let mut out = [0u8; N];
        hex::decode_to_slice(hex_str, &mut out).map_err(serde::de::Error::custom)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_u32_length_prefixed() {
        let mut buf = Vec::new();
        write_string(&mut buf, "abc").unwrap();
        assert_eq!(buf, vec![3, 0, 0, 0, b'a', b'b', b'c']);
    }

    #[test]
    fn u64_is_little_endian() {
        let mut buf = Vec::new();
        write_u64(&mut buf, 0x0102);
        assert_eq!(buf, vec![0x02, 0x01, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn reader_reports_truncation() {
        let mut reader = Reader::new(&[5, 0, 0, 0, b'a']);
        assert_eq!(reader.read_bytes(), Err(EncodingError::UnexpectedEof));
    }

    #[test]
    fn reader_reports_trailing_bytes() {
        let mut reader = Reader::new(&[1, 2, 3]);
        reader.read_u8().unwrap();
        assert_eq!(reader.finish(), Err(EncodingError::TrailingBytes(2)));
    }

    #[test]
    fn reader_rejects_invalid_utf8() {
        let mut reader = Reader::new(&[2, 0, 0, 0, 0xff, 0xfe]);
        assert_eq!(reader.read_string(), Err(EncodingError::InvalidUtf8));
    }

    #[test]
    fn reader_huge_length_does_not_overflow() {
        let mut reader = Reader::new(&[0xff, 0xff, 0xff, 0xff]);
        assert_eq!(reader.read_bytes(), Err(EncodingError::UnexpectedEof));
    }
}
