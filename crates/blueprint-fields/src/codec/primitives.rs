//! Primitive reads and writes for the compact wire format.
//!
//! Implements the bounds-checked byte reader/writer pair and the 1-4 byte
//! compact integer encoding shared by schema field names and value lengths.
//!
//! Compact integer layout, width declared by the leading tag bits:
//!
//! ```text
//! 0xxxxxxx                       1 byte,  0..=127
//! 10xxxxxx B                     2 bytes, 128..=16383
//! 110xxxxx B B                   3 bytes, 16384..=2097151
//! 1110xxxx B B B                 4 bytes, up to 2^28 - 1
//! ```
//!
//! Payload bits are big-endian.

use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_COMPACT;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives with
/// bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        if self.pos >= self.data.len() {
            return Err(DecodeError::TruncatedInput { context });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.data.len() - self.pos {
            return Err(DecodeError::TruncatedInput { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a big-endian u16.
    #[inline]
    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        let bytes = self.read_bytes(2, context)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a compact integer (1-4 bytes, width declared by tag bits).
    pub fn read_compact(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        let first = self.read_byte(context)?;
        let (width, mask) = if first & 0x80 == 0 {
            (1usize, 0x7Fu8)
        } else if first & 0xC0 == 0x80 {
            (2, 0x3F)
        } else if first & 0xE0 == 0xC0 {
            (3, 0x1F)
        } else if first & 0xF0 == 0xE0 {
            (4, 0x0F)
        } else {
            return Err(DecodeError::SchemaValidationFailed {
                context: "compact integer tag",
            });
        };

        let mut value = (first & mask) as u32;
        for _ in 1..width {
            let byte = self.read_byte(context)?;
            value = (value << 8) | byte as u32;
        }
        Ok(value)
    }

    /// Reads a compact-length-prefixed UTF-8 string.
    pub fn read_string(
        &mut self,
        max_len: usize,
        context: &'static str,
    ) -> Result<String, DecodeError> {
        let len = self.read_compact(context)? as usize;
        if len > max_len {
            return Err(DecodeError::InputTooLarge {
                context,
                len,
                max: max_len,
            });
        }
        let bytes = self.read_bytes(len, context)?;
        std::str::from_utf8(bytes)
            .map(|s| s.to_string())
            .map_err(|_| DecodeError::InvalidUtf8 { context })
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a big-endian u16.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a compact integer, using the smallest width that fits.
    pub fn write_compact(&mut self, value: u32, context: &'static str) -> Result<(), EncodeError> {
        if value <= 0x7F {
            self.write_byte(value as u8);
        } else if value <= 0x3FFF {
            self.write_byte(0x80 | (value >> 8) as u8);
            self.write_byte(value as u8);
        } else if value <= 0x1F_FFFF {
            self.write_byte(0xC0 | (value >> 16) as u8);
            self.write_byte((value >> 8) as u8);
            self.write_byte(value as u8);
        } else if value <= MAX_COMPACT {
            self.write_byte(0xE0 | (value >> 24) as u8);
            self.write_byte((value >> 16) as u8);
            self.write_byte((value >> 8) as u8);
            self.write_byte(value as u8);
        } else {
            return Err(EncodeError::ValueOutOfRange {
                context,
                value: value as u64,
                max: MAX_COMPACT as u64,
            });
        }
        Ok(())
    }

    /// Writes a length as a compact integer, checking the usize fits.
    pub fn write_len(&mut self, len: usize, context: &'static str) -> Result<(), EncodeError> {
        if len > MAX_COMPACT as usize {
            return Err(EncodeError::ValueOutOfRange {
                context,
                value: len as u64,
                max: MAX_COMPACT as u64,
            });
        }
        self.write_compact(len as u32, context)
    }

    /// Writes a compact-length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str, context: &'static str) -> Result<(), EncodeError> {
        self.write_len(s.len(), context)?;
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: u32) -> (u32, usize) {
        let mut writer = Writer::new();
        writer.write_compact(value, "test").unwrap();
        let len = writer.len();

        let mut reader = Reader::new(writer.as_bytes());
        let decoded = reader.read_compact("test").unwrap();
        assert!(reader.is_empty(), "leftover bytes for {}", value);
        (decoded, len)
    }

    #[test]
    fn test_compact_roundtrip_boundaries() {
        // Every tag-width transition.
        for (value, expected_width) in [
            (0u32, 1usize),
            (1, 1),
            (127, 1),
            (128, 2),
            (16383, 2),
            (16384, 3),
            (2_097_151, 3),
            (2_097_152, 4),
            (MAX_COMPACT, 4),
        ] {
            let (decoded, width) = roundtrip(value);
            assert_eq!(decoded, value, "failed for {}", value);
            assert_eq!(width, expected_width, "wrong width for {}", value);
        }
    }

    #[test]
    fn test_compact_out_of_range() {
        let mut writer = Writer::new();
        let result = writer.write_compact(MAX_COMPACT + 1, "test");
        assert!(matches!(result, Err(EncodeError::ValueOutOfRange { .. })));
    }

    #[test]
    fn test_compact_truncated() {
        // 2-byte tag with no continuation byte.
        let mut reader = Reader::new(&[0x81]);
        let result = reader.read_compact("test");
        assert!(matches!(result, Err(DecodeError::TruncatedInput { .. })));

        // 4-byte tag with only two continuation bytes.
        let mut reader = Reader::new(&[0xE0, 0x01, 0x02]);
        let result = reader.read_compact("test");
        assert!(matches!(result, Err(DecodeError::TruncatedInput { .. })));
    }

    #[test]
    fn test_compact_invalid_tag() {
        let mut reader = Reader::new(&[0xF0, 0, 0, 0, 0]);
        let result = reader.read_compact("test");
        assert!(matches!(
            result,
            Err(DecodeError::SchemaValidationFailed { .. })
        ));
    }

    #[test]
    fn test_string_roundtrip() {
        for s in ["", "hello", "unicode: \u{1F600}"] {
            let mut writer = Writer::new();
            writer.write_string(s, "test").unwrap();

            let mut reader = Reader::new(writer.as_bytes());
            let decoded = reader.read_string(1000, "test").unwrap();
            assert_eq!(s, decoded);
        }
    }

    #[test]
    fn test_string_too_long() {
        let mut writer = Writer::new();
        writer.write_string(&"x".repeat(500), "test").unwrap();

        let mut reader = Reader::new(writer.as_bytes());
        let result = reader.read_string(100, "test");
        assert!(matches!(
            result,
            Err(DecodeError::InputTooLarge { max: 100, .. })
        ));
    }

    #[test]
    fn test_string_invalid_utf8() {
        let mut writer = Writer::new();
        writer.write_len(2, "test").unwrap();
        writer.write_bytes(&[0xFF, 0xFE]);

        let mut reader = Reader::new(writer.as_bytes());
        let result = reader.read_string(100, "test");
        assert!(matches!(result, Err(DecodeError::InvalidUtf8 { .. })));
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = Reader::new(&[0u8; 5]);
        let result = reader.read_bytes(10, "test");
        assert!(matches!(result, Err(DecodeError::TruncatedInput { .. })));
    }

    #[test]
    fn test_u16_roundtrip() {
        for v in [0u16, 1, 255, 256, u16::MAX] {
            let mut writer = Writer::new();
            writer.write_u16(v);

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_u16("test").unwrap(), v);
        }
    }
}
