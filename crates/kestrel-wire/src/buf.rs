//! Byte-level writer and reader for the wallet wire.
//!
//! Integers travel as Bitcoin-style varints: values below `0xFD` in one
//! byte, then `0xFD`+u16, `0xFE`+u32, `0xFF`+u64, all little-endian. The
//! all-ones value `0xFFFF_FFFF_FFFF_FFFF` doubles as the "absent" sentinel
//! for optional fields. Decoding insists on minimal encodings so every
//! recognised structure has exactly one byte representation.

use crate::error::WireError;

/// Sentinel varint marking an absent optional value.
pub const NEGATIVE_ONE: u64 = u64::MAX;

/// Append-only frame writer.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// New empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the writer, yielding the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Append a single byte.
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Append raw bytes with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append a Bitcoin-style varint.
    pub fn write_varint(&mut self, value: u64) {
        match value {
            0..=0xFC => self.buf.push(value as u8),
            0xFD..=0xFFFF => {
                self.buf.push(0xFD);
                self.buf.extend_from_slice(&(value as u16).to_le_bytes());
            }
            0x1_0000..=0xFFFF_FFFF => {
                self.buf.push(0xFE);
                self.buf.extend_from_slice(&(value as u32).to_le_bytes());
            }
            _ => {
                self.buf.push(0xFF);
                self.buf.extend_from_slice(&value.to_le_bytes());
            }
        }
    }

    /// Append the "absent" sentinel.
    pub fn write_negative_one(&mut self) {
        self.write_varint(NEGATIVE_ONE);
    }

    /// Append varint-length-prefixed bytes.
    pub fn write_varint_bytes(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_bytes(bytes);
    }

    /// Append a string as varint length plus UTF-8 bytes.
    pub fn write_string(&mut self, value: &str) {
        self.write_varint_bytes(value.as_bytes());
    }

    /// Append optional bytes: the sentinel when absent, length-prefixed
    /// bytes otherwise.
    pub fn write_optional_bytes(&mut self, bytes: Option<&[u8]>) {
        match bytes {
            Some(bytes) => self.write_varint_bytes(bytes),
            None => self.write_negative_one(),
        }
    }

    /// Append an optional string with the same layout as optional bytes.
    pub fn write_optional_string(&mut self, value: Option<&str>) {
        self.write_optional_bytes(value.map(str::as_bytes));
    }

    /// Append an optional boolean: `0`, `1`, or `0xFF` for absent.
    pub fn write_optional_bool(&mut self, value: Option<bool>) {
        self.write_byte(match value {
            Some(true) => 1,
            Some(false) => 0,
            None => 0xFF,
        });
    }

    /// Append an optional u32: the sentinel when absent, a varint of the
    /// value otherwise.
    pub fn write_optional_u32(&mut self, value: Option<u32>) {
        match value {
            Some(value) => self.write_varint(u64::from(value)),
            None => self.write_negative_one(),
        }
    }

    /// Append an optional string slice: the sentinel when absent, a varint
    /// count plus each string otherwise.
    pub fn write_string_slice(&mut self, values: Option<&[String]>) {
        match values {
            Some(values) => {
                self.write_varint(values.len() as u64);
                for value in values {
                    self.write_string(value);
                }
            }
            None => self.write_negative_one(),
        }
    }
}

/// Cursor-style frame reader.
#[derive(Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Read from the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Consume one byte.
    pub fn read_byte(&mut self) -> Result<u8, WireError> {
        let bytes = self.read_bytes(1)?;
        Ok(bytes[0])
    }

    /// Consume exactly `count` bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8], WireError> {
        if self.remaining() < count {
            return Err(WireError::TruncatedFrame);
        }
        let bytes = &self.data[self.pos..self.pos + count];
        self.pos += count;
        Ok(bytes)
    }

    /// Consume everything left in the frame.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }

    /// Consume a Bitcoin-style varint, rejecting non-minimal encodings.
    pub fn read_varint(&mut self) -> Result<u64, WireError> {
        let first = self.read_byte()?;
        match first {
            0..=0xFC => Ok(u64::from(first)),
            0xFD => {
                let value = u64::from(u16::from_le_bytes(self.read_array()?));
                if value < 0xFD {
                    return Err(WireError::MalformedVarint);
                }
                Ok(value)
            }
            0xFE => {
                let value = u64::from(u32::from_le_bytes(self.read_array()?));
                if value <= 0xFFFF {
                    return Err(WireError::MalformedVarint);
                }
                Ok(value)
            }
            0xFF => {
                let value = u64::from_le_bytes(self.read_array()?);
                if value <= 0xFFFF_FFFF {
                    return Err(WireError::MalformedVarint);
                }
                Ok(value)
            }
        }
    }

    /// Consume exactly `N` bytes as a fixed-size array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let bytes = self.read_bytes(N)?;
        Ok(bytes.try_into().expect("read_bytes returns the requested length"))
    }

    /// Consume a varint length, bounded by the bytes actually present.
    fn read_length(&mut self) -> Result<usize, WireError> {
        let value = self.read_varint()?;
        // A length cannot exceed what is physically present; this bounds
        // allocations before they happen.
        usize::try_from(value)
            .ok()
            .filter(|len| *len <= self.remaining())
            .ok_or(WireError::TruncatedFrame)
    }

    /// Consume varint-length-prefixed bytes.
    pub fn read_varint_bytes(&mut self) -> Result<Vec<u8>, WireError> {
        let len = self.read_length()?;
        Ok(self.read_bytes(len)?.to_vec())
    }

    /// Consume a varint-length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, WireError> {
        let bytes = self.read_varint_bytes()?;
        String::from_utf8(bytes).map_err(|_| WireError::InvalidUtf8)
    }

    /// Consume optional bytes (sentinel-aware).
    pub fn read_optional_bytes(&mut self) -> Result<Option<Vec<u8>>, WireError> {
        if self.read_sentinel()? {
            return Ok(None);
        }
        self.read_varint_bytes().map(Some)
    }

    /// Consume an optional string (sentinel-aware).
    pub fn read_optional_string(&mut self) -> Result<Option<String>, WireError> {
        match self.read_optional_bytes()? {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| WireError::InvalidUtf8),
            None => Ok(None),
        }
    }

    /// Consume an optional boolean byte.
    pub fn read_optional_bool(&mut self) -> Result<Option<bool>, WireError> {
        match self.read_byte()? {
            0 => Ok(Some(false)),
            1 => Ok(Some(true)),
            0xFF => Ok(None),
            other => Err(WireError::BadOptionalTag(other)),
        }
    }

    /// Consume an optional u32 (sentinel-aware).
    pub fn read_optional_u32(&mut self) -> Result<Option<u32>, WireError> {
        if self.read_sentinel()? {
            return Ok(None);
        }
        let value = self.read_varint()?;
        u32::try_from(value)
            .map(Some)
            .map_err(|_| WireError::MalformedVarint)
    }

    /// Consume an optional string slice (sentinel-aware).
    pub fn read_string_slice(&mut self) -> Result<Option<Vec<String>>, WireError> {
        if self.read_sentinel()? {
            return Ok(None);
        }
        let count = self.read_varint()?;
        // Each entry costs at least one byte on the wire.
        if count > self.remaining() as u64 {
            return Err(WireError::TruncatedFrame);
        }
        let mut values = Vec::with_capacity(count as usize);
        for _ in 0..count {
            values.push(self.read_string()?);
        }
        Ok(Some(values))
    }

    /// Fail with [`WireError::TrailingBytes`] unless the frame is fully
    /// consumed.
    pub fn expect_end(&self) -> Result<(), WireError> {
        match self.remaining() {
            0 => Ok(()),
            trailing => Err(WireError::TrailingBytes(trailing)),
        }
    }

    /// True (and consumes) when the next varint is the absent sentinel;
    /// false leaves the cursor untouched.
    pub fn read_sentinel(&mut self) -> Result<bool, WireError> {
        let start = self.pos;
        if self.read_byte()? != 0xFF {
            self.pos = start;
            return Ok(false);
        }
        if self.remaining() < 8 || self.data[self.pos..self.pos + 8] != [0xFF; 8] {
            self.pos = start;
            return Ok(false);
        }
        self.pos += 8;
        Ok(true)
    }
}
