//! Length-prefixed binary primitives over byte buffers
//!
//! All multi-byte integers in a code section are little-endian. Byte
//! blocks and strings are prefixed with an `i32` length; strings are GBK
//! encoded and carry a trailing NUL inside the prefixed range.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{EplError, Result};

/// Sequential reader over a borrowed section buffer.
///
/// The cursor advances monotonically; no backtracking is performed by any
/// caller. Fixed-size reads past the end fail with
/// [`EplError::TruncatedInput`]; length prefixes that overrun the buffer
/// fail with [`EplError::MalformedLength`].
pub struct SectionReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl<'a> SectionReader<'a> {
    /// Create a reader over a raw section buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
        }
    }

    /// Current byte offset from the start of the buffer.
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        let len = self.cursor.get_ref().len() as u64;
        (len.saturating_sub(self.cursor.position())) as usize
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(EplError::TruncatedInput {
                offset: self.position(),
                needed,
                remaining,
            });
        }
        Ok(())
    }

    /// Read a little-endian 32-bit integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.ensure(4)?;
        Ok(self.cursor.read_i32::<LittleEndian>()?)
    }

    /// Read exactly `n` bytes.
    pub fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        self.ensure(n)?;
        let mut buf = vec![0u8; n];
        self.cursor.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read a fixed 16-byte block.
    pub fn read_block16(&mut self) -> Result<[u8; 16]> {
        self.ensure(16)?;
        let mut buf = [0u8; 16];
        self.cursor.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Advance the cursor over `n` bytes without interpreting them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.cursor.set_position(self.position() + n as u64);
        Ok(())
    }

    /// Read an `i32` length prefix followed by that many bytes.
    pub fn read_bytes_with_length_prefix(&mut self) -> Result<Vec<u8>> {
        let offset = self.position();
        let length = self.read_i32()?;
        let remaining = self.remaining();
        if length < 0 || length as usize > remaining {
            return Err(EplError::MalformedLength {
                offset,
                length: length as i64,
                remaining,
            });
        }
        self.read_exact(length as usize)
    }

    /// Read a length-prefixed GBK string.
    ///
    /// The decoded text ends at the first NUL inside the prefixed range;
    /// undecodable bytes are replaced rather than failing, matching how
    /// the files are produced in practice.
    pub fn read_string_with_length_prefix(&mut self) -> Result<String> {
        let bytes = self.read_bytes_with_length_prefix()?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        let (text, _, _) = encoding_rs::GBK.decode(&bytes[..end]);
        Ok(text.into_owned())
    }
}

/// Sequential writer building a section buffer.
pub struct SectionWriter {
    buf: Vec<u8>,
}

impl SectionWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check whether anything has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Write a little-endian 32-bit integer.
    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.buf.write_i32::<LittleEndian>(value)?;
        Ok(())
    }

    /// Write raw bytes with no prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Write `n` zero bytes.
    pub fn write_zeros(&mut self, n: usize) -> Result<()> {
        self.buf.resize(self.buf.len() + n, 0);
        Ok(())
    }

    /// Write an `i32` length prefix followed by the bytes.
    pub fn write_bytes_with_length_prefix(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > i32::MAX as usize {
            return Err(EplError::InvalidFormat(format!(
                "byte block of {} bytes exceeds the i32 length prefix",
                bytes.len()
            )));
        }
        self.write_i32(bytes.len() as i32)?;
        self.write_bytes(bytes)
    }

    /// Write a length-prefixed GBK string with a trailing NUL.
    pub fn write_string_with_length_prefix(&mut self, text: &str) -> Result<()> {
        let (encoded, _, _) = encoding_rs::GBK.encode(text);
        let mut bytes = encoded.into_owned();
        bytes.push(0);
        self.write_bytes_with_length_prefix(&bytes)
    }

    /// Consume the writer and return the built buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for SectionWriter {
    fn default() -> Self {
        Self::new()
    }
}
