//! Compact length encoding and a bounds-checked reader for wire bytes.
//!
//! # Wire Format
//!
//! Every list in a message is prefixed by its length encoded 7 bits per byte,
//! least-significant group first. The high bit of a byte is set when another
//! byte follows:
//!
//! | value   | bytes              |
//! |---------|--------------------|
//! | 0       | `00`               |
//! | 127     | `7f`               |
//! | 128     | `80 01`            |
//! | 16384   | `80 80 01`         |

use crate::error::{Result, TxError};

/// Max groups needed to carry a `usize` (ceil(64 / 7)).
const MAX_ENCODING_LENGTH: usize = 10;

/// Encode `len` as a compact length.
pub fn encode_length(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(3);
    write_length(&mut out, len);
    out
}

/// Append the compact encoding of `len` to `out`.
pub fn write_length(out: &mut Vec<u8>, len: usize) {
    let mut rem = len;
    loop {
        let elem = (rem & 0x7f) as u8;
        rem >>= 7;
        if rem == 0 {
            out.push(elem);
            break;
        }
        out.push(elem | 0x80);
    }
}

/// Decode a compact length from the start of `bytes`.
///
/// Returns the value and the number of bytes it occupied. Only the shortest
/// encoding of a value is accepted.
pub fn decode_length(bytes: &[u8]) -> Result<(usize, usize)> {
    let mut len: usize = 0;
    for (i, &elem) in bytes.iter().enumerate() {
        if i >= MAX_ENCODING_LENGTH {
            break;
        }
        let group = (elem & 0x7f) as usize;
        let shift = i * 7;
        // Bits shifted past the top of a usize mean the value does not fit.
        let shifted = match group.checked_shl(shift as u32) {
            Some(v) if v >> shift == group => v,
            _ if group == 0 => 0,
            _ => return Err(TxError::decode("compact length: value overflows usize")),
        };
        len |= shifted;
        if elem & 0x80 == 0 {
            // A zero final group after the first byte aliases a shorter encoding.
            if elem == 0 && i > 0 {
                return Err(TxError::decode("compact length: non-canonical encoding"));
            }
            return Ok((len, i + 1));
        }
    }
    if bytes.len() >= MAX_ENCODING_LENGTH {
        Err(TxError::decode("compact length: too many continuation bytes"))
    } else {
        Err(TxError::decode("compact length: unexpected end of input"))
    }
}

/// Cursor over wire bytes that reports truncation as a decode error.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        ByteReader { bytes, offset: 0 }
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.offset..]
    }

    pub(crate) fn peek_u8(&self) -> Option<u8> {
        self.bytes.get(self.offset).copied()
    }

    pub(crate) fn read_u8(&mut self, what: &str) -> Result<u8> {
        let byte = self
            .peek_u8()
            .ok_or_else(|| TxError::decode(format!("{}: unexpected end of input", what)))?;
        self.offset += 1;
        Ok(byte)
    }

    pub(crate) fn read_bytes(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or_else(|| {
                TxError::decode(format!(
                    "{}: need {} bytes at offset {}, have {}",
                    what,
                    len,
                    self.offset,
                    self.bytes.len() - self.offset
                ))
            })?;
        let slice = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(slice)
    }

    pub(crate) fn read_array<const N: usize>(&mut self, what: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, what)?);
        Ok(out)
    }

    pub(crate) fn read_length(&mut self) -> Result<usize> {
        let (len, consumed) = decode_length(self.remaining())?;
        self.offset += consumed;
        Ok(len)
    }
}
