//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Bounds-checked reader over an in-memory .mo image
//!
//! All reads are byte-exact: nothing here interprets bytes as text.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use thiserror::Error;

/// Byte order of the 32-bit fields in a .mo file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endian {
    #[default]
    Little,
    Big,
}

impl Endian {
    /// Decode a u32 from the first four bytes of `buf`
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }
}

impl std::fmt::Display for Endian {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endian::Little => write!(f, "little-endian"),
            Endian::Big => write!(f, "big-endian"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("read of {len} bytes at offset {offset} exceeds buffer of {size} bytes")]
    OutOfBounds { offset: usize, len: usize, size: usize },
}

/// Cursor over an immutable byte buffer
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the current position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Move to an absolute offset. Seeking to the very end is allowed.
    pub fn seek(&mut self, offset: usize) -> Result<(), CursorError> {
        if offset > self.data.len() {
            return Err(self.out_of_bounds(offset, 0));
        }
        self.pos = offset;
        Ok(())
    }

    /// Borrow `len` bytes starting at absolute `offset`.
    ///
    /// The returned slice lives as long as the underlying buffer, not the cursor.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], CursorError> {
        let end = offset
            .checked_add(len)
            .ok_or_else(|| self.out_of_bounds(offset, len))?;
        self.data
            .get(offset..end)
            .ok_or_else(|| self.out_of_bounds(offset, len))
    }

    /// Read a u32 at the current position and advance past it
    pub fn read_u32(&mut self, endian: Endian) -> Result<u32, CursorError> {
        let value = self.read_u32_at(self.pos, endian)?;
        self.pos += 4;
        Ok(value)
    }

    pub fn read_u32_le(&mut self) -> Result<u32, CursorError> {
        self.read_u32(Endian::Little)
    }

    pub fn read_u32_be(&mut self) -> Result<u32, CursorError> {
        self.read_u32(Endian::Big)
    }

    /// Read a u32 at an absolute offset without moving the cursor
    pub fn read_u32_at(&self, offset: usize, endian: Endian) -> Result<u32, CursorError> {
        let bytes = self.slice(offset, 4)?;
        Ok(endian.read_u32(bytes))
    }

    fn out_of_bounds(&self, offset: usize, len: usize) -> CursorError {
        CursorError::OutOfBounds {
            offset,
            len,
            size: self.data.len(),
        }
    }
}
