//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! GNU .mo file format reader and writer
//!
//! The .mo (Machine Object) file format is the binary format used by GNU gettext
//! for storing translated message catalogs. A file starts with a fixed 28-byte
//! header, followed by two tables of (length, offset) descriptors, one for the
//! original strings and one for the translations, and the string data itself.
//! The byte order of every 32-bit field is given by the magic number.

use std::io::{self, Write};

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use thiserror::Error;

use crate::gettext_lib::catalog::Catalog;
use crate::gettext_lib::cursor::{ByteCursor, CursorError, Endian};
use crate::gettext_lib::entry::Entry;

/// Magic number of a .mo file, read in the file's own byte order
pub const MO_MAGIC: u32 = 0x950412de;

/// Magic number as it appears when read with the wrong byte order
pub const MO_MAGIC_SWAPPED: u32 = 0xde120495;

/// Header of a .mo file
///
/// Field order matches the on-disk layout so the struct can be written with
/// `bytemuck::bytes_of` once its fields are in the target byte order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MoHeader {
    /// Magic number (determines endianness)
    pub magic: u32,
    /// File format revision; the major number is in the upper 16 bits
    pub revision: u32,
    /// Number of strings
    pub nstrings: u32,
    /// Offset of table with original strings
    pub orig_tab_offset: u32,
    /// Offset of table with translation strings
    pub trans_tab_offset: u32,
    /// Size of hashing table
    pub hash_tab_size: u32,
    /// Offset of hashing table
    pub hash_tab_offset: u32,
}

impl MoHeader {
    /// Size of the header in bytes
    pub const SIZE: usize = 28;

    pub fn major_revision(&self) -> u32 {
        self.revision >> 16
    }

    /// Copy with every field converted to the given byte order
    fn to_endian(self, endian: Endian) -> Self {
        let conv = match endian {
            Endian::Little => u32::to_le,
            Endian::Big => u32::to_be,
        };
        MoHeader {
            magic: conv(self.magic),
            revision: conv(self.revision),
            nstrings: conv(self.nstrings),
            orig_tab_offset: conv(self.orig_tab_offset),
            trans_tab_offset: conv(self.trans_tab_offset),
            hash_tab_size: conv(self.hash_tab_size),
            hash_tab_offset: conv(self.hash_tab_offset),
        }
    }
}

/// A string descriptor (length + offset pair) in the .mo file
#[derive(Debug, Clone, Copy, Default)]
pub struct StringDescriptor {
    /// Length of the string (excluding null terminator)
    pub length: u32,
    /// Offset of the string from the start of the file
    pub offset: u32,
}

impl StringDescriptor {
    /// Size of a string descriptor in bytes
    pub const SIZE: usize = 8;
}

/// Error type for .mo file operations
#[derive(Error, Debug)]
pub enum MoError {
    #[error("not a .mo file (magic number 0x{0:08x})")]
    BadMagic(u32),

    #[error("unsupported .mo revision {major}.{minor}", major = .0 >> 16, minor = .0 & 0xffff)]
    UnsupportedRevision(u32),

    #[error("{what} at offset {offset} (length {length}) lies outside the file")]
    Truncated {
        what: &'static str,
        offset: u64,
        length: u64,
    },

    #[error(transparent)]
    OutOfBounds(#[from] CursorError),

    #[error("cannot read {name}: {source}")]
    ResourceUnavailable {
        name: String,
        #[source]
        source: io::Error,
    },
}

/// Decoder for .mo files
#[derive(Debug)]
pub struct MoFile<'a> {
    cursor: ByteCursor<'a>,
    endian: Endian,
    header: MoHeader,
}

impl<'a> MoFile<'a> {
    /// Validate the magic number and header of a .mo image
    pub fn open(data: &'a [u8]) -> Result<Self, MoError> {
        let mut cursor = ByteCursor::new(data);

        let endian = match cursor.read_u32_at(0, Endian::Little) {
            Ok(MO_MAGIC) => Endian::Little,
            Ok(MO_MAGIC_SWAPPED) => Endian::Big,
            Ok(magic) => return Err(MoError::BadMagic(magic)),
            // shorter than a magic number: not a .mo file at all
            Err(_) => return Err(MoError::BadMagic(0)),
        };

        let header = Self::read_header(&mut cursor, endian)?;

        if header.major_revision() != 0 {
            return Err(MoError::UnsupportedRevision(header.revision));
        }

        Ok(MoFile {
            cursor,
            endian,
            header,
        })
    }

    /// Decode a complete catalog from the bytes of a .mo file
    ///
    /// Any structural error aborts the whole decode; no partial catalog is
    /// ever returned.
    pub fn decode(data: &'a [u8]) -> Result<Catalog, MoError> {
        let mo = MoFile::open(data)?;
        let mut catalog = Catalog::new();

        for i in 0..mo.header.nstrings as usize {
            let (original, translation) = mo.read_pair(i)?;

            if original.is_empty() {
                let block = String::from_utf8_lossy(translation);
                catalog.set_headers(parse_header_block(&block));
                continue;
            }

            let entry = Entry::from_mo_strings(original, translation);
            if entry.singular.is_empty() {
                log::trace!("skipping record {} with empty msgid", i);
                continue;
            }
            if entry.is_untranslated() {
                log::trace!(
                    "skipping untranslated record {}: {}",
                    i,
                    String::from_utf8_lossy(&entry.singular)
                );
                continue;
            }
            catalog.add_entry(entry);
        }

        log::debug!(
            "decoded {} .mo revision {}: {} strings, {} entries",
            mo.endian,
            mo.header.revision,
            mo.header.nstrings,
            catalog.len()
        );

        Ok(catalog)
    }

    pub fn header(&self) -> &MoHeader {
        &self.header
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Number of string pairs in the file
    pub fn len(&self) -> usize {
        self.header.nstrings as usize
    }

    pub fn is_empty(&self) -> bool {
        self.header.nstrings == 0
    }

    /// Raw original and translation strings of the `index`th pair
    pub fn read_pair(&self, index: usize) -> Result<(&'a [u8], &'a [u8]), MoError> {
        let original = self.read_string(self.header.orig_tab_offset, index, "original string")?;
        let translation =
            self.read_string(self.header.trans_tab_offset, index, "translation string")?;
        Ok((original, translation))
    }

    /// Read the header fields following the magic number
    fn read_header(cursor: &mut ByteCursor<'a>, le: Endian) -> Result<MoHeader, MoError> {
        if cursor.len() < MoHeader::SIZE {
            return Err(MoError::Truncated {
                what: "header",
                offset: 0,
                length: MoHeader::SIZE as u64,
            });
        }

        Ok(MoHeader {
            magic: cursor.read_u32(le)?,
            revision: cursor.read_u32(le)?,
            nstrings: cursor.read_u32(le)?,
            orig_tab_offset: cursor.read_u32(le)?,
            trans_tab_offset: cursor.read_u32(le)?,
            hash_tab_size: cursor.read_u32(le)?,
            hash_tab_offset: cursor.read_u32(le)?,
        })
    }

    /// Read a string descriptor from the table at `table` and return its bytes
    fn read_string(
        &self,
        table: u32,
        index: usize,
        what: &'static str,
    ) -> Result<&'a [u8], MoError> {
        let desc_offset = (table as u64) + (index as u64) * StringDescriptor::SIZE as u64;
        let desc = self.read_string_descriptor(desc_offset)?;

        usize::try_from(desc.offset)
            .ok()
            .zip(usize::try_from(desc.length).ok())
            .and_then(|(offset, length)| self.cursor.slice(offset, length).ok())
            .ok_or(MoError::Truncated {
                what,
                offset: desc.offset as u64,
                length: desc.length as u64,
            })
    }

    /// Read a string descriptor from the data
    fn read_string_descriptor(&self, offset: u64) -> Result<StringDescriptor, MoError> {
        let truncated = MoError::Truncated {
            what: "string descriptor",
            offset,
            length: StringDescriptor::SIZE as u64,
        };
        let Ok(offset) = usize::try_from(offset) else {
            return Err(truncated);
        };
        let bytes = self
            .cursor
            .slice(offset, StringDescriptor::SIZE)
            .map_err(|_| truncated)?;

        Ok(StringDescriptor {
            length: self.endian.read_u32(&bytes[..4]),
            offset: self.endian.read_u32(&bytes[4..]),
        })
    }
}

/// Parse the header entry (msgid = "") into `(name, value)` pairs
///
/// Lines without a colon are ignored. Some generators leave literal
/// two-character `\n` sequences in the block; they are read as line breaks.
pub fn parse_header_block(block: &str) -> Vec<(&str, &str)> {
    block
        .split("\\n")
        .flat_map(|chunk| chunk.split('\n'))
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
        .filter(|(name, _)| !name.is_empty())
        .collect()
}

/// Encoder for .mo files
#[derive(Debug, Clone, Copy, Default)]
pub struct MoWriter {
    endian: Endian,
}

impl MoWriter {
    /// Writer producing little-endian files
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endian(endian: Endian) -> Self {
        MoWriter { endian }
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Write a catalog to a writer
    pub fn write_to<W: Write>(&self, catalog: &Catalog, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.write_to_bytes(catalog))
    }

    /// Serialize a catalog
    ///
    /// The header block is written as the translation of the empty msgid and
    /// always comes first. Entries without any translated text are dropped;
    /// the rest are sorted by key so readers can binary-search the originals.
    pub fn write_to_bytes(&self, catalog: &Catalog) -> Vec<u8> {
        let header_block = catalog.header_block();

        let mut strings: Vec<(Vec<u8>, Vec<u8>)> =
            vec![(Vec::new(), header_block.into_bytes())];
        strings.extend(
            catalog
                .sorted_entries()
                .into_iter()
                .filter(|entry| !entry.is_untranslated())
                .map(|entry| (entry.original_bytes(), entry.translation_bytes())),
        );

        let data = match self.endian {
            Endian::Little => Self::layout::<LittleEndian>(&strings, self.endian),
            Endian::Big => Self::layout::<BigEndian>(&strings, self.endian),
        };

        log::debug!(
            "encoded {} .mo: {} strings, {} bytes",
            self.endian,
            strings.len(),
            data.len()
        );

        data
    }

    fn layout<B: ByteOrder>(strings: &[(Vec<u8>, Vec<u8>)], endian: Endian) -> Vec<u8> {
        let nstrings = strings.len() as u32;
        let table_size = nstrings * StringDescriptor::SIZE as u32;

        let orig_tab_offset = MoHeader::SIZE as u32;
        let trans_tab_offset = orig_tab_offset + table_size;
        let orig_data_offset = trans_tab_offset + table_size;

        // every string is followed by a NUL terminator not counted in its length
        let orig_data_size: u32 = strings.iter().map(|(o, _)| o.len() as u32 + 1).sum();
        let trans_data_offset = orig_data_offset + orig_data_size;

        let header = MoHeader {
            magic: MO_MAGIC,
            revision: 0,
            nstrings,
            orig_tab_offset,
            trans_tab_offset,
            hash_tab_size: 0,
            hash_tab_offset: MoHeader::SIZE as u32,
        };

        let mut data = Vec::with_capacity(trans_data_offset as usize);
        data.extend_from_slice(bytemuck::bytes_of(&header.to_endian(endian)));

        let put = |data: &mut Vec<u8>, value: u32| {
            let mut buf = [0u8; 4];
            B::write_u32(&mut buf, value);
            data.extend_from_slice(&buf);
        };

        let mut offset = orig_data_offset;
        for (original, _) in strings {
            put(&mut data, original.len() as u32);
            put(&mut data, offset);
            offset += original.len() as u32 + 1;
        }

        let mut offset = trans_data_offset;
        for (_, translation) in strings {
            put(&mut data, translation.len() as u32);
            put(&mut data, offset);
            offset += translation.len() as u32 + 1;
        }

        for (original, _) in strings {
            data.extend_from_slice(original);
            data.push(0);
        }

        for (_, translation) in strings {
            data.extend_from_slice(translation);
            data.push(0);
        }

        data
    }
}
