//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Render a catalog as PO-style text, the way msgunfmt does

use std::io::{self, Write};

use crate::gettext_lib::catalog::Catalog;
use crate::gettext_lib::entry::Entry;

/// Quote a byte string for PO output
///
/// Strings containing newlines are split after each `\n` into continuation
/// lines, starting with an empty `""` line. Bytes outside ASCII are passed
/// through untouched.
pub fn quote(value: &[u8]) -> Vec<u8> {
    let multiline = value.iter().position(|&b| b == b'\n').is_some_and(|pos| pos + 1 < value.len());

    let mut out = Vec::with_capacity(value.len() + 2);
    if multiline {
        out.extend_from_slice(b"\"\"\n");
    }
    out.push(b'"');

    for (i, &b) in value.iter().enumerate() {
        match b {
            b'\n' => {
                out.extend_from_slice(b"\\n");
                if i + 1 < value.len() {
                    out.extend_from_slice(b"\"\n\"");
                }
            }
            b'\t' => out.extend_from_slice(b"\\t"),
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\\' => out.extend_from_slice(b"\\\\"),
            b'"' => out.extend_from_slice(b"\\\""),
            0x00..=0x1f | 0x7f => out.extend_from_slice(format!("\\{:03o}", b).as_bytes()),
            _ => out.push(b),
        }
    }

    out.push(b'"');
    out
}

fn write_field<W: Write>(out: &mut W, keyword: &str, value: &[u8]) -> io::Result<()> {
    out.write_all(keyword.as_bytes())?;
    out.write_all(b" ")?;
    out.write_all(&quote(value))?;
    out.write_all(b"\n")
}

/// Write one entry followed by a blank line
pub fn write_entry<W: Write>(out: &mut W, entry: &Entry) -> io::Result<()> {
    if let Some(ref context) = entry.context {
        write_field(out, "msgctxt", context)?;
    }
    write_field(out, "msgid", &entry.singular)?;

    match entry.plural {
        Some(ref plural) => {
            write_field(out, "msgid_plural", plural)?;
            for (i, form) in entry.translations.iter().enumerate() {
                write_field(out, &format!("msgstr[{}]", i), form)?;
            }
        }
        None => write_field(out, "msgstr", entry.translation(0).unwrap_or_default())?,
    }

    out.write_all(b"\n")
}

/// Write the header block and every entry, sorted by key
pub fn write_po<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    if catalog.headers().next().is_some() {
        let mut block = catalog.header_block();
        block.push('\n');
        write_field(out, "msgid", b"")?;
        write_field(out, "msgstr", block.as_bytes())?;
        out.write_all(b"\n")?;
    }

    for entry in catalog.sorted_entries() {
        write_entry(out, entry)?;
    }

    Ok(())
}
