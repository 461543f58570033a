//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Translation catalog for runtime message lookups
//!
//! This module provides the `Catalog` type: the in-memory form of a .mo
//! file. It holds the entries keyed by `context \x04 msgid`, the header
//! block, and the plural rule compiled from the `Plural-Forms` header.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::gettext_lib::entry::{make_key, Entry};
use crate::gettext_lib::mo_file::{MoError, MoFile, MoWriter};
use crate::gettext_lib::plural::PluralRule;
use crate::gettext_lib::source::{ByteSink, ByteSource};

/// Header whose value drives plural selection
pub const PLURAL_FORMS_HEADER: &str = "Plural-Forms";

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<Vec<u8>, Entry>,
    /// Header lines in insertion order
    headers: Vec<(String, String)>,
    /// Compiled from `Plural-Forms` on first use; reset by the header setters
    plural_rule: OnceLock<PluralRule>,
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a catalog from the bytes of a .mo file
    pub fn decode(data: &[u8]) -> Result<Self, MoError> {
        MoFile::decode(data)
    }

    /// Encode this catalog as a little-endian .mo file
    pub fn encode(&self) -> Vec<u8> {
        MoWriter::new().write_to_bytes(self)
    }

    /// Fetch `name` from a byte source and decode it
    pub fn import_from<S: ByteSource + ?Sized>(source: &S, name: &str) -> Result<Self, MoError> {
        let data = source
            .fetch(name)
            .map_err(|e| MoError::ResourceUnavailable {
                name: name.to_string(),
                source: e,
            })?;
        Self::decode(&data)
    }

    /// Encode this catalog and hand the bytes to a sink
    pub fn export_to<S: ByteSink + ?Sized>(&self, sink: &mut S, name: &str) -> std::io::Result<()> {
        sink.store(name, &self.encode())
    }

    /// Insert or replace an entry. Entries without a msgid are rejected.
    pub fn add_entry(&mut self, entry: Entry) -> bool {
        if entry.singular.is_empty() {
            return false;
        }
        self.entries.insert(entry.key(), entry);
        true
    }

    pub fn remove_entry(&mut self, singular: &[u8], context: Option<&[u8]>) -> Option<Entry> {
        self.entries.remove(&make_key(singular, context))
    }

    /// Exact lookup by msgid and context
    pub fn find(&self, singular: &[u8], context: Option<&[u8]>) -> Option<&Entry> {
        self.entries.get(&make_key(singular, context))
    }

    /// Lookup by a precomputed key
    pub fn get(&self, key: &[u8]) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in no particular order
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Entries ordered by ascending key bytes
    pub fn sorted_entries(&self) -> Vec<&Entry> {
        let mut keyed: Vec<(&Vec<u8>, &Entry)> = self.entries.iter().collect();
        keyed.sort_by(|a, b| a.0.cmp(b.0));
        keyed.into_iter().map(|(_, e)| e).collect()
    }

    /// Get the value of a header
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Set a header, replacing an existing value in place
    pub fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }

        if name == PLURAL_FORMS_HEADER {
            self.plural_rule = OnceLock::new();
        }
    }

    pub fn set_headers<'a, I>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in headers {
            self.set_header(name, value);
        }
    }

    /// Header block as stored in the empty msgid of a .mo file
    pub fn header_block(&self) -> String {
        self.headers
            .iter()
            .map(|(n, v)| format!("{}: {}", n, v))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Plural rule from the `Plural-Forms` header, compiled on first use
    pub fn plural_rule(&self) -> &PluralRule {
        self.plural_rule
            .get_or_init(|| PluralRule::from_header(self.header(PLURAL_FORMS_HEADER)))
    }

    pub fn nplurals(&self) -> usize {
        self.plural_rule().nplurals()
    }

    /// Plural form index for a count
    pub fn select_plural_form(&self, count: i64) -> usize {
        self.plural_rule().select(count)
    }

    /// Look up a singular message, falling back to the msgid
    pub fn translate<'a>(&'a self, singular: &'a [u8], context: Option<&[u8]>) -> &'a [u8] {
        self.find(singular, context)
            .and_then(|entry| entry.translation(0))
            .unwrap_or(singular)
    }

    /// Look up a plural message
    ///
    /// When the catalog has no usable form, the caller's source strings are
    /// returned: `singular` for form 0, `plural` for any other form.
    pub fn translate_plural<'a>(
        &'a self,
        singular: &'a [u8],
        plural: &'a [u8],
        count: i64,
        context: Option<&[u8]>,
    ) -> &'a [u8] {
        let index = self.select_plural_form(count);

        if let Some(form) = self
            .find(singular, context)
            .and_then(|entry| entry.translation(index))
        {
            return form;
        }

        if index != 0 {
            plural
        } else {
            singular
        }
    }

    /// Merge another catalog into this one; its entries win on key conflicts.
    /// Headers are left alone.
    pub fn merge_with(&mut self, guest: &Catalog) {
        for (key, entry) in &guest.entries {
            self.entries.insert(key.clone(), entry.clone());
        }
    }
}
