//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! A single translatable message and its translations
//!
//! Strings are kept as raw bytes. A catalog's charset is whatever its
//! author used; the container format only cares about the NUL and EOT
//! separators, so nothing here assumes UTF-8.

/// Separator between context and msgid in a catalog key (ASCII EOT)
pub const CONTEXT_SEPARATOR: u8 = 0x04;

/// Separator between plural forms in msgid and msgstr (ASCII NUL)
pub const PLURAL_SEPARATOR: u8 = 0x00;

/// Build the catalog key for a msgid with an optional context
pub fn make_key(singular: &[u8], context: Option<&[u8]>) -> Vec<u8> {
    match context {
        Some(ctx) => {
            let mut key = Vec::with_capacity(ctx.len() + 1 + singular.len());
            key.extend_from_slice(ctx);
            key.push(CONTEXT_SEPARATOR);
            key.extend_from_slice(singular);
            key
        }
        None => singular.to_vec(),
    }
}

/// One catalog entry: msgid, optional msgid_plural and context, and msgstr forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub singular: Vec<u8>,
    pub plural: Option<Vec<u8>>,
    pub context: Option<Vec<u8>>,
    /// Index 0 is the singular (or first plural) form
    pub translations: Vec<Vec<u8>>,
}

impl Entry {
    pub fn new(singular: impl Into<Vec<u8>>) -> Self {
        Entry {
            singular: singular.into(),
            ..Default::default()
        }
    }

    pub fn with_plural(mut self, plural: impl Into<Vec<u8>>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn with_context(mut self, context: impl Into<Vec<u8>>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_translations<I, T>(mut self, translations: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Vec<u8>>,
    {
        self.translations = translations.into_iter().map(Into::into).collect();
        self
    }

    /// Catalog key: `context \x04 singular`, or just `singular`
    pub fn key(&self) -> Vec<u8> {
        make_key(&self.singular, self.context.as_deref())
    }

    pub fn is_plural(&self) -> bool {
        self.plural.is_some()
    }

    /// True when no form carries any text
    pub fn is_untranslated(&self) -> bool {
        self.translations.iter().all(|t| t.is_empty())
    }

    pub fn translation(&self, index: usize) -> Option<&[u8]> {
        self.translations.get(index).map(Vec::as_slice)
    }

    pub fn singular_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.singular).ok()
    }

    pub fn translation_str(&self, index: usize) -> Option<&str> {
        self.translation(index)
            .and_then(|t| std::str::from_utf8(t).ok())
    }

    /// Original string as stored in a .mo file: `[context \x04] singular [\0 plural]`
    pub fn original_bytes(&self) -> Vec<u8> {
        let mut out = self.key();
        if let Some(ref plural) = self.plural {
            out.push(PLURAL_SEPARATOR);
            out.extend_from_slice(plural);
        }
        out
    }

    /// Translation string as stored in a .mo file: forms joined by NUL
    pub fn translation_bytes(&self) -> Vec<u8> {
        self.translations.join(&PLURAL_SEPARATOR)
    }

    /// Rebuild an entry from the raw original and translation strings of a .mo file
    pub fn from_mo_strings(original: &[u8], translation: &[u8]) -> Self {
        let (context, rest) = match memchr::memchr(CONTEXT_SEPARATOR, original) {
            Some(pos) => (Some(original[..pos].to_vec()), &original[pos + 1..]),
            None => (None, original),
        };

        let (singular, plural) = match memchr::memchr(PLURAL_SEPARATOR, rest) {
            Some(pos) => (rest[..pos].to_vec(), Some(rest[pos + 1..].to_vec())),
            None => (rest.to_vec(), None),
        };

        let translations = if translation.is_empty() {
            Vec::new()
        } else {
            translation
                .split(|&b| b == PLURAL_SEPARATOR)
                .map(<[u8]>::to_vec)
                .collect()
        };

        Entry {
            singular,
            plural,
            context,
            translations,
        }
    }
}
