//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! gettext catalog library
//!
//! This module provides functionality for reading and writing GNU .mo files,
//! evaluating plural expressions, and looking up messages in an in-memory
//! translation catalog.

pub mod catalog;
pub mod cursor;
pub mod dump;
pub mod entry;
pub mod mo_file;
pub mod plural;
pub mod source;

pub use catalog::{Catalog, PLURAL_FORMS_HEADER};
pub use cursor::{ByteCursor, CursorError, Endian};
pub use entry::Entry;
pub use mo_file::{MoError, MoFile, MoWriter};
pub use plural::{PluralError, PluralExpr, PluralRule};
pub use source::{ByteSink, ByteSource, FileSink, FileSource, MemorySink, MemorySource};
