//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! pomo-i18n library
//!
//! Binary gettext catalogs (.mo files) and plural form selection:
//! - decode a .mo image into a `Catalog` and encode it back
//! - compile `Plural-Forms` headers into a safe evaluator
//! - look up singular and plural translations with source-text fallback

pub mod gettext_lib;
