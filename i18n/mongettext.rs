//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! mongettext - translate message from a .mo file and choose plural form
//!
//! Like ngettext, but the message catalog is named explicitly instead of
//! being located through the locale and text domain. The count may be
//! negative.
//!
//! Messages and help text are not localized; no text domain is bound.

use clap::Parser;
use pomo_i18n::gettext_lib::{Catalog, FileSource};
use std::io::{self, Write};
use std::process::exit;

/// mongettext - translate message from a .mo file and choose plural form
#[derive(Parser)]
#[command(
    version,
    about = "mongettext - translate message from a .mo file and choose plural form"
)]
struct Args {
    #[arg(short = 'c', long = "catalog", help = "The .mo file to look MSGID up in")]
    catalog: Option<String>,

    #[arg(short = 'x', long = "context", help = "Message context (msgctxt)")]
    context: Option<String>,

    #[arg(help = "Singular form (MSGID1)")]
    msgid1: String,

    #[arg(help = "Plural form (MSGID2)")]
    msgid2: String,

    #[arg(allow_hyphen_values = true, help = "Count for plural selection")]
    count: String,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let count: i64 = match args.count.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("mongettext: invalid count: {}", args.count);
            exit(1);
        }
    };

    // Without a usable catalog the default rule picks between the msgids
    let catalog = match args.catalog {
        Some(ref name) => match Catalog::import_from(&FileSource::new(), name) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::warn!("{}: {}", name, e);
                Catalog::new()
            }
        },
        None => Catalog::new(),
    };

    let translated = catalog.translate_plural(
        args.msgid1.as_bytes(),
        args.msgid2.as_bytes(),
        count,
        args.context.as_deref().map(str::as_bytes),
    );

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout
        .write_all(translated)
        .and_then(|_| stdout.write_all(b"\n"))
    {
        eprintln!("mongettext: {}", e);
        exit(1);
    }
}
