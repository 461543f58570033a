//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! msgunfmt - uncompile message catalog from binary format
//!
//! The msgunfmt utility reads one or more .mo files and prints their
//! merged contents as PO-style text.
//!
//! Messages and help text are not localized; no text domain is bound.

use clap::Parser;
use pomo_i18n::gettext_lib::dump::write_po;
use pomo_i18n::gettext_lib::{ByteSink, Catalog, FileSink, FileSource};
use std::path::PathBuf;
use std::process::exit;

/// msgunfmt - uncompile message catalog from binary format
#[derive(Parser)]
#[command(version, about = "msgunfmt - uncompile message catalog from binary format")]
struct Args {
    #[arg(short = 'o', long = "output-file", help = "Write output to FILE instead of standard output")]
    output: Option<PathBuf>,

    #[arg(required = true, help = "Input .mo files; later files override earlier ones")]
    files: Vec<String>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let source = FileSource::new();
    let mut merged = Catalog::new();
    let mut exit_code = 0;

    for name in &args.files {
        match Catalog::import_from(&source, name) {
            Ok(catalog) => {
                log::debug!("{}: {} entries", name, catalog.len());
                for (header, value) in catalog.headers() {
                    merged.set_header(header, value);
                }
                merged.merge_with(&catalog);
            }
            Err(e) => {
                eprintln!("msgunfmt: {}: {}", name, e);
                exit_code = 1;
            }
        }
    }

    let mut text = Vec::new();
    if let Err(e) = write_po(&mut text, &merged) {
        eprintln!("msgunfmt: {}", e);
        exit(1);
    }

    let target = args
        .output
        .as_ref()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "-".to_string());

    if let Err(e) = FileSink::new().store(&target, &text) {
        eprintln!("msgunfmt: {}: {}", target, e);
        exit(1);
    }

    exit(exit_code);
}
