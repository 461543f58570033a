//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! mocat - concatenate binary message catalogs
//!
//! The mocat utility merges several .mo files into one. Messages from later
//! files replace messages with the same key from earlier ones; header fields
//! are taken from the first file that defines them.
//!
//! Messages and help text are not localized; no text domain is bound.

use clap::Parser;
use pomo_i18n::gettext_lib::{ByteSink, Catalog, Endian, FileSink, FileSource, MoWriter};
use std::path::PathBuf;
use std::process::exit;

/// mocat - concatenate binary message catalogs
#[derive(Parser)]
#[command(version, about = "mocat - concatenate binary message catalogs")]
struct Args {
    #[arg(short = 'o', long = "output-file", help = "Output .mo file ('-' for standard output)")]
    output: PathBuf,

    #[arg(short = 'B', long = "big-endian", help = "Write a big-endian file")]
    big_endian: bool,

    #[arg(short = 'v', long, help = "Report the number of messages written")]
    verbose: bool,

    #[arg(required = true, help = "Input .mo files")]
    files: Vec<String>,
}

/// Merge `guest` into `host`, keeping header fields `host` already has
fn merge_catalog(host: &mut Catalog, guest: &Catalog) {
    for (name, value) in guest.headers() {
        if host.header(name).is_none() {
            host.set_header(name, value);
        }
    }
    host.merge_with(guest);
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let source = FileSource::new();
    let mut merged = Catalog::new();

    for name in &args.files {
        match Catalog::import_from(&source, name) {
            Ok(catalog) => merge_catalog(&mut merged, &catalog),
            Err(e) => {
                eprintln!("mocat: {}: {}", name, e);
                exit(1);
            }
        }
    }

    let endian = if args.big_endian {
        Endian::Big
    } else {
        Endian::Little
    };
    let data = MoWriter::with_endian(endian).write_to_bytes(&merged);

    let target = args.output.to_string_lossy();
    let mut sink = FileSink::new();
    if let Err(e) = sink.store(&target, &data) {
        eprintln!("mocat: {}: {}", target, e);
        exit(1);
    }

    if args.verbose {
        let written = merged.entries().filter(|e| !e.is_untranslated()).count();
        eprintln!("mocat: {} messages written to {}", written, target);
    }
}
