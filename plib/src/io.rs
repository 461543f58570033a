//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

fn is_std_stream(pathname: &Path, dashed: bool) -> bool {
    let path_str = pathname.as_os_str();
    (dashed && path_str == "-") || (!dashed && path_str.is_empty())
}

/// Open a file for reading, or stdin for "-" (or "" when not `dashed_stdin`)
pub fn input_stream(pathname: &Path, dashed_stdin: bool) -> io::Result<Box<dyn Read>> {
    let file: Box<dyn Read> = if is_std_stream(pathname, dashed_stdin) {
        Box::new(io::stdin().lock())
    } else {
        Box::new(fs::File::open(pathname)?)
    };

    Ok(file)
}

/// Create a file for writing, or stdout for "-" (or "" when not `dashed_stdout`)
pub fn output_stream(pathname: &Path, dashed_stdout: bool) -> io::Result<Box<dyn Write>> {
    let file: Box<dyn Write> = if is_std_stream(pathname, dashed_stdout) {
        Box::new(io::stdout().lock())
    } else {
        Box::new(io::BufWriter::new(fs::File::create(pathname)?))
    };

    Ok(file)
}
