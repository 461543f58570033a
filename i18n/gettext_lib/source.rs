//
// Copyright (c) 2026 Jeff Garzik
//
// This file is part of the pomo-rs project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//

//! Where catalog bytes come from and where they go
//!
//! The codec itself only sees byte slices. These traits are the boundary to
//! the outside world: a source yields the whole content of a named resource
//! or fails, and a sink accepts the whole encoded content of one.

use std::collections::HashMap;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Provides the complete content of a named resource
pub trait ByteSource {
    fn fetch(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Accepts the complete content of a named resource
pub trait ByteSink {
    fn store(&mut self, name: &str, data: &[u8]) -> io::Result<()>;
}

/// Reads files, relative to an optional base directory.
/// The name `-` reads standard input.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        FileSource {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        resolve(self.root.as_deref(), name)
    }
}

impl ByteSource for FileSource {
    fn fetch(&self, name: &str) -> io::Result<Vec<u8>> {
        let mut input = plib::io::input_stream(&self.resolve(name), true)?;
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        Ok(data)
    }
}

/// Writes files, relative to an optional base directory.
/// The name `-` writes standard output.
#[derive(Debug, Clone, Default)]
pub struct FileSink {
    root: Option<PathBuf>,
}

impl FileSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        FileSink {
            root: Some(root.into()),
        }
    }
}

impl ByteSink for FileSink {
    fn store(&mut self, name: &str, data: &[u8]) -> io::Result<()> {
        let path = resolve(self.root.as_deref(), name);
        let mut output = plib::io::output_stream(&path, true)?;
        output.write_all(data)?;
        output.flush()
    }
}

fn resolve(root: Option<&Path>, name: &str) -> PathBuf {
    match root {
        Some(root) if name != "-" => root.join(name),
        _ => PathBuf::from(name),
    }
}

/// In-memory resources, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    resources: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, data: Vec<u8>) {
        self.resources.insert(name.into(), data);
    }
}

impl ByteSource for MemorySource {
    fn fetch(&self, name: &str) -> io::Result<Vec<u8>> {
        self.resources.get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{}: no such resource", name))
        })
    }
}

/// Collects stored resources in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    resources: HashMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.resources.get(name).map(Vec::as_slice)
    }

    /// Turn everything stored so far into a source
    pub fn into_source(self) -> MemorySource {
        MemorySource {
            resources: self.resources,
        }
    }
}

impl ByteSink for MemorySink {
    fn store(&mut self, name: &str, data: &[u8]) -> io::Result<()> {
        self.resources.insert(name.to_string(), data.to_vec());
        Ok(())
    }
}
