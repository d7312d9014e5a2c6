// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Buffered, atomically committed output destination for one artefact.
// Author: Lukas Bower

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// All emission for an artefact goes into an in-memory buffer; `close`
/// commits the buffer to `<path>.new` and renames it onto `path`. A
/// concurrent reader of `path` sees either the previous generation in full
/// or the new generation in full, never a torn file.
pub struct Sink {
    path: PathBuf,
    buf: String,
}

impl Sink {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            buf: String::new(),
        })
    }

    pub fn push_str(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn close(self) -> Result<()> {
        let staged = staged_path(&self.path);
        fs::write(&staged, self.buf.as_bytes())
            .with_context(|| format!("failed to write {}", staged.display()))?;
        fs::rename(&staged, &self.path).with_context(|| {
            format!(
                "failed to rename {} onto {}",
                staged.display(),
                self.path.display()
            )
        })?;
        println!("written {}", self.path.display());
        Ok(())
    }
}

impl fmt::Write for Sink {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.buf.push_str(text);
        Ok(())
    }
}

fn staged_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".new");
    path.with_file_name(name)
}
