//! Test utilities for writing scan files.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory holding `du`-style input files.
///
/// The directory is automatically cleaned up when dropped.
pub struct ScanFixture {
    dir: TempDir,
}

impl ScanFixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` verbatim to `name` and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(name);
        fs::write(&full_path, content).expect("Failed to write scan file");
        full_path
    }

    /// Write `(size, path)` entries as tab-separated `du` lines.
    pub fn write_entries(&self, name: &str, entries: &[(u64, &str)]) -> PathBuf {
        self.write(name, &du_lines(entries))
    }
}

impl Default for ScanFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Format entries the way `du` prints them: `<size>\t<path>\n`.
pub fn du_lines(entries: &[(u64, &str)]) -> String {
    entries
        .iter()
        .map(|(size, path)| format!("{}\t{}\n", size, path))
        .collect()
}

/// Generate a complete, well-nested scan of a synthetic tree.
///
/// Every directory has `fanout` files and, above `depth` 0, `fanout`
/// subdirectories. Files are 1 to `fanout` units; directory sizes are the sum
/// of their contents plus 4, as `du` counts the directory entry itself.
pub fn synthetic_scan(root: &str, fanout: usize, depth: usize) -> String {
    let mut out = String::new();
    synthetic_dir(root, fanout, depth, &mut out);
    out
}

fn synthetic_dir(path: &str, fanout: usize, depth: usize, out: &mut String) -> u64 {
    let mut total = 4;
    for i in 0..fanout {
        let size = i as u64 + 1;
        out.push_str(&format!("{}\t{}/file{}.dat\n", size, path, i));
        total += size;
    }
    if depth > 0 {
        for i in 0..fanout {
            let child = format!("{}/dir{}", path, i);
            total += synthetic_dir(&child, fanout, depth - 1, out);
        }
    }
    out.push_str(&format!("{}\t{}\n", total, path));
    total
}
