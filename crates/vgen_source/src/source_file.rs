//! Source text with a line-start index for fast line/column lookup.

use crate::resolved_span::ResolvedSpan;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// A source buffer together with the path it was read from.
///
/// Stores precomputed line-start offsets so diagnostics can be rendered with
/// line/column coordinates without rescanning the text.
pub struct SourceFile {
    /// The filesystem path of this file (or a synthetic name for in-memory sources).
    pub path: PathBuf,
    /// The full text content of the file.
    pub content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<u32>,
}

impl SourceFile {
    /// Creates a new `SourceFile` from in-memory text.
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            path: path.into(),
            content,
            line_starts,
        }
    }

    /// Reads a source file from disk.
    pub fn load(path: &Path) -> Result<Self, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path, content))
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Resolves a [`Span`] to line/column coordinates.
    pub fn resolve_span(&self, span: Span) -> ResolvedSpan {
        let (start_line, start_col) = self.line_col(span.start);
        let (end_line, end_col) = self.line_col(span.end.saturating_sub(1).max(span.start));
        ResolvedSpan {
            file_path: self.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Returns the full line of text containing `byte_offset`, without its newline.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let mut offset = (byte_offset as usize).min(self.content.len());
        while !self.content.is_char_boundary(offset) {
            offset -= 1;
        }
        let start = self.content[..offset].rfind('\n').map_or(0, |pos| pos + 1);
        let end = self.content[offset..]
            .find('\n')
            .map_or(self.content.len(), |pos| offset + pos);
        self.content[start..end].trim_end_matches('\r')
    }

    /// Returns the file stem (`fifo` for `rtl/fifo.v`), or an empty string.
    pub fn base_name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}
