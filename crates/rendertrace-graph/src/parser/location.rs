use serde::{Deserialize, Serialize};

/// A position in a source file: 1-based line, 0-based column.
///
/// Columns count UTF-16 code units, the convention of JavaScript tooling, so
/// an emoji advances the column by two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

/// Fast line/column lookup using pre-calculated line offsets.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push((i + 1) as u32);
            }
        }
        Self { line_starts }
    }

    /// Resolve a byte offset into a [`Location`].
    ///
    /// Returns `None` when the offset lies past the end of `source` or does
    /// not fall on a character boundary.
    pub fn locate(&self, offset: u32, source: &str) -> Option<Location> {
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(0) => 0,
            Err(idx) => idx - 1,
        };

        let line_start = *self.line_starts.get(line_idx)? as usize;
        let column = source.get(line_start..offset as usize)?.encode_utf16().count() as u32;

        Some(Location {
            line: (line_idx + 1) as u32,
            column,
        })
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
