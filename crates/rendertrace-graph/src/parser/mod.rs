//! Parser façade over `oxc_parser`.
//!
//! A [`SyntaxTree`] borrows the allocator arena and the source text of one
//! file. Both are dropped as soon as the file's extraction is done.

mod location;

pub use location::{LineIndex, Location};

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::{SourceType, Span};

use crate::error::{ExtractionError, ParseError};

/// Pick the oxc dialect for a path.
///
/// Plain `.js` files are parsed with JSX enabled: React projects routinely
/// keep markup in them.
pub fn source_type_for(path: &str) -> SourceType {
    let ext = path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match ext {
        "tsx" => SourceType::tsx(),
        "ts" | "mts" | "cts" => SourceType::ts(),
        _ => SourceType::jsx(),
    }
}

/// Parsed program of a single file.
pub struct SyntaxTree<'a> {
    pub program: Program<'a>,
    path: &'a str,
    source: &'a str,
    lines: LineIndex,
}

impl<'a> SyntaxTree<'a> {
    pub fn path(&self) -> &'a str {
        self.path
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Location of a span's start.
    pub fn locate(&self, span: Span) -> Result<Location, ExtractionError> {
        self.lines
            .locate(span.start, self.source)
            .ok_or_else(|| ExtractionError::InvalidLocation {
                path: self.path.to_string(),
                offset: span.start,
                len: self.source.len(),
            })
    }
}

/// Parse one file.
///
/// Any parser diagnostic fails the file; oxc recovers from many errors, but a
/// partially recovered tree would yield misleading components.
pub fn parse<'a>(
    allocator: &'a Allocator,
    path: &'a str,
    source: &'a str,
) -> Result<SyntaxTree<'a>, ParseError> {
    let ret = Parser::new(allocator, source, source_type_for(path)).parse();

    let lines = LineIndex::new(source);

    if let Some(first) = ret.errors.first() {
        let mut message = first.to_string();
        if ret.errors.len() > 1 {
            message.push_str(&format!(" (and {} more errors)", ret.errors.len() - 1));
        }
        let mut error = ParseError::new(path, message);
        let offset = first
            .labels
            .as_ref()
            .and_then(|labels| labels.first())
            .map(|label| label.offset());
        if let Some(location) = offset.and_then(|offset| lines.locate(offset as u32, source)) {
            error = error.with_location(location);
        }
        return Err(error);
    }
    if ret.panicked {
        return Err(ParseError::new(path, "parser aborted"));
    }

    Ok(SyntaxTree {
        program: ret.program,
        path,
        source,
        lines,
    })
}
