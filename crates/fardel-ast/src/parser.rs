//! Thin parsing facade over `oxc_parser`.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::Program;
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{AstError, Result};

/// Parse options for reading source code.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Source type (module JavaScript by default).
    pub source_type: SourceType,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::mjs(),
        }
    }
}

impl ParseOptions {
    /// Create parse options from a file path, auto-detecting the source type.
    ///
    /// Unknown extensions fall back to module JavaScript.
    pub fn from_path(path: &Path) -> Self {
        Self {
            source_type: SourceType::from_path(path).unwrap_or(SourceType::mjs()),
        }
    }
}

/// Parse source text into an AST.
///
/// Any parser diagnostic is fatal: the bundler has no notion of a
/// partially-understood module, so there is no error-tolerant mode.
pub(crate) fn parse<'a>(
    allocator: &'a Allocator,
    source: &'a str,
    options: &ParseOptions,
) -> Result<Program<'a>> {
    let result = Parser::new(allocator, source, options.source_type).parse();

    if !result.errors.is_empty() {
        let message = result
            .errors
            .iter()
            .map(|err| err.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        return Err(AstError::Parse { message });
    }

    Ok(result.program)
}
