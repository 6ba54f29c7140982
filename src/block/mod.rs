//! Block-level parser for Markdown.
//!
//! The block parser is line-oriented and handles:
//! - ATX headings (levels 1-6)
//! - Fenced code blocks
//! - Block quotes
//! - Bullet and ordered lists (flat, one line per item)
//! - Paragraphs
//!
//! Anything it does not recognize becomes paragraph text, so parsing never
//! fails.

mod kind;
mod parser;

use tracing::debug;

use crate::lines::Lines;

pub use kind::{Block, BlockKind, BlockLines};
pub use parser::{BlockParser, ParseOptions};

/// Parse Markdown text into blocks with default options.
///
/// # Example
/// ```
/// use ferropdf::{parse, BlockKind};
///
/// let blocks = parse("# Title\n\n- a\n- b\n");
/// assert_eq!(blocks[0].kind(), BlockKind::Heading1);
/// assert_eq!(blocks[1].lines(), ["a", "b"]);
/// ```
pub fn parse(input: &str) -> Vec<Block> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse Markdown text into blocks.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Vec<Block> {
    let mut parser = BlockParser::with_options(*options);
    for line in Lines::new(input) {
        parser.push_line(line);
    }
    let blocks = parser.finish();
    debug!(bytes = input.len(), blocks = blocks.len(), "parsed markdown");
    blocks
}
