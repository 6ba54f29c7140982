//! ferropdf: build a paginated PDF from a handful of Markdown files
//!
//! The interesting part is the block parser: a single forward pass over
//! the input lines that classifies them into headings, paragraphs, lists,
//! quotes and fenced code. Layout and pagination are delegated to genpdf.
//!
//! # Design Principles
//! - Line-local classification: no look-ahead, no backtracking
//! - Total parsing: unknown constructs become paragraph text
//! - No global state: fonts and styles are built per document
//!
//! # Example
//! ```
//! use ferropdf::{parse, BlockKind};
//!
//! let blocks = parse("# Title\n\n> quoted\n> more\n");
//! assert_eq!(blocks[0].kind(), BlockKind::Heading1);
//! assert_eq!(blocks[1].text(), "quoted more");
//! ```

pub mod block;
pub mod config;
pub mod document;
pub mod error;
pub mod fonts;
pub mod limits;
pub mod lines;
pub mod render;
pub mod story;
pub mod style;

// Re-export primary types
pub use block::{Block, BlockKind, BlockParser, ParseOptions, parse, parse_with_options};
pub use config::{Config, ConfigError};
pub use document::{BuildSummary, build_pdf_from_files, collect_story, default_inputs};
pub use error::{Error, Result};
pub use fonts::Fonts;
pub use lines::Lines;
pub use render::PdfWriter;
pub use story::{Story, StoryItem};
pub use style::StyleSheet;

/// Render a single Markdown document to PDF bytes.
///
/// Fonts are resolved from `config.fonts` and the system candidates, so this
/// fails with [`Error::NoFont`] on machines without any usable font.
pub fn markdown_to_pdf(markdown: &str, title: &str, config: &Config) -> Result<Vec<u8>> {
    let mut story = Story::new();
    story.append_markdown(markdown, title, &config.parse);

    let fonts = Fonts::resolve(&config.fonts)?;
    let styles = StyleSheet::new(&config.page);
    let mut writer = PdfWriter::new(fonts, &styles, title, &config.page);
    writer.write_story(&story);
    writer.into_bytes()
}
