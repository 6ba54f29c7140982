//! Renderer-neutral document layout.
//!
//! A [`Story`] is the ordered list of items that ends up on the page. Input
//! files are appended one after another; the PDF writer then maps each item
//! onto layout elements without needing to know about Markdown.

use crate::block::{self, Block, BlockKind, ParseOptions};

/// Space after the synthetic title heading, in points.
const TITLE_GAP: f64 = 4.0;
/// Space after a list, in points.
const LIST_GAP: f64 = 2.0;
/// Space before a plain-text section, in points.
const SECTION_GAP: f64 = 10.0;
/// Space between input files, in points.
pub(crate) const FILE_GAP: f64 = 14.0;

/// One layout item.
#[derive(Debug, Clone, PartialEq)]
pub enum StoryItem {
    /// Heading with level 1-6.
    Heading { level: u8, text: String },
    Paragraph(String),
    Quote(String),
    /// Verbatim code; `text` has trailing whitespace removed.
    Code {
        language: Option<String>,
        text: String,
    },
    Bullets(Vec<String>),
    OrderedList(Vec<String>),
    /// Vertical space in points.
    Spacer(f64),
}

/// Ordered list of layout items for a whole document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Story {
    items: Vec<StoryItem>,
}

impl Story {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn items(&self) -> &[StoryItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Append raw vertical space.
    pub fn push_spacer(&mut self, points: f64) {
        self.items.push(StoryItem::Spacer(points));
    }

    /// Parse Markdown and append its blocks.
    ///
    /// When the text does not open with a level-1 heading, `title` is
    /// inserted as one so every file starts with a visible heading.
    pub fn append_markdown(&mut self, markdown: &str, title: &str, options: &ParseOptions) {
        let blocks = block::parse_with_options(markdown, options);
        self.append_blocks(&blocks, title);
    }

    /// Append already-parsed blocks, see [`append_markdown`](Self::append_markdown).
    pub fn append_blocks(&mut self, blocks: &[Block], title: &str) {
        let opens_with_title = blocks
            .first()
            .is_some_and(|b| b.kind() == BlockKind::Heading1);
        if !opens_with_title {
            self.items.push(StoryItem::Heading {
                level: 1,
                text: title.to_string(),
            });
            self.push_spacer(TITLE_GAP);
        }

        for block in blocks {
            self.append_block(block);
        }
    }

    /// Append plain text as a titled code section (used for license files).
    pub fn append_text_as_code(&mut self, text: &str, section_title: &str) {
        self.push_spacer(SECTION_GAP);
        self.items.push(StoryItem::Heading {
            level: 2,
            text: section_title.to_string(),
        });
        self.items.push(StoryItem::Code {
            language: None,
            text: text.trim_end().to_string(),
        });
    }

    fn append_block(&mut self, block: &Block) {
        let kind = block.kind();
        let item = match kind {
            BlockKind::Heading1
            | BlockKind::Heading2
            | BlockKind::Heading3
            | BlockKind::Heading4
            | BlockKind::Heading5
            | BlockKind::Heading6 => StoryItem::Heading {
                level: kind.heading_level().unwrap_or(1),
                text: block.text().to_string(),
            },
            BlockKind::Paragraph => StoryItem::Paragraph(expand_tabs(block.text())),
            BlockKind::Quote => StoryItem::Quote(expand_tabs(block.text())),
            BlockKind::Code => StoryItem::Code {
                language: block.language().map(str::to_owned),
                text: block.code_text(),
            },
            BlockKind::Bullets => StoryItem::Bullets(expand_all(block.lines())),
            BlockKind::OrderedList => StoryItem::OrderedList(expand_all(block.lines())),
        };
        self.items.push(item);

        if matches!(kind, BlockKind::Bullets | BlockKind::OrderedList) {
            self.push_spacer(LIST_GAP);
        }
    }
}

/// Replace tabs with four spaces; most fonts have no glyph for `\t`.
pub fn expand_tabs(text: &str) -> String {
    text.replace('\t', "    ")
}

fn expand_all(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| expand_tabs(line)).collect()
}
