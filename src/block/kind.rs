//! Block types produced by the block parser.

use std::fmt;

use smallvec::SmallVec;

/// Kind of a parsed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `# ` heading.
    Heading1,
    /// `## ` heading.
    Heading2,
    /// `### ` heading.
    Heading3,
    /// `#### ` heading.
    Heading4,
    /// `##### ` heading.
    Heading5,
    /// `###### ` heading.
    Heading6,
    /// Run of plain lines joined into one line of text.
    Paragraph,
    /// `- ` or `* ` list, one entry per item.
    Bullets,
    /// `1. ` list, one entry per item.
    OrderedList,
    /// `> ` block quote, joined into one line of text.
    Quote,
    /// Fenced code, one entry per source line.
    Code,
}

impl BlockKind {
    /// Heading kind for a level in `1..=6`.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Heading1),
            2 => Some(Self::Heading2),
            3 => Some(Self::Heading3),
            4 => Some(Self::Heading4),
            5 => Some(Self::Heading5),
            6 => Some(Self::Heading6),
            _ => None,
        }
    }

    /// Heading level (1-6), or `None` for non-heading kinds.
    pub fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            Self::Heading5 => Some(5),
            Self::Heading6 => Some(6),
            Self::Paragraph | Self::Bullets | Self::OrderedList | Self::Quote | Self::Code => None,
        }
    }

    /// Whether this is one of the six heading kinds.
    #[inline]
    pub fn is_heading(self) -> bool {
        self.heading_level().is_some()
    }

    /// Stable lowercase name, used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heading1 => "heading1",
            Self::Heading2 => "heading2",
            Self::Heading3 => "heading3",
            Self::Heading4 => "heading4",
            Self::Heading5 => "heading5",
            Self::Heading6 => "heading6",
            Self::Paragraph => "paragraph",
            Self::Bullets => "bullets",
            Self::OrderedList => "ordered_list",
            Self::Quote => "quote",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line storage for a block.
///
/// Headings, paragraphs and quotes hold exactly one line, so the common case
/// stays inline.
pub type BlockLines = SmallVec<[String; 1]>;

/// One classified unit of Markdown content.
///
/// Blocks are immutable once the parser emits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: BlockKind,
    lines: BlockLines,
    language: Option<String>,
}

impl Block {
    /// Heading block. Returns `None` if `level` is outside `1..=6`.
    pub fn heading(level: u8, text: impl Into<String>) -> Option<Self> {
        BlockKind::heading(level).map(|kind| Self::single(kind, text.into()))
    }

    /// Paragraph block holding already-joined text.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::single(BlockKind::Paragraph, text.into())
    }

    /// Quote block holding already-joined text.
    pub fn quote(text: impl Into<String>) -> Self {
        Self::single(BlockKind::Quote, text.into())
    }

    /// Bullet list, one entry per item.
    pub fn bullets<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::many(BlockKind::Bullets, items)
    }

    /// Ordered list, one entry per item.
    pub fn ordered_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::many(BlockKind::OrderedList, items)
    }

    /// Code block, one entry per source line, with an optional language tag.
    pub fn code<I, S>(lines: I, language: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            language,
            ..Self::many(BlockKind::Code, lines)
        }
    }

    fn single(kind: BlockKind, text: String) -> Self {
        let mut lines = BlockLines::new();
        lines.push(text);
        Self {
            kind,
            lines,
            language: None,
        }
    }

    fn many<I, S>(kind: BlockKind, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            lines: items.into_iter().map(Into::into).collect(),
            language: None,
        }
    }

    /// Block kind.
    #[inline]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Block lines: list items, code lines, or the single line of text.
    #[inline]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Language tag from the opening fence (code blocks only).
    #[inline]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// First line of the block; the whole text for single-line kinds.
    #[inline]
    pub fn text(&self) -> &str {
        self.lines.first().map_or("", String::as_str)
    }

    /// Code payload: lines joined with `\n`, trailing whitespace stripped.
    pub fn code_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.truncate(text.trim_end().len());
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels_round_trip() {
        for level in 1..=6 {
            let kind = BlockKind::heading(level).unwrap();
            assert!(kind.is_heading());
            assert_eq!(kind.heading_level(), Some(level));
        }
        assert_eq!(BlockKind::heading(0), None);
        assert_eq!(BlockKind::heading(7), None);
    }

    #[test]
    fn test_non_heading_kinds() {
        for kind in [
            BlockKind::Paragraph,
            BlockKind::Bullets,
            BlockKind::OrderedList,
            BlockKind::Quote,
            BlockKind::Code,
        ] {
            assert!(!kind.is_heading());
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(BlockKind::OrderedList.to_string(), "ordered_list");
        assert_eq!(BlockKind::Heading3.to_string(), "heading3");
    }

    #[test]
    fn test_single_line_blocks_stay_inline() {
        let block = Block::paragraph("hello");
        assert!(!block.lines.spilled());
        assert_eq!(block.text(), "hello");
        assert_eq!(block.language(), None);
    }

    #[test]
    fn test_code_text_strips_trailing_whitespace_only() {
        let block = Block::code(["  indented", "", "last  ", ""], Some("rust".into()));
        assert_eq!(block.code_text(), "  indented\n\nlast");
        assert_eq!(block.language(), Some("rust"));
        assert_eq!(block.lines().len(), 4);
    }

    #[test]
    fn test_block_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Block>();
    }
}
