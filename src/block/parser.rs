//! Block parser implementation.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::limits::{MAX_HEADING_LEVEL, MAX_LIST_MARKER_DIGITS};

use super::kind::Block;

/// Fence delimiter. Both opening and closing fences start with it.
const FENCE: &str = "```";

/// Block parser options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Emit the buffered lines of a fence still open at end of input as a
    /// code block. When unset those lines are dropped.
    pub keep_unterminated_code: bool,
}

/// State for an open fenced code block.
#[derive(Debug, Clone, Default)]
struct FenceState {
    /// First token of the opening fence's info string.
    language: Option<String>,
    /// Lines seen since the opening fence, verbatim.
    lines: Vec<String>,
}

/// Line-oriented block parser.
///
/// Feed lines with [`push_line`](Self::push_line) and collect the blocks with
/// [`finish`](Self::finish). At most one of the accumulation buffers is
/// non-empty at any time: starting a construct flushes the others.
#[derive(Debug, Clone, Default)]
pub struct BlockParser {
    /// Parser options.
    options: ParseOptions,
    /// Finished blocks in source order.
    blocks: Vec<Block>,
    /// Raw lines of the current paragraph.
    paragraph_lines: Vec<String>,
    /// Items of the current bullet list.
    bullet_items: Vec<String>,
    /// Items of the current ordered list.
    ordered_items: Vec<String>,
    /// Marker-stripped lines of the current quote.
    quote_lines: Vec<String>,
    /// Current fenced code block state, if inside one.
    fence: Option<FenceState>,
}

impl BlockParser {
    /// Create a block parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a block parser with options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Whether the parser is between an opening and a closing fence.
    #[inline]
    pub fn in_code_block(&self) -> bool {
        self.fence.is_some()
    }

    /// Classify one line (terminator already stripped).
    pub fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();

        // A fence toggles code state regardless of what follows the backticks
        if trimmed.starts_with(FENCE) {
            self.toggle_fence(trimmed);
            return;
        }

        if let Some(fence) = &mut self.fence {
            fence.lines.push(line.to_owned());
            return;
        }

        if trimmed.is_empty() {
            self.flush_all();
            return;
        }

        let stripped = line.trim_start();
        if self.try_heading(stripped)
            || self.try_bullet_item(stripped)
            || self.try_ordered_item(stripped)
            || self.try_quote_line(stripped)
        {
            return;
        }

        // Plain text continues the current paragraph
        self.flush_bullets();
        self.flush_ordered_list();
        self.flush_quote();
        self.paragraph_lines.push(line.to_owned());
    }

    /// Flush pending buffers and return all blocks in source order.
    pub fn finish(mut self) -> Vec<Block> {
        self.flush_all();

        if let Some(fence) = self.fence.take() {
            if self.options.keep_unterminated_code {
                self.blocks.push(Block::code(fence.lines, fence.language));
            } else {
                warn!(
                    lines = fence.lines.len(),
                    language = fence.language.as_deref().unwrap_or(""),
                    "dropping unterminated fenced code block"
                );
            }
        }

        self.blocks
    }

    /// Open or close a fenced code block.
    fn toggle_fence(&mut self, trimmed: &str) {
        match self.fence.take() {
            Some(fence) => {
                self.blocks.push(Block::code(fence.lines, fence.language));
            }
            None => {
                self.flush_all();
                let language = trimmed[FENCE.len()..]
                    .split_whitespace()
                    .next()
                    .map(str::to_owned);
                self.fence = Some(FenceState {
                    language,
                    lines: Vec::new(),
                });
            }
        }
    }

    /// Try to parse an ATX heading: 1-6 `#` followed by a space.
    /// Returns true if successful.
    fn try_heading(&mut self, stripped: &str) -> bool {
        let level = stripped.bytes().take_while(|&b| b == b'#').count();
        if level == 0 || level > MAX_HEADING_LEVEL {
            return false;
        }

        if stripped.as_bytes().get(level) != Some(&b' ') {
            return false;
        }

        let Some(block) = Block::heading(level as u8, stripped[level..].trim()) else {
            return false;
        };

        self.flush_all();
        self.blocks.push(block);
        true
    }

    /// Try to parse a `- ` or `* ` list item.
    /// Returns true if successful.
    fn try_bullet_item(&mut self, stripped: &str) -> bool {
        let Some(rest) = stripped
            .strip_prefix("- ")
            .or_else(|| stripped.strip_prefix("* "))
        else {
            return false;
        };

        self.flush_paragraph();
        self.flush_quote();
        self.flush_ordered_list();
        self.bullet_items.push(rest.trim().to_owned());
        true
    }

    /// Try to parse a `N. ` list item.
    ///
    /// Everything before the first `". "` must be an integer of at most
    /// [`MAX_LIST_MARKER_DIGITS`] digits, so `3.5. x` is not a list item.
    /// Returns true if successful.
    fn try_ordered_item(&mut self, stripped: &str) -> bool {
        if !stripped.starts_with(|c: char| c.is_ascii_digit()) {
            return false;
        }

        let Some(dot) = stripped.find(". ") else {
            return false;
        };

        let marker = &stripped[..dot];
        if marker.len() > MAX_LIST_MARKER_DIGITS || marker.parse::<u32>().is_err() {
            return false;
        }

        self.flush_paragraph();
        self.flush_quote();
        self.flush_bullets();
        self.ordered_items.push(stripped[dot + 2..].trim().to_owned());
        true
    }

    /// Try to parse a `> ` quote line.
    /// Returns true if successful.
    fn try_quote_line(&mut self, stripped: &str) -> bool {
        let Some(rest) = stripped.strip_prefix("> ") else {
            return false;
        };

        self.flush_paragraph();
        self.flush_bullets();
        self.flush_ordered_list();
        self.quote_lines.push(rest.trim().to_owned());
        true
    }

    /// Flush every text buffer, in paragraph, bullets, ordered, quote order.
    fn flush_all(&mut self) {
        self.flush_paragraph();
        self.flush_bullets();
        self.flush_ordered_list();
        self.flush_quote();
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph_lines.is_empty() {
            return;
        }
        let text = join_trimmed(&self.paragraph_lines);
        self.paragraph_lines.clear();
        if !text.is_empty() {
            self.blocks.push(Block::paragraph(text));
        }
    }

    fn flush_bullets(&mut self) {
        if !self.bullet_items.is_empty() {
            let items = std::mem::take(&mut self.bullet_items);
            self.blocks.push(Block::bullets(items));
        }
    }

    fn flush_ordered_list(&mut self) {
        if !self.ordered_items.is_empty() {
            let items = std::mem::take(&mut self.ordered_items);
            self.blocks.push(Block::ordered_list(items));
        }
    }

    fn flush_quote(&mut self) {
        if self.quote_lines.is_empty() {
            return;
        }
        let text = join_trimmed(&self.quote_lines);
        self.quote_lines.clear();
        if !text.is_empty() {
            self.blocks.push(Block::quote(text));
        }
    }
}

/// Trim each line, join with single spaces, trim the result.
fn join_trimmed(lines: &[String]) -> String {
    let mut text = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
    for line in lines {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(line.trim());
    }
    text.truncate(text.trim_end().len());
    text
}
