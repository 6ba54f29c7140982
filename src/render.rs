//! PDF output writer.
//!
//! Maps [`StoryItem`]s onto genpdf elements. Page breaking, line wrapping and
//! font embedding are left to genpdf.

use std::path::Path;

use genpdf::elements::{Break, LinearLayout, OrderedList, Paragraph, UnorderedList};
use genpdf::fonts::{Font, FontFamily};
use genpdf::{Document, Element as _, Margins, PaperSize, SimplePageDecorator};

use crate::config::PageConfig;
use crate::error::Result;
use crate::fonts::Fonts;
use crate::story::{Story, StoryItem};
use crate::style::{StyleSheet, TextStyle, pt_to_mm};

/// Bullet used for unordered lists.
const BULLET: &str = "•";

/// Width of an A4 page in millimetres.
const A4_WIDTH_MM: f64 = 210.0;

/// Room reserved in front of list items for the bullet or number, in points.
const LIST_MARKER_WIDTH: f64 = 36.0;

/// PDF writer for one document.
///
/// # Example
/// ```no_run
/// use ferropdf::{Config, Fonts, PdfWriter, Story, StyleSheet};
///
/// let config = Config::default();
/// let fonts = Fonts::resolve(&config.fonts)?;
/// let styles = StyleSheet::new(&config.page);
///
/// let mut story = Story::new();
/// story.append_markdown("# Hello\n\nWorld", "hello.md", &config.parse);
///
/// let mut writer = PdfWriter::new(fonts, &styles, "Hello", &config.page);
/// writer.write_story(&story);
/// writer.write_to_file("hello.pdf")?;
/// # Ok::<(), ferropdf::Error>(())
/// ```
pub struct PdfWriter<'s> {
    doc: Document,
    styles: &'s StyleSheet,
    code_font: Option<FontFamily<Font>>,
    /// Width between the page margins, in millimetres.
    text_width: f64,
}

impl<'s> PdfWriter<'s> {
    /// Create an A4 document with the given fonts, styles and title.
    pub fn new(fonts: Fonts, styles: &'s StyleSheet, title: &str, page: &PageConfig) -> Self {
        let mut doc = Document::new(fonts.body);
        doc.set_title(title);
        doc.set_paper_size(PaperSize::A4);
        doc.set_font_size(page.font_size);
        doc.set_line_spacing(page.line_spacing);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::all(page.margin_mm));
        doc.set_page_decorator(decorator);

        let code_font = fonts.code.map(|family| doc.add_font_family(family));

        Self {
            doc,
            styles,
            code_font,
            text_width: A4_WIDTH_MM - 2.0 * page.margin_mm,
        }
    }

    /// Write every item of a story.
    pub fn write_story(&mut self, story: &Story) {
        for item in story.items() {
            self.write_item(item);
        }
    }

    /// Write a single item.
    pub fn write_item(&mut self, item: &StoryItem) {
        match item {
            StoryItem::Heading { level, text } => {
                let style = *self.styles.heading(*level);
                self.write_text(text, &style);
            }
            StoryItem::Paragraph(text) => {
                let style = self.styles.base;
                self.write_text(text, &style);
            }
            StoryItem::Quote(text) => self.write_quote(text),
            StoryItem::Code { text, .. } => self.write_code(text),
            StoryItem::Bullets(items) => {
                let max_chars = self.list_max_chars();
                let mut list = UnorderedList::with_bullet(BULLET);
                for entry in items {
                    list.push(breakable_paragraph(entry, max_chars));
                }
                self.write_list(list);
            }
            StoryItem::OrderedList(items) => {
                let max_chars = self.list_max_chars();
                let mut list = OrderedList::new();
                for entry in items {
                    list.push(breakable_paragraph(entry, max_chars));
                }
                self.write_list(list);
            }
            StoryItem::Spacer(points) => self.space(*points),
        }
    }

    /// Render and write the PDF file.
    pub fn write_to_file(self, path: impl AsRef<Path>) -> Result<()> {
        self.doc.render_to_file(path)?;
        Ok(())
    }

    /// Render the PDF into memory.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.doc.render(&mut out)?;
        Ok(out)
    }

    fn space(&mut self, points: f64) {
        let lines = self.styles.points_to_lines(points);
        if lines > 0.0 {
            self.doc.push(Break::new(lines));
        }
    }

    fn write_text(&mut self, text: &str, style: &TextStyle) {
        let max_chars = max_chars_per_line(self.text_width, style.size);
        self.space(style.space_before);
        self.doc
            .push(breakable_paragraph(text, max_chars).styled(style.to_style()));
        self.space(style.space_after);
    }

    fn write_quote(&mut self, text: &str) {
        let style = self.styles.quote;
        let indent = pt_to_mm(self.styles.quote_indent);
        let max_chars = max_chars_per_line(self.text_width - indent, style.size);
        self.space(style.space_before);
        self.doc.push(
            breakable_paragraph(text, max_chars)
                .styled(style.to_style().italic())
                .padded(Margins::trbl(0.0, 0.0, 0.0, indent)),
        );
        self.space(style.space_after);
    }

    fn write_code(&mut self, text: &str) {
        let style = self.styles.code;
        let mut code_style = style.to_style();
        if let Some(family) = &self.code_font {
            code_style = code_style.with_font_family(family.clone());
        }

        let padding = pt_to_mm(self.styles.code_padding);
        let max_chars = max_chars_per_line(self.text_width - 2.0 * padding, style.size);

        let mut layout = LinearLayout::vertical();
        for line in text.split('\n') {
            // Empty paragraphs collapse to zero height
            let line = if line.is_empty() { " " } else { line };
            layout.push(breakable_paragraph(line, max_chars));
        }

        self.space(style.space_before);
        self.doc.push(
            layout
                .styled(code_style)
                .padded(Margins::all(padding))
                .framed(),
        );
        self.space(style.space_after);
    }

    fn list_max_chars(&self) -> usize {
        let indent = pt_to_mm(self.styles.list_indent + LIST_MARKER_WIDTH);
        max_chars_per_line(self.text_width - indent, self.styles.base.size)
    }

    fn write_list<E: genpdf::Element + 'static>(&mut self, list: E) {
        let style = self.styles.base;
        let indent = pt_to_mm(self.styles.list_indent);
        self.doc.push(
            list.styled(style.to_style())
                .padded(Margins::trbl(0.0, 0.0, 0.0, indent)),
        );
    }
}

/// Widest glyph advance assumed when sizing unbreakable runs, in ems.
/// Bold Latin capitals run slightly over one em; CJK and monospace do not.
const MAX_GLYPH_EMS: f64 = 1.2;

/// Characters that always fit on one line of `width_mm` at `font_size`.
/// Always at least 1.
fn max_chars_per_line(width_mm: f64, font_size: u8) -> usize {
    let em = pt_to_mm(f64::from(font_size.max(1))) * MAX_GLYPH_EMS;
    let fit = (width_mm / em).floor();
    if fit < 2.0 { 1 } else { fit as usize - 1 }
}

/// Split `text` so that no run of non-space characters inside a segment is
/// longer than `max_chars`.
///
/// genpdf only wraps at spaces and between pushed strings, and fails the
/// whole render when a single word is wider than the line. Long URLs and
/// unspaced CJK runs are therefore cut into separate segments; concatenating
/// the segments gives back `text` unchanged.
fn break_long_words(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut segments = Vec::new();
    let mut start = 0;
    let mut run = 0;

    for (idx, c) in text.char_indices() {
        if c == ' ' {
            run = 0;
            continue;
        }
        if run == max_chars {
            segments.push(&text[start..idx]);
            start = idx;
            run = 0;
        }
        run += 1;
    }
    segments.push(&text[start..]);
    segments
}

/// A paragraph whose words are pushed in line-sized pieces.
fn breakable_paragraph(text: &str, max_chars: usize) -> Paragraph {
    let mut segments = break_long_words(text, max_chars).into_iter();
    let mut paragraph = Paragraph::new(segments.next().unwrap_or_default());
    for segment in segments {
        paragraph.push(segment);
    }
    paragraph
}
