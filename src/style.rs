//! Per-document style sheet.
//!
//! Built once per build from the page settings and passed by reference to
//! the writer, so two builds never share style state.

use genpdf::style::{Color, Style};

use crate::config::PageConfig;

const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Convert typographic points to millimetres.
#[inline]
pub fn pt_to_mm(points: f64) -> f64 {
    points / POINTS_PER_MM
}

/// Text appearance plus the vertical space around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub size: u8,
    pub bold: bool,
    pub color: Option<(u8, u8, u8)>,
    /// Space above, in points.
    pub space_before: f64,
    /// Space below, in points.
    pub space_after: f64,
}

impl TextStyle {
    const fn plain(size: u8, space_before: f64, space_after: f64) -> Self {
        Self {
            size,
            bold: false,
            color: None,
            space_before,
            space_after,
        }
    }

    const fn heading(size: u8, grey: Option<u8>, space_before: f64, space_after: f64) -> Self {
        let color = match grey {
            Some(g) => Some((g, g, g)),
            None => None,
        };
        Self {
            size,
            bold: true,
            color,
            space_before,
            space_after,
        }
    }

    /// Equivalent genpdf style (font family left to the caller).
    pub fn to_style(&self) -> Style {
        let mut style = Style::new().with_font_size(self.size);
        if self.bold {
            style = style.bold();
        }
        if let Some((r, g, b)) = self.color {
            style = style.with_color(Color::Rgb(r, g, b));
        }
        style
    }
}

/// Styles for every story item kind.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub base: TextStyle,
    headings: [TextStyle; 6],
    pub quote: TextStyle,
    /// Left indent of quotes, in points.
    pub quote_indent: f64,
    pub code: TextStyle,
    /// Padding inside the code frame, in points.
    pub code_padding: f64,
    /// Left indent of list bodies, in points.
    pub list_indent: f64,
    /// Line spacing multiplier.
    pub line_spacing: f64,
}

impl StyleSheet {
    pub fn new(page: &PageConfig) -> Self {
        let base = TextStyle::plain(page.font_size, 0.0, 6.0);
        Self {
            base,
            headings: [
                TextStyle::heading(20, None, 6.0, 12.0),
                TextStyle::heading(15, Some(0x22), 10.0, 8.0),
                TextStyle::heading(13, Some(0x33), 8.0, 6.0),
                TextStyle::heading(12, Some(0x44), 6.0, 5.0),
                TextStyle::heading(11, Some(0x55), 5.0, 4.0),
                TextStyle::heading(10, Some(0x66), 4.0, 3.0),
            ],
            quote: TextStyle {
                color: Some((0x55, 0x55, 0x55)),
                ..TextStyle::plain(base.size, 6.0, 8.0)
            },
            quote_indent: 10.0,
            code: TextStyle::plain(9, 6.0, 8.0),
            code_padding: 6.0,
            list_indent: 14.0,
            line_spacing: page.line_spacing,
        }
    }

    /// Style for a heading level; levels outside 1-6 are clamped.
    pub fn heading(&self, level: u8) -> &TextStyle {
        let idx = usize::from(level.clamp(1, 6)) - 1;
        &self.headings[idx]
    }

    /// Convert a vertical gap in points into body line units.
    pub fn points_to_lines(&self, points: f64) -> f64 {
        let line_height = f64::from(self.base.size) * self.line_spacing;
        if line_height <= 0.0 {
            return 0.0;
        }
        points / line_height
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new(&PageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_sizes_decrease() {
        let styles = StyleSheet::default();
        for level in 1..6 {
            assert!(styles.heading(level).size >= styles.heading(level + 1).size);
        }
        assert_eq!(styles.heading(1).size, 20);
    }

    #[test]
    fn test_heading_level_clamped() {
        let styles = StyleSheet::default();
        assert_eq!(styles.heading(0), styles.heading(1));
        assert_eq!(styles.heading(9), styles.heading(6));
    }

    #[test]
    fn test_base_follows_page_config() {
        let page = PageConfig {
            font_size: 14,
            ..PageConfig::default()
        };
        let styles = StyleSheet::new(&page);
        assert_eq!(styles.base.size, 14);
        assert_eq!(styles.quote.size, 14);
    }

    #[test]
    fn test_points_to_lines() {
        let page = PageConfig {
            font_size: 10,
            line_spacing: 1.5,
            ..PageConfig::default()
        };
        let styles = StyleSheet::new(&page);
        assert!((styles.points_to_lines(30.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_line_height_gives_no_space() {
        let page = PageConfig {
            line_spacing: 0.0,
            ..PageConfig::default()
        };
        assert_eq!(StyleSheet::new(&page).points_to_lines(12.0), 0.0);
    }

    #[test]
    fn test_pt_to_mm() {
        assert!((pt_to_mm(72.0) - 25.4).abs() < 1e-9);
    }

    #[test]
    fn test_independent_sheets() {
        let mut a = StyleSheet::default();
        let b = StyleSheet::default();
        a.list_indent = 30.0;
        assert_ne!(a, b);
    }
}
