//! Font discovery and loading.
//!
//! genpdf needs real font files for glyph metrics, so the body and code
//! families are resolved from configured paths first and then from a list
//! of common system locations. Loaded files are cached per build.

use std::path::{Path, PathBuf};

use genpdf::fonts::{FontData, FontFamily};
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::config::FontConfig;
use crate::error::{Error, Result};

/// Body font locations, in priority order. CJK-capable faces come first so
/// mixed-script documents render without missing glyphs.
pub const BODY_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/arphic/uming.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Monospace locations for code blocks.
pub const CODE_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationMono-Regular.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// Return the first path that exists.
pub fn pick_first_existing(paths: &[PathBuf]) -> Option<&Path> {
    paths.iter().map(PathBuf::as_path).find(|p| p.exists())
}

/// Configured paths followed by built-in candidates.
pub fn candidate_paths(configured: &[PathBuf], builtin: &[&str]) -> Vec<PathBuf> {
    configured
        .iter()
        .cloned()
        .chain(builtin.iter().map(PathBuf::from))
        .collect()
}

/// Sibling file names for the bold, italic and bold-italic faces of a
/// regular font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleVariants {
    pub bold: Vec<PathBuf>,
    pub italic: Vec<PathBuf>,
    pub bold_italic: Vec<PathBuf>,
}

impl StyleVariants {
    /// `DejaVuSans.ttf` gives `DejaVuSans-Bold.ttf`, `DejaVuSans-Oblique.ttf`
    /// and so on; a `-Regular` suffix is replaced rather than extended.
    pub fn for_regular(regular: &Path) -> Self {
        let stem = regular
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let family = stem.strip_suffix("-Regular").unwrap_or(stem.as_str());
        let ext = regular
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let dir = regular.parent().unwrap_or_else(|| Path::new(""));

        let sibling = |suffix: &str| dir.join(format!("{family}-{suffix}{ext}"));
        Self {
            bold: vec![sibling("Bold")],
            italic: vec![sibling("Italic"), sibling("Oblique")],
            bold_italic: vec![sibling("BoldItalic"), sibling("BoldOblique")],
        }
    }
}

/// Font files loaded during one build, keyed by path.
#[derive(Default)]
pub struct FontCache {
    loaded: FxHashMap<PathBuf, FontData>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct files loaded so far.
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Load a font file, reusing an earlier load of the same path.
    pub fn load(&mut self, path: &Path) -> Result<FontData> {
        if let Some(data) = self.loaded.get(path) {
            return Ok(data.clone());
        }

        let data = FontData::load(path, None).map_err(|source| Error::FontLoad {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded font");
        self.loaded.insert(path.to_path_buf(), data.clone());
        Ok(data)
    }

    /// Resolve a complete family from the first existing candidate.
    ///
    /// Missing style variants fall back to the regular face.
    pub fn resolve_family(&mut self, candidates: &[PathBuf]) -> Result<FontFamily<FontData>> {
        let Some(regular_path) = pick_first_existing(candidates) else {
            return Err(Error::NoFont {
                tried: candidates.to_vec(),
            });
        };

        let regular = self.load(regular_path)?;
        let variants = StyleVariants::for_regular(regular_path);
        let bold = self.load_variant(&variants.bold, &regular)?;
        let italic = self.load_variant(&variants.italic, &regular)?;
        let bold_italic = self.load_variant(&variants.bold_italic, &bold)?;

        info!(path = %regular_path.display(), "using font");
        Ok(FontFamily {
            regular,
            bold,
            italic,
            bold_italic,
        })
    }

    fn load_variant(&mut self, paths: &[PathBuf], fallback: &FontData) -> Result<FontData> {
        match pick_first_existing(paths) {
            Some(path) => self.load(path),
            None => Ok(fallback.clone()),
        }
    }
}

/// Body and code font families for one document.
pub struct Fonts {
    pub body: FontFamily<FontData>,
    /// `None` when no monospace font was found; code then uses the body font.
    pub code: Option<FontFamily<FontData>>,
}

impl Fonts {
    /// Resolve fonts from configuration plus the built-in candidates.
    pub fn resolve(config: &FontConfig) -> Result<Self> {
        let mut cache = FontCache::new();
        let body = cache.resolve_family(&candidate_paths(&config.paths, BODY_FONT_CANDIDATES))?;

        let code_candidates = candidate_paths(&config.code_paths, CODE_FONT_CANDIDATES);
        let code = match cache.resolve_family(&code_candidates) {
            Ok(family) => Some(family),
            Err(Error::NoFont { tried }) => {
                warn!(
                    tried = tried.len(),
                    "no monospace font found, code blocks use the body font"
                );
                None
            }
            Err(err) => return Err(err),
        };

        debug!(files = cache.len(), "fonts resolved");
        Ok(Self { body, code })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_pick_first_existing() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("b.ttf");
        std::fs::write(&present, b"").unwrap();

        let paths = vec![dir.path().join("a.ttf"), present.clone(), dir.path().join("c.ttf")];
        assert_eq!(pick_first_existing(&paths), Some(present.as_path()));
        assert_eq!(pick_first_existing(&paths[..1]), None);
    }

    #[test]
    fn test_candidate_paths_put_configured_first() {
        let configured = vec![PathBuf::from("/custom/Font.ttf")];
        let paths = candidate_paths(&configured, &["/builtin/A.ttf"]);
        assert_eq!(
            paths,
            [PathBuf::from("/custom/Font.ttf"), PathBuf::from("/builtin/A.ttf")]
        );
    }

    #[test]
    fn test_variants_of_plain_name() {
        let variants = StyleVariants::for_regular(Path::new("/fonts/DejaVuSans.ttf"));
        assert_eq!(variants.bold, [PathBuf::from("/fonts/DejaVuSans-Bold.ttf")]);
        assert_eq!(
            variants.italic,
            [
                PathBuf::from("/fonts/DejaVuSans-Italic.ttf"),
                PathBuf::from("/fonts/DejaVuSans-Oblique.ttf"),
            ]
        );
    }

    #[test]
    fn test_variants_replace_regular_suffix() {
        let variants =
            StyleVariants::for_regular(Path::new("/fonts/LiberationSans-Regular.ttf"));
        assert_eq!(
            variants.bold_italic,
            [
                PathBuf::from("/fonts/LiberationSans-BoldItalic.ttf"),
                PathBuf::from("/fonts/LiberationSans-BoldOblique.ttf"),
            ]
        );
    }

    #[test]
    fn test_no_candidates_is_no_font() {
        let dir = TempDir::new().unwrap();
        let candidates = vec![dir.path().join("missing.ttf")];

        let err = FontCache::new().resolve_family(&candidates).unwrap_err();
        match err {
            Error::NoFont { tried } => assert_eq!(tried, candidates),
            other => panic!("expected NoFont, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_font_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let bogus = dir.path().join("Bogus.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();

        let err = FontCache::new().resolve_family(&[bogus.clone()]).unwrap_err();
        match err {
            Error::FontLoad { path, .. } => assert_eq!(path, bogus),
            other => panic!("expected FontLoad, got {other:?}"),
        }
    }
}
