//! Multi-file document builds.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::block::ParseOptions;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::fonts::Fonts;
use crate::render::PdfWriter;
use crate::story::{FILE_GAP, Story};
use crate::style::StyleSheet;

/// Markdown file used when no inputs are given.
pub const DEFAULT_README: &str = "README.md";
/// License file appended to the defaults when present.
pub const DEFAULT_LICENSE: &str = "LICENSE";

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    /// Path of the written PDF.
    pub output: PathBuf,
    /// Number of input files that made it into the document.
    pub files: usize,
}

/// Default inputs under `root`: the README plus the license if it exists.
pub fn default_inputs(root: &Path) -> Vec<PathBuf> {
    let mut inputs = vec![root.join(DEFAULT_README)];
    let license = root.join(DEFAULT_LICENSE);
    if license.exists() {
        inputs.push(license);
    }
    inputs
}

/// Whether a file is rendered as plain text rather than Markdown.
fn is_license(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().to_uppercase() == DEFAULT_LICENSE)
}

/// Read every existing input and lay it out.
///
/// Missing files are skipped with a warning. Returns the story and the
/// number of files it contains.
pub fn collect_story(inputs: &[PathBuf], options: &ParseOptions) -> Result<(Story, usize)> {
    if inputs.is_empty() {
        return Err(Error::NoInputs);
    }

    let mut story = Story::new();
    let mut processed = 0;

    for path in inputs {
        if !path.exists() {
            warn!(path = %path.display(), "input file does not exist, skipping");
            continue;
        }

        let bytes = std::fs::read(path).map_err(|source| Error::ReadInput {
            path: path.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        if processed > 0 {
            story.push_spacer(FILE_GAP);
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        if is_license(path) {
            story.append_text_as_code(&content, DEFAULT_LICENSE);
        } else {
            story.append_markdown(&content, &name, options);
        }

        processed += 1;
        info!(file = %name, "processed input");
    }

    if processed == 0 {
        return Err(Error::NothingProcessed);
    }

    debug!(files = processed, items = story.len(), "story assembled");
    Ok((story, processed))
}

/// Build one PDF from several input files.
///
/// The output directory is created if needed.
pub fn build_pdf_from_files(
    inputs: &[PathBuf],
    output: &Path,
    title: &str,
    config: &Config,
) -> Result<BuildSummary> {
    let (story, files) = collect_story(inputs, &config.parse)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| Error::CreateOutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let fonts = Fonts::resolve(&config.fonts)?;
    let styles = StyleSheet::new(&config.page);

    let mut writer = PdfWriter::new(fonts, &styles, title, &config.page);
    writer.write_story(&story);
    writer.write_to_file(output)?;

    info!(
        output = %output.display(),
        author = config.author.as_deref().unwrap_or(""),
        "PDF written"
    );
    Ok(BuildSummary {
        output: output.to_path_buf(),
        files,
    })
}
