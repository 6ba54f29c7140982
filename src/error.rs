//! Error types for document builds.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building a PDF.
///
/// Parsing itself never fails; everything here comes from file I/O, font
/// resolution or the PDF backend.
#[derive(Error, Debug)]
pub enum Error {
    #[error("at least one input file is required")]
    NoInputs,

    #[error("none of the input files could be processed")]
    NothingProcessed,

    #[error("failed to read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no usable font found (tried {} paths)", .tried.len())]
    NoFont { tried: Vec<PathBuf> },

    #[error("failed to load font {}: {source}", .path.display())]
    FontLoad {
        path: PathBuf,
        source: genpdf::error::Error,
    },

    #[error("PDF generation failed: {0}")]
    Pdf(#[from] genpdf::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
