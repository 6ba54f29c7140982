//! ferropdf CLI - build a PDF document from Markdown files

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ferropdf::{Config, build_pdf_from_files, default_inputs};

/// Config file looked up under the root when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "ferropdf.toml";

#[derive(Parser)]
#[command(name = "ferropdf")]
#[command(version, about = "Build a PDF document from Markdown files", long_about = None)]
#[command(after_help = "EXAMPLES:
    ferropdf                                  README.md (+ LICENSE) to docs/document.pdf
    ferropdf --input guide.md --input faq.md  Combine two files
    ferropdf --output out/book.pdf --title Handbook")]
struct Cli {
    /// Input file, repeatable. Defaults to README.md plus LICENSE if present
    #[arg(long = "input", value_name = "FILE")]
    inputs: Vec<PathBuf>,

    /// PDF output path [default: docs/document.pdf]
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// PDF title [default: Document]
    #[arg(long, value_name = "TITLE")]
    title: Option<String>,

    /// Directory that relative paths are resolved against
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// TOML config file [default: <root>/ferropdf.toml if it exists]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Body font file, tried before the built-in candidates (repeatable)
    #[arg(long = "font", value_name = "FILE")]
    fonts: Vec<PathBuf>,

    /// Emit a code block left open at end of file instead of dropping it
    #[arg(long)]
    keep_unterminated_code: bool,

    /// Show debug logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("✓ PDF written: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn run(cli: Cli) -> anyhow::Result<PathBuf> {
    let config = load_config(&cli)?;

    let output = resolve(&cli.root, cli.output.as_ref().unwrap_or(&config.output));
    let title = cli.title.clone().unwrap_or_else(|| config.title.clone());

    let inputs = if cli.inputs.is_empty() {
        default_inputs(&cli.root)
    } else {
        cli.inputs.iter().map(|p| resolve(&cli.root, p)).collect()
    };
    debug!(?inputs, output = %output.display(), "starting build");

    let summary = build_pdf_from_files(&inputs, &output, &title, &config)
        .with_context(|| format!("failed to build {}", output.display()))?;
    debug!(files = summary.files, "build finished");
    Ok(summary.output)
}

/// Load the config file and apply command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let path = match &cli.config {
        Some(path) => resolve(&cli.root, path),
        None => cli.root.join(DEFAULT_CONFIG_FILE),
    };

    let mut config = match Config::load_from_path(&path)? {
        Some(config) => {
            debug!(path = %path.display(), "loaded config");
            config
        }
        None if cli.config.is_some() => {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        None => Config::default(),
    };

    if !cli.fonts.is_empty() {
        let mut paths: Vec<PathBuf> = cli.fonts.iter().map(|p| resolve(&cli.root, p)).collect();
        paths.append(&mut config.fonts.paths);
        config.fonts.paths = paths;
    }
    if cli.keep_unterminated_code {
        config.parse.keep_unterminated_code = true;
    }
    Ok(config)
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(root: &Path, extra: &[&str]) -> Cli {
        let mut args = vec!["ferropdf", "--root", root.to_str().unwrap()];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn test_build_error_keeps_source_chain() {
        let dir = TempDir::new().unwrap();
        let err = run(cli(dir.path(), &["--input", "missing.md"])).unwrap_err();

        assert_eq!(err.chain().count(), 2);
        let rendered = format!("{err:#}");
        assert!(rendered.starts_with("failed to build "));
        assert!(rendered.ends_with(": none of the input files could be processed"));
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = load_config(&cli(dir.path(), &["--config", "absent.toml"])).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "[fonts]\npaths = [\"/etc/Body.ttf\"]\n",
        )
        .unwrap();

        let config = load_config(&cli(
            dir.path(),
            &["--font", "Mine.ttf", "--keep-unterminated-code"],
        ))
        .unwrap();

        assert_eq!(
            config.fonts.paths,
            [dir.path().join("Mine.ttf"), PathBuf::from("/etc/Body.ttf")]
        );
        assert!(config.parse.keep_unterminated_code);
    }
}
