//! imgfit CLI - Compress an image to a target file size (in KB).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use imgfit_core::{shrink_to_size, FilterType, OutputFormat, ShrinkOptions};

/// Compress a JPEG or WEBP image to a target size (KB).
#[derive(Parser)]
#[command(name = "imgfit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the input image (jpg/webp)
    input: PathBuf,

    /// Target size in KB
    #[arg(short, long)]
    target: u64,

    /// Output file path. Defaults to <input stem>_fit.<ext>
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Jpeg)]
    format: FormatArg,

    /// Minimum quality the search will accept (1-100)
    #[arg(long, default_value_t = 10)]
    quality_floor: u8,

    /// Output width never drops below this
    #[arg(long, default_value_t = 32)]
    min_width: u32,

    /// Output height never drops below this
    #[arg(long, default_value_t = 32)]
    min_height: u32,

    /// Optional max width to downscale to before compressing
    #[arg(long)]
    max_width: Option<u32>,

    /// Drop transparency even for WEBP output
    #[arg(long)]
    flatten: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Jpeg,
    Webp,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Jpeg => OutputFormat::Jpeg,
            FormatArg::Webp => OutputFormat::Webp,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format: OutputFormat = cli.format.into();
    let target_bytes = usize::try_from(cli.target)
        .ok()
        .and_then(|kb| kb.checked_mul(1024))
        .context("Target size in KB is too large")?;

    if cli.verbose {
        eprintln!("Reading: {}", cli.input.display());
    }

    let source = fs::read(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;

    let options = ShrinkOptions {
        format,
        quality_floor: cli.quality_floor,
        min_width: cli.min_width,
        min_height: cli.min_height,
        preserve_alpha: !cli.flatten,
        max_width: cli.max_width,
        filter: FilterType::Lanczos3,
        ..Default::default()
    };

    let result = shrink_to_size(&source, target_bytes, &options)
        .with_context(|| format!("Failed to compress {}", cli.input.display()))?;

    let out_path = cli
        .out
        .unwrap_or_else(|| default_output_path(&cli.input, format));

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    fs::write(&out_path, &result.bytes)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;

    println!("Wrote: {}", out_path.display());
    println!(
        "  Size: {} KB of {} KB target ({} bytes)",
        result.bytes.len() / 1024,
        cli.target,
        result.bytes.len()
    );
    println!("  Dimensions: {}x{}", result.width, result.height);
    println!("  Quality: {} ({:?})", result.quality, result.format);

    if !result.target_met {
        eprintln!(
            "warning: target of {} KB was not reachable at the configured quality and \
             dimension floors; wrote the smallest achievable output instead",
            cli.target
        );
    }

    Ok(())
}

/// Default output path: `<input stem>_fit.<ext>` next to the input, with the
/// extension taken from the output format.
fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    input.with_file_name(format!("{}_fit.{}", stem, format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_output_path_jpeg() {
        let path = default_output_path(Path::new("photos/cat.webp"), OutputFormat::Jpeg);
        assert_eq!(path, PathBuf::from("photos/cat_fit.jpg"));
    }

    #[test]
    fn test_default_output_path_webp() {
        let path = default_output_path(Path::new("cat.jpg"), OutputFormat::Webp);
        assert_eq!(path, PathBuf::from("cat_fit.webp"));
    }

    #[test]
    fn test_format_arg_conversion() {
        assert_eq!(OutputFormat::from(FormatArg::Jpeg), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::from(FormatArg::Webp), OutputFormat::Webp);
    }
}
