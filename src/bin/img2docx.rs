//! CLI binary for img2docx.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ReportConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use img2docx::{
    generate, ProgressCallback, ReportConfig, ReportProgressCallback, DEFAULT_OUTPUT_NAME,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a single bar that tracks image placement.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    /// Create a callback whose bar length is set by `on_report_start`
    /// (called once the directory has been scanned).
    fn new_dynamic() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_report_start

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message("Reading image folder…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ReportProgressCallback for CliProgressCallback {
    fn on_report_start(&self, total_images: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>3}/{len} images  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_images as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Placing");
    }

    fn on_image_placed(&self, done: usize, _total: usize) {
        self.bar.set_position(done as u64);
        self.bar.set_message(format!("image {done}"));
    }

    fn on_report_complete(&self, total_images: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} images placed",
            green("✔"),
            bold(&total_images.to_string())
        );
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Lay out a folder, default output name in the current directory
  img2docx ./photos

  # Explicit output path
  img2docx ./photos -o report.docx

  # Three images per row, smaller cells
  img2docx ./photos --per-row 3 --width-cm 5.0 --height-cm 3.2

  # Different caption wording
  img2docx ./photos --caption-prefix 图4.2- --caption-suffix 断面图

  # Machine-readable run stats
  img2docx ./photos --json > stats.json

FILE-NAME CONVENTION:
  <mileage>-<curve>.<ext>    e.g.  K7+250-2.jpg

  The part before the first '-' appears verbatim in the caption and is
  ranked by its first numeric token; the part after it is an integer
  tiebreaker. Names that don't follow the convention are laid out last
  rather than rejected.

ENVIRONMENT VARIABLES:
  IMG2DOCX_OUTPUT        Output file path
  IMG2DOCX_PER_ROW       Images per table row
  IMG2DOCX_WIDTH_CM      Image cell width in cm
  IMG2DOCX_HEIGHT_CM     Image cell height in cm
"#;

/// Lay out a folder of photos as a captioned Word table.
#[derive(Parser, Debug)]
#[command(
    name = "img2docx",
    version,
    about = "Lay out a folder of photos as a captioned, borderless Word table",
    long_about = "Order photos by the mileage encoded in their file names, normalize each to a \
uniform letterboxed canvas, and place them two-per-row in a borderless table with numbered \
captions — written as a single .docx.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Directory containing the input photos (direct children only).
    images: PathBuf,

    /// Output .docx path. Default: 图片汇总.docx in the current directory.
    #[arg(short, long, env = "IMG2DOCX_OUTPUT")]
    output: Option<PathBuf>,

    /// Images per table row.
    #[arg(long, env = "IMG2DOCX_PER_ROW", default_value_t = 2)]
    per_row: usize,

    /// Image cell width in centimetres.
    #[arg(long, env = "IMG2DOCX_WIDTH_CM", default_value_t = 7.6)]
    width_cm: f32,

    /// Image cell height in centimetres.
    #[arg(long, env = "IMG2DOCX_HEIGHT_CM", default_value_t = 4.7)]
    height_cm: f32,

    /// Caption text before the running number.
    #[arg(long, env = "IMG2DOCX_CAPTION_PREFIX")]
    caption_prefix: Option<String>,

    /// Caption text after the cycle marker.
    #[arg(long, env = "IMG2DOCX_CAPTION_SUFFIX")]
    caption_suffix: Option<String>,

    /// Print run stats as JSON to stdout.
    #[arg(long, env = "IMG2DOCX_JSON")]
    json: bool,

    /// Disable the progress bar.
    #[arg(long, env = "IMG2DOCX_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "IMG2DOCX_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "IMG2DOCX_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the progress bar is active;
    // the bar provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new_dynamic() as Arc<dyn ReportProgressCallback>)
    } else {
        None
    };

    let mut builder = ReportConfig::builder()
        .per_row(cli.per_row)
        .width_cm(cli.width_cm)
        .height_cm(cli.height_cm);
    if let Some(prefix) = &cli.caption_prefix {
        builder = builder.caption_prefix(prefix.clone());
    }
    if let Some(suffix) = &cli.caption_suffix {
        builder = builder.caption_suffix(suffix.clone());
    }
    if let Some(cb) = progress_cb {
        builder = builder.progress_callback(cb);
    }
    let config = builder.build().context("Invalid configuration")?;

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_NAME));

    // ── Run generation ───────────────────────────────────────────────────
    let stats = generate(&cli.images, &output_path, &config).context("Report generation failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise stats")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {} images / {} rows  {}ms  →  {}",
            green("✔"),
            stats.total_images,
            stats.total_rows,
            stats.total_duration_ms,
            bold(&output_path.display().to_string()),
        );
        eprintln!(
            "   {}",
            dim(&format!(
                "{}ms normalizing and placing",
                stats.assemble_duration_ms
            )),
        );
    }

    Ok(())
}
