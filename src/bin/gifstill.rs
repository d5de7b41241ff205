use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use gifstill::{CanvasBounds, ExtractOpts, StillFormat};

#[derive(Parser, Debug)]
#[command(name = "gifstill", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every composited frame of a GIF as a still image.
    Extract(ExtractArgs),
    /// Write a single composited frame.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Input GIF file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for the stills (created if missing).
    #[arg(long)]
    out_dir: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Canvas sizing rule.
    #[arg(long, value_enum, default_value_t = CanvasChoice::Frame)]
    canvas: CanvasChoice,

    /// Composite and encode frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input GIF file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: usize,

    /// Output file path.
    #[arg(long)]
    out: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Png)]
    format: FormatChoice,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Canvas sizing rule.
    #[arg(long, value_enum, default_value_t = CanvasChoice::Frame)]
    canvas: CanvasChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    /// Lossless PNG.
    Png,
    /// Lossy JPEG at the given --quality.
    #[value(alias = "jpeg")]
    Jpg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CanvasChoice {
    /// Size each still to the target frame's own rectangle.
    Frame,
    /// Size each still to the animation's logical screen.
    Screen,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Extract(args) => cmd_extract(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn still_format(format: FormatChoice, quality: u8) -> anyhow::Result<StillFormat> {
    Ok(match format {
        FormatChoice::Png => StillFormat::Png,
        FormatChoice::Jpg => StillFormat::jpeg(quality)?,
    })
}

fn canvas_bounds(choice: CanvasChoice) -> CanvasBounds {
    match choice {
        CanvasChoice::Frame => CanvasBounds::FrameBounds,
        CanvasChoice::Screen => CanvasBounds::LogicalScreen,
    }
}

fn base_name(path: &Path) -> anyhow::Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .with_context(|| format!("derive base name from '{}'", path.display()))
}

fn cmd_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let format = still_format(args.format, args.quality)?;
    let anim = gifstill::decode_animation_from_path(&args.in_path)?;
    let base = base_name(&args.in_path)?;

    let opts = ExtractOpts {
        format,
        bounds: canvas_bounds(args.canvas),
        parallel: args.parallel,
        threads: args.threads,
    };
    let stats = gifstill::extract_to_dir(&anim, &base, &args.out_dir, &opts)?;

    eprintln!(
        "wrote {} of {} frames to {}",
        stats.frames_written,
        stats.frames_total,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let format = still_format(args.format, args.quality)?;
    let anim = gifstill::decode_animation_from_path(&args.in_path)?;
    let frame = gifstill::composite_frame(&anim, args.frame, canvas_bounds(args.canvas))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    gifstill::write_still(&args.out, &frame, format)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
