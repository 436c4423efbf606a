use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sierpinski_anim::{
    AnimationParams, Canvas, CancelToken, CarpetError, CarpetResult, FrameIndex, Fps,
    OutputFormat, Phase, Progress, ProgressObserver, Rgb8, RunHooks, RunOutcome,
};

#[derive(Parser, Debug)]
#[command(name = "sierpinski-anim", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animation to MP4 (requires `ffmpeg` on PATH) or GIF.
    Render(RenderArgs),
    /// Render a single frame or an exact order as a PNG.
    Frame(FrameArgs),
}

/// Animation parameters. Flags override values loaded with `--params`.
#[derive(Args, Debug)]
struct ParamArgs {
    /// JSON parameters file.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Carpet edge in cells (power of 3).
    #[arg(long)]
    size: Option<u32>,

    /// Highest recursion order.
    #[arg(long)]
    depth: Option<u32>,

    /// Interpolation frames per order transition.
    #[arg(long)]
    frames_per_order: Option<u32>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Output format: mp4 or gif.
    #[arg(long)]
    format: Option<String>,

    /// Filled cell colour (#rrggbb).
    #[arg(long)]
    filled: Option<String>,

    /// Removed cell colour (#rrggbb).
    #[arg(long)]
    removed: Option<String>,

    /// Output resolution, `WxH` or a single edge (multiple of the size).
    #[arg(long)]
    resolution: Option<String>,

    /// Rasterise rows of each frame in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Output path; the format's extension is appended when missing.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Refuse to replace an existing output file.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,

    /// Do not retry as GIF when MP4 encoding fails.
    #[arg(long, default_value_t = false)]
    no_fallback: bool,

    /// Stop after this many frames (the output is still finalized).
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    max_frames: Option<u64>,

    /// Suppress progress output.
    #[arg(long, short, default_value_t = false)]
    quiet: bool,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    params: ParamArgs,

    /// Timeline frame index (0-based).
    #[arg(long, conflicts_with = "order")]
    index: Option<u64>,

    /// Exact recursion order to render.
    #[arg(long)]
    order: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn build_params(args: &ParamArgs) -> anyhow::Result<AnimationParams> {
    let mut params = match &args.params {
        Some(path) => AnimationParams::from_path(path)?,
        None => AnimationParams::default(),
    };
    if let Some(size) = args.size {
        params.size = size;
    }
    if let Some(depth) = args.depth {
        params.depth = depth;
    }
    if let Some(f) = args.frames_per_order {
        params.frames_per_order = f;
    }
    if let Some(fps) = args.fps {
        params.fps = Fps::whole(fps)?;
    }
    if let Some(format) = &args.format {
        params.format = format.parse::<OutputFormat>()?;
    }
    if let Some(hex) = &args.filled {
        params.colors.filled = Rgb8::from_hex(hex)?;
    }
    if let Some(hex) = &args.removed {
        params.colors.removed = Rgb8::from_hex(hex)?;
    }
    if let Some(res) = &args.resolution {
        params.resolution = Some(Canvas::parse(res)?);
    }
    if args.parallel {
        params.render.parallel = true;
    }
    Ok(params)
}

/// Prints a progress line to stderr at each whole percent.
struct StderrProgress {
    quiet: bool,
    last_percent: Option<u8>,
    max_frames: Option<u64>,
    cancel: CancelToken,
}

impl ProgressObserver for StderrProgress {
    fn on_progress(&mut self, p: Progress) -> anyhow::Result<()> {
        if self.max_frames.is_some_and(|max| p.completed >= max) {
            self.cancel.cancel();
        }
        if self.quiet {
            return Ok(());
        }
        let pct = p.percent();
        if self.last_percent != Some(pct) {
            self.last_percent = Some(pct);
            eprint!(
                "\rframe {}/{} (order {}) {pct:>3}%",
                p.completed, p.total, p.order
            );
        }
        Ok(())
    }

    fn on_phase(&mut self, phase: Phase) -> anyhow::Result<()> {
        if self.quiet {
            return Ok(());
        }
        match phase {
            Phase::Rendering { total_frames } => eprintln!("rendering {total_frames} frames"),
            Phase::Finalizing => eprintln!("\nfinalizing output"),
            Phase::Done => {}
        }
        Ok(())
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut params = build_params(&args.params)?;
    if let Some(out) = args.out.clone() {
        params.output = out;
    }
    params.overwrite = !args.no_overwrite;

    let rendered = match run_render(&params, &args) {
        Err(CarpetError::Encoding(msg))
            if params.format == OutputFormat::Video && !args.no_fallback =>
        {
            eprintln!("\nMP4 encoding failed: {msg}");
            eprintln!("falling back to GIF (make sure ffmpeg is installed and on PATH for MP4)");
            params.format = OutputFormat::Gif;
            params.output = params
                .output_path()
                .with_extension(OutputFormat::Gif.extension());
            run_render(&params, &args)
        }
        other => other,
    };
    let (outcome, path) =
        rendered.with_context(|| format!("render '{}'", params.output_path().display()))?;

    match outcome {
        RunOutcome::Completed(stats) => {
            eprintln!("wrote {} ({} frames)", path.display(), stats.frames_delivered);
        }
        RunOutcome::Cancelled(stats) => {
            eprintln!(
                "\nstopped after {} of {} frames; wrote {}",
                stats.frames_delivered,
                stats.frames_total,
                path.display()
            );
        }
    }
    Ok(())
}

fn run_render(
    params: &AnimationParams,
    args: &RenderArgs,
) -> CarpetResult<(RunOutcome, PathBuf)> {
    let cancel = CancelToken::new();
    let mut progress = StderrProgress {
        quiet: args.quiet,
        last_percent: None,
        max_frames: args.max_frames,
        cancel: cancel.clone(),
    };
    let hooks = RunHooks::none()
        .with_progress(&mut progress)
        .with_cancel(&cancel);
    sierpinski_anim::render_to_file(params, hooks)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let params = build_params(&args.params)?;
    let frame = match (args.index, args.order) {
        (_, Some(order)) => sierpinski_anim::render_order(&params, order)?,
        (index, None) => {
            sierpinski_anim::render_frame_at(&params, FrameIndex(index.unwrap_or(0)))?
        }
    };
    frame.save_png(&args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
