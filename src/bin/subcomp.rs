use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use subcomp::{
    FragmentSource, FragmentTimeline, FrameOutput, HeapAllocator, RenderContext,
    RenderContextOpts, TimelineSource, compute_bounding_box,
};

#[derive(Parser, Debug)]
#[command(name = "subcomp", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one subtitle frame and write the cropped image as a PNG.
    Frame(FrameArgs),
    /// Print the bounding box of one subtitle frame as JSON.
    Bbox(BboxArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input fragment timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timestamp in milliseconds.
    #[arg(long)]
    time_ms: i64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Optional render context options JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BboxArgs {
    /// Input fragment timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timestamp in milliseconds.
    #[arg(long)]
    time_ms: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Bbox(args) => cmd_bbox(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_opts(path: Option<&Path>) -> anyhow::Result<RenderContextOpts> {
    let Some(path) = path else {
        return Ok(RenderContextOpts::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let timeline = FragmentTimeline::from_path(&args.in_path)?;
    let canvas = timeline.canvas;
    let opts = load_opts(args.config.as_deref())?;

    let mut ctx = RenderContext::new(TimelineSource::new(timeline), HeapAllocator, opts);
    ctx.set_frame_size(canvas.width, canvas.height)?;

    let frame = match ctx.render_frame(args.time_ms)? {
        FrameOutput::Rendered(frame) => frame,
        FrameOutput::Unchanged | FrameOutput::Empty => {
            println!("empty");
            return Ok(());
        }
    };

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.surface.to_rgba8(),
        frame.surface.width,
        frame.surface.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    println!("{}", serde_json::to_string(&frame.rect)?);
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_bbox(args: BboxArgs) -> anyhow::Result<()> {
    let timeline = FragmentTimeline::from_path(&args.in_path)?;
    let canvas = timeline.canvas;
    let mut source = TimelineSource::new(timeline);
    source.set_frame_size(canvas)?;
    let frame = source.render(args.time_ms)?;
    let rect = compute_bounding_box(&frame.fragments, canvas);
    println!("{}", serde_json::to_string(&rect)?);
    Ok(())
}
