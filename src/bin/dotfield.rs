use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use dotfield::{
    AmbientSnapshot, AnimationClock, ColorMode, CpuSurface, CpuSurfaceOpts, CpuSurfaceProvider,
    DocumentExtent, DotField, FrameDriver, InputScript, PngSequenceSink, RenderConfig,
    RenderState, ScriptedInput, ScrollOffset, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "dotfield", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence on simulated time.
    Render(RenderArgs),
    /// Print the default render config as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Logical viewport width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Logical viewport height.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Horizontal document scroll.
    #[arg(long, default_value_t = 0.0)]
    scroll_x: f64,

    /// Vertical document scroll.
    #[arg(long, default_value_t = 0.0)]
    scroll_y: f64,

    /// Scrollable document width (defaults to the viewport width).
    #[arg(long)]
    doc_width: Option<f64>,

    /// Scrollable document height (defaults to the viewport height).
    #[arg(long)]
    doc_height: Option<f64>,

    /// Use the dark color scheme.
    #[arg(long)]
    dark: bool,

    /// Milliseconds since the first frame.
    #[arg(long, default_value_t = 10_000.0)]
    at_ms: f64,

    #[command(flatten)]
    config: ConfigArgs,

    /// Paint an opaque background, as `r,g,b`.
    #[arg(long, value_parser = parse_rgb)]
    background: Option<[u8; 3]>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

/// Config file plus per-field overrides applied on top of it.
#[derive(clap::Args, Debug)]
struct ConfigArgs {
    /// Render config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override grid spacing.
    #[arg(long)]
    dot_distance: Option<f64>,

    /// Override dot radius.
    #[arg(long)]
    dot_size: Option<f64>,

    /// Override line opacity.
    #[arg(long)]
    line_opacity: Option<f64>,

    /// Override the fade-in duration in milliseconds.
    #[arg(long)]
    duration_ms: Option<f64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Logical viewport width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Logical viewport height.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Number of frames to render.
    #[arg(long)]
    frames: u64,

    /// Input script JSON replayed during the run.
    #[arg(long)]
    script: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Paint an opaque background, as `r,g,b`.
    #[arg(long, value_parser = parse_rgb)]
    background: Option<[u8; 3]>,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Config => cmd_config(),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_rgb(s: &str) -> Result<[u8; 3], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts[..] else {
        return Err(format!("expected r,g,b, got '{s}'"));
    };
    let c = |v: &str| v.parse::<u8>().map_err(|e| format!("bad channel '{v}': {e}"));
    Ok([c(r)?, c(g)?, c(b)?])
}

fn load_config(args: &ConfigArgs) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &args.config {
        Some(p) => RenderConfig::from_path(p)
            .with_context(|| format!("load render config '{}'", p.display()))?,
        None => RenderConfig::default(),
    };
    if let Some(v) = args.dot_distance {
        cfg.dot_distance = v;
    }
    if let Some(v) = args.dot_size {
        cfg.dot_size = v;
    }
    if let Some(v) = args.line_opacity {
        cfg.line_opacity = v;
    }
    if let Some(v) = args.duration_ms {
        cfg.appearance_duration_ms = v;
    }
    cfg.validate().context("invalid render config")?;
    Ok(cfg)
}

fn surface_opts(background: Option<[u8; 3]>) -> CpuSurfaceOpts {
    CpuSurfaceOpts::default().with_clear_rgba(background.map(|[r, g, b]| [r, g, b, 255]))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let viewport = Viewport::new(args.width, args.height);
    let extent = DocumentExtent::new(
        args.doc_width.unwrap_or(args.width),
        args.doc_height.unwrap_or(args.height),
    );
    let mut state = RenderState::from_snapshot(AmbientSnapshot {
        viewport,
        scroll: ScrollOffset::new(args.scroll_x, args.scroll_y),
        extent,
        color_mode: ColorMode::from_dark(args.dark),
    });
    state.clock = AnimationClock::Started(0.0);

    let (w, h) = viewport.device_size();
    let mut surface = CpuSurface::new(w, h, surface_opts(args.background))
        .with_context(|| format!("cannot rasterize a {w}x{h} surface"))?;
    let stats = dotfield::render_frame(&mut surface, &state, &config, args.at_ms);
    let frame = surface.snapshot();

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    dotfield::write_png(&args.out, &frame)?;

    tracing::info!(rows = stats.rows, columns = stats.columns, "frame rendered");
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = load_config(&args.config)?;
    let mut script = match &args.script {
        Some(p) => InputScript::from_path(p)
            .with_context(|| format!("load input script '{}'", p.display()))?,
        None => InputScript::default(),
    };

    let mut input = ScriptedInput::fitted(Viewport::new(args.width, args.height));
    let mut provider = CpuSurfaceProvider::new(surface_opts(args.background));
    let mut driver = FrameDriver::new(args.fps)?;
    let mut mounted = driver
        .mount(DotField::new(config), &mut input, &mut provider)
        .context("viewport too large or empty for the cpu rasterizer")?;

    let mut sink = PngSequenceSink::new(&args.out_dir);
    let stats = driver.run(&mut mounted, &mut input, &mut script, args.frames, &mut sink)?;
    driver.unmount(mounted, &mut input);

    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&RenderConfig::default())
        .context("serialize default render config")?;
    println!("{json}");
    Ok(())
}
