use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spriteforge::{
    AnimationState, AtlasSlot, DrawOutcome, Ease, ExportQuality, FrameOffset, FrameRequest,
    GridConfig, LiveCompositor, PreviewSession, SessionConfig, Theme, Zoom,
};

#[derive(Parser, Debug)]
#[command(name = "spriteforge", version, about = "Preview and export sprite grid animations")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one preview frame as a PNG.
    Frame(FrameArgs),
    /// Export the whole atlas as a PNG.
    Png(PngArgs),
    /// Export one state's row as a looping GIF.
    Gif(GifArgs),
    /// Drive the preview clock with synthetic ticks and print the status line per tick.
    Timeline(TimelineArgs),
}

/// Settings shared by every subcommand. Flags override the `--config` document.
#[derive(Args, Debug)]
struct SessionArgs {
    /// Session JSON to start from.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Animation state (idle, run, jump, attack).
    #[arg(long)]
    state: Option<AnimationState>,

    /// Grid rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Grid columns (frames per state).
    #[arg(long)]
    cols: Option<u32>,

    /// Horizontal offset for the active state, in atlas pixels.
    #[arg(long, allow_hyphen_values = true)]
    offset_x: Option<i32>,

    /// Vertical offset for the active state, in atlas pixels.
    #[arg(long, allow_hyphen_values = true)]
    offset_y: Option<i32>,
}

impl SessionArgs {
    fn resolve(&self) -> anyhow::Result<SessionConfig> {
        let mut cfg = match &self.config {
            Some(path) => SessionConfig::from_path(path)?,
            None => SessionConfig::default(),
        };
        if let Some(state) = self.state {
            cfg.state = state;
        }
        cfg.grid = GridConfig::new(
            self.rows.unwrap_or(cfg.grid.rows),
            self.cols.unwrap_or(cfg.grid.cols),
        );
        let cur = cfg.offsets.get(cfg.state);
        cfg.offsets.set(
            cfg.state,
            FrameOffset::new(self.offset_x.unwrap_or(cur.x), self.offset_y.unwrap_or(cur.y)),
        );
        Ok(cfg)
    }
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Viewport width.
    #[arg(long, default_value_t = 512)]
    width: u32,

    /// Viewport height.
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Integer zoom (1-8).
    #[arg(long)]
    zoom: Option<u32>,

    /// Background theme (dark, light, phosphor).
    #[arg(long)]
    theme: Option<Theme>,

    /// Draw the alignment crosshair and frame outline.
    #[arg(long)]
    guides: bool,
}

impl ViewArgs {
    fn apply(&self, cfg: &mut SessionConfig) {
        if let Some(z) = self.zoom {
            cfg.preview.zoom = Zoom::new(z);
        }
        if let Some(t) = self.theme {
            cfg.preview.theme = t;
        }
        if self.guides {
            cfg.preview.show_grid = true;
        }
    }
}

#[derive(Args, Debug)]
struct QualityArgs {
    /// Upscale 4x on export.
    #[arg(long, overrides_with = "no_upscale")]
    upscale: bool,

    /// Export at native atlas resolution.
    #[arg(long)]
    no_upscale: bool,
}

impl QualityArgs {
    fn resolve(&self, cfg: &SessionConfig) -> ExportQuality {
        if self.upscale {
            ExportQuality::Upscaled
        } else if self.no_upscale {
            ExportQuality::Standard
        } else {
            cfg.export.quality
        }
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Sprite atlas image.
    #[arg(long)]
    atlas: PathBuf,

    /// Frame index within the state's row (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    session: SessionArgs,

    #[command(flatten)]
    view: ViewArgs,
}

#[derive(Parser, Debug)]
struct PngArgs {
    /// Sprite atlas image.
    #[arg(long)]
    atlas: PathBuf,

    /// Entity name used in the suggested file name.
    #[arg(long)]
    name: Option<String>,

    /// Output path. Defaults to the suggested name inside `--out-dir`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for the suggested file name.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    quality: QualityArgs,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Sprite atlas image.
    #[arg(long)]
    atlas: PathBuf,

    /// Output path. Defaults to the suggested name inside `--out-dir`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for the suggested file name.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[command(flatten)]
    quality: QualityArgs,

    #[command(flatten)]
    session: SessionArgs,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 16)]
    ticks: u32,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    tick_ms: f64,

    /// Frames per second.
    #[arg(long)]
    fps: Option<f64>,

    /// Transition length in milliseconds.
    #[arg(long)]
    transition_ms: Option<f64>,

    /// Transition easing (linear, easeOut, easeInOut, elastic).
    #[arg(long)]
    easing: Option<Ease>,

    /// Switch to this state halfway through.
    #[arg(long)]
    switch_to: Option<AnimationState>,

    /// Atlas to draw each tick; without it the clock runs with nothing to draw.
    #[arg(long)]
    atlas: Option<PathBuf>,

    #[command(flatten)]
    session: SessionArgs,

    #[command(flatten)]
    view: ViewArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Png(args) => cmd_png(args),
        Command::Gif(args) => cmd_gif(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn output_path(out: Option<PathBuf>, out_dir: &Path, suggested: &str) -> PathBuf {
    out.unwrap_or_else(|| out_dir.join(suggested))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut cfg = args.session.resolve()?;
    args.view.apply(&mut cfg);

    let slot = AtlasSlot::from(spriteforge::load_atlas(&args.atlas));
    if let AtlasSlot::Failed(msg) = &slot {
        anyhow::bail!("{msg}");
    }

    let req = FrameRequest {
        grid: cfg.grid,
        state: cfg.state,
        frame: args.frame.min(cfg.grid.cols.saturating_sub(1)),
        offsets: cfg.offsets,
    };
    let mut compositor = LiveCompositor::new(cfg.preview);
    match compositor.draw((args.view.width, args.view.height), &slot, &req) {
        DrawOutcome::Drawn { source, dest } => {
            tracing::info!(?source, ?dest, "frame drawn");
        }
        DrawOutcome::Skipped(reason) => anyhow::bail!("nothing to draw: {reason:?}"),
    }

    let bytes = spriteforge::encode_png(compositor.surface())?;
    spriteforge::write_output(&args.out, &bytes)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let mut cfg = args.session.resolve()?;
    if args.name.is_some() {
        cfg.export.entity_name = args.name.clone();
    }
    let quality = args.quality.resolve(&cfg);

    let export = pollster::block_on(spriteforge::export_static(
        async { spriteforge::load_atlas(&args.atlas) },
        quality,
        cfg.export.entity_name.as_deref(),
    ))?;

    let out = output_path(args.out, &args.out_dir, &export.filename);
    let bytes = spriteforge::encode_static(&export)?;
    spriteforge::write_output(&out, &bytes)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let cfg = args.session.resolve()?;
    let mut req = cfg.export_request();
    req.quality = args.quality.resolve(&cfg);

    let export = pollster::block_on(spriteforge::export_animation(
        async { spriteforge::load_atlas(&args.atlas) },
        &req,
    ))?;

    let out = output_path(args.out, &args.out_dir, &export.filename);
    let bytes = spriteforge::encode_gif(&export).context("encode gif")?;
    spriteforge::write_output(&out, &bytes)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let mut cfg = args.session.resolve()?;
    args.view.apply(&mut cfg);
    if let Some(fps) = args.fps {
        cfg.playback.fps = fps;
    }
    if let Some(ms) = args.transition_ms {
        cfg.playback.transition_ms = ms;
    }
    if let Some(ease) = args.easing {
        cfg.playback.easing = ease;
    }

    let slot = match &args.atlas {
        Some(path) => AtlasSlot::from(spriteforge::load_atlas(path)),
        None => AtlasSlot::Pending,
    };
    let viewport = (args.view.width, args.view.height);

    let mut session = PreviewSession::from_config(&cfg);
    for i in 0..args.ticks {
        if i == args.ticks / 2
            && let Some(state) = args.switch_to
        {
            session.set_state(state);
        }
        let now = f64::from(i) * args.tick_ms;
        let outcome = session.tick(now, viewport, &slot);
        let snap = session.snapshot();
        let drawn = if outcome.is_drawn() { "drawn" } else { "skipped" };
        println!(
            "{now:>9.1}ms  {}  transition {:.3} from {}  {drawn}",
            session.status(),
            snap.transition_progress,
            snap.previous_state,
        );
    }
    Ok(())
}
