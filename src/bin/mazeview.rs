use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mazeview::{
    AnimationSequence, CpuBackend, ExportOptions, FrameRGBA, Grid, InputEvent, MazeView,
    RenderSettings, RevealView, Size, ViewConfig, Vec2,
};

#[derive(Parser, Debug)]
#[command(name = "mazeview", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the viewport as the interactive viewer would show it.
    Frame(FrameArgs),
    /// Render the whole maze at a fixed cell size.
    Export(ExportArgs),
    /// Play a solve sequence and write frames as PNGs.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct ViewportArgs {
    /// Input grid JSON.
    #[arg(long)]
    grid: PathBuf,

    /// Container width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Container height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewportArgs,

    /// Wheel steps toward the viewport center; negative zooms out.
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    zoom: i32,

    /// Horizontal pan in pixels, applied as a drag after zooming.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_x: f64,

    /// Vertical pan in pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pan_y: f64,

    /// Optional `{visited, path}` JSON, drawn fully revealed.
    #[arg(long)]
    sequence: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input grid JSON.
    #[arg(long)]
    grid: PathBuf,

    /// Pixels per cell.
    #[arg(long)]
    cell_px: Option<f64>,

    /// Optional `{visited, path}` JSON, drawn fully revealed.
    #[arg(long)]
    sequence: Option<PathBuf>,

    /// Output PNG path. Defaults to `maze_{rows}x{cols}_{millis}.png` in `--out-dir`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for the default file name.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write a 400x225 cover-fit preview here.
    #[arg(long)]
    thumbnail: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    view: ViewportArgs,

    /// `{visited, path}` JSON to play back.
    #[arg(long)]
    sequence: PathBuf,

    /// Directory receiving `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Write every Nth rendered frame (the final frame is always written).
    #[arg(long, default_value_t = 1)]
    every: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn read_grid(path: &Path) -> anyhow::Result<Grid> {
    let f = File::open(path).with_context(|| format!("open grid '{}'", path.display()))?;
    let grid = Grid::from_reader(BufReader::new(f))
        .with_context(|| format!("load grid '{}'", path.display()))?;
    Ok(grid)
}

fn read_sequence(path: &Path) -> anyhow::Result<AnimationSequence> {
    let f = File::open(path).with_context(|| format!("open sequence '{}'", path.display()))?;
    let seq: AnimationSequence = serde_json::from_reader(BufReader::new(f))
        .with_context(|| "parse sequence JSON")?;
    Ok(seq)
}

fn open_view(args: &ViewportArgs) -> anyhow::Result<MazeView> {
    let grid = read_grid(&args.grid)?;
    let mut view = MazeView::new(grid, ViewConfig::from_env())?;
    view.handle(InputEvent::Resize {
        size: Size::new(args.width, args.height),
    });
    if view.cell_size() <= 0.0 {
        anyhow::bail!(
            "container {}x{} leaves no room for cells after padding",
            args.width,
            args.height
        );
    }
    Ok(view)
}

/// Strip the overscan margin so the PNG shows exactly the container.
fn crop_to_viewport(view: &MazeView, frame: &FrameRGBA) -> anyhow::Result<FrameRGBA> {
    let pad = view.config().overscan_padding_px.max(0.0).ceil() as u32;
    let w = frame.width.saturating_sub(2 * pad);
    let h = frame.height.saturating_sub(2 * pad);
    Ok(frame.crop(pad, pad, w, h)?)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut view = open_view(&args.view)?;

    let center = mazeview::Point::new(args.view.width / 2.0, args.view.height / 2.0);
    for _ in 0..args.zoom.unsigned_abs() {
        let delta = if args.zoom > 0 { -1.0 } else { 1.0 };
        view.handle(InputEvent::Wheel {
            delta_y: delta,
            at: Some(center),
        });
    }
    if args.pan_x != 0.0 || args.pan_y != 0.0 {
        let to = center + Vec2::new(args.pan_x, args.pan_y);
        view.handle(InputEvent::PointerDown { at: center });
        view.handle(InputEvent::PointerUp { at: to });
    }
    if let Some(path) = &args.sequence {
        view.assign_sequence(read_sequence(path)?)?;
        view.finish_animation();
    }

    let mut backend = CpuBackend::new(RenderSettings::default());
    let frame = view
        .render_if_dirty(&mut backend)?
        .context("nothing to render")?;
    let frame = crop_to_viewport(&view, &frame)?;
    mazeview::save_png(&frame, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let grid = read_grid(&args.grid)?;
    let cfg = ViewConfig::from_env();
    let sequence = args.sequence.as_deref().map(read_sequence).transpose()?;
    if let Some(seq) = &sequence {
        grid.check_coords("visited", &seq.visited)?;
        grid.check_coords("path", &seq.path)?;
    }
    let opts = ExportOptions {
        endpoints: None,
        reveal: sequence
            .as_ref()
            .map_or_else(RevealView::none, |s| RevealView::complete(&s.visited, &s.path)),
        cell_px: args.cell_px,
    };

    let mut backend = CpuBackend::new(RenderSettings::default());
    let out = match &args.out {
        Some(out) => {
            let frame = mazeview::render_export(&mut backend, &grid, &opts, &cfg)?;
            mazeview::save_png(&frame, out)?;
            if let Some(thumb) = &args.thumbnail {
                write_thumbnail(&frame, thumb)?;
            }
            out.clone()
        }
        None => {
            let out =
                mazeview::export::export_to_dir(&mut backend, &grid, &opts, &cfg, &args.out_dir)?;
            if let Some(thumb) = &args.thumbnail {
                let frame = mazeview::render_export(&mut backend, &grid, &opts, &cfg)?;
                write_thumbnail(&frame, thumb)?;
            }
            out
        }
    };
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn write_thumbnail(frame: &FrameRGBA, path: &Path) -> anyhow::Result<()> {
    let (w, h) = mazeview::export::THUMBNAIL_SIZE;
    let thumb = mazeview::export::thumbnail(frame, w, h)?;
    mazeview::save_png(&thumb, path)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let mut view = open_view(&args.view)?;
    view.assign_sequence(read_sequence(&args.sequence)?)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let every = args.every.max(1);
    let interval = Duration::from_secs_f64(view.config().min_frame_interval_ms.max(1.0) / 1000.0);
    let mut backend = CpuBackend::new(RenderSettings::default());
    let mut now = Duration::ZERO;
    let mut rendered = 0usize;
    let mut written = 0usize;

    loop {
        let outcome = view.on_frame(now);
        now += interval;
        let Some(frame) = view.render_if_dirty(&mut backend)? else {
            if view.animation_running() {
                continue;
            }
            break;
        };
        let last = !view.animation_running();
        if rendered % every == 0 || last {
            let frame = crop_to_viewport(&view, &frame)?;
            let path = args.out_dir.join(format!("frame_{rendered:05}.png"));
            mazeview::save_png(&frame, &path)?;
            written += 1;
        }
        rendered += 1;
        if last || outcome == mazeview::FrameOutcome::Completed {
            break;
        }
    }

    eprintln!(
        "rendered {rendered} frames, wrote {written} to {}",
        args.out_dir.display()
    );
    Ok(())
}
