//! Render a height field into an in-memory frame
//!
//! Loads an `x y z` point file (or builds a rolling test surface), renders it
//! with the software rasterizer and prints frame statistics. `--preview`
//! prints a coarse text rendition of the frame to the terminal.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use gridshade_core::{GridPoint, Rgba8};
use gridshade_render::{ColorBarConfig, RenderConfig, RenderMode, SphericalAngles, Viewer};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Filled,
    Wireframe,
    Points,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Filled => RenderMode::Filled,
            Mode::Wireframe => RenderMode::Wireframe,
            Mode::Points => RenderMode::Points,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "render_heightfield", about = "Render a height-field grid with a software rasterizer")]
struct Args {
    /// Point file with one `x y z` triple per line
    input: Option<PathBuf>,

    /// Rows of the generated surface when no input is given
    #[arg(long, default_value_t = 24)]
    rows: usize,

    /// Columns of the generated surface when no input is given
    #[arg(long, default_value_t = 32)]
    cols: usize,

    #[arg(long, default_value_t = 640)]
    width: usize,

    #[arg(long, default_value_t = 480)]
    height: usize,

    #[arg(long, value_enum, default_value_t = Mode::Filled)]
    mode: Mode,

    /// Rotation about X, in degrees
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotate_x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotate_y: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotate_z: f64,

    /// Camera angle from the +Z axis, in degrees
    #[arg(long, default_value_t = 45.0, allow_hyphen_values = true)]
    zenith: f64,

    /// Camera angle in the XY plane, in degrees
    #[arg(long, default_value_t = 45.0, allow_hyphen_values = true)]
    azimuth: f64,

    /// Height exaggeration factor
    #[arg(long, default_value_t = 1.0)]
    z_scale: f64,

    #[arg(long)]
    no_color_bar: bool,

    /// Print a text preview this many characters wide
    #[arg(long)]
    preview: Option<usize>,
}

fn rolling_surface(rows: usize, cols: usize) -> Vec<GridPoint> {
    (0..rows)
        .flat_map(|i| {
            (0..cols).map(move |j| {
                let (x, y) = (j as f64, i as f64);
                GridPoint::new(x, y, 3.0 * (x * 0.35).sin() * (y * 0.25).cos())
            })
        })
        .collect()
}

const SHADES: &[u8] = b"@%#*+=-:. ";

fn luminance(color: Rgba8) -> f64 {
    (0.299 * color.r as f64 + 0.587 * color.g as f64 + 0.114 * color.b as f64) / 255.0
}

fn print_preview(viewer: &Viewer, columns: usize) {
    let frame = viewer.frame();
    let columns = columns.clamp(1, frame.width());
    let cell_w = frame.width() as f64 / columns as f64;
    // terminal cells are roughly twice as tall as they are wide
    let cell_h = cell_w * 2.0;
    let lines = ((frame.height() as f64 / cell_h) as usize).max(1);

    for line in 0..lines {
        let row: String = (0..columns)
            .map(|col| {
                let x = ((col as f64 + 0.5) * cell_w) as i32;
                let y = ((line as f64 + 0.5) * cell_h) as i32;
                let shade = frame.pixel(x, y).map(luminance).unwrap_or(1.0);
                let index = (shade * (SHADES.len() - 1) as f64).round() as usize;
                SHADES[index.min(SHADES.len() - 1)] as char
            })
            .collect();
        println!("{}", row);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.width == 0 || args.height == 0 {
        bail!("frame size must be non-zero, got {}x{}", args.width, args.height);
    }

    let config = RenderConfig {
        mode: args.mode.into(),
        color_bar: ColorBarConfig {
            enabled: !args.no_color_bar,
            ..ColorBarConfig::default()
        },
        ..RenderConfig::default()
    };
    let mut viewer = Viewer::with_config(args.width, args.height, config)
        .context("failed to create frame")?;

    match &args.input {
        Some(path) => {
            let skipped = viewer
                .load_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            if !skipped.is_empty() {
                println!("skipped {} malformed line(s)", skipped.len());
                for line in skipped.iter().take(5) {
                    println!("  line {}: {}", line.line_number, line.reason);
                }
            }
        }
        None => {
            log::info!("no input given, generating a {}x{} surface", args.rows, args.cols);
            viewer.load_points(rolling_surface(args.rows, args.cols));
        }
    }

    viewer.set_camera_angles(SphericalAngles::new(args.zenith, args.azimuth));
    viewer.set_z_scale(args.z_scale);
    viewer.set_rotation_x(args.rotate_x);
    viewer.set_rotation_y(args.rotate_y);
    viewer.set_rotation_z(args.rotate_z);

    let mesh = viewer.mesh();
    let stats = viewer.last_stats();
    println!(
        "grid: {} points, {} rows x {} cols, {} faces",
        mesh.vertex_count(),
        mesh.rows(),
        mesh.cols(),
        mesh.face_count()
    );
    println!(
        "frame: {}x{}, {} faces drawn, {} skipped, {} points drawn",
        args.width, args.height, stats.faces_drawn, stats.faces_skipped, stats.points_drawn
    );
    match stats.fit {
        Some(fit) => println!("fit scale: {:.3}", fit.scale),
        None => println!("nothing to draw"),
    }

    if let Some(columns) = args.preview {
        print_preview(&viewer, columns);
    }

    Ok(())
}
