//! Shapedraw: turns pointer drags into editable shape records.
//!
//! A drag on a plot canvas produces a screen-space outline. Shapedraw decodes
//! that outline, recognizes rectangles, ellipses and lines, converts it into
//! the plot's reference frame and merges the result into the host's shape
//! list. While a committed shape is active, its vertices can be dragged or
//! deleted and the shape is re-derived after every gesture.
//!
//! # Modules
//!
//! - [`geom`]: points, boxes, shape recognition and ellipse construction
//! - [`path`]: the path-language codec and reference frames
//! - [`shape`]: shape records, draw context and shape list files
//! - [`reconcile`]: outline → shape records, and merging into the shape list
//! - [`edit`]: vertex moves and deletions, and the per-shape edit session
//! - [`outline`]: outlines of shapes being drawn
//! - [`error`]: error types for file and command-line handling

pub mod edit;
pub mod error;
pub mod geom;
pub mod outline;
pub mod path;
pub mod reconcile;
pub mod shape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::edit::EditSession;
use crate::geom::{ellipse, Pixel, VertexRef};
use crate::shape::{io_json, DragMode, DrawContext, Geometry, ShapeDescriptor};

pub use error::ShapeDrawError;

/// The shapedraw CLI application.
#[derive(Parser)]
#[command(name = "shapedraw")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Classify a drawn outline into shape records.
    Classify(ClassifyArgs),
    /// Merge a drawn outline into a shape list file.
    Reconcile(ReconcileArgs),
    /// Move or delete one vertex of an outline.
    Edit(EditArgs),
    /// Print the ellipse drawn by a drag from (x0, y0) to (x1, y1).
    Ellipse(EllipseArgs),
}

/// Options shared by every subcommand that builds shapes.
#[derive(clap::Args)]
struct ContextArgs {
    /// Draw context file (.json, .yaml or .yml).
    #[arg(long, env = "SHAPEDRAW_CONTEXT")]
    context: Option<PathBuf>,

    /// Drag mode ('line', 'rect', 'ellipse', 'closedpath' or 'openpath').
    /// Overrides the mode of the context file.
    #[arg(long)]
    mode: Option<String>,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the classify subcommand.
#[derive(clap::Args)]
struct ClassifyArgs {
    /// Path string of the outline, in screen pixels.
    path: String,

    #[command(flatten)]
    shared: ContextArgs,
}

/// Arguments for the reconcile subcommand.
#[derive(clap::Args)]
struct ReconcileArgs {
    /// Shape list JSON file to merge into.
    #[arg(long)]
    shapes: PathBuf,

    /// Path string of the outline, in screen pixels.
    #[arg(long)]
    path: String,

    /// Index of the shape being edited; omit to append new shapes.
    #[arg(long)]
    active: Option<usize>,

    /// Write the updated shape list here.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    shared: ContextArgs,
}

/// Arguments for the edit subcommand.
#[derive(clap::Args)]
struct EditArgs {
    /// Path string to edit, in screen pixels.
    #[arg(long)]
    path: String,

    /// Vertex to edit, as 'polygon,vertex'.
    #[arg(long)]
    vertex: String,

    /// Move the vertex by 'dx,dy'.
    #[arg(long, allow_hyphen_values = true, conflicts_with = "delete")]
    delta: Option<String>,

    /// Delete the vertex.
    #[arg(long)]
    delete: bool,

    #[command(flatten)]
    shared: ContextArgs,
}

/// Arguments for the ellipse subcommand.
#[derive(clap::Args)]
#[command(allow_negative_numbers = true)]
struct EllipseArgs {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,

    /// Also print the 32-gon path of the ellipse.
    #[arg(long)]
    polygon: bool,

    /// Output format ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Output format of a subcommand.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Output {
    Text,
    Json,
}

fn parse_output(output: &str) -> Result<Output, ShapeDrawError> {
    match output {
        "text" => Ok(Output::Text),
        "json" => Ok(Output::Json),
        other => Err(ShapeDrawError::UnsupportedFormat(format!(
            "'{}' (supported: text, json)",
            other
        ))),
    }
}

/// Installs the stderr log subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Calling this
/// more than once is harmless.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the shapedraw CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ShapeDrawError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Classify(args)) => run_classify(args),
        Some(Commands::Reconcile(args)) => run_reconcile(args),
        Some(Commands::Edit(args)) => run_edit(args),
        Some(Commands::Ellipse(args)) => run_ellipse(args),
        None => {
            println!("shapedraw {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Turns pointer drags into editable shape records.");
            println!();
            println!("Run 'shapedraw --help' for usage information.");
            Ok(())
        }
    }
}

fn load_context(args: &ContextArgs) -> Result<DrawContext, ShapeDrawError> {
    let context = match &args.context {
        Some(path) => shape::read_context(path)?,
        None => DrawContext::default(),
    };
    match &args.mode {
        Some(mode) => Ok(context.with_mode(mode.parse::<DragMode>()?)),
        None => Ok(context),
    }
}

/// Execute the classify subcommand.
fn run_classify(args: ClassifyArgs) -> Result<(), ShapeDrawError> {
    let output = parse_output(&args.shared.output)?;
    let context = load_context(&args.shared)?;

    let shapes = reconcile::build_descriptors(&args.path, &context);
    info!(mode = %context.mode, count = shapes.len(), "classified outline");

    match output {
        Output::Json => println!("{}", to_json(&shapes)?),
        Output::Text => {
            if shapes.is_empty() {
                println!("No shapes");
            }
            for (index, shape) in shapes.iter().enumerate() {
                println!("{}", describe(index, shape));
            }
        }
    }
    Ok(())
}

/// Execute the reconcile subcommand.
fn run_reconcile(args: ReconcileArgs) -> Result<(), ShapeDrawError> {
    let output = parse_output(&args.shared.output)?;
    let context = load_context(&args.shared)?;
    let existing = io_json::read_shapes_json(&args.shapes)?;

    if let Some(index) = args.active {
        if index >= existing.len() {
            return Err(ShapeDrawError::InvalidArgument(format!(
                "active shape {} out of range ({} shape(s) in {})",
                index,
                existing.len(),
                args.shapes.display()
            )));
        }
    }

    let new = reconcile::build_descriptors(&args.path, &context);
    let (updated, report) = reconcile::reconcile_with_report(&existing, &new, args.active);

    match output {
        Output::Json => println!("{}", to_json(&report)?),
        Output::Text => print!("{}", report),
    }

    if let (Some(out), Some(updated)) = (&args.out, &updated) {
        io_json::write_shapes_json(out, updated)?;
        info!(path = %out.display(), count = updated.len(), "wrote shape list");
    }
    Ok(())
}

/// Execute the edit subcommand.
fn run_edit(args: EditArgs) -> Result<(), ShapeDrawError> {
    let output = parse_output(&args.shared.output)?;
    let context = load_context(&args.shared)?;
    let target = parse_vertex(&args.vertex)?;

    let polygons = path::strip_closing_points(path::decode(&args.path));
    let mut session = EditSession::new(polygons, context, None);
    if target.get(session.polygons()).is_none() {
        return Err(ShapeDrawError::InvalidArgument(format!(
            "vertex {} does not exist in the path",
            target
        )));
    }

    let edited = match (&args.delta, args.delete) {
        (Some(delta), false) => {
            let (dx, dy) = parse_pair(delta, "delta")?;
            session.on_drag_start(target);
            let edited = session.on_drag_move(dx, dy);
            session.on_drag_end();
            edited
        }
        (None, true) => session.on_activate_count(target, 2),
        _ => {
            return Err(ShapeDrawError::InvalidArgument(
                "edit needs exactly one of --delta or --delete".to_string(),
            ));
        }
    };

    let changed = edited.is_some();
    let path = edited.unwrap_or_else(|| session.path());
    info!(vertex = %target, changed, "edited outline");

    match output {
        Output::Json => {
            let value = serde_json::json!({ "path": path, "changed": changed });
            println!("{}", to_json(&value)?);
        }
        Output::Text => println!("{}", path),
    }
    Ok(())
}

/// Execute the ellipse subcommand.
fn run_ellipse(args: EllipseArgs) -> Result<(), ShapeDrawError> {
    let output = parse_output(&args.output)?;
    let bbox = ellipse::bounding_box_from_drag::<Pixel>(args.x0, args.y0, args.x1, args.y1);
    let polygon_path = args
        .polygon
        .then(|| path::encode(&[ellipse::polygon_from_box(&bbox)], false));

    match output {
        Output::Json => {
            let mut value = serde_json::to_value(bbox).map_err(json_error)?;
            if let (Some(path), Some(object)) = (&polygon_path, value.as_object_mut()) {
                object.insert("path".to_string(), path.clone().into());
            }
            println!("{}", to_json(&value)?);
        }
        Output::Text => {
            println!(
                "x0={} y0={} x1={} y1={}",
                bbox.x0(),
                bbox.y0(),
                bbox.x1(),
                bbox.y1()
            );
            if let Some(path) = polygon_path {
                println!("{}", path);
            }
        }
    }
    Ok(())
}

/// One-line text summary of a shape record.
fn describe(index: usize, shape: &ShapeDescriptor) -> String {
    match &shape.geometry {
        Geometry::Path { path } => format!("{}: path {}", index, path),
        geometry => match geometry.segment() {
            Some(s) => format!(
                "{}: {} ({}, {}) -> ({}, {}) [{}/{}]",
                index,
                shape.kind(),
                s.x0,
                s.y0,
                s.x1,
                s.y1,
                shape.xref,
                shape.yref
            ),
            None => format!("{}: {}", index, shape.kind()),
        },
    }
}

fn parse_vertex(text: &str) -> Result<VertexRef, ShapeDrawError> {
    let invalid = || {
        ShapeDrawError::InvalidArgument(format!(
            "vertex must be 'polygon,vertex', got '{}'",
            text
        ))
    };
    let (polygon, vertex) = text.split_once(',').ok_or_else(invalid)?;
    let polygon = polygon.trim().parse().map_err(|_| invalid())?;
    let vertex = vertex.trim().parse().map_err(|_| invalid())?;
    Ok(VertexRef::new(polygon, vertex))
}

fn parse_pair(text: &str, name: &str) -> Result<(f64, f64), ShapeDrawError> {
    let invalid =
        || ShapeDrawError::InvalidArgument(format!("{} must be 'x,y', got '{}'", name, text));
    let (a, b) = text.split_once(',').ok_or_else(invalid)?;
    let a = a.trim().parse().map_err(|_| invalid())?;
    let b = b.trim().parse().map_err(|_| invalid())?;
    Ok((a, b))
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ShapeDrawError> {
    serde_json::to_string_pretty(value).map_err(json_error)
}

fn json_error(source: serde_json::Error) -> ShapeDrawError {
    ShapeDrawError::OutputJson(source)
}
