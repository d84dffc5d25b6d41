//! Bitruvius CLI
//!
//! Drive the walk synthesizer, evaluate rigs, and work with the pose library.

use anyhow::{Context, Result};
use bitruvius_animation::{phase, synthesize, tween, FrameClock, Walker, WalkerScheduler};
use bitruvius_core::{joint_positions, Anchor, JointPositions, Pose, Rig, WalkJoint, WalkPose};
use bitruvius_pose::{decode, encode, load_library_json, mirror, PoseLibrary};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;

use config::{BitruviusConfig, CONFIG_FILE};

#[derive(Parser)]
#[command(name = "bitruvius")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Procedural walk and pose tools for the Bitruvius figure", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./bitruvius.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the walk cycle and print one pose per frame
    Walk {
        /// Number of frames to simulate
        #[arg(short = 'n', long)]
        frames: Option<u32>,

        /// Fixed frame rate
        #[arg(long)]
        fps: Option<u32>,

        /// Enable the head bobble spring
        #[arg(short, long)]
        bobble: bool,

        /// Print frames as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Evaluate the walking rig at a point in time
    Rig {
        /// Simulation time in milliseconds
        #[arg(short, long, default_value = "0")]
        time: f64,

        /// Print joint positions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate a static pose on the mannequin rig
    Pose {
        /// Encoded pose string or library id
        pose: String,

        /// Anchor held still under body rotation (root, waist, lWrist, headTip, ...)
        #[arg(short, long, default_value = "root")]
        pin: String,

        /// Override the body rotation in degrees
        #[arg(short, long, allow_hyphen_values = true)]
        rotation: Option<f64>,

        /// Print joint positions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Browse and export the pose library
    Library {
        #[command(subcommand)]
        command: LibraryCommands,
    },

    /// Encode a JSON pose into the compact string form
    Encode {
        /// Pose as JSON
        json: String,
    },

    /// Decode a compact pose string into JSON
    Decode {
        /// Encoded pose string
        pose: String,
    },

    /// Reflect an encoded pose left to right
    Mirror {
        /// Encoded pose string or library id
        pose: String,
    },

    /// Print in-between poses from one pose to another
    Tween {
        /// Start pose (encoded string or library id)
        from: String,

        /// End pose (encoded string or library id)
        to: String,

        /// Number of poses, both ends included
        #[arg(short, long, default_value = "5")]
        steps: usize,
    },

    /// Write a default bitruvius.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show version and figure information
    Info,
}

#[derive(Subcommand)]
enum LibraryCommands {
    /// List catalog entries
    List {
        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one entry and its decoded pose
    Show {
        /// Entry id
        id: String,
    },

    /// Write the catalog as JSON
    Export {
        /// Output file (prints to stdout when omitted)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // `init` must not depend on an existing config
    let config = match (&cli.command, &cli.config) {
        (Commands::Init { .. }, _) => BitruviusConfig::default(),
        (_, Some(path)) => BitruviusConfig::load(path)?,
        (_, None) => BitruviusConfig::load_from_dir(Path::new("."))?,
    };

    match cli.command {
        Commands::Walk {
            frames,
            fps,
            bobble,
            json,
        } => cmd_walk(&config, frames, fps, bobble, json),

        Commands::Rig { time, json } => cmd_rig(&config, time, json),

        Commands::Pose {
            pose,
            pin,
            rotation,
            json,
        } => cmd_pose(&config, &pose, &pin, rotation, json),

        Commands::Library { command } => match command {
            LibraryCommands::List { category } => cmd_library_list(&config, category.as_deref()),
            LibraryCommands::Show { id } => cmd_library_show(&config, &id),
            LibraryCommands::Export { path } => cmd_library_export(&config, path.as_deref()),
        },

        Commands::Encode { json } => cmd_encode(&json),

        Commands::Decode { pose } => cmd_decode(&pose),

        Commands::Mirror { pose } => cmd_mirror(&config, &pose),

        Commands::Tween { from, to, steps } => cmd_tween(&config, &from, &to, steps),

        Commands::Init { force } => cmd_init(force),

        Commands::Info => cmd_info(&config),
    }
}

fn load_library(config: &BitruviusConfig) -> Result<PoseLibrary> {
    match &config.library.path {
        Some(path) => load_library_json(path, &config.library.mirror)
            .with_context(|| format!("Failed to load pose library {}", path.display())),
        None => Ok(PoseLibrary::builtin().clone()),
    }
}

/// A library id, or else an encoded pose string
fn resolve_pose(library: &PoseLibrary, arg: &str) -> Pose {
    match library.get(arg) {
        Some(entry) => entry.pose(),
        None => decode(arg),
    }
}

fn resolve_encoded(library: &PoseLibrary, arg: &str) -> String {
    match library.get(arg) {
        Some(entry) => entry.data.clone(),
        None => arg.to_string(),
    }
}

fn parse_anchor(name: &str) -> Result<Anchor> {
    match Anchor::from_name(name) {
        Some(anchor) => Ok(anchor),
        None => anyhow::bail!(
            "Invalid pin '{}'. Use root, a part name (waist, lWrist, ...) or a tip (headTip, lHandTip, rHandTip, lFootTip, rFootTip)",
            name
        ),
    }
}

fn print_walk_frame(frame: u32, time_ms: f64, pose: &WalkPose) {
    print!("{:>5} {:>9.1}ms", frame, time_ms);
    for joint in WalkJoint::ALL {
        print!(" {}={:.2}", joint, pose.angle(joint));
    }
    println!(" y={:.2}", pose.y_offset);
}

fn print_positions(positions: &JointPositions) {
    println!(
        "root ({:.2}, {:.2})  body rotation {:.2}",
        positions.root.x, positions.root.y, positions.body_rotation
    );
    for (part, frame) in positions.iter() {
        println!(
            "  {:<10} ({:>8.2}, {:>8.2}) -> ({:>8.2}, {:>8.2})  {:>8.2}°",
            part.as_str(), frame.start.x, frame.start.y, frame.end.x, frame.end.y, frame.angle
        );
    }
    for (anchor, point) in positions.tips() {
        println!("  {:<10} ({:>8.2}, {:>8.2})", anchor.to_string(), point.x, point.y);
    }
}

fn cmd_walk(
    config: &BitruviusConfig,
    frames: Option<u32>,
    fps: Option<u32>,
    bobble: bool,
    json: bool,
) -> Result<()> {
    let frames = frames.unwrap_or(config.simulation.frames);
    let fps = fps.unwrap_or(config.simulation.fps);
    if fps == 0 {
        anyhow::bail!("Invalid fps 0. The frame rate must be at least 1");
    }

    let gait = config.gait.clamped();
    if gait != config.gait {
        warn!("Gait parameters outside their ranges were clamped");
    }

    let mut scheduler = WalkerScheduler::new();
    scheduler.set_target_fps(fps);
    let id = scheduler.add(
        Walker::new(gait)
            .with_secondary_motion(bobble || config.simulation.bobblehead)
            .with_pivot_offsets(config.pivots)
            .with_clock(FrameClock::starting_at(config.simulation.start_ms)),
    );

    info!("Walking {} frames at {} fps", frames, fps);

    for frame in 0..frames {
        scheduler.step();
        let Some(walker) = scheduler.get(id) else {
            break;
        };
        let time_ms = walker.clock().now_ms();
        let pose = walker.pose();

        if json {
            println!("{}", serde_json::to_string(pose)?);
        } else {
            print_walk_frame(frame, time_ms, pose);
        }
    }

    Ok(())
}

fn cmd_rig(config: &BitruviusConfig, time_ms: f64, json: bool) -> Result<()> {
    let figure = &config.figure;
    let gait = config.gait.clamped();
    let (pose, _) = synthesize(time_ms, &gait, false, Default::default());

    let rig = Rig::walking(figure.unit, &figure.proportions);
    let root = Rig::walking_root(figure.unit, figure.floor_y, pose.y_offset);
    let positions = rig.evaluate_walk(root, &pose, &config.pivots);

    info!(
        "Rig at {}ms (phase {:.3} rad)",
        time_ms,
        phase(time_ms, gait.frequency)
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&positions)?);
    } else {
        print_positions(&positions);
    }
    Ok(())
}

fn cmd_pose(
    config: &BitruviusConfig,
    arg: &str,
    pin: &str,
    rotation: Option<f64>,
    json: bool,
) -> Result<()> {
    let library = load_library(config)?;
    let mut pose = resolve_pose(&library, arg);
    if pose.is_empty() {
        warn!("Pose '{}' has no recognized fields, evaluating the rest pose", arg);
    }
    if let Some(rotation) = rotation {
        pose.body_rotation = Some(rotation);
    }

    let anchor = parse_anchor(pin)?;
    let positions = joint_positions(&pose, anchor);

    if json {
        println!("{}", serde_json::to_string_pretty(&positions)?);
    } else {
        print_positions(&positions);
    }
    Ok(())
}

fn cmd_library_list(config: &BitruviusConfig, category: Option<&str>) -> Result<()> {
    let library = load_library(config)?;

    for cat in library.categories() {
        if category.is_some_and(|c| c != cat) {
            continue;
        }
        println!("{}", cat);
        for entry in library.by_category(cat) {
            println!("  {:<8} {:<20} {}", entry.id, entry.name, entry.source);
        }
    }
    Ok(())
}

fn cmd_library_show(config: &BitruviusConfig, id: &str) -> Result<()> {
    let library = load_library(config)?;
    let Some(entry) = library.get(id) else {
        anyhow::bail!("No pose '{}' in the library. Run `bitruvius library list`", id);
    };

    println!("{} - {}", entry.id, entry.name);
    println!("Category: {}", entry.category);
    println!("Source:   {}", entry.source);
    println!("Data:     {}", entry.data);
    println!();
    println!("{}", serde_json::to_string_pretty(&entry.pose())?);
    Ok(())
}

fn cmd_library_export(config: &BitruviusConfig, path: Option<&Path>) -> Result<()> {
    let library = load_library(config)?;
    match path {
        Some(path) => {
            library.save(path)?;
            info!("Wrote {} poses to {}", library.len(), path.display());
        }
        None => println!("{}", library.to_json()?),
    }
    Ok(())
}

fn cmd_encode(json: &str) -> Result<()> {
    let pose: Pose = serde_json::from_str(json).context("Failed to parse pose JSON")?;
    println!("{}", encode(&pose));
    Ok(())
}

fn cmd_decode(encoded: &str) -> Result<()> {
    let pose = decode(encoded);
    println!("{}", serde_json::to_string_pretty(&pose)?);
    Ok(())
}

fn cmd_mirror(config: &BitruviusConfig, arg: &str) -> Result<()> {
    let library = load_library(config)?;
    println!("{}", mirror(&resolve_encoded(&library, arg)));
    Ok(())
}

fn cmd_tween(config: &BitruviusConfig, from: &str, to: &str, steps: usize) -> Result<()> {
    if steps == 0 {
        anyhow::bail!("Invalid steps 0. At least one pose is required");
    }
    let library = load_library(config)?;
    let from = resolve_pose(&library, from);
    let to = resolve_pose(&library, to);

    for pose in tween(&from, &to, steps) {
        println!("{}", encode(&pose));
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!("{} already exists. Use --force to overwrite it", CONFIG_FILE);
    }

    let content = BitruviusConfig::default().to_toml()?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    info!("Created {}", CONFIG_FILE);
    Ok(())
}

fn cmd_info(config: &BitruviusConfig) -> Result<()> {
    let library = load_library(config)?;
    let rig = Rig::walking(config.figure.unit, &config.figure.proportions);

    println!("Bitruvius");
    println!("=========");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Figure:");
    println!("  - unit H: {}", config.figure.unit);
    println!("  - floor y: {}", config.figure.floor_y);
    println!("  - bones: {}", rig.bones().len());
    println!();
    println!("Gait:");
    for (name, min, max) in bitruvius_animation::GaitParameters::RANGES {
        let value = config.gait.get(name).unwrap_or_default();
        println!("  - {:<12} {:>6.2}  [{}, {}]", name, value, min, max);
    }
    println!();
    println!("Library: {} poses in {} categories", library.len(), library.categories().len());

    Ok(())
}
