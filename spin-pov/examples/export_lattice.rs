use std::{
    f64::consts::TAU,
    path::PathBuf,
};

use clap::{
    Parser,
    Subcommand,
};
use color_eyre::eyre::{
    Context,
    Error,
};
use dotenvy::dotenv;
use nalgebra::Vector3;
use spin_pov::{
    ExportOptions,
    Frame,
    FrameExporter,
    SceneComposer,
    SceneDescription,
    SceneSettings,
    Snapshot,
    SpinHue,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Error> {
    let _ = dotenv();
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    match args.command {
        Command::Export {
            output,
            size,
            frames,
            settings,
            hue,
            verbose,
        } => export(output, size, frames, settings, hue, verbose)?,
        Command::DumpDefaultSettings { output } => {
            let settings = SceneSettings::default().to_toml_string()?;
            if let Some(output) = &output {
                std::fs::write(output, &settings)?;
            }
            else {
                println!("{settings}");
            }
        }
    }

    Ok(())
}

/// Export a spin spiral on a two-material square lattice for POV-Ray
#[derive(Debug, Parser)]
struct Args {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Export {
        /// Output directory
        #[clap(short, long, default_value = ".")]
        output: PathBuf,

        /// Atoms along each edge of the lattice
        #[clap(long, default_value = "16")]
        size: u32,

        /// Number of frames
        #[clap(long, default_value = "10")]
        frames: u32,

        /// Scene settings (TOML)
        #[clap(long)]
        settings: Option<PathBuf>,

        /// Colour spins by orientation instead of plain blue
        #[clap(long)]
        hue: bool,

        #[clap(short, long)]
        verbose: bool,
    },
    DumpDefaultSettings {
        #[clap(short, long)]
        output: Option<PathBuf>,
    },
}

const LATTICE_CONSTANT: f64 = 2.5;

fn export(
    output: PathBuf,
    size: u32,
    num_frames: u32,
    settings: Option<PathBuf>,
    hue: bool,
    verbose: bool,
) -> Result<(), Error> {
    let settings = if let Some(path) = &settings {
        let toml = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings: {}", path.display()))?;
        SceneSettings::from_toml_str(&toml)
            .with_context(|| format!("Invalid settings: {}", path.display()))?
    }
    else {
        SceneSettings::default()
    };

    std::fs::create_dir_all(&output)?;

    // centered on the origin, which is where the camera looks
    let edge = f64::from(size) * LATTICE_CONSTANT;
    let offset = 0.5 * (edge - LATTICE_CONSTANT);
    let mut coordinates = vec![];
    let mut materials = vec![];
    for i in 0..size {
        for j in 0..size {
            coordinates.extend([
                f64::from(i) * LATTICE_CONSTANT - offset,
                f64::from(j) * LATTICE_CONSTANT - offset,
                0.0,
            ]);
            materials.push((i + j) % 2);
        }
    }

    let spins = (0..num_frames)
        .map(|frame| spiral(&coordinates, edge, f64::from(frame) / f64::from(num_frames)))
        .collect::<Vec<_>>();

    let frames = spins
        .iter()
        .zip(0..)
        .map(|(spins, id)| {
            Ok(Frame {
                id,
                snapshot: Snapshot::new(&coordinates, spins, &materials)?,
            })
        })
        .collect::<Result<Vec<_>, spin_pov::Error>>()?;

    let composer = SceneComposer::new(settings);
    composer.compose_scene(
        &output,
        &SceneDescription {
            extents: Vector3::new(edge, edge, LATTICE_CONSTANT),
            start_frame: 0,
            final_frame: num_frames.saturating_sub(1),
            num_materials: 2,
        },
    )?;

    let options = ExportOptions { verbose };
    if hue {
        FrameExporter::new()
            .with_color(SpinHue)
            .with_options(options)
            .export_frames(&output, &frames)?;
    }
    else {
        FrameExporter::new()
            .with_options(options)
            .export_frames(&output, &frames)?;
    }

    Ok(())
}

/// Spins rotating in the xz-plane along x, with the phase advanced by `t`
/// periods.
fn spiral(coordinates: &[f64], wavelength: f64, t: f64) -> Vec<f64> {
    coordinates
        .chunks_exact(3)
        .flat_map(|position| {
            let phase = TAU * (position[0] / wavelength + t);
            [phase.sin(), 0.0, phase.cos()]
        })
        .collect()
}
