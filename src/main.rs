use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use env_logger::Env;
use phongrs::prelude::*;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Shading {
    Wireframe,
    Flat,
    Phong,
}

impl From<Shading> for ShadingMode {
    fn from(value: Shading) -> Self {
        match value {
            Shading::Wireframe => ShadingMode::Wireframe,
            Shading::Flat => ShadingMode::Flat,
            Shading::Phong => ShadingMode::Phong,
        }
    }
}

/// Renders a spinning, Phong-lit mesh to a sequence of PNG files.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Wavefront OBJ file to render. Renders a cube when omitted.
    #[arg(short, long)]
    mesh: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Number of frames to render.
    #[arg(short, long, default_value_t = 1)]
    frames: u32,

    /// Rotation about the Y axis between frames, in radians.
    #[arg(long, default_value_t = 0.05)]
    step: f32,

    /// Initial rotation about the X axis, in radians.
    #[arg(long, default_value_t = 0.4)]
    pitch: f32,

    #[arg(long, value_enum, default_value_t = Shading::Phong)]
    shading: Shading,

    /// Light position in world space.
    #[arg(long, num_args = 3, value_names = ["X", "Y", "Z"], allow_negative_numbers = true)]
    light: Option<Vec<f32>>,

    /// Output directory; frames are written as frame_NNNN.png.
    #[arg(short, long, default_value = "frames")]
    output: PathBuf,

    /// Render on the calling thread only.
    #[arg(long)]
    sequential: bool,
}

fn load_mesh(path: Option<&PathBuf>) -> Result<Mesh, phongrs::LoadError> {
    let mut mesh = match path {
        Some(path) => Mesh::from_obj(path)?,
        None => Mesh::cube(1.0),
    };
    mesh.fit_scale();
    log::info!(
        "Mesh: {} vertices, {} normals, {} faces, scale {}",
        mesh.vertices().len(),
        mesh.normals().len(),
        mesh.faces().len(),
        mesh.scale()
    );
    Ok(mesh)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let mesh = load_mesh(args.mesh.as_ref())?;
    let engine = Engine::new(
        RenderConfig::default()
            .with_shading(args.shading.into())
            .with_parallel(!args.sequential),
    );

    let mut input = FrameInput::new(Viewport::new(args.width, args.height));
    input.rotation = ModelRotation::new(args.pitch, 0.0);
    if let Some(&[x, y, z]) = args.light.as_deref() {
        input.light = PointLight::new(Vec3::new(x, y, z));
    }

    std::fs::create_dir_all(&args.output)?;

    for index in 0..args.frames {
        let started = std::time::Instant::now();
        let frame = engine.render(&mesh, &input)?;
        let path = args.output.join(format!("frame_{index:04}.png"));
        frame.save_png(&path)?;
        log::info!(
            "Frame {} rendered in {:.2?} -> {}",
            index,
            started.elapsed(),
            path.display()
        );

        input.rotation.rotate(0.0, args.step);
    }

    Ok(())
}
