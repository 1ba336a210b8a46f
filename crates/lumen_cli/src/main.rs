use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{render_image, RenderConfig, DEFAULT_BUCKET_SIZE};
use std::path::PathBuf;
use std::time::Instant;

mod output;
mod scene;

use scene::SceneSource;

/// Default aspect ratio when only a width is given.
const ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Render a sphere scene with the lumen CPU path tracer.
#[derive(Parser, Debug)]
#[command(name = "lumen", version)]
struct Args {
    /// Preset name (two-spheres, materials, random) or path to a JSON scene file
    #[arg(long, default_value = "materials")]
    scene: String,

    /// Output image; `.ppm` writes plain PPM, anything else PNG
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Image height in pixels (defaults to width / (16/9))
    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long, default_value_t = 25)]
    samples: u32,

    /// Maximum number of ray segments per sample
    #[arg(short = 'd', long, default_value_t = 10)]
    max_depth: u32,

    /// Sub-pixel jitter as a fraction of a pixel, in [0, 1]
    #[arg(long, default_value_t = 1.0)]
    jitter: f32,

    /// Random seed (also seeds the `random` preset)
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Render on the calling thread only
    #[arg(long)]
    sequential: bool,

    /// Worker threads (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Bucket edge length in pixels
    #[arg(long, default_value_t = DEFAULT_BUCKET_SIZE)]
    bucket_size: u32,

    /// Print the scene as JSON and exit without rendering
    #[arg(long)]
    dump_scene: bool,
}

impl Args {
    fn resolution(&self) -> (u32, u32) {
        let height = self
            .height
            .unwrap_or_else(|| ((self.width as f32 / ASPECT_RATIO) as u32).max(1));
        (self.width, height)
    }

    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            samples_per_pixel: self.samples,
            max_depth: self.max_depth,
            jitter: self.jitter,
            seed: self.seed,
            parallel: !self.sequential,
            bucket_size: self.bucket_size,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    log::info!("Starting lumen");

    let description = SceneSource::parse(&args.scene).load(args.seed)?;
    if args.dump_scene {
        println!("{}", serde_json::to_string_pretty(&description)?);
        return Ok(());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    let (width, height) = args.resolution();
    let start = Instant::now();
    let (world, camera) = description.build(width as f32 / height as f32)?;
    log::info!("Scene built in {:?}", start.elapsed());

    let image = render_image(width, height, &world, &camera, &args.render_config())?;
    output::save(&image, &args.output)?;

    Ok(())
}
