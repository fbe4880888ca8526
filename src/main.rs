use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

mod ascii;
mod export;
mod generator;
mod noise;
mod persistence;
mod regions;
mod tilemap;

use generator::CaveGenerator;
use persistence::MapDocument;
use regions::{find_regions, region_stats};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Random fill relaxed by cellular-automata passes
    Cellular,
    /// Thresholded smooth value-noise field
    Noise,
    /// Random-walk tunneler
    Walk,
}

#[derive(Parser, Debug)]
#[command(name = "cave_generator")]
#[command(about = "Generate procedural cave maps for tile-based games")]
struct Args {
    /// Map width in tiles
    #[arg(short = 'W', long, default_value = "256")]
    width: usize,

    /// Map height in tiles
    #[arg(short = 'H', long, default_value = "1024")]
    height: usize,

    /// Random seed (uses a random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Generation strategy
    #[arg(short = 'g', long, value_enum, default_value_t = Strategy::Walk)]
    strategy: Strategy,

    /// Wall probability for the initial cellular-automata fill
    #[arg(long, default_value = "0.45")]
    fill_probability: f32,

    /// Cellular-automata relaxation iterations
    #[arg(long, default_value = "5")]
    ca_iterations: usize,

    /// Noise frequency for the value-noise strategy
    #[arg(long, default_value = "0.05")]
    noise_scale: f32,

    /// Wall threshold for the value-noise strategy
    #[arg(long, default_value = "0.4")]
    noise_threshold: f32,

    /// Number of tunneler walks
    #[arg(long, default_value = "300")]
    walks: usize,

    /// Steps per tunneler walk
    #[arg(long, default_value = "3000")]
    walk_length: usize,

    /// Smoothing passes after generation
    #[arg(long, default_value = "3")]
    smooth: usize,

    /// Fill caverns smaller than this many tiles (0 disables pruning)
    #[arg(long, default_value = "50")]
    min_cavern: usize,

    /// Skip connecting isolated caverns
    #[arg(long)]
    no_connect: bool,

    /// Skip carving the top-center entrance
    #[arg(long)]
    no_entrance: bool,

    /// Export the map as ASCII text
    #[arg(long)]
    export_ascii: Option<String>,

    /// Export the map as PNG
    #[arg(long)]
    export_png: Option<String>,

    /// Export a region-colored debug PNG
    #[arg(long)]
    export_regions: Option<String>,

    /// Save the map document as JSON
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);

    println!("Generating {}x{} cave map with seed {}", args.width, args.height, seed);

    let mut gen = CaveGenerator::new(args.width, args.height, seed)?;

    match args.strategy {
        Strategy::Cellular => {
            println!(
                "Using cellular automata (fill {:.2}, {} iterations)...",
                args.fill_probability, args.ca_iterations
            );
            gen.generate_cellular_automata(args.fill_probability, args.ca_iterations)?;
        }
        Strategy::Noise => {
            println!(
                "Using value noise (scale {}, threshold {})...",
                args.noise_scale, args.noise_threshold
            );
            gen.generate_value_noise(args.noise_scale, args.noise_threshold)?;
        }
        Strategy::Walk => {
            println!(
                "Using random walk ({} walks x {} steps)...",
                args.walks, args.walk_length
            );
            gen.generate_random_walk(args.walks, args.walk_length);
        }
    }

    if args.smooth > 0 {
        println!("Smoothing map ({} passes)...", args.smooth);
        gen.smooth_map(args.smooth);
    }

    if args.min_cavern > 0 {
        println!("Filling caverns smaller than {} tiles...", args.min_cavern);
        gen.fill_small_caverns(args.min_cavern);
    }

    if !args.no_connect {
        let before = find_regions(gen.map()).len();
        println!("Connecting {} caverns...", before);
        gen.connect_all_caverns();
    }

    if !args.no_entrance {
        println!("Carving top-center entrance...");
        match gen.ensure_top_center_entrance() {
            Some(depth) => println!("  Entrance met existing cavern at depth {}", depth),
            None => println!("  Entrance corridor carved to the bottom"),
        }
    }

    let regions = find_regions(gen.map());
    let stats = region_stats(&regions);
    println!(
        "Final map: {} caverns, {} floor tiles ({:.1}% open), largest {}",
        stats.count,
        stats.floor_tiles,
        100.0 * stats.floor_tiles as f64 / (args.width * args.height) as f64,
        stats.largest
    );

    if let Some(path) = &args.export_ascii {
        ascii::export_ascii(gen.map(), seed, path)?;
        println!("Wrote ASCII map to {}", path);
    }

    if let Some(path) = &args.export_png {
        export::export_map(gen.map(), path)?;
        println!("Wrote map image to {}", path);
    }

    if let Some(path) = &args.export_regions {
        export::export_regions(gen.map(), &regions, path)?;
        println!("Wrote region debug image to {}", path);
    }

    if let Some(path) = &args.save {
        let doc = MapDocument::new(
            args.width,
            args.height,
            seed,
            gen.tile_codes(),
            gen.map_flat(),
        );
        persistence::save_map(&doc, path)?;
        println!("Saved map document to {}", path.display());
    }

    Ok(())
}
