//! Deadpath - Entry Point
//!
//! Generates a level from a seed and prints it as tiles or JSON.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use deadpath::world::autotile::render_tiles;
use deadpath::{Generator, GeneratorConfig, Position};

/// Procedural tower-defense level generator
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Seed for the random stream
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// RON file with generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Use the 33x33 layout instead of 21x21
    #[arg(long, conflicts_with = "config")]
    large: bool,

    /// Explicit base cell as `x,y`; the base is derived from the seed otherwise
    #[arg(long, value_parser = parse_position, requires = "strands")]
    base: Option<Position>,

    /// Strand count for an explicit base
    #[arg(long, requires = "base")]
    strands: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Tiles)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Autotiled glyphs
    Tiles,
    /// One glyph per cell type
    Cells,
    /// JSON snapshot of the level
    Json,
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected `x,y`, got `{}`", s))?;
    let parse = |v: &str| v.trim().parse::<i32>().map_err(|e| format!("`{}`: {}", v, e));
    Ok(Position::new(parse(x)?, parse(y)?))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting Deadpath v{} with seed {}", env!("CARGO_PKG_VERSION"), args.seed);

    let config = match (&args.config, args.large) {
        (Some(path), _) => GeneratorConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        (None, true) => GeneratorConfig::large(),
        (None, false) => GeneratorConfig::default(),
    };
    let generator = Generator::new(config)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let level = match (args.base, args.strands) {
        (Some(base), Some(strands)) => generator.generate(base, strands, &mut rng)?,
        (None, None) => generator.generate_from_seed(&mut rng)?,
        _ => bail!("--base and --strands must be given together"),
    };

    match args.format {
        Format::Tiles => {
            let tiles = render_tiles(&level.grid, &mut rng)
                .context("level contains a broken path network")?;
            print!("{}", tiles);
        }
        Format::Cells => print!("{}", level.grid.to_ascii()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&level)?),
    }

    for (i, spawn) in level.spawns.iter().enumerate() {
        log::info!("Spawn {} at {} heading {:?}", i, spawn.location, spawn.direction);
    }

    Ok(())
}
