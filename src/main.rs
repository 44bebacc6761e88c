use anyhow::Result;
use bsp_dungeon::{DungeonConfig, DungeonGenerator};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "BSP dungeon generator", long_about = None)]
struct Args {
    /// JSON file with generation parameters; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the random stream; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Dungeon level, selects the enemy roster and weapon chests
    #[arg(short, long, default_value_t = 0)]
    level: u32,

    /// Print the whole result as JSON instead of an ASCII map
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DungeonConfig::load(path)?,
        None => DungeonConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    let dungeon = DungeonGenerator::generate(&config, args.level, seed)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&dungeon)?);
    } else {
        println!("seed {seed}, level {}, {} rooms", args.level, dungeon.rooms().len());
        print!("{}", dungeon.render_ascii());
    }
    Ok(())
}
