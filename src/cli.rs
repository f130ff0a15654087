use std::path::PathBuf;

use clap::Parser;

use crate::Dollar;

#[derive(Parser, Debug)]
pub(crate) struct Cli {
    #[arg(short, long, help = "Market definition YAML (defaults to the built-in market)")]
    pub market: Option<PathBuf>,
    #[arg(short, long, help = "Seed for the price walk, for reproducible runs")]
    pub seed: Option<u64>,
    #[arg(short, long, default_value_t = 1000.0, help = "Starting cash")]
    pub cash: Dollar,
}
