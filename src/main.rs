use clap::Parser;
use directories::ProjectDirs;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::game::Game;
use crate::market::Market;

mod cli;
mod game;
mod market;
mod portfolio;

type Dollar = f64;
type Quantity = f64;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opts = cli::Cli::parse();

    let market = if let Some(path) = opts.market {
        Market::load_from_file(&path)?
    } else {
        // An explicitly passed file must parse; the default location is
        // optional and only consulted if it exists.
        let default_path = ProjectDirs::from("org", "quotidian", "driftsim")
            .map(|pdirs| pdirs.config_dir().join("market.yml"));
        match default_path {
            Some(path) if path.exists() => Market::load_from_file(&path)?,
            _ => Market::builtin()?,
        }
    };

    let rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    debug!(seed = ?opts.seed, cash = opts.cash, "starting game");

    Game::new(market, opts.cash, rng).run()
}
