use std::path::PathBuf;

use anyhow::Context;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Deserialize;
use tracing::debug;

use crate::Dollar;

/// Prices are clamped here after every update so they stay strictly positive.
pub const PRICE_FLOOR: Dollar = 0.01;

#[derive(Debug, Clone)]
pub struct Asset {
    pub name: String,
    pub price: Dollar,
    pub drift: f64,
    pub volatility: f64,
    walk: Normal<f64>,
}

impl Asset {
    pub fn new(name: &str, price: Dollar, drift: f64, volatility: f64) -> anyhow::Result<Self> {
        anyhow::ensure!(price > 0.0, "Asset '{name}' must start at a positive price");
        anyhow::ensure!(
            volatility >= 0.0,
            "Asset '{name}' cannot have negative volatility"
        );
        let walk = Normal::new(drift, volatility)
            .with_context(|| format!("Failed to build price walk for asset '{name}'"))?;
        Ok(Self {
            name: name.to_string(),
            price,
            drift,
            volatility,
            walk,
        })
    }

    /// One step of the multiplicative random walk.
    pub fn update_price(&mut self, rng: &mut impl Rng) {
        let growth = self.walk.sample(rng);
        self.price = (self.price * (1.0 + growth)).max(PRICE_FLOOR);
    }
}

/// Fixed set of tradable assets, all stepped together once per turn.
#[derive(Debug, Clone)]
pub struct Market {
    assets: Vec<Asset>,
}

impl Market {
    /// The stock/bond/crypto market used when no market file is given.
    pub fn builtin() -> anyhow::Result<Self> {
        Ok(Self {
            assets: vec![
                Asset::new("stock", 100.0, 0.001, 0.02)?,
                Asset::new("bond", 100.0, 0.0002, 0.005)?,
                Asset::new("crypto", 100.0, 0.002, 0.05)?,
            ],
        })
    }

    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let market_file =
            std::fs::File::open(path).with_context(|| format!("Failed to open file {path:?}"))?;
        let market: MarketFile = serde_yaml::from_reader(market_file)?;
        debug!(?market, "loaded market file");
        market.build()
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.name == name)
    }

    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for asset in self.assets.iter_mut() {
            asset.update_price(rng);
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketFile {
    assets: Vec<AssetEntry>,
}

#[derive(Debug, Deserialize)]
struct AssetEntry {
    name: String,
    price: Dollar,
    drift: f64,
    volatility: f64,
}

impl TryInto<Market> for MarketFile {
    type Error = anyhow::Error;

    fn try_into(self) -> Result<Market, Self::Error> {
        self.validate()?;
        let assets = self
            .assets
            .iter()
            .map(|e| Asset::new(&e.name, e.price, e.drift, e.volatility))
            .collect::<anyhow::Result<Vec<Asset>>>()?;
        Ok(Market { assets })
    }
}

impl MarketFile {
    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(!self.assets.is_empty(), "Market file defines no assets");
        for (i, entry) in self.assets.iter().enumerate() {
            anyhow::ensure!(
                !self.assets[..i].iter().any(|e| e.name == entry.name),
                "Duplicate asset name '{}'",
                entry.name
            );
        }
        Ok(())
    }

    pub fn build(self) -> anyhow::Result<Market> {
        self.try_into()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn price_never_drops_below_floor() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut asset = Asset::new("doom", 0.02, -0.9, 5.0).unwrap();
        for _ in 0..10_000 {
            asset.update_price(&mut rng);
            assert!(asset.price >= PRICE_FLOOR);
        }
    }

    #[test]
    fn zero_volatility_walk_is_pure_drift() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut asset = Asset::new("fixed", 100.0, 0.01, 0.0).unwrap();
        asset.update_price(&mut rng);
        assert!((asset.price - 101.0).abs() < 1e-9);
    }

    #[test]
    fn seeded_update_is_reproducible() {
        let mut a = Market::builtin().unwrap();
        let mut b = Market::builtin().unwrap();
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        a.update(&mut rng_a);
        b.update(&mut rng_b);
        for (x, y) in a.assets().zip(b.assets()) {
            assert_eq!(x.price, y.price);
            assert_ne!(x.price, 100.0, "walk should have moved '{}'", x.name);
        }
    }

    #[test]
    fn builtin_market_has_fixed_asset_set() {
        let market = Market::builtin().unwrap();
        let names: Vec<&str> = market.assets().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["stock", "bond", "crypto"]);
        assert!(market.get("stock").is_some());
        assert!(market.get("tulips").is_none());
    }

    #[test]
    fn rejects_negative_volatility() {
        assert!(Asset::new("bad", 100.0, 0.0, -0.1).is_err());
    }

    #[test]
    fn market_file_rejects_duplicate_names() {
        let file = MarketFile {
            assets: vec![
                AssetEntry {
                    name: "stock".to_string(),
                    price: 100.0,
                    drift: 0.001,
                    volatility: 0.02,
                },
                AssetEntry {
                    name: "stock".to_string(),
                    price: 50.0,
                    drift: 0.0,
                    volatility: 0.01,
                },
            ],
        };
        assert!(file.build().is_err());
    }

    #[test]
    fn market_file_rejects_empty_asset_list() {
        let file = MarketFile { assets: vec![] };
        assert!(file.build().is_err());
    }
}
