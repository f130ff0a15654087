use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::{Dollar, Quantity, market::Market};

#[derive(Debug, Error, PartialEq)]
pub enum TradeError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),
    #[error("Not enough cash.")]
    InsufficientCash,
    #[error("Not enough holdings.")]
    InsufficientHoldings,
}

/// Cash plus per-asset holdings. Holdings only ever come into existence
/// through a successful buy, so every held name is a market name.
#[derive(Debug)]
pub struct Portfolio {
    pub cash: Dollar,
    pub holdings: HashMap<String, Quantity>,
}

impl Portfolio {
    pub fn new(cash: Dollar) -> Self {
        Self {
            cash,
            holdings: HashMap::new(),
        }
    }

    pub fn holding(&self, name: &str) -> Quantity {
        self.holdings.get(name).copied().unwrap_or(0.0)
    }

    pub fn buy(&mut self, market: &Market, name: &str, amount: Quantity) -> Result<(), TradeError> {
        let asset = market
            .get(name)
            .ok_or_else(|| TradeError::UnknownAsset(name.to_string()))?;
        let cost = asset.price * amount;
        if cost > self.cash {
            return Err(TradeError::InsufficientCash);
        }
        self.cash -= cost;
        *self.holdings.entry(name.to_string()).or_insert(0.0) += amount;
        Ok(())
    }

    pub fn sell(
        &mut self,
        market: &Market,
        name: &str,
        amount: Quantity,
    ) -> Result<(), TradeError> {
        if self.holding(name) < amount {
            return Err(TradeError::InsufficientHoldings);
        }
        let asset = market
            .get(name)
            .ok_or_else(|| TradeError::UnknownAsset(name.to_string()))?;
        self.cash += asset.price * amount;
        *self.holdings.entry(name.to_string()).or_insert(0.0) -= amount;
        Ok(())
    }

    /// Cash plus the mark-to-market value of every holding.
    pub fn value(&self, market: &Market) -> Dollar {
        let mut total = self.cash;
        for (name, qty) in self.holdings.iter() {
            match market.get(name) {
                Some(asset) => total += qty * asset.price,
                None => warn!(name, "holding references an asset not in the market"),
            }
        }
        total
    }
}
