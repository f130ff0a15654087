pub mod game;
pub mod market;
pub mod portfolio;
pub type Dollar = f64;
pub type Quantity = f64;
