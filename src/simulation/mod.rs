pub mod config;
pub mod inventory;
pub mod monte_carlo;
pub mod production;
