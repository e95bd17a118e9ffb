// src/strategy/traits.rs

use std::fmt::Debug;

/// State visible to a replenishment policy on a given day, after arrivals.
#[derive(Debug, Clone, Copy)]
pub struct ReviewContext {
    pub day: u32,
    pub on_hand: f64,
    pub capacity: f64,
    /// Number of orders still in transit.
    pub orders_in_transit: usize,
}

/// Defines when and how much the warehouse reorders.
///
/// We require `Send` + `Sync` so a batch could run replications in parallel.
pub trait ReplenishmentPolicy: Debug + Send + Sync {
    /// Quantity to order today, or `None` if no order is placed.
    fn review(&self, context: &ReviewContext) -> Option<f64>;
}
