// src/simulation/config.rs

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Tolerance for outcome probabilities summing to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Parameters of the periodic-review inventory model. Quantities are in kg.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub horizon_days: u32,
    pub capacity: f64,
    /// Mean of the exponential daily demand.
    pub mean_demand: f64,
    /// Fixed cost per order placed.
    pub order_cost: f64,
    pub carry_cost_per_kg_day: f64,
    pub unit_acq_cost: f64,
    pub unit_sell_price: f64,
    /// Must not exceed `capacity`; the engine does not clamp it.
    pub initial_inventory: f64,
    pub review_period: u32,
    pub lead_time_min: u32,
    pub lead_time_max: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            horizon_days: 27,
            capacity: 700.0,
            mean_demand: 100.0,
            order_cost: 100.0,
            carry_cost_per_kg_day: 0.1,
            unit_acq_cost: 3.5,
            unit_sell_price: 5.0,
            initial_inventory: 700.0,
            review_period: 7,
            lead_time_min: 1,
            lead_time_max: 3,
        }
    }
}

impl InventoryConfig {
    pub fn validate(&self) -> SimResult<()> {
        for (name, value) in [
            ("capacity", self.capacity),
            ("mean_demand", self.mean_demand),
            ("order_cost", self.order_cost),
            ("carry_cost_per_kg_day", self.carry_cost_per_kg_day),
            ("unit_acq_cost", self.unit_acq_cost),
            ("unit_sell_price", self.unit_sell_price),
            ("initial_inventory", self.initial_inventory),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::invalid(
                    name,
                    format!("must be finite and >= 0, got {value}"),
                ));
            }
        }
        if self.initial_inventory > self.capacity {
            return Err(SimError::invalid(
                "initial_inventory",
                format!(
                    "{} exceeds capacity {}",
                    self.initial_inventory, self.capacity
                ),
            ));
        }
        if self.review_period == 0 {
            return Err(SimError::invalid("review_period", "must be at least 1 day"));
        }
        if self.lead_time_min == 0 || self.lead_time_min > self.lead_time_max {
            return Err(SimError::invalid(
                "lead_time",
                format!(
                    "need 1 <= min <= max, got [{}, {}]",
                    self.lead_time_min, self.lead_time_max
                ),
            ));
        }
        Ok(())
    }
}

/// Parameters of the daily egg production model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    pub days: u32,
    /// Mean number of eggs laid per day.
    pub lambda_poisson: f64,
    pub price_egg: f64,
    pub price_chick: f64,

    // Egg outcomes: one draw per egg against cumulative thresholds.
    pub p_broken: f64,
    pub p_to_chick: f64,
    pub p_sold: f64,

    // Chick outcomes: a second, independent draw.
    pub p_chick_survives: f64,
    pub p_chick_dies: f64,

    pub include_daily_detail: bool,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            days: 10,
            lambda_poisson: 10.0,
            price_egg: 1.0,
            price_chick: 5.0,
            p_broken: 0.2,
            p_to_chick: 0.3,
            p_sold: 0.5,
            p_chick_survives: 0.8,
            p_chick_dies: 0.2,
            include_daily_detail: false,
        }
    }
}

impl ProductionConfig {
    pub fn validate(&self) -> SimResult<()> {
        if !self.lambda_poisson.is_finite() {
            return Err(SimError::invalid(
                "lambda_poisson",
                format!("must be finite, got {}", self.lambda_poisson),
            ));
        }
        for (name, value) in [("price_egg", self.price_egg), ("price_chick", self.price_chick)] {
            if !value.is_finite() {
                return Err(SimError::invalid(name, format!("must be finite, got {value}")));
            }
        }
        for (name, p) in [
            ("p_broken", self.p_broken),
            ("p_to_chick", self.p_to_chick),
            ("p_sold", self.p_sold),
            ("p_chick_survives", self.p_chick_survives),
            ("p_chick_dies", self.p_chick_dies),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SimError::invalid(name, format!("must lie in [0, 1], got {p}")));
            }
        }

        let egg_sum = self.p_broken + self.p_to_chick + self.p_sold;
        if (egg_sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(SimError::ProbabilitySum {
                group: "egg outcomes",
                sum: egg_sum,
            });
        }
        let chick_sum = self.p_chick_survives + self.p_chick_dies;
        if (chick_sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(SimError::ProbabilitySum {
                group: "chick outcomes",
                sum: chick_sum,
            });
        }
        Ok(())
    }
}
