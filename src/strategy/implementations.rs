// src/strategy/implementations.rs

use crate::simulation::config::InventoryConfig;
use crate::strategy::traits::{ReplenishmentPolicy, ReviewContext};

// =========================================================================
// 1. Periodic Review, Order-Up-To Capacity
// =========================================================================

/// Every `review_period` days, order whatever it takes to refill the
/// warehouse. Stock in transit is not counted; only what is on hand.
#[derive(Debug, Clone)]
pub struct PeriodicReviewPolicy {
    review_period: u32,
}

impl PeriodicReviewPolicy {
    pub fn new(review_period: u32) -> Self {
        Self {
            review_period: review_period.max(1),
        }
    }

    pub fn from_config(config: &InventoryConfig) -> Self {
        Self::new(config.review_period)
    }

    pub fn is_review_day(&self, day: u32) -> bool {
        day % self.review_period == 0
    }
}

impl ReplenishmentPolicy for PeriodicReviewPolicy {
    fn review(&self, context: &ReviewContext) -> Option<f64> {
        if !self.is_review_day(context.day) {
            return None;
        }
        let gap = context.capacity - context.on_hand;
        if gap > 0.0 {
            Some(gap)
        } else {
            None
        }
    }
}

// =========================================================================
// 2. Never Order
// =========================================================================

/// Sells down the opening stock and never replenishes.
/// Baseline for comparing what a replenishment policy is worth.
#[derive(Debug, Clone, Default)]
pub struct NoReorderPolicy;

impl ReplenishmentPolicy for NoReorderPolicy {
    fn review(&self, _context: &ReviewContext) -> Option<f64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(day: u32, on_hand: f64) -> ReviewContext {
        ReviewContext {
            day,
            on_hand,
            capacity: 700.0,
            orders_in_transit: 0,
        }
    }

    #[test]
    fn test_orders_only_on_review_days() {
        let policy = PeriodicReviewPolicy::new(7);
        assert_eq!(policy.review(&context(6, 100.0)), None);
        assert_eq!(policy.review(&context(7, 100.0)), Some(600.0));
        assert_eq!(policy.review(&context(14, 0.0)), Some(700.0));
    }

    #[test]
    fn test_full_warehouse_places_no_order() {
        let policy = PeriodicReviewPolicy::new(7);
        assert_eq!(policy.review(&context(7, 700.0)), None);
    }

    #[test]
    fn test_zero_period_is_treated_as_daily() {
        let policy = PeriodicReviewPolicy::new(0);
        assert!(policy.is_review_day(1));
        assert!(policy.is_review_day(5));
    }

    #[test]
    fn test_no_reorder_policy_never_orders() {
        assert_eq!(NoReorderPolicy.review(&context(7, 0.0)), None);
    }
}
