// src/simulation/inventory.rs

use crate::error::SimResult;
use crate::model::orders::PendingOrders;
use crate::model::variates::{Exponential, LeadTime};
use crate::model::warehouse::Warehouse;
use crate::simulation::config::InventoryConfig;
use crate::strategy::implementations::PeriodicReviewPolicy;
use crate::strategy::traits::{ReplenishmentPolicy, ReviewContext};
use log::trace;
use rand::Rng;
use rand_distr::Distribution;
use serde::Serialize;

/// One row of the daily ledger. Cost and unmet-demand columns are cumulative.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryDay {
    pub day: u32,
    /// Stock after the morning's arrivals, before sales.
    pub opening_inventory: f64,
    /// Stock at the end of the day.
    pub inventory: f64,
    pub demand: f64,
    pub sold: f64,
    pub ordered: f64,
    /// Lead time of today's order, else days until the next arrival, else `None`.
    pub days_to_delivery: Option<u32>,
    pub revenue: f64,
    pub order_cost: f64,
    pub acquisition_cost: f64,
    pub carrying_cost: f64,
    pub total_cost: f64,
    pub unmet_demand: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub replication: usize,
    pub total_demand: f64,
    pub total_sold: f64,
    pub unmet_demand: f64,
    pub total_cost: f64,
    pub revenue: f64,
    pub net_profit: f64,
    /// Percentage of demand served from stock. 100 when there was no demand at all.
    pub service_level: f64,
    /// Mean end-of-day stock over the horizon.
    pub average_inventory: f64,
}

#[derive(Debug, Clone)]
pub struct InventoryRun {
    pub ledger: Vec<InventoryDay>,
    pub summary: InventorySummary,
}

#[derive(Debug, Clone, Copy, Default)]
struct CostTotals {
    ordering: f64,
    acquisition: f64,
    carrying: f64,
}

impl CostTotals {
    fn total(&self) -> f64 {
        self.ordering + self.acquisition + self.carrying
    }
}

/// A single replication of the periodic-review inventory model.
pub struct InventorySimulation<'a, P: ReplenishmentPolicy + ?Sized> {
    config: &'a InventoryConfig,
    policy: &'a P,
    demand: Exponential,
    lead_time: LeadTime,

    pub warehouse: Warehouse,
    pub pending: PendingOrders,
    costs: CostTotals,

    total_demand: f64,
    total_sold: f64,
    total_unmet: f64,
    revenue: f64,

    pub current_day: u32,
    pub ledger: Vec<InventoryDay>,
}

impl<'a, P: ReplenishmentPolicy + ?Sized> InventorySimulation<'a, P> {
    pub fn new(config: &'a InventoryConfig, policy: &'a P) -> SimResult<Self> {
        Ok(Self {
            config,
            policy,
            demand: Exponential::new(config.mean_demand)?,
            lead_time: LeadTime::new(config.lead_time_min, config.lead_time_max)?,
            warehouse: Warehouse::new(config.capacity, config.initial_inventory),
            pending: PendingOrders::new(),
            costs: CostTotals::default(),
            total_demand: 0.0,
            total_sold: 0.0,
            total_unmet: 0.0,
            revenue: 0.0,
            current_day: 1,
            ledger: Vec::with_capacity(config.horizon_days as usize),
        })
    }

    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        while self.current_day <= self.config.horizon_days {
            self.step(rng);
        }
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let day = self.current_day;
        self.warehouse.start_day();

        // 1. Arrivals
        for order in self.pending.pop_arrivals(day) {
            trace!(
                "day {day}: received {:.2} (due day {})",
                order.quantity,
                order.arrival_day
            );
            self.warehouse.receive_shipment(order.quantity);
        }

        // 2. Review
        let context = ReviewContext {
            day,
            on_hand: self.warehouse.on_hand,
            capacity: self.warehouse.capacity,
            orders_in_transit: self.pending.len(),
        };
        let (ordered, days_to_delivery) = match self.policy.review(&context) {
            Some(quantity) if quantity > 0.0 => {
                let lead = self.lead_time.sample(rng);
                self.pending.push(quantity, day + lead);
                self.costs.ordering += self.config.order_cost;
                self.costs.acquisition += quantity * self.config.unit_acq_cost;
                trace!("day {day}: ordered {quantity:.2}, arrives in {lead} days");
                (quantity, Some(lead))
            }
            _ => (0.0, self.pending.days_until_next(day)),
        };

        // 3. Demand
        let opening_inventory = self.warehouse.on_hand;
        let demand = self.demand.sample(rng).round();
        let sold = self.warehouse.fulfil_demand(demand);
        let day_revenue = sold * self.config.unit_sell_price;
        self.total_demand += demand;
        self.total_sold += sold;
        self.total_unmet += self.warehouse.last_unmet;
        self.revenue += day_revenue;

        // 4. Holding cost on what is left
        self.costs.carrying += self.warehouse.carrying_cost(self.config.carry_cost_per_kg_day);

        // 5. Record & advance
        self.ledger.push(InventoryDay {
            day,
            opening_inventory,
            inventory: self.warehouse.on_hand,
            demand,
            sold,
            ordered,
            days_to_delivery,
            revenue: day_revenue,
            order_cost: self.costs.ordering,
            acquisition_cost: self.costs.acquisition,
            carrying_cost: self.costs.carrying,
            total_cost: self.costs.total(),
            unmet_demand: self.total_unmet,
        });
        self.current_day += 1;
    }

    pub fn summary(&self) -> InventorySummary {
        let total_cost = self.costs.total();
        let service_level = if self.total_demand > 0.0 {
            self.total_sold / self.total_demand * 100.0
        } else {
            100.0
        };
        let average_inventory = if self.ledger.is_empty() {
            0.0
        } else {
            self.ledger.iter().map(|d| d.inventory).sum::<f64>() / self.ledger.len() as f64
        };

        InventorySummary {
            replication: 1,
            total_demand: self.total_demand,
            total_sold: self.total_sold,
            unmet_demand: self.total_unmet,
            total_cost,
            revenue: self.revenue,
            net_profit: self.revenue - total_cost,
            service_level,
            average_inventory,
        }
    }

    pub fn into_run(self) -> InventoryRun {
        let summary = self.summary();
        InventoryRun {
            ledger: self.ledger,
            summary,
        }
    }
}

/// Runs one replication under the periodic-review, order-up-to-capacity policy.
///
/// Parameters are not validated here; see [`InventoryConfig::validate`].
/// Fails only if the demand or lead-time parameters cannot form a distribution.
pub fn simulate_inventory<R: Rng + ?Sized>(
    config: &InventoryConfig,
    rng: &mut R,
) -> SimResult<InventoryRun> {
    let policy = PeriodicReviewPolicy::from_config(config);
    simulate_inventory_with_policy(config, &policy, rng)
}

pub fn simulate_inventory_with_policy<R, P>(
    config: &InventoryConfig,
    policy: &P,
    rng: &mut R,
) -> SimResult<InventoryRun>
where
    R: Rng + ?Sized,
    P: ReplenishmentPolicy + ?Sized,
{
    let mut sim = InventorySimulation::new(config, policy)?;
    sim.run(rng);
    Ok(sim.into_run())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rng::SimRng;
    use crate::strategy::implementations::NoReorderPolicy;

    #[test]
    fn test_ledger_has_one_row_per_day() {
        let config = InventoryConfig::default();
        let run = simulate_inventory(&config, &mut SimRng::from_seed(11)).unwrap();
        assert_eq!(run.ledger.len(), 27);
        let days: Vec<u32> = run.ledger.iter().map(|d| d.day).collect();
        assert_eq!(days, (1..=27).collect::<Vec<_>>());
    }

    #[test]
    fn test_orders_only_placed_on_review_days() {
        let config = InventoryConfig {
            horizon_days: 60,
            ..InventoryConfig::default()
        };
        let run = simulate_inventory(&config, &mut SimRng::from_seed(12)).unwrap();
        for row in &run.ledger {
            if row.ordered > 0.0 {
                assert_eq!(row.day % 7, 0, "order on day {}", row.day);
                let lead = row.days_to_delivery.unwrap();
                assert!((1..=3).contains(&lead));
            }
        }
        assert!(run.ledger.iter().any(|d| d.ordered > 0.0));
    }

    #[test]
    fn test_order_quantity_refills_to_capacity() {
        let config = InventoryConfig {
            horizon_days: 7,
            ..InventoryConfig::default()
        };
        let run = simulate_inventory(&config, &mut SimRng::from_seed(13)).unwrap();
        let review = &run.ledger[6];
        assert!((review.ordered - (700.0 - review.opening_inventory)).abs() < 1e-9);
        let expected_fixed = if review.ordered > 0.0 { 100.0 } else { 0.0 };
        assert_eq!(review.order_cost, expected_fixed);
        assert!((review.acquisition_cost - review.ordered * 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_stock_bounds_and_demand_split_hold_every_day() {
        let config = InventoryConfig {
            horizon_days: 120,
            mean_demand: 150.0,
            ..InventoryConfig::default()
        };
        let run = simulate_inventory(&config, &mut SimRng::from_seed(14)).unwrap();
        let mut unmet = 0.0;
        for row in &run.ledger {
            assert!(row.inventory >= 0.0 && row.inventory <= config.capacity);
            assert!(row.opening_inventory <= config.capacity);
            let expected_unmet = (row.demand - row.opening_inventory).max(0.0);
            unmet += expected_unmet;
            assert!((row.sold + expected_unmet - row.demand).abs() < 1e-9);
            assert!((row.unmet_demand - unmet).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cumulative_costs_never_decrease() {
        let config = InventoryConfig {
            horizon_days: 90,
            ..InventoryConfig::default()
        };
        let run = simulate_inventory(&config, &mut SimRng::from_seed(15)).unwrap();
        for pair in run.ledger.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(b.order_cost >= a.order_cost);
            assert!(b.acquisition_cost >= a.acquisition_cost);
            assert!(b.carrying_cost >= a.carrying_cost);
            assert!(b.total_cost >= a.total_cost);
            assert!(b.unmet_demand >= a.unmet_demand);
        }
    }

    #[test]
    fn test_summary_matches_ledger() {
        let config = InventoryConfig::default();
        let run = simulate_inventory(&config, &mut SimRng::from_seed(16)).unwrap();
        let last = run.ledger.last().unwrap();
        let s = &run.summary;
        assert_eq!(s.total_cost, last.total_cost);
        assert_eq!(s.unmet_demand, last.unmet_demand);
        assert!((s.total_demand - s.total_sold - s.unmet_demand).abs() < 1e-9);
        assert!((s.net_profit - (s.revenue - s.total_cost)).abs() < 1e-9);
        assert!((s.revenue - s.total_sold * 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_demand_reports_full_service() {
        let config = InventoryConfig {
            mean_demand: 0.0,
            ..InventoryConfig::default()
        };
        let run = simulate_inventory(&config, &mut SimRng::from_seed(17)).unwrap();
        assert_eq!(run.summary.total_demand, 0.0);
        assert_eq!(run.summary.service_level, 100.0);
    }

    #[test]
    fn test_zero_horizon_is_empty() {
        let config = InventoryConfig {
            horizon_days: 0,
            ..InventoryConfig::default()
        };
        let run = simulate_inventory(&config, &mut SimRng::from_seed(18)).unwrap();
        assert!(run.ledger.is_empty());
        assert_eq!(run.summary.total_cost, 0.0);
        assert_eq!(run.summary.average_inventory, 0.0);
    }

    #[test]
    fn test_zero_capacity_never_orders() {
        let config = InventoryConfig {
            capacity: 0.0,
            initial_inventory: 0.0,
            ..InventoryConfig::default()
        };
        let run = simulate_inventory(&config, &mut SimRng::from_seed(19)).unwrap();
        assert_eq!(run.summary.total_sold, 0.0);
        assert_eq!(run.summary.total_cost, 0.0);
        assert!(run.ledger.iter().all(|d| d.days_to_delivery.is_none()));
    }

    #[test]
    fn test_next_delivery_counts_down_between_reviews() {
        let config = InventoryConfig {
            horizon_days: 10,
            lead_time_min: 3,
            lead_time_max: 3,
            mean_demand: 200.0,
            ..InventoryConfig::default()
        };
        let run = simulate_inventory(&config, &mut SimRng::from_seed(20)).unwrap();
        let review = &run.ledger[6];
        if review.ordered > 0.0 {
            assert_eq!(review.days_to_delivery, Some(3));
            assert_eq!(run.ledger[7].days_to_delivery, Some(2));
            assert_eq!(run.ledger[8].days_to_delivery, Some(1));
            // delivered on day 10
            assert_eq!(run.ledger[9].days_to_delivery, None);
        }
    }

    #[test]
    fn test_custom_policy_is_used() {
        let config = InventoryConfig::default();
        let run =
            simulate_inventory_with_policy(&config, &NoReorderPolicy, &mut SimRng::from_seed(21))
                .unwrap();
        assert!(run.ledger.iter().all(|d| d.ordered == 0.0));
        assert!(run.summary.total_sold <= config.initial_inventory);
    }

    #[test]
    fn test_negative_mean_demand_fails() {
        let config = InventoryConfig {
            mean_demand: -1.0,
            ..InventoryConfig::default()
        };
        assert!(simulate_inventory(&config, &mut SimRng::from_seed(22)).is_err());
    }
}
