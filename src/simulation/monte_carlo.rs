// src/simulation/monte_carlo.rs

//! Batch replication of a simulation engine and cross-replication averages.

use crate::error::SimResult;
use crate::model::rng::SimRng;
use crate::simulation::config::{InventoryConfig, ProductionConfig};
use crate::simulation::inventory::{simulate_inventory, InventorySummary};
use crate::simulation::production::{simulate_production_once, ProductionSummary};
use log::{debug, info};
use serde::Serialize;
use std::fmt::Debug;

/// Where a replication sits in its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplicationSlot {
    /// 1-based.
    pub number: usize,
    pub is_final: bool,
}

/// A simulation that can be replicated independently any number of times.
pub trait SimulationEngine {
    type Params;
    type Summary;
    type Aggregate: Debug;

    fn name(&self) -> &'static str;

    /// Boundary check, run once before a batch.
    fn validate(&self, params: &Self::Params) -> SimResult<()>;

    fn run_once(
        &self,
        params: &Self::Params,
        rng: &mut SimRng,
        slot: ReplicationSlot,
    ) -> SimResult<Self::Summary>;

    /// Arithmetic means over the batch. All zero for an empty batch.
    fn aggregate(&self, summaries: &[Self::Summary]) -> Self::Aggregate;
}

#[derive(Debug, Clone)]
pub struct BatchResult<S, A> {
    pub per_replication: Vec<S>,
    pub aggregate: A,
}

/// Runs `num_replications` independent replications, in order.
///
/// With a seed, replication `i` draws from its own stream derived from the
/// seed and `i`; without one, each replication gets fresh entropy. The first
/// failing replication aborts the batch.
pub fn run_replications<E: SimulationEngine>(
    engine: &E,
    params: &E::Params,
    num_replications: usize,
    seed: Option<u64>,
) -> SimResult<BatchResult<E::Summary, E::Aggregate>> {
    engine.validate(params)?;
    info!(
        "running {num_replications} {} replications (seed: {seed:?})",
        engine.name()
    );

    let mut per_replication = Vec::with_capacity(num_replications);
    for i in 0..num_replications {
        let mut rng = match seed {
            Some(master) => SimRng::for_replication(master, i as u64),
            None => SimRng::from_entropy(),
        };
        let slot = ReplicationSlot {
            number: i + 1,
            is_final: i + 1 == num_replications,
        };
        per_replication.push(engine.run_once(params, &mut rng, slot)?);
    }

    let aggregate = engine.aggregate(&per_replication);
    info!("{} batch complete: {aggregate:?}", engine.name());
    Ok(BatchResult {
        per_replication,
        aggregate,
    })
}

fn mean_of<S>(items: &[S], field: impl Fn(&S) -> f64) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    items.iter().map(field).sum::<f64>() / items.len() as f64
}

// =========================================================================
// Inventory
// =========================================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryEngine;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventoryAggregate {
    pub total_demand: f64,
    pub total_sold: f64,
    pub unmet_demand: f64,
    pub total_cost: f64,
    pub revenue: f64,
    pub net_profit: f64,
    pub service_level: f64,
    pub average_inventory: f64,
}

impl SimulationEngine for InventoryEngine {
    type Params = InventoryConfig;
    type Summary = InventorySummary;
    type Aggregate = InventoryAggregate;

    fn name(&self) -> &'static str {
        "inventory"
    }

    fn validate(&self, params: &InventoryConfig) -> SimResult<()> {
        params.validate()
    }

    fn run_once(
        &self,
        params: &InventoryConfig,
        rng: &mut SimRng,
        slot: ReplicationSlot,
    ) -> SimResult<InventorySummary> {
        let mut summary = simulate_inventory(params, rng)?.summary;
        summary.replication = slot.number;
        debug!(
            "inventory #{}: net profit {:.2}, service level {:.2}%",
            slot.number, summary.net_profit, summary.service_level
        );
        Ok(summary)
    }

    fn aggregate(&self, summaries: &[InventorySummary]) -> InventoryAggregate {
        InventoryAggregate {
            total_demand: mean_of(summaries, |s| s.total_demand),
            total_sold: mean_of(summaries, |s| s.total_sold),
            unmet_demand: mean_of(summaries, |s| s.unmet_demand),
            total_cost: mean_of(summaries, |s| s.total_cost),
            revenue: mean_of(summaries, |s| s.revenue),
            net_profit: mean_of(summaries, |s| s.net_profit),
            service_level: mean_of(summaries, |s| s.service_level),
            average_inventory: mean_of(summaries, |s| s.average_inventory),
        }
    }
}

// =========================================================================
// Production
// =========================================================================

/// Keeps per-day detail for the final replication of a batch only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductionEngine;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionAggregate {
    pub broken_eggs: f64,
    pub sold_eggs: f64,
    pub surviving_chicks: f64,
    pub eggs_produced: f64,
    pub eggs_to_chick: f64,
    pub dead_chicks: f64,
    pub revenue: f64,
    pub average_daily_revenue: f64,
}

impl SimulationEngine for ProductionEngine {
    type Params = ProductionConfig;
    type Summary = ProductionSummary;
    type Aggregate = ProductionAggregate;

    fn name(&self) -> &'static str {
        "production"
    }

    fn validate(&self, params: &ProductionConfig) -> SimResult<()> {
        params.validate()
    }

    fn run_once(
        &self,
        params: &ProductionConfig,
        rng: &mut SimRng,
        slot: ReplicationSlot,
    ) -> SimResult<ProductionSummary> {
        let config = ProductionConfig {
            include_daily_detail: slot.is_final,
            ..params.clone()
        };
        let mut summary = simulate_production_once(&config, rng)?;
        summary.replication = slot.number;
        debug!(
            "production #{}: {} eggs, revenue {:.2}",
            slot.number, summary.eggs_produced, summary.revenue
        );
        Ok(summary)
    }

    fn aggregate(&self, summaries: &[ProductionSummary]) -> ProductionAggregate {
        ProductionAggregate {
            broken_eggs: mean_of(summaries, |s| s.broken_eggs as f64),
            sold_eggs: mean_of(summaries, |s| s.sold_eggs as f64),
            surviving_chicks: mean_of(summaries, |s| s.surviving_chicks as f64),
            eggs_produced: mean_of(summaries, |s| s.eggs_produced as f64),
            eggs_to_chick: mean_of(summaries, |s| s.eggs_to_chick as f64),
            dead_chicks: mean_of(summaries, |s| s.dead_chicks as f64),
            revenue: mean_of(summaries, |s| s.revenue),
            average_daily_revenue: mean_of(summaries, |s| s.average_daily_revenue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_replications_are_numbered_in_order() {
        let batch =
            run_replications(&InventoryEngine, &InventoryConfig::default(), 5, Some(1)).unwrap();
        let numbers: Vec<usize> = batch.per_replication.iter().map(|s| s.replication).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_zero_replications_is_empty() {
        let batch =
            run_replications(&ProductionEngine, &ProductionConfig::default(), 0, None).unwrap();
        assert!(batch.per_replication.is_empty());
        assert_eq!(batch.aggregate, ProductionAggregate::default());
    }

    #[test]
    fn test_seeded_batches_repeat() {
        let a = run_replications(&ProductionEngine, &ProductionConfig::default(), 4, Some(9))
            .unwrap();
        let b = run_replications(&ProductionEngine, &ProductionConfig::default(), 4, Some(9))
            .unwrap();
        assert_eq!(a.per_replication, b.per_replication);
        assert_eq!(a.aggregate, b.aggregate);
    }

    #[test]
    fn test_only_final_production_replication_keeps_detail() {
        let batch =
            run_replications(&ProductionEngine, &ProductionConfig::default(), 3, Some(2)).unwrap();
        assert!(batch.per_replication[0].daily_detail.is_none());
        assert!(batch.per_replication[1].daily_detail.is_none());
        let detail = batch.per_replication[2].daily_detail.as_ref().unwrap();
        assert_eq!(detail.len(), 10);
    }

    #[test]
    fn test_invalid_probabilities_fail_the_batch() {
        let params = ProductionConfig {
            p_broken: 0.5,
            ..ProductionConfig::default()
        };
        let result = run_replications(&ProductionEngine, &params, 10, None);
        assert!(matches!(result, Err(SimError::ProbabilitySum { .. })));
    }

    #[test]
    fn test_mean_of_empty_is_zero() {
        let empty: [f64; 0] = [];
        assert_eq!(mean_of(&empty, |x| *x), 0.0);
        assert_eq!(mean_of(&[1.0, 2.0, 6.0], |x| *x), 3.0);
    }
}
