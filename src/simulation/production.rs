// src/simulation/production.rs

use crate::error::SimResult;
use crate::model::variates::KnuthPoisson;
use crate::simulation::config::ProductionConfig;
use rand::Rng;
use rand_distr::Distribution;
use serde::Serialize;

/// What became of a single egg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EggOutcome {
    Broken,
    Chick { survives: bool },
    Sold,
    /// Probability mass left over when the three outcomes sum to less than one.
    Unclassified,
}

/// Per-day counts for one replication.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionDay {
    pub day: u32,
    pub eggs: u64,
    pub broken: u64,
    pub sold: u64,
    pub to_chick: u64,
    pub chicks_alive: u64,
    pub chicks_dead: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionSummary {
    pub replication: usize,
    pub broken_eggs: u64,
    pub sold_eggs: u64,
    pub surviving_chicks: u64,
    pub eggs_produced: u64,
    pub eggs_to_chick: u64,
    pub dead_chicks: u64,
    pub revenue: f64,
    pub average_daily_revenue: f64,
    /// Present only when detail capture was requested.
    #[serde(skip)]
    pub daily_detail: Option<Vec<ProductionDay>>,
}

/// Cumulative thresholds for the per-egg draw.
#[derive(Debug, Clone, Copy)]
struct OutcomeThresholds {
    broken: f64,
    to_chick: f64,
    sold: f64,
    chick_survives: f64,
}

impl OutcomeThresholds {
    fn from_config(config: &ProductionConfig) -> Self {
        let broken = config.p_broken;
        let to_chick = broken + config.p_to_chick;
        Self {
            broken,
            to_chick,
            sold: to_chick + config.p_sold,
            chick_survives: config.p_chick_survives,
        }
    }

    fn classify<R: Rng + ?Sized>(&self, rng: &mut R) -> EggOutcome {
        let r: f64 = rng.gen();
        if r < self.broken {
            EggOutcome::Broken
        } else if r < self.to_chick {
            let survives = rng.gen::<f64>() < self.chick_survives;
            EggOutcome::Chick { survives }
        } else if r < self.sold {
            EggOutcome::Sold
        } else {
            EggOutcome::Unclassified
        }
    }
}

impl ProductionDay {
    fn record(&mut self, outcome: EggOutcome) {
        match outcome {
            EggOutcome::Broken => self.broken += 1,
            EggOutcome::Sold => self.sold += 1,
            EggOutcome::Chick { survives } => {
                self.to_chick += 1;
                if survives {
                    self.chicks_alive += 1;
                } else {
                    self.chicks_dead += 1;
                }
            }
            EggOutcome::Unclassified => {}
        }
    }
}

/// Runs one replication of the egg production model.
///
/// Probabilities are used as given: if the egg outcomes sum to less than one,
/// the remainder leaves eggs unclassified. Use [`ProductionConfig::validate`]
/// to reject such parameters up front.
pub fn simulate_production_once<R: Rng + ?Sized>(
    config: &ProductionConfig,
    rng: &mut R,
) -> SimResult<ProductionSummary> {
    let laying = KnuthPoisson::new(config.lambda_poisson)?;
    let thresholds = OutcomeThresholds::from_config(config);

    let mut summary = ProductionSummary {
        replication: 1,
        ..ProductionSummary::default()
    };
    let mut detail = config
        .include_daily_detail
        .then(|| Vec::with_capacity(config.days as usize));

    for d in 1..=config.days {
        let mut today = ProductionDay {
            day: d,
            eggs: laying.sample(rng),
            ..ProductionDay::default()
        };
        for _ in 0..today.eggs {
            today.record(thresholds.classify(rng));
        }
        today.revenue =
            today.sold as f64 * config.price_egg + today.chicks_alive as f64 * config.price_chick;

        summary.eggs_produced += today.eggs;
        summary.broken_eggs += today.broken;
        summary.sold_eggs += today.sold;
        summary.eggs_to_chick += today.to_chick;
        summary.surviving_chicks += today.chicks_alive;
        summary.dead_chicks += today.chicks_dead;
        summary.revenue += today.revenue;

        if let Some(rows) = detail.as_mut() {
            rows.push(today);
        }
    }

    summary.average_daily_revenue = if config.days > 0 {
        summary.revenue / config.days as f64
    } else {
        0.0
    };
    summary.daily_detail = detail;
    Ok(summary)
}
