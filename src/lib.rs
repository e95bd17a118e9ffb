//! Monte Carlo simulations of a periodic-review inventory policy and a daily
//! egg production process, with batch replication and averaging.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use error::{SimError, SimResult};
pub use model::rng::SimRng;
pub use simulation::config::{InventoryConfig, ProductionConfig};
pub use simulation::inventory::{simulate_inventory, InventoryDay, InventoryRun, InventorySummary};
pub use simulation::monte_carlo::{
    run_replications, BatchResult, InventoryAggregate, InventoryEngine, ProductionAggregate,
    ProductionEngine, SimulationEngine,
};
pub use simulation::production::{simulate_production_once, ProductionDay, ProductionSummary};
