//! ops-montecarlo: batch runner for the inventory and production simulations.
//!
//! Usage:
//!   ops-montecarlo inventory --replications 10 --seed 42 --out results
//!   ops-montecarlo production --replications 30 --params eggs.json

use anyhow::{bail, Result};
use ops_montecarlo::io::{params, reporting};
use ops_montecarlo::{
    run_replications, simulate_inventory, InventoryEngine, ProductionEngine, SimRng,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let model = args.get(1).map(String::as_str).unwrap_or("inventory");
    let replications = parse_arg(&args, "--replications", 10usize);
    let seed = find_arg(&args, "--seed").map(str::parse::<u64>).transpose()?;
    let params_path = find_arg(&args, "--params").map(PathBuf::from);
    let out_dir = find_arg(&args, "--out").map(PathBuf::from);

    if let Some(dir) = &out_dir {
        fs::create_dir_all(dir)?;
    }

    match model {
        "inventory" => {
            run_inventory(replications, seed, params_path.as_deref(), out_dir.as_deref())
        }
        "production" => {
            run_production(replications, seed, params_path.as_deref(), out_dir.as_deref())
        }
        other => bail!("unknown model '{other}', expected 'inventory' or 'production'"),
    }
}

fn run_inventory(
    replications: usize,
    seed: Option<u64>,
    params_path: Option<&Path>,
    out_dir: Option<&Path>,
) -> Result<()> {
    println!("=== Sugar Inventory Simulation ===");

    // 1. LOAD PARAMETERS
    let config = params::load_inventory(params_path)?;

    // 2. RUN THE BATCH
    let batch = run_replications(&InventoryEngine, &config, replications, seed)?;

    // 3. PRINT RESULTS
    println!("\n{:>4} {:>12} {:>12} {:>10}", "#", "Net profit", "Total cost", "Unmet");
    for s in &batch.per_replication {
        println!(
            "{:>4} {:>12.2} {:>12.2} {:>10.2}",
            s.replication, s.net_profit, s.total_cost, s.unmet_demand
        );
    }
    let avg = &batch.aggregate;
    println!("\n=== Averages over {replications} replications ===");
    println!("Average inventory:     {:.2}", avg.average_inventory);
    println!("Total cost:            ${:.2}", avg.total_cost);
    println!("Net profit:            ${:.2}", avg.net_profit);
    println!("Unmet demand:          {:.2}", avg.unmet_demand);
    println!("Service level:         {:.2}%", avg.service_level);

    // 4. EXPORT
    if let Some(dir) = out_dir {
        reporting::write_replications(
            dir.join("inventory_replications.csv"),
            &batch.per_replication,
        )?;

        // The batch keeps summaries only; show one full ledger as a sample.
        let mut rng = match seed {
            Some(s) => SimRng::from_seed(s),
            None => SimRng::from_entropy(),
        };
        let sample = simulate_inventory(&config, &mut rng)?;
        reporting::write_inventory_ledger(dir.join("inventory_ledger.csv"), &sample.ledger)?;
    }
    Ok(())
}

fn run_production(
    replications: usize,
    seed: Option<u64>,
    params_path: Option<&Path>,
    out_dir: Option<&Path>,
) -> Result<()> {
    println!("=== Egg & Chick Production Simulation ===");

    // 1. LOAD PARAMETERS
    let config = params::load_production(params_path)?;

    // 2. RUN THE BATCH
    let batch = run_replications(&ProductionEngine, &config, replications, seed)?;

    // 3. PRINT RESULTS
    println!(
        "\n{:>4} {:>8} {:>8} {:>8} {:>8} {:>12}",
        "#", "Eggs", "Broken", "Sold", "Chicks", "Revenue"
    );
    for s in &batch.per_replication {
        println!(
            "{:>4} {:>8} {:>8} {:>8} {:>8} {:>12.2}",
            s.replication,
            s.eggs_produced,
            s.broken_eggs,
            s.sold_eggs,
            s.surviving_chicks,
            s.revenue
        );
    }
    let avg = &batch.aggregate;
    println!("\n=== Averages over {replications} replications ===");
    println!("Total revenue:         ${:.2}", avg.revenue);
    println!("Daily revenue:         ${:.2}", avg.average_daily_revenue);
    println!("Broken eggs:           {:.2}", avg.broken_eggs);
    println!("Surviving chicks:      {:.2}", avg.surviving_chicks);
    println!("Eggs produced:         {:.2}", avg.eggs_produced);

    // 4. EXPORT
    if let Some(dir) = out_dir {
        reporting::write_replications(
            dir.join("production_replications.csv"),
            &batch.per_replication,
        )?;
        if let Some(detail) = batch.per_replication.last().and_then(|s| s.daily_detail.as_ref()) {
            reporting::write_production_detail(dir.join("production_detail.csv"), detail)?;
        }
    }
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    find_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
