// src/io/reporting.rs

use crate::error::SimResult;
use crate::simulation::inventory::InventoryDay;
use crate::simulation::production::ProductionDay;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Writes any sequence of serializable rows to a CSV file, one row per item.
///
/// # Arguments
/// * `path` - Destination file (e.g., "results/replications.csv").
/// * `rows` - Records with flat, scalar fields.
pub fn write_rows<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> SimResult<()> {
    let path = path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for row in rows {
        wtr.serialize(row)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!("exported {} rows to '{}'", rows.len(), path.display());
    Ok(())
}

/// Daily ledger of one inventory replication.
pub fn write_inventory_ledger(path: impl AsRef<Path>, ledger: &[InventoryDay]) -> SimResult<()> {
    write_rows(path, ledger)
}

/// Per-day detail of one production replication.
pub fn write_production_detail(
    path: impl AsRef<Path>,
    detail: &[ProductionDay],
) -> SimResult<()> {
    write_rows(path, detail)
}

/// One row per replication summary.
pub fn write_replications<S: Serialize>(path: impl AsRef<Path>, summaries: &[S]) -> SimResult<()> {
    write_rows(path, summaries)
}
