// src/io/params.rs

//! Parameter files. Any field left out of the JSON keeps its default.

use crate::error::SimResult;
use crate::simulation::config::{InventoryConfig, ProductionConfig};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub fn load_params<T: DeserializeOwned + Default>(path: Option<&Path>) -> SimResult<T> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(T::default()),
    }
}

pub fn load_inventory(path: Option<&Path>) -> SimResult<InventoryConfig> {
    load_params(path)
}

pub fn load_production(path: Option<&Path>) -> SimResult<ProductionConfig> {
    load_params(path)
}
