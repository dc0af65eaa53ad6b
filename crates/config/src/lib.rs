//! Catalog models and loaders for the Delta-V Planner.
//!
//! These records are data inputs the planner consumes: named engine presets
//! and the resource unit-mass table. Runtime crates stay serde-free; the
//! root facade converts records into runtime types.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Engine preset parsed from catalog manifests. Flow rates are optional:
/// presets without them can still drive simplified burns.
#[derive(Debug, Deserialize, Clone)]
pub struct EnginePresetConfig {
    pub name: String,
    pub isp_vacuum_seconds: f64,
    pub thrust_kn: f64,
    #[serde(default)]
    pub flow_rates_tons_s: Option<BTreeMap<String, f64>>,
}

/// Kilograms-per-unit record for one resource kind.
#[derive(Debug, Deserialize, Clone)]
pub struct ResourceMassConfig {
    pub resource: String,
    pub kg_per_unit: f64,
}

/// Errors that can occur while loading catalog files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load engine presets from a YAML file or a directory of TOML records.
pub fn load_engine_presets<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<EnginePresetConfig>, ConfigError> {
    load_records(path)
}

/// Load resource unit-mass records from a YAML file or a directory of TOML
/// records.
pub fn load_unit_masses<P: AsRef<Path>>(path: P) -> Result<Vec<ResourceMassConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
