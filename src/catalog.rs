//! Stock data registry and config-to-runtime conversions.
//!
//! Presets are illustrative data the planner consumes; core correctness
//! never depends on them. The same records ship as YAML under
//! `data/presets/` and can be reloaded through `deltav_config`.

use deltav_config::{ConfigError, EnginePresetConfig, ResourceMassConfig};
use deltav_engine::{Engine, SimpleEngine};
use deltav_resources::{ResourceKind, ResourceVector, UnitMassTable, VectorError};
use thiserror::Error;

/// Errors surfaced when converting catalog records into runtime types.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog loading failed: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resource(#[from] VectorError),
}

/// A named engine preset ready to drive burns.
#[derive(Debug, Clone, PartialEq)]
pub struct EnginePreset {
    pub name: String,
    pub engine: Engine,
}

impl TryFrom<EnginePresetConfig> for EnginePreset {
    type Error = CatalogError;

    fn try_from(config: EnginePresetConfig) -> Result<Self, Self::Error> {
        let flow_rates = match config.flow_rates_tons_s {
            Some(rates) => {
                let mut vector = ResourceVector::new();
                for (name, rate) in &rates {
                    vector.insert(name.parse::<ResourceKind>()?, *rate);
                }
                Some(vector)
            }
            None => None,
        };
        Ok(EnginePreset {
            name: config.name,
            engine: Engine::Simple(SimpleEngine::new(
                config.isp_vacuum_seconds,
                config.thrust_kn,
                flow_rates,
            )),
        })
    }
}

/// Build a unit-mass table from catalog records.
pub fn unit_mass_table(records: &[ResourceMassConfig]) -> Result<UnitMassTable, CatalogError> {
    let mut table = UnitMassTable::new();
    for record in records {
        table.set(record.resource.parse::<ResourceKind>()?, record.kg_per_unit);
    }
    Ok(table)
}

/// Load engine presets from a catalog file and convert them.
pub fn load_engine_presets<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<Vec<EnginePreset>, CatalogError> {
    deltav_config::load_engine_presets(path)?
        .into_iter()
        .map(EnginePreset::try_from)
        .collect()
}

/// Load the unit-mass table from a catalog file.
pub fn load_unit_mass_table<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<UnitMassTable, CatalogError> {
    unit_mass_table(&deltav_config::load_unit_masses(path)?)
}

/// Stock kilograms-per-unit table.
pub fn stock_unit_masses() -> UnitMassTable {
    [
        (ResourceKind::LiquidFuel, 5.0),
        (ResourceKind::Oxidizer, 5.0),
        (ResourceKind::Monopropellant, 4.0),
        (ResourceKind::XenonGas, 0.1),
        (ResourceKind::Ore, 20.0),
    ]
    .into_iter()
    .collect()
}

/// Stock engine presets: a nuclear liquid-fuel engine and a chemical
/// liquid-fuel/oxidizer upper-stage engine.
pub fn stock_engines() -> Vec<EnginePreset> {
    vec![
        EnginePreset {
            name: "Nerv".to_string(),
            engine: Engine::Simple(SimpleEngine::new(
                800.0,
                60.0,
                Some(
                    [(ResourceKind::LiquidFuel, 0.007_65)]
                        .into_iter()
                        .collect(),
                ),
            )),
        },
        EnginePreset {
            name: "Terrier".to_string(),
            engine: Engine::Simple(SimpleEngine::new(
                345.0,
                60.0,
                Some(
                    [
                        (ResourceKind::LiquidFuel, 0.007_98),
                        (ResourceKind::Oxidizer, 0.009_755),
                    ]
                    .into_iter()
                    .collect(),
                ),
            )),
        },
    ]
}

/// Look up a stock preset by name.
pub fn stock_engine(name: &str) -> Option<EnginePreset> {
    stock_engines().into_iter().find(|p| p.name == name)
}
