//! Propellant bookkeeping and delta-v planning primitives.
//!
//! The workspace splits the model into focused crates: resource vector
//! algebra, engine performance models, and the ship entity with its ISRU and
//! burn transactions. This facade re-exports the public surface and hosts
//! the stock data catalog so front-ends need a single dependency.

pub mod catalog;

pub use deltav_core::{constants, rocket, units};
pub use deltav_engine::{Engine, EngineBlock, EngineCluster, EngineError, SimpleEngine};
pub use deltav_resources::{
    AxisPolicy, ResourceKind, ResourceVector, UnitMassTable, VectorError,
};
pub use deltav_ship::{
    BurnMode, BurnReport, BurnSource, FLOW_TOLERANCE_TONS, IsruMode, LFOX_COEFFICIENTS,
    LFOX_RATIO_PARTS, MassBudget, Ship, ShipError,
};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
