//! Ship state and its two mutating operations: ISRU conversion and
//! propellant burns.
//!
//! Both operations are transactional: the full successor state is computed
//! and checked against the conservation and non-negativity invariants before
//! any field is written, so a rejected operation leaves the ship untouched.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

use deltav_core::rocket::tsiolkovsky;
use deltav_engine::{Engine, EngineError};
use deltav_resources::{AxisPolicy, ResourceKind, ResourceVector, UnitMassTable, VectorError};

/// Ore-to-propellant split for combined conversion, in parts by mass.
pub const LFOX_RATIO_PARTS: (f64, f64) = (9.0, 11.0);

/// Normalized split coefficients; they sum to exactly 1.0 so converted mass
/// is conserved.
pub const LFOX_COEFFICIENTS: (f64, f64) = (
    LFOX_RATIO_PARTS.0 / (LFOX_RATIO_PARTS.0 + LFOX_RATIO_PARTS.1),
    LFOX_RATIO_PARTS.1 / (LFOX_RATIO_PARTS.0 + LFOX_RATIO_PARTS.1),
);

/// Maximum allowed gap (tons) between a consumed quantity and the quantity
/// implied by its flow rate over the derived burn duration.
pub const FLOW_TOLERANCE_TONS: f64 = 0.1;

/// Errors surfaced by ship construction, ISRU, and burns.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShipError {
    #[error("a non-negative amount is required, got {amount}")]
    InvalidAmount { amount: f64 },
    #[error("requested {requested} tons of {kind} but only {held} held")]
    InsufficientResource {
        kind: ResourceKind,
        requested: f64,
        held: f64,
    },
    #[error("unknown mode '{0}'")]
    InvalidMode(String),
    #[error("engine specification does not describe a recognized burn")]
    InvalidEngineSpec,
    #[error("{0} is not supported yet")]
    Unsupported(&'static str),
    #[error("specific impulse must be positive, got {isp_seconds}")]
    InvalidImpulse { isp_seconds: f64 },
    #[error("flow-rate axes do not match the consumed resources")]
    FlowRateMismatch,
    #[error("flow rate for {kind} implies {derived} tons consumed, expected {expected}")]
    FlowRateInconsistent {
        kind: ResourceKind,
        expected: f64,
        derived: f64,
    },
    #[error("total mass {total} does not reconstruct from dry mass plus resources ({reconstructed})")]
    MassBudgetMismatch { total: f64, reconstructed: f64 },
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Vector(#[from] VectorError),
}

/// ISRU conversion target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsruMode {
    /// Ore to liquid fuel, 1:1 by mass.
    Lf,
    /// Ore to oxidizer, 1:1 by mass.
    Ox,
    /// Ore to liquid fuel and oxidizer split by [`LFOX_COEFFICIENTS`].
    LfOx,
    /// Recognized but not implemented.
    Monopropellant,
}

impl FromStr for IsruMode {
    type Err = ShipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lf" => Ok(IsruMode::Lf),
            "ox" => Ok(IsruMode::Ox),
            "lfox" => Ok(IsruMode::LfOx),
            "monopropellant" => Ok(IsruMode::Monopropellant),
            _ => Err(ShipError::InvalidMode(s.to_string())),
        }
    }
}

/// Propellant combination for a simplified burn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnMode {
    /// Pure liquid-fuel burn.
    Lf,
    /// Recognized but not implemented.
    Ox,
    /// Recognized but not implemented.
    LfOx,
}

impl FromStr for BurnMode {
    type Err = ShipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lf" => Ok(BurnMode::Lf),
            "ox" => Ok(BurnMode::Ox),
            "lfox" => Ok(BurnMode::LfOx),
            _ => Err(ShipError::InvalidMode(s.to_string())),
        }
    }
}

/// What drives a burn: a full engine model, or a bare impulse-plus-mode pair
/// when flow-rate detail is unnecessary.
#[derive(Debug, Clone)]
pub enum BurnSource<'a> {
    Engine(&'a Engine),
    Impulse { isp_seconds: f64, mode: BurnMode },
}

/// Mass budget supplied at construction. With a total, dry mass is derived
/// by subtracting the carried resources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MassBudget {
    DryTons(f64),
    TotalTons(f64),
}

/// Outcome of a committed burn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnReport {
    pub delta_v_m_s: f64,
    /// `None` when the burn carried no flow-rate data.
    pub duration_s: Option<f64>,
}

/// A spacecraft: current speed, carried resources, dry mass, and cumulative
/// burn time. Mutated only through [`Ship::isru`] and the burn operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    speed_m_s: f64,
    resource_tons: ResourceVector,
    dry_mass_tons: f64,
    /// Cumulative burn duration. `None` is the explicit "unknown" marker:
    /// once a burn happens without flow-rate data the total can never be
    /// recovered, so `None` is permanent.
    time_burned_s: Option<f64>,
}

impl Ship {
    /// Commission a ship from a tons-based resource vector and a mass budget.
    pub fn new(resource_tons: ResourceVector, mass: MassBudget) -> Result<Self, ShipError> {
        resource_tons.validate_non_negative()?;
        let carried = resource_tons.total();
        let dry_mass_tons = match mass {
            MassBudget::DryTons(dry) => dry,
            MassBudget::TotalTons(total) => {
                let dry = total - carried;
                let reconstructed = dry + carried;
                if reconstructed != total {
                    return Err(ShipError::MassBudgetMismatch {
                        total,
                        reconstructed,
                    });
                }
                dry
            }
        };
        if dry_mass_tons < 0.0 {
            return Err(ShipError::InvalidAmount {
                amount: dry_mass_tons,
            });
        }
        let ship = Ship {
            speed_m_s: 0.0,
            resource_tons,
            dry_mass_tons,
            time_burned_s: Some(0.0),
        };
        ship.assert_invariants();
        Ok(ship)
    }

    /// Commission a ship from resource unit counts, converted to tons via the
    /// supplied kilograms-per-unit table.
    pub fn from_unit_counts(
        counts: &BTreeMap<ResourceKind, f64>,
        table: &UnitMassTable,
        mass: MassBudget,
    ) -> Result<Self, ShipError> {
        Self::new(table.to_tons(counts)?, mass)
    }

    pub fn speed_m_s(&self) -> f64 {
        self.speed_m_s
    }

    pub fn resource_tons(&self) -> &ResourceVector {
        &self.resource_tons
    }

    pub fn dry_mass_tons(&self) -> f64 {
        self.dry_mass_tons
    }

    /// Cumulative burn time, or `None` once any burn lacked flow-rate data.
    pub fn time_burned_s(&self) -> Option<f64> {
        self.time_burned_s
    }

    /// Total mass: dry mass plus every carried resource.
    pub fn mass_tons(&self) -> f64 {
        self.dry_mass_tons + self.resource_tons.total()
    }

    /// Convert held ore into propellant. Mass-conserving: the produced
    /// quantities sum to exactly the ore spent.
    pub fn isru(&mut self, ore_tons: f64, mode: IsruMode) -> Result<(), ShipError> {
        if ore_tons < 0.0 {
            return Err(ShipError::InvalidAmount { amount: ore_tons });
        }
        let held = self.resource_tons.amount(ResourceKind::Ore);
        if ore_tons > held {
            return Err(ShipError::InsufficientResource {
                kind: ResourceKind::Ore,
                requested: ore_tons,
                held,
            });
        }

        let produced: ResourceVector = match mode {
            IsruMode::Lf => [(ResourceKind::LiquidFuel, ore_tons)].into_iter().collect(),
            IsruMode::Ox => [(ResourceKind::Oxidizer, ore_tons)].into_iter().collect(),
            IsruMode::LfOx => {
                let lf = ore_tons * LFOX_COEFFICIENTS.0;
                // Derive the oxidizer share by subtraction so the two parts
                // sum to exactly the ore spent.
                let ox = ore_tons - lf;
                [(ResourceKind::LiquidFuel, lf), (ResourceKind::Oxidizer, ox)]
                    .into_iter()
                    .collect()
            }
            IsruMode::Monopropellant => {
                return Err(ShipError::Unsupported("monopropellant conversion"));
            }
        };
        let spent: ResourceVector = [(ResourceKind::Ore, ore_tons)].into_iter().collect();

        let mut candidate = self.resource_tons.clone();
        candidate.sub_assign(&spent, AxisPolicy::Locked)?;
        candidate.add_assign(&produced, AxisPolicy::Extend { default: 0.0 })?;
        candidate.validate_non_negative()?;

        self.resource_tons = candidate;
        self.assert_invariants();
        Ok(())
    }

    /// Burn propellant to gain speed.
    ///
    /// With a full engine the consumed resources and their flow rates come
    /// from the engine's capability set; with a bare impulse-plus-mode pair
    /// the burn carries no flow-rate data and the cumulative burn time
    /// becomes unknown.
    pub fn burn(
        &mut self,
        propellant_tons: f64,
        source: BurnSource<'_>,
    ) -> Result<BurnReport, ShipError> {
        if propellant_tons < 0.0 {
            return Err(ShipError::InvalidAmount {
                amount: propellant_tons,
            });
        }
        match source {
            BurnSource::Engine(engine) => {
                let rates = engine.flow_rates()?;
                let kinds: Vec<ResourceKind> = rates.kinds().collect();
                match kinds.as_slice() {
                    [ResourceKind::LiquidFuel] => {}
                    [ResourceKind::Oxidizer] => {
                        return Err(ShipError::Unsupported("oxidizer-only burn"));
                    }
                    [ResourceKind::LiquidFuel, ResourceKind::Oxidizer] => {
                        return Err(ShipError::Unsupported(
                            "combined liquid-fuel and oxidizer burn",
                        ));
                    }
                    _ => return Err(ShipError::InvalidEngineSpec),
                }
                let isp_seconds = engine.isp_seconds()?;
                let mass_flow = rates.total();
                if mass_flow <= 0.0 {
                    return Err(ShipError::InvalidEngineSpec);
                }
                // Apportion the propellant across the consumed kinds in
                // proportion to their flow rates.
                let consumed = rates.scaled(propellant_tons / mass_flow);
                self.burn_with(&consumed, isp_seconds, Some(&rates))
            }
            BurnSource::Impulse { isp_seconds, mode } => match mode {
                BurnMode::Lf => {
                    let consumed: ResourceVector =
                        [(ResourceKind::LiquidFuel, propellant_tons)]
                            .into_iter()
                            .collect();
                    self.burn_with(&consumed, isp_seconds, None)
                }
                BurnMode::Ox => Err(ShipError::Unsupported("oxidizer-only burn")),
                BurnMode::LfOx => Err(ShipError::Unsupported(
                    "combined liquid-fuel and oxidizer burn",
                )),
            },
        }
    }

    /// The low-level burn transaction: consume exactly `consumed`, gain the
    /// corresponding Tsiolkovsky velocity, and account burn time from the
    /// optional flow rates.
    ///
    /// Every check runs against a candidate state; ship fields are written
    /// only after all of them pass.
    pub fn burn_with(
        &mut self,
        consumed: &ResourceVector,
        isp_seconds: f64,
        flow_rates: Option<&ResourceVector>,
    ) -> Result<BurnReport, ShipError> {
        if isp_seconds <= 0.0 {
            return Err(ShipError::InvalidImpulse { isp_seconds });
        }
        for (kind, amount) in consumed.iter() {
            if amount < 0.0 {
                return Err(ShipError::InvalidAmount { amount });
            }
            let held = self.resource_tons.amount(kind);
            if amount > held {
                return Err(ShipError::InsufficientResource {
                    kind,
                    requested: amount,
                    held,
                });
            }
        }

        let mut candidate = self.resource_tons.clone();
        candidate.sub_assign(consumed, AxisPolicy::Locked)?;
        candidate.validate_non_negative()?;

        let total = consumed.total();
        let m0 = self.mass_tons();
        // A zero-total burn is a no-op for speed; the rocket equation's
        // domain requires a strict mass decrease.
        let delta_v_m_s = if total > 0.0 {
            tsiolkovsky(isp_seconds, m0, m0 - total)
        } else {
            0.0
        };

        let duration_s = match flow_rates {
            Some(rates) => {
                if !rates.same_axes(consumed) {
                    return Err(ShipError::FlowRateMismatch);
                }
                let mass_flow = rates.total();
                if mass_flow <= 0.0 {
                    return Err(ShipError::FlowRateMismatch);
                }
                let duration = total / mass_flow;
                for (kind, rate) in rates.iter() {
                    let derived = rate * duration;
                    let expected = consumed.amount(kind);
                    if (derived - expected).abs() > FLOW_TOLERANCE_TONS {
                        return Err(ShipError::FlowRateInconsistent {
                            kind,
                            expected,
                            derived,
                        });
                    }
                }
                Some(duration)
            }
            None => None,
        };

        self.resource_tons = candidate;
        self.speed_m_s += delta_v_m_s;
        match duration_s {
            // Accumulate only while the total is still known; once unknown
            // it stays unknown.
            Some(duration) => {
                if let Some(time) = self.time_burned_s.as_mut() {
                    *time += duration;
                }
            }
            None => self.time_burned_s = None,
        }
        self.assert_invariants();

        Ok(BurnReport {
            delta_v_m_s,
            duration_s,
        })
    }

    /// Contract check: holds after every committed mutation. A failure here
    /// is a programming error, not a recoverable condition.
    fn assert_invariants(&self) {
        assert!(self.speed_m_s >= 0.0);
        assert!(self.dry_mass_tons >= 0.0);
        assert!(self.resource_tons.validate_non_negative().is_ok());
        if let Some(time) = self.time_burned_s {
            assert!(time >= 0.0);
        }
    }
}
