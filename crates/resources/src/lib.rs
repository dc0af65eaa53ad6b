//! Resource kinds and the sparse keyed vector algebra used to track tank
//! contents and engine flow rates.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use deltav_core::units::kg_to_tons;

/// Closed set of consumable resource kinds. Used only as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    LiquidFuel,
    Oxidizer,
    Ore,
    Monopropellant,
    XenonGas,
}

impl ResourceKind {
    /// Canonical snake_case name, matching catalog files.
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::LiquidFuel => "liquid_fuel",
            ResourceKind::Oxidizer => "oxidizer",
            ResourceKind::Ore => "ore",
            ResourceKind::Monopropellant => "monopropellant",
            ResourceKind::XenonGas => "xenon_gas",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceKind {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liquid_fuel" => Ok(ResourceKind::LiquidFuel),
            "oxidizer" => Ok(ResourceKind::Oxidizer),
            "ore" => Ok(ResourceKind::Ore),
            "monopropellant" => Ok(ResourceKind::Monopropellant),
            "xenon_gas" => Ok(ResourceKind::XenonGas),
            _ => Err(VectorError::UnknownKind(s.to_string())),
        }
    }
}

/// Errors surfaced by the vector algebra and unit-mass conversions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VectorError {
    #[error("resource axis '{kind}' is not present in the target vector")]
    KeyMismatch { kind: ResourceKind },
    #[error("resource quantity for '{kind}' is negative: {amount}")]
    NegativeQuantity { kind: ResourceKind, amount: f64 },
    #[error("unknown resource kind '{0}'")]
    UnknownKind(String),
}

/// How element-wise operations treat a key present in the operand but absent
/// from the accumulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisPolicy {
    /// Fail with [`VectorError::KeyMismatch`]. The default posture.
    Locked,
    /// Insert the missing key with `default` before applying the operator.
    Extend { default: f64 },
}

/// Sparse mapping from [`ResourceKind`] to a quantity in tons (or tons/s for
/// flow rates). Keys are present only for kinds actually held or consumed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourceVector(BTreeMap<ResourceKind, f64>);

impl ResourceVector {
    /// An empty vector.
    pub fn new() -> Self {
        ResourceVector(BTreeMap::new())
    }

    /// Quantity held on the given axis, if the axis is present.
    pub fn get(&self, kind: ResourceKind) -> Option<f64> {
        self.0.get(&kind).copied()
    }

    /// Quantity held on the given axis, treating an absent axis as zero.
    pub fn amount(&self, kind: ResourceKind) -> f64 {
        self.get(kind).unwrap_or(0.0)
    }

    /// Set the quantity on an axis, creating it if absent.
    pub fn insert(&mut self, kind: ResourceKind, quantity: f64) {
        self.0.insert(kind, quantity);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Sum of all quantities.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterate axes in deterministic (kind) order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    /// Iterate present axes in deterministic order.
    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.0.keys().copied()
    }

    /// True when both vectors cover exactly the same axes.
    pub fn same_axes(&self, other: &ResourceVector) -> bool {
        self.0.len() == other.0.len() && self.kinds().zip(other.kinds()).all(|(a, b)| a == b)
    }

    /// Element-wise `self[k] += other[k]` for every axis of `other`,
    /// mutating `self` in place.
    pub fn add_assign(
        &mut self,
        other: &ResourceVector,
        axes: AxisPolicy,
    ) -> Result<(), VectorError> {
        self.apply(other, axes, |a, b| a + b)
    }

    /// Element-wise `self[k] -= other[k]` for every axis of `other`,
    /// mutating `self` in place. The result is not checked for negativity;
    /// callers re-validate after composite operations.
    pub fn sub_assign(
        &mut self,
        other: &ResourceVector,
        axes: AxisPolicy,
    ) -> Result<(), VectorError> {
        self.apply(other, axes, |a, b| a - b)
    }

    fn apply(
        &mut self,
        other: &ResourceVector,
        axes: AxisPolicy,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<(), VectorError> {
        for (kind, value) in other.iter() {
            let default = match axes {
                AxisPolicy::Locked => {
                    if !self.0.contains_key(&kind) {
                        return Err(VectorError::KeyMismatch { kind });
                    }
                    0.0
                }
                AxisPolicy::Extend { default } => default,
            };
            let slot = self.0.entry(kind).or_insert(default);
            *slot = op(*slot, value);
        }
        Ok(())
    }

    /// New vector with every quantity multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> ResourceVector {
        ResourceVector(self.0.iter().map(|(k, v)| (*k, v * factor)).collect())
    }

    /// Check that every quantity is non-negative.
    pub fn validate_non_negative(&self) -> Result<(), VectorError> {
        for (kind, amount) in self.iter() {
            if amount < 0.0 {
                return Err(VectorError::NegativeQuantity { kind, amount });
            }
        }
        Ok(())
    }
}

impl FromIterator<(ResourceKind, f64)> for ResourceVector {
    fn from_iter<T: IntoIterator<Item = (ResourceKind, f64)>>(iter: T) -> Self {
        ResourceVector(iter.into_iter().collect())
    }
}

/// Kilograms-per-unit conversion table used to turn caller-supplied unit
/// counts into the tons-based vectors the planner works with. Purely data;
/// the stock values live in the root catalog.
#[derive(Debug, Clone, Default)]
pub struct UnitMassTable {
    kg_per_unit: BTreeMap<ResourceKind, f64>,
}

impl UnitMassTable {
    pub fn new() -> Self {
        UnitMassTable::default()
    }

    pub fn set(&mut self, kind: ResourceKind, kg_per_unit: f64) {
        self.kg_per_unit.insert(kind, kg_per_unit);
    }

    pub fn kg_per_unit(&self, kind: ResourceKind) -> Option<f64> {
        self.kg_per_unit.get(&kind).copied()
    }

    /// Convert a unit-count map into a tons vector. A counted kind missing
    /// from the table is a key mismatch.
    pub fn to_tons(
        &self,
        counts: &BTreeMap<ResourceKind, f64>,
    ) -> Result<ResourceVector, VectorError> {
        let mut tons = ResourceVector::new();
        for (&kind, &units) in counts {
            let per_unit = self
                .kg_per_unit(kind)
                .ok_or(VectorError::KeyMismatch { kind })?;
            tons.insert(kind, kg_to_tons(per_unit * units));
        }
        Ok(tons)
    }
}

impl FromIterator<(ResourceKind, f64)> for UnitMassTable {
    fn from_iter<T: IntoIterator<Item = (ResourceKind, f64)>>(iter: T) -> Self {
        UnitMassTable {
            kg_per_unit: iter.into_iter().collect(),
        }
    }
}
