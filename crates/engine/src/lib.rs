//! Engine performance models.
//!
//! Every variant exposes the same derived capability set: specific impulse,
//! thrust, per-resource flow rates, and total mass flow. The union is closed
//! so callers can match exhaustively when a capability is variant-dependent.

use thiserror::Error;

use deltav_resources::{AxisPolicy, ResourceVector, VectorError};

/// Errors surfaced by the engine capability set.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("engine has no flow-rate data")]
    MissingFlowRates,
    #[error(
        "aggregate specific impulse of a heterogeneous block is not defined under this model"
    )]
    CompositeImpulse,
    #[error("cluster count must be at least 1, got {0}")]
    InvalidCount(u32),
    #[error("cluster throttle must be non-negative, got {0}")]
    InvalidThrottle(f64),
    #[error(transparent)]
    Vector(#[from] VectorError),
}

/// Fixed-performance engine: stored figures, no derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleEngine {
    isp_vacuum_seconds: f64,
    thrust_kn: f64,
    flow_rates_tons_s: Option<ResourceVector>,
}

impl SimpleEngine {
    pub fn new(
        isp_vacuum_seconds: f64,
        thrust_kn: f64,
        flow_rates_tons_s: Option<ResourceVector>,
    ) -> Self {
        SimpleEngine {
            isp_vacuum_seconds,
            thrust_kn,
            flow_rates_tons_s,
        }
    }
}

/// N identical engines at a shared throttle setting. The throttle is a
/// multiplicative fraction, not a percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineCluster {
    template: Box<Engine>,
    count: u32,
    throttle: f64,
}

impl EngineCluster {
    pub fn new(template: Engine, count: u32, throttle: f64) -> Result<Self, EngineError> {
        if count < 1 {
            return Err(EngineError::InvalidCount(count));
        }
        if throttle < 0.0 {
            return Err(EngineError::InvalidThrottle(throttle));
        }
        Ok(EngineCluster {
            template: Box::new(template),
            count,
            throttle,
        })
    }

    fn scale(&self) -> f64 {
        f64::from(self.count) * self.throttle
    }
}

/// Ordered heterogeneous aggregate. Thrust and flow rates sum across
/// members; a single aggregate specific impulse is deliberately not offered.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineBlock {
    members: Vec<Engine>,
}

impl EngineBlock {
    pub fn new(members: Vec<Engine>) -> Self {
        EngineBlock { members }
    }
}

/// Closed union over the engine variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Engine {
    Simple(SimpleEngine),
    Cluster(EngineCluster),
    Block(EngineBlock),
}

impl Engine {
    /// Vacuum specific impulse (seconds). Intensive: clustering leaves it
    /// unchanged. A heterogeneous block has no single well-defined value and
    /// reports [`EngineError::CompositeImpulse`] rather than approximating.
    pub fn isp_seconds(&self) -> Result<f64, EngineError> {
        match self {
            Engine::Simple(simple) => Ok(simple.isp_vacuum_seconds),
            Engine::Cluster(cluster) => cluster.template.isp_seconds(),
            Engine::Block(_) => Err(EngineError::CompositeImpulse),
        }
    }

    /// Thrust (kN). Extensive: scales with cluster count × throttle and sums
    /// across block members.
    pub fn thrust_kn(&self) -> f64 {
        match self {
            Engine::Simple(simple) => simple.thrust_kn,
            Engine::Cluster(cluster) => cluster.template.thrust_kn() * cluster.scale(),
            Engine::Block(block) => block.members.iter().map(Engine::thrust_kn).sum(),
        }
    }

    /// Per-resource flow rates (tons/s). Extensive, like thrust. Block
    /// members may consume different kinds, so their sum extends axes with a
    /// default of zero.
    pub fn flow_rates(&self) -> Result<ResourceVector, EngineError> {
        match self {
            Engine::Simple(simple) => simple
                .flow_rates_tons_s
                .clone()
                .ok_or(EngineError::MissingFlowRates),
            Engine::Cluster(cluster) => {
                Ok(cluster.template.flow_rates()?.scaled(cluster.scale()))
            }
            Engine::Block(block) => {
                let mut combined = ResourceVector::new();
                for member in &block.members {
                    combined
                        .add_assign(&member.flow_rates()?, AxisPolicy::Extend { default: 0.0 })?;
                }
                Ok(combined)
            }
        }
    }

    /// Total mass flow (tons/s): the sum of the flow-rate vector.
    pub fn mass_flow_tons_s(&self) -> Result<f64, EngineError> {
        Ok(self.flow_rates()?.total())
    }
}
