//! Core constants, unit helpers, and the rocket equation shared across the
//! Delta-V Planner workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Kilograms per metric ton.
    pub const KG_PER_TON: f64 = 1_000.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::KG_PER_TON;

    /// Convert kilograms to metric tons.
    #[inline]
    pub fn kg_to_tons(v: f64) -> f64 {
        v / KG_PER_TON
    }

    /// Convert metric tons to kilograms.
    #[inline]
    pub fn tons_to_kg(v: f64) -> f64 {
        v * KG_PER_TON
    }
}

/// The Tsiolkovsky rocket equation.
pub mod rocket {
    use super::constants::G0;

    /// Velocity gained (m/s) by burning from mass `m0_tons` down to `mf_tons`
    /// at specific impulse `isp_seconds`.
    ///
    /// Preconditions are programming contracts, not recoverable errors: the
    /// caller must have already established that propellant is available and
    /// that the burn strictly decreases mass.
    pub fn tsiolkovsky(isp_seconds: f64, m0_tons: f64, mf_tons: f64) -> f64 {
        assert!(isp_seconds > 0.0);
        assert!(0.0 < mf_tons && mf_tons < m0_tons);
        isp_seconds * G0 * (m0_tons / mf_tons).ln()
    }
}
