//! # Vertical Effective Stress
//!
//! σv' accumulates downward from the ground surface. Each layer adds
//! γ × Δh above the water table and (γsat − γw) × Δh below it:
//!
//! ```text
//! σv'(i) = σv'(i-1) + γsat × Δh            base of layer at/above water table
//! σv'(i) = σv'(i-1) + (γsat − γw) × Δh     base of layer below water table
//! ```
//!
//! The running value is carried in an immutable [`StressState`]; each step
//! consumes the previous state and returns the next one, so the borehole
//! pipeline is a plain fold over depth-ordered layers.
//!
//! ## Example
//!
//! ```rust
//! use geotech_core::calculations::effective_stress::StressState;
//!
//! // Ground at +100 m, water at +97 m
//! let s1 = StressState::SURFACE.advance(18.0, 2.0, 98.0, 97.0);
//! let s2 = s1.advance(18.0, 4.0, 96.0, 97.0);
//! assert!((s1.sigma_v - 36.0).abs() < 1e-9);
//! assert!((s2.sigma_v - 52.38).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Unit weight of water γw (kN/m³)
pub const GAMMA_WATER: f64 = 9.81;

/// Elevation of a point `depth` metres below a ground surface at `ground_elevation`.
pub fn elevation(ground_elevation: f64, depth: f64) -> f64 {
    ground_elevation - depth
}

/// Water table elevation from the ground elevation and the signed water depth
/// (negative = below ground, positive = ponded above ground).
pub fn water_level_elevation(ground_elevation: f64, water_depth: f64) -> f64 {
    ground_elevation + water_depth
}

/// Accumulated effective stress at the base of the last processed layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StressState {
    /// σv' at `depth` (kN/m²)
    pub sigma_v: f64,
    /// Depth of the last processed layer (m)
    pub depth: f64,
}

impl StressState {
    /// State at the ground surface
    pub const SURFACE: StressState = StressState { sigma_v: 0.0, depth: 0.0 };

    /// Advance to the next layer without splitting the interval at the water
    /// table: the whole increment is classified by the elevation of its base.
    pub fn advance(self, gamma_sat: f64, depth: f64, elevation: f64, water_level_elevation: f64) -> StressState {
        if depth == 0.0 {
            return StressState::SURFACE;
        }

        let dh = depth - self.depth;
        let increment = if elevation >= water_level_elevation {
            gamma_sat * dh
        } else {
            (gamma_sat - GAMMA_WATER) * dh
        };

        StressState {
            sigma_v: self.sigma_v + increment,
            depth,
        }
    }

    /// Advance to the next layer, splitting the interval exactly where it
    /// crosses the water table.
    ///
    /// Used for gap-filled depths, where the unit weight is estimated and
    /// the interval thickness is not tied to a sampling interval.
    pub fn advance_split(self, gamma_sat: f64, depth: f64, ground_elevation: f64, water_level_elevation: f64) -> StressState {
        if depth == 0.0 {
            return StressState::SURFACE;
        }

        let base_elevation = elevation(ground_elevation, depth);
        let top_elevation = elevation(ground_elevation, self.depth);

        let increment = if base_elevation >= water_level_elevation {
            gamma_sat * (depth - self.depth)
        } else if top_elevation > water_level_elevation {
            let depth_to_water = ground_elevation - water_level_elevation;
            let above = depth_to_water - self.depth;
            let below = depth - depth_to_water;
            gamma_sat * above + (gamma_sat - GAMMA_WATER) * below
        } else {
            (gamma_sat - GAMMA_WATER) * (depth - self.depth)
        };

        StressState {
            sigma_v: self.sigma_v + increment,
            depth,
        }
    }
}
