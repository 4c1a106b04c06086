//! Crane data sheet and runway geometry inputs.
//!
//! These are the two immutable value bundles the load model consumes. Units
//! follow the crane manufacturer's data sheet (tonnes, metres, kilonewtons)
//! and are named in every field.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::units::{KiloNewtons, Meters, Millimeters, Tonnes};

use super::WheelTrain;

fn default_min_hook_approach_m() -> f64 {
    1.0
}

/// Overhead travelling crane data for one runway rail.
///
/// ## JSON Example
///
/// ```json
/// {
///   "capacity_t": 10.0,
///   "bridge_span_m": 11.5,
///   "bridge_weight_t": 3.9,
///   "trolley_weight_t": 0.72,
///   "max_static_wheel_load_kn": 57.6,
///   "wheel_base_m": 2.5,
///   "wheels_per_rail": 2,
///   "vertical_impact_pct": 25.0,
///   "horizontal_impact_pct": 20.0,
///   "longitudinal_impact_pct": 10.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraneInput {
    /// Rated lifting capacity (t)
    pub capacity_t: f64,
    /// Crane bridge span, rail to rail (m)
    pub bridge_span_m: f64,
    /// Bridge weight excluding trolley (t)
    pub bridge_weight_t: f64,
    /// Trolley (crab) weight including hoist (t)
    pub trolley_weight_t: f64,
    /// Maximum static wheel load from the manufacturer, no impact (kN)
    pub max_static_wheel_load_kn: f64,
    /// Distance between adjacent end-truck wheels (m)
    pub wheel_base_m: f64,
    /// Number of wheels on one rail
    pub wheels_per_rail: u32,
    /// Vertical impact allowance (% of static wheel load)
    pub vertical_impact_pct: f64,
    /// Lateral (side thrust) allowance (% of lifted load plus trolley)
    pub horizontal_impact_pct: f64,
    /// Longitudinal (tractive) allowance (% of static wheel loads)
    pub longitudinal_impact_pct: f64,
    /// Closest approach of the hook to the runway rail (m)
    #[serde(default = "default_min_hook_approach_m")]
    pub min_hook_approach_m: f64,
    /// Wheel positions from the lead wheel for unevenly spaced end trucks
    /// (m); replaces the constant `wheel_base_m` spacing when given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheel_offsets_m: Option<Vec<f64>>,
}

impl Default for CraneInput {
    fn default() -> Self {
        Self {
            capacity_t: 10.0,
            bridge_span_m: 11.5,
            bridge_weight_t: 3.9,
            trolley_weight_t: 0.72,
            max_static_wheel_load_kn: 57.6,
            wheel_base_m: 2.5,
            wheels_per_rail: 2,
            vertical_impact_pct: 25.0,
            horizontal_impact_pct: 20.0,
            longitudinal_impact_pct: 10.0,
            min_hook_approach_m: default_min_hook_approach_m(),
            wheel_offsets_m: None,
        }
    }
}

/// Static wheel loads implied by crane geometry rather than the data sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometricWheelLoads {
    /// Trolley at minimum hook approach on this rail (kN per wheel)
    pub max_static_kn: f64,
    /// Trolley at minimum hook approach on the far rail (kN per wheel)
    pub min_static_kn: f64,
}

impl CraneInput {
    /// Validate crane data. Does not know the beam span; see
    /// [`RunwayGeometry::validate_against`].
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("crane.capacity_t", self.capacity_t)?;
        require_positive("crane.bridge_span_m", self.bridge_span_m)?;
        require_positive("crane.bridge_weight_t", self.bridge_weight_t)?;
        require_positive("crane.trolley_weight_t", self.trolley_weight_t)?;
        require_positive("crane.max_static_wheel_load_kn", self.max_static_wheel_load_kn)?;
        require_positive("crane.wheel_base_m", self.wheel_base_m)?;
        require_non_negative("crane.vertical_impact_pct", self.vertical_impact_pct)?;
        require_non_negative("crane.horizontal_impact_pct", self.horizontal_impact_pct)?;
        require_non_negative("crane.longitudinal_impact_pct", self.longitudinal_impact_pct)?;
        require_non_negative("crane.min_hook_approach_m", self.min_hook_approach_m)?;

        if self.wheels_per_rail == 0 {
            return Err(CalcError::invalid_input(
                "crane.wheels_per_rail",
                "0",
                "At least one wheel per rail is required",
            ));
        }
        if self.min_hook_approach_m >= self.bridge_span_m {
            return Err(CalcError::invalid_input(
                "crane.min_hook_approach_m",
                self.min_hook_approach_m.to_string(),
                "Hook approach must be less than the bridge span",
            ));
        }
        self.wheel_train()?;
        Ok(())
    }

    /// Wheel train on one rail, in millimetres
    pub fn wheel_train(&self) -> CalcResult<WheelTrain> {
        match &self.wheel_offsets_m {
            Some(offsets) => {
                if offsets.len() != self.wheels_per_rail as usize {
                    return Err(CalcError::invalid_input(
                        "crane.wheel_offsets_m",
                        format!("{:?}", offsets),
                        format!("Expected one offset per wheel ({} wheels per rail)", self.wheels_per_rail),
                    ));
                }
                WheelTrain::from_offsets(offsets.iter().map(|&m| Millimeters::from(Meters(m)).value()).collect())
            }
            None => Ok(WheelTrain::new(
                self.wheels_per_rail as usize,
                Millimeters::from(Meters(self.wheel_base_m)).value(),
            )),
        }
    }

    /// Weight of lifted load plus trolley
    pub fn moving_weight(&self) -> KiloNewtons {
        Tonnes(self.capacity_t).weight() + Tonnes(self.trolley_weight_t).weight()
    }

    /// Static wheel loads from bridge statics: half the bridge on each rail,
    /// lifted load and trolley shared by lever arm at minimum hook approach.
    pub fn geometric_wheel_loads(&self) -> GeometricWheelLoads {
        let span = self.bridge_span_m;
        let e_min = self.min_hook_approach_m;
        let bridge_each = Tonnes(self.bridge_weight_t).weight().value() / 2.0;
        let moving = self.moving_weight().value();
        let wheels = f64::from(self.wheels_per_rail);

        GeometricWheelLoads {
            max_static_kn: (bridge_each + moving * (span - e_min) / span) / wheels,
            min_static_kn: (bridge_each + moving * e_min / span) / wheels,
        }
    }

    /// Compare the supplied wheel load with the geometric estimate and warn
    /// when the data sheet value looks unconservative.
    pub(crate) fn review_wheel_load(&self) -> GeometricWheelLoads {
        let derived = self.geometric_wheel_loads();
        // 2% slack for rounding on manufacturer data sheets
        if self.max_static_wheel_load_kn < 0.98 * derived.max_static_kn {
            warn!(
                supplied_kn = self.max_static_wheel_load_kn,
                derived_kn = derived.max_static_kn,
                "supplied maximum wheel load is below the value implied by crane geometry"
            );
        }
        derived
    }
}

/// Runway girder span, bracing and rail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayGeometry {
    /// Simple span between runway columns (m)
    pub beam_span_m: f64,
    /// Lateral unbraced length of the compression flange (m); 0 = continuous bracing
    pub unbraced_length_m: f64,
    /// Rail mass (kg/m)
    pub rail_weight_kg_per_m: f64,
    /// Rail base width bearing on the top flange (mm)
    pub rail_width_mm: f64,
    /// Rail height, top of flange to top of rail (mm)
    pub rail_height_mm: f64,
    /// Transverse stiffener spacing (mm); `None` for an unstiffened web
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stiffener_spacing_mm: Option<f64>,
}

impl Default for RunwayGeometry {
    fn default() -> Self {
        Self {
            beam_span_m: 4.5,
            unbraced_length_m: 4.5,
            rail_weight_kg_per_m: 30.0,
            rail_width_mm: 65.0,
            rail_height_mm: 65.0,
            stiffener_spacing_mm: None,
        }
    }
}

impl RunwayGeometry {
    /// Validate geometry on its own.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("geometry.beam_span_m", self.beam_span_m)?;
        require_non_negative("geometry.unbraced_length_m", self.unbraced_length_m)?;
        require_positive("geometry.rail_weight_kg_per_m", self.rail_weight_kg_per_m)?;
        require_positive("geometry.rail_width_mm", self.rail_width_mm)?;
        require_positive("geometry.rail_height_mm", self.rail_height_mm)?;
        if let Some(spacing) = self.stiffener_spacing_mm {
            require_positive("geometry.stiffener_spacing_mm", spacing)?;
        }
        if self.unbraced_length_m > self.beam_span_m {
            return Err(CalcError::invalid_input(
                "geometry.unbraced_length_m",
                self.unbraced_length_m.to_string(),
                format!("Unbraced length cannot exceed the beam span ({} m)", self.beam_span_m),
            ));
        }
        Ok(())
    }

    /// Validate the crane against this runway (wheel base must fit the span).
    pub fn validate_against(&self, crane: &CraneInput) -> CalcResult<()> {
        if crane.wheel_base_m > self.beam_span_m {
            return Err(CalcError::invalid_input(
                "crane.wheel_base_m",
                crane.wheel_base_m.to_string(),
                format!(
                    "Wheel base exceeds the beam span ({} m); load position is undefined",
                    self.beam_span_m
                ),
            ));
        }
        Ok(())
    }

    /// Rail contact length for concentrated-load web checks (mm)
    pub fn bearing_length_mm(&self) -> f64 {
        self.rail_width_mm + 20.0
    }
}
