//! # Crane Loads
//!
//! Converts crane data and runway geometry into the design forces every
//! check consumes. The derivation is a pure function run once per design;
//! section-dependent self-weight is added later by the checks through the
//! helpers on [`DesignForces`].
//!
//! # Overview
//!
//! - [`CraneInput`] / [`RunwayGeometry`] - validated input bundles
//! - [`WheelTrain`] - moving-load influence analysis
//! - [`DesignMethod`] - LRFD vs ASD (load and resistance factors)
//! - [`derive_forces`] - inputs → [`DesignForces`]
//! - [`SupportReaction`] - maximum reaction delivered to a runway support
//!
//! # Example
//!
//! ```
//! use runway_core::loads::{derive_forces, CraneInput, RunwayGeometry, DesignMethod};
//!
//! let forces = derive_forces(
//!     &CraneInput::default(),
//!     &RunwayGeometry::default(),
//!     DesignMethod::Lrfd,
//! ).unwrap();
//!
//! // 57.6 kN static wheel load plus 25% vertical impact
//! assert!((forces.vertical_wheel_load_n - 72_000.0).abs() < 1e-6);
//! ```

pub mod crane;
pub mod moving;

pub use crane::{CraneInput, GeometricWheelLoads, RunwayGeometry};
pub use moving::{MomentInfluence, WheelTrain};

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::units::{KgPerMeter, KiloNewtons, Meters, Millimeters, Newtons};

/// Design methodology selection
///
/// LRFD factors the loads (1.2 dead, 1.6 crane) and compares against φRn;
/// ASD uses service loads against Rn/Ω.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DesignMethod {
    /// Load and Resistance Factor Design - factored loads against φ·Rn
    #[default]
    Lrfd,
    /// Allowable Stress Design - service loads against Rn/Ω
    Asd,
}

impl DesignMethod {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD (Allowable Stress Design)",
            DesignMethod::Lrfd => "LRFD (Load and Resistance Factor Design)",
        }
    }

    /// Short abbreviation
    pub fn code(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD",
            DesignMethod::Lrfd => "LRFD",
        }
    }

    /// Load factors for the crane load combination
    pub fn load_factors(&self) -> LoadFactors {
        match self {
            DesignMethod::Lrfd => LoadFactors { dead: 1.2, crane: 1.6 },
            DesignMethod::Asd => LoadFactors { dead: 1.0, crane: 1.0 },
        }
    }

    /// Available strength: φ·Rn for LRFD, Rn/Ω for ASD
    pub fn available(&self, nominal: f64, phi: f64, omega: f64) -> f64 {
        match self {
            DesignMethod::Lrfd => phi * nominal,
            DesignMethod::Asd => nominal / omega,
        }
    }
}

impl std::fmt::Display for DesignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Load factors applied to dead and crane effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadFactors {
    pub dead: f64,
    pub crane: f64,
}

/// Largest reaction the girder delivers to one support (N).
///
/// For a simple span this coincides with the maximum end shear: the
/// governing wheel sits over the support.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SupportReaction {
    /// Crane wheels without impact
    pub crane_static_n: f64,
    /// Crane wheels with vertical impact
    pub crane_n: f64,
    /// Rail plus girder self-weight
    pub dead_n: f64,
    /// Factored (LRFD) or service (ASD) combination of dead and crane with impact
    pub design_n: f64,
}

/// Design forces for one runway girder, in N and mm.
///
/// Crane effects are stored unfactored; the `factored_*` helpers combine
/// them with dead load (rail plus girder self-weight) using [`LoadFactors`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignForces {
    pub method: DesignMethod,
    pub factors: LoadFactors,

    // Geometry carried to the checks
    pub span_mm: f64,
    pub unbraced_length_mm: f64,
    pub bearing_length_mm: f64,
    pub rail_height_mm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stiffener_spacing_mm: Option<f64>,

    // Wheel loads
    pub wheel_count: usize,
    pub wheel_base_mm: f64,
    /// Static wheel load without impact (N)
    pub static_wheel_load_n: f64,
    /// Wheel load including vertical impact (N)
    pub vertical_wheel_load_n: f64,
    /// Lateral load per wheel at top of rail (N)
    pub lateral_wheel_load_n: f64,
    /// Longitudinal force along the rail, taken as beam axial force (N)
    pub longitudinal_force_n: f64,
    /// Geometric estimate of the wheel loads (diagnostic only)
    pub geometric_wheel_loads: GeometricWheelLoads,

    // Influence results
    pub moment_influence: MomentInfluence,
    /// End reaction per unit wheel load
    pub shear_coefficient: f64,
    /// Max deflection per unit wheel load for EI = 1 (mm³)
    pub deflection_coefficient_mm3: f64,

    // Unfactored crane effects
    /// Vertical crane moment with impact (N·mm)
    pub crane_moment_nmm: f64,
    /// Vertical crane end shear with impact (N)
    pub crane_shear_n: f64,
    /// Lateral crane moment at top of rail (N·mm)
    pub lateral_moment_nmm: f64,

    /// Rail dead load (N/mm)
    pub rail_line_load_n_per_mm: f64,
}

impl DesignForces {
    /// Girder self-weight line load for a cross-section area (N/mm)
    pub fn self_weight_line_load(area_mm2: f64, density_kg_m3: f64) -> f64 {
        // mm² → m² is 1e-6; kg/m from area × density
        KgPerMeter(area_mm2 * 1.0e-6 * density_kg_m3).line_load().value()
    }

    /// Total unfactored dead line load (N/mm)
    pub fn dead_line_load(&self, area_mm2: f64, density_kg_m3: f64) -> f64 {
        self.rail_line_load_n_per_mm + Self::self_weight_line_load(area_mm2, density_kg_m3)
    }

    /// Factored major-axis moment Mu (N·mm)
    pub fn factored_major_moment(&self, area_mm2: f64, density_kg_m3: f64) -> f64 {
        let w = self.dead_line_load(area_mm2, density_kg_m3);
        self.factors.dead * w * self.span_mm.powi(2) / 8.0 + self.factors.crane * self.crane_moment_nmm
    }

    /// Factored end shear Vu (N)
    pub fn factored_end_shear(&self, area_mm2: f64, density_kg_m3: f64) -> f64 {
        let w = self.dead_line_load(area_mm2, density_kg_m3);
        self.factors.dead * w * self.span_mm / 2.0 + self.factors.crane * self.crane_shear_n
    }

    /// Factored lateral moment at top of rail (N·mm), before eccentricity
    pub fn factored_lateral_moment(&self) -> f64 {
        self.factors.crane * self.lateral_moment_nmm
    }

    /// Factored axial force from longitudinal crane forces (N)
    pub fn factored_axial(&self) -> f64 {
        self.factors.crane * self.longitudinal_force_n
    }

    /// Factored concentrated wheel load for web checks (N)
    pub fn factored_wheel_load(&self) -> f64 {
        self.factors.crane * self.vertical_wheel_load_n
    }

    /// Maximum support reaction for a girder of the given area
    pub fn support_reaction(&self, area_mm2: f64, density_kg_m3: f64) -> SupportReaction {
        SupportReaction {
            crane_static_n: self.static_wheel_load_n * self.shear_coefficient,
            crane_n: self.crane_shear_n,
            dead_n: self.dead_line_load(area_mm2, density_kg_m3) * self.span_mm / 2.0,
            design_n: self.factored_end_shear(area_mm2, density_kg_m3),
        }
    }

    /// Distance from the governing wheel to the nearer support (mm)
    pub fn wheel_distance_to_support(&self) -> f64 {
        let x = self.moment_influence.station_mm;
        x.min(self.span_mm - x)
    }
}

/// Derive design forces from crane data and runway geometry.
///
/// Validates both inputs first; nothing is computed for invalid data.
pub fn derive_forces(
    crane: &CraneInput,
    geometry: &RunwayGeometry,
    method: DesignMethod,
) -> CalcResult<DesignForces> {
    crane.validate()?;
    geometry.validate()?;
    geometry.validate_against(crane)?;

    let geometric_wheel_loads = crane.review_wheel_load();
    let wheels = crane.wheels_per_rail as usize;

    let static_wheel: Newtons = KiloNewtons(crane.max_static_wheel_load_kn).into();
    let static_wheel_load_n = static_wheel.value();
    let vertical_wheel_load_n = static_wheel_load_n * (1.0 + crane.vertical_impact_pct / 100.0);

    let moving: Newtons = crane.moving_weight().into();
    let lateral_wheel_load_n =
        crane.horizontal_impact_pct / 100.0 * moving.value() / (2.0 * wheels as f64);
    let longitudinal_force_n = crane.longitudinal_impact_pct / 100.0 * static_wheel_load_n * wheels as f64;

    let span_mm = Millimeters::from(Meters(geometry.beam_span_m)).value();
    let wheel_base_mm = Millimeters::from(Meters(crane.wheel_base_m)).value();
    let train = crane.wheel_train()?;

    let moment_influence = train.max_moment(span_mm);
    let shear_coefficient = train.max_end_shear(span_mm);
    let deflection_coefficient_mm3 = train.max_deflection_coefficient(span_mm);

    let factors = method.load_factors();

    tracing::debug!(
        vertical_wheel_load_n,
        lateral_wheel_load_n,
        longitudinal_force_n,
        moment_coefficient_mm = moment_influence.coefficient_mm,
        station_mm = moment_influence.station_mm,
        "derived crane forces"
    );

    Ok(DesignForces {
        method,
        factors,
        span_mm,
        unbraced_length_mm: Millimeters::from(Meters(geometry.unbraced_length_m)).value(),
        bearing_length_mm: geometry.bearing_length_mm(),
        rail_height_mm: geometry.rail_height_mm,
        stiffener_spacing_mm: geometry.stiffener_spacing_mm,
        wheel_count: wheels,
        wheel_base_mm,
        static_wheel_load_n,
        vertical_wheel_load_n,
        lateral_wheel_load_n,
        longitudinal_force_n,
        geometric_wheel_loads,
        moment_influence,
        shear_coefficient,
        deflection_coefficient_mm3,
        crane_moment_nmm: vertical_wheel_load_n * moment_influence.coefficient_mm,
        crane_shear_n: vertical_wheel_load_n * shear_coefficient,
        lateral_moment_nmm: lateral_wheel_load_n * moment_influence.coefficient_mm,
        rail_line_load_n_per_mm: KgPerMeter(geometry.rail_weight_kg_per_m).line_load().value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_forces(method: DesignMethod) -> DesignForces {
        derive_forces(&CraneInput::default(), &RunwayGeometry::default(), method).unwrap()
    }

    #[test]
    fn test_design_method_default_and_display() {
        assert_eq!(DesignMethod::default(), DesignMethod::Lrfd);
        assert_eq!(DesignMethod::Asd.to_string(), "ASD");
        assert!((DesignMethod::Lrfd.available(100.0, 0.9, 1.67) - 90.0).abs() < 1e-12);
        assert!((DesignMethod::Asd.available(100.0, 0.9, 2.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_loads() {
        let forces = default_forces(DesignMethod::Lrfd);
        assert!((forces.vertical_wheel_load_n - 72_000.0).abs() < 1e-6);
        // 20% × (10 + 0.72) t × 9.81 / 4 wheels
        assert!((forces.lateral_wheel_load_n - 5258.16).abs() < 0.01);
        // 10% × 57.6 kN × 2 wheels
        assert!((forces.longitudinal_force_n - 11_520.0).abs() < 1e-6);
    }

    #[test]
    fn test_crane_moment_two_wheels() {
        let forces = default_forces(DesignMethod::Lrfd);
        // 2 wheels at 2.5 m on 4.5 m: coefficient = (2/L)(L/2 - a/4)^2
        let expected = 2.0 / 4500.0 * (2250.0_f64 - 625.0).powi(2);
        assert!((forces.moment_influence.coefficient_mm - expected).abs() < 1e-6);
        assert!((forces.crane_moment_nmm - 72_000.0 * expected).abs() < 1e-3);
    }

    #[test]
    fn test_factors_by_method() {
        let lrfd = default_forces(DesignMethod::Lrfd);
        let asd = default_forces(DesignMethod::Asd);
        assert_eq!(lrfd.factors.crane, 1.6);
        assert_eq!(asd.factors.dead, 1.0);
        assert!(lrfd.factored_major_moment(10_000.0, 7850.0) > asd.factored_major_moment(10_000.0, 7850.0));
        assert!((asd.factored_axial() - asd.longitudinal_force_n).abs() < 1e-9);
    }

    #[test]
    fn test_self_weight() {
        // 10 000 mm² of steel = 78.5 kg/m = 0.770 N/mm
        let w = DesignForces::self_weight_line_load(10_000.0, 7850.0);
        assert!((w - 0.770085).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_inputs_rejected_before_analysis() {
        let crane = CraneInput {
            wheel_base_m: 6.0,
            ..CraneInput::default()
        };
        let err = derive_forces(&crane, &RunwayGeometry::default(), DesignMethod::Lrfd).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_support_reaction() {
        let forces = default_forces(DesignMethod::Lrfd);
        let reaction = forces.support_reaction(10_000.0, 7850.0);
        // Wheel over the support plus the second wheel 2.0 m into the 4.5 m span
        let coefficient = 1.0 + 2000.0 / 4500.0;
        assert!((reaction.crane_static_n - 57_600.0 * coefficient).abs() < 1e-6);
        assert!((reaction.crane_n - 72_000.0 * coefficient).abs() < 1e-6);
        let dead = forces.dead_line_load(10_000.0, 7850.0) * 4500.0 / 2.0;
        assert!((reaction.dead_n - dead).abs() < 1e-9);
        assert!((reaction.design_n - (1.2 * dead + 1.6 * reaction.crane_n)).abs() < 1e-6);
    }

    #[test]
    fn test_explicit_even_offsets_match_wheel_base() {
        let crane = CraneInput {
            wheel_offsets_m: Some(vec![0.0, 2.5]),
            ..CraneInput::default()
        };
        let explicit = derive_forces(&crane, &RunwayGeometry::default(), DesignMethod::Lrfd).unwrap();
        let spaced = default_forces(DesignMethod::Lrfd);
        assert!((explicit.crane_moment_nmm - spaced.crane_moment_nmm).abs() < 1e-6);
        assert!((explicit.shear_coefficient - spaced.shear_coefficient).abs() < 1e-12);
    }

    #[test]
    fn test_governing_station_is_interior() {
        let forces = default_forces(DesignMethod::Lrfd);
        assert!(forces.wheel_distance_to_support() > 1000.0);
    }
}
