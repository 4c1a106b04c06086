//! # Web-to-Flange Welds
//!
//! Sizes the pair of fillet welds joining the top flange of a welded plate
//! girder to its web (AISC 360-16 J2).
//!
//! The welds carry the horizontal shear flow VQ/I at the support together
//! with the wheel load spread over the web local yielding length
//! (lb + 5k). The two welds share the vector resultant equally. The adopted
//! leg is the larger of the strength requirement and the Table J2.4
//! minimum, rounded up to a whole millimetre.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::loads::{derive_forces, CraneInput, RunwayGeometry, DesignMethod};
//! use runway_core::materials::SteelGrade;
//! use runway_core::section::{BuiltUpSection, SectionCandidate};
//! use runway_core::weld::design_web_flange_weld;
//!
//! let forces = derive_forces(&CraneInput::default(), &RunwayGeometry::default(), DesignMethod::Lrfd).unwrap();
//! let section = SectionCandidate::BuiltUp(BuiltUpSection::new(400.0, 8.0, 200.0, 12.0))
//!     .properties(SteelGrade::A992)
//!     .unwrap();
//!
//! let weld = design_web_flange_weld(&section, &forces, SteelGrade::A992).unwrap();
//! assert!(weld.size_mm >= weld.minimum_size_mm);
//! assert!(weld.ratio <= 1.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::DesignForces;
use crate::materials::SteelGrade;
use crate::section::SectionProperties;

/// E70XX electrode classification strength (MPa)
pub const FEXX_E70_MPA: f64 = 482.0;

/// Effective throat of an equal-leg fillet per mm of leg
const THROAT_PER_LEG: f64 = 0.707;

const PHI_WELD: f64 = 0.75;
const OMEGA_WELD: f64 = 2.00;
const PHI_RUPTURE: f64 = 0.75;
const OMEGA_RUPTURE: f64 = 2.00;

const CHECK_NAME: &str = "Web-to-flange weld";

/// Minimum fillet leg for the thinner part joined, mm (AISC Table J2.4, SI)
pub fn minimum_fillet_size(thinner_part_mm: f64) -> f64 {
    if thinner_part_mm <= 6.0 {
        3.0
    } else if thinner_part_mm <= 13.0 {
        5.0
    } else if thinner_part_mm <= 19.0 {
        6.0
    } else {
        8.0
    }
}

/// Web-to-top-flange fillet weld design, both welds together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeldDesign {
    /// Horizontal shear flow VQ/I at the support (N/mm)
    pub shear_flow_n_per_mm: f64,
    /// Wheel load over lb + 5k (N/mm)
    pub wheel_load_n_per_mm: f64,
    /// Resultant carried by one of the two welds (N/mm)
    pub demand_per_weld_n_per_mm: f64,
    /// Leg needed for strength alone (mm)
    pub required_size_mm: f64,
    /// Table J2.4 minimum leg (mm)
    pub minimum_size_mm: f64,
    /// Adopted leg (mm)
    pub size_mm: f64,
    /// Available strength of one weld at the adopted leg (N/mm)
    pub capacity_per_weld_n_per_mm: f64,
    pub ratio: f64,
    /// Web shear rupture along the weld line (J4.2)
    pub base_metal_ratio: f64,
}

/// Size the web-to-flange fillet welds for a built-up section.
pub fn design_web_flange_weld(
    section: &SectionProperties,
    forces: &DesignForces,
    grade: SteelGrade,
) -> CalcResult<WeldDesign> {
    let steel = grade.properties();
    let tw = section.web_thickness_mm;
    let tf = section.flange_thickness_mm;

    let vu = forces.factored_end_shear(section.area_mm2, steel.density_kg_m3);
    let flange_q = section.flange_width_mm * tf * section.ho_mm / 2.0;
    let shear_flow = vu * flange_q / section.ix_mm4;

    let spread = forces.bearing_length_mm + 5.0 * section.k_mm;
    let wheel_load = forces.factored_wheel_load() / spread;

    let resultant = shear_flow.hypot(wheel_load);
    if !resultant.is_finite() {
        return Err(CalcError::formula_domain(
            CHECK_NAME,
            format!("weld demand is not finite (VQ/I = {}, P/l = {})", shear_flow, wheel_load),
        ));
    }
    let per_weld = resultant / 2.0;

    // Available strength per mm of weld length per mm of leg (J2-4)
    let per_leg = forces.method.available(0.6 * FEXX_E70_MPA * THROAT_PER_LEG, PHI_WELD, OMEGA_WELD);
    let required = per_weld / per_leg;
    let minimum = minimum_fillet_size(tw.min(tf));
    let size = required.max(minimum).ceil();
    let capacity = per_leg * size;

    let rupture = forces.method.available(0.6 * steel.fu_mpa * tw, PHI_RUPTURE, OMEGA_RUPTURE);

    tracing::debug!(shear_flow, wheel_load, required, size, "web-to-flange weld");

    Ok(WeldDesign {
        shear_flow_n_per_mm: shear_flow,
        wheel_load_n_per_mm: wheel_load,
        demand_per_weld_n_per_mm: per_weld,
        required_size_mm: required,
        minimum_size_mm: minimum,
        size_mm: size,
        capacity_per_weld_n_per_mm: capacity,
        ratio: per_weld / capacity,
        base_metal_ratio: resultant / rupture,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::test_support::{built_up, forces};
    use crate::loads::DesignMethod;

    #[test]
    fn test_minimum_sizes() {
        assert_eq!(minimum_fillet_size(6.0), 3.0);
        assert_eq!(minimum_fillet_size(8.0), 5.0);
        assert_eq!(minimum_fillet_size(16.0), 6.0);
        assert_eq!(minimum_fillet_size(25.0), 8.0);
    }

    #[test]
    fn test_shear_flow_and_wheel_load() {
        let forces = forces(DesignMethod::Lrfd);
        let section = built_up(400.0, 8.0, 200.0, 12.0);
        let weld = design_web_flange_weld(&section, &forces, SteelGrade::A992).unwrap();

        let vu = forces.factored_end_shear(section.area_mm2, 7850.0);
        // Q = 200 × 12 × 412 / 2
        let q = vu * 494_400.0 / section.ix_mm4;
        assert!((weld.shear_flow_n_per_mm - q).abs() < 1e-9);
        // k = 12 + 5, lb = 65 + 20
        let p = 1.6 * 72_000.0 / (85.0 + 5.0 * 17.0);
        assert!((weld.wheel_load_n_per_mm - p).abs() < 1e-9);
        assert!((weld.demand_per_weld_n_per_mm - (q * q + p * p).sqrt() / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_adopted_size_covers_strength_and_minimum() {
        let forces = forces(DesignMethod::Lrfd);
        let section = built_up(400.0, 8.0, 200.0, 12.0);
        let weld = design_web_flange_weld(&section, &forces, SteelGrade::A992).unwrap();

        let per_leg = 0.75 * 0.6 * 482.0 * 0.707;
        assert!((weld.required_size_mm - weld.demand_per_weld_n_per_mm / per_leg).abs() < 1e-9);
        assert_eq!(weld.minimum_size_mm, 5.0);
        assert!(weld.size_mm >= weld.required_size_mm);
        assert!(weld.size_mm >= 5.0);
        assert_eq!(weld.size_mm, weld.size_mm.round());
        assert!(weld.ratio <= 1.0);
        assert!((weld.capacity_per_weld_n_per_mm - per_leg * weld.size_mm).abs() < 1e-9);
    }

    #[test]
    fn test_asd_uses_omega() {
        let section = built_up(400.0, 8.0, 200.0, 12.0);
        let asd_forces = forces(DesignMethod::Asd);
        let weld = design_web_flange_weld(&section, &asd_forces, SteelGrade::A992).unwrap();
        let per_leg = 0.6 * 482.0 * 0.707 / 2.0;
        assert!((weld.capacity_per_weld_n_per_mm - per_leg * weld.size_mm).abs() < 1e-9);
        // Web rupture: 0.6 Fu tw / 2.0 with Fu = 450 MPa
        let resultant = 2.0 * weld.demand_per_weld_n_per_mm;
        assert!((weld.base_metal_ratio - resultant / (0.6 * 450.0 * 8.0 / 2.0)).abs() < 1e-9);
    }
}
