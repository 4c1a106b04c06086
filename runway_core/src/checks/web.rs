//! Concentrated wheel load on the web (AISC 360-16 J10.2, J10.3).
//!
//! The wheel bears on the top flange through the rail; the bearing length
//! is the rail base width plus 20 mm. Whether the end or interior equations
//! apply depends on how far the governing wheel sits from the nearer support.

use super::{kn, CheckInput, CheckKind, CheckResult, LimitState};
use crate::errors::CalcResult;
use crate::materials::SteelProperties;
use crate::section::SectionProperties;

const PHI_WLY: f64 = 1.00;
const OMEGA_WLY: f64 = 1.50;
const PHI_WCR: f64 = 0.75;
const OMEGA_WCR: f64 = 2.00;

/// Web local yielding Rn (N). `interior` when the load is more than d from the member end.
pub fn nominal_local_yielding(section: &SectionProperties, steel: &SteelProperties, bearing_mm: f64, interior: bool) -> f64 {
    let spread = if interior { 5.0 * section.k_mm } else { 2.5 * section.k_mm };
    steel.fy_mpa * section.web_thickness_mm * (spread + bearing_mm)
}

/// Web crippling Rn (N). `interior` when the load is at least d/2 from the member end.
pub fn nominal_crippling(section: &SectionProperties, steel: &SteelProperties, bearing_mm: f64, interior: bool) -> f64 {
    let tw = section.web_thickness_mm;
    let tf = section.flange_thickness_mm;
    let d = section.depth_mm;
    let thickness_term = (tw / tf).powf(1.5);
    let stiffness_term = (steel.e_mpa * steel.fy_mpa * tf / tw).sqrt();

    let (coefficient, bearing_term) = if interior {
        (0.80, 3.0 * (bearing_mm / d))
    } else if bearing_mm / d <= 0.2 {
        (0.40, 3.0 * (bearing_mm / d))
    } else {
        (0.40, 4.0 * bearing_mm / d - 0.2)
    };

    coefficient * tw * tw * (1.0 + bearing_term * thickness_term) * stiffness_term
}

pub fn check_local_yielding(input: &CheckInput<'_>) -> CalcResult<CheckResult> {
    let section = input.section;
    let forces = input.forces;
    let distance = forces.wheel_distance_to_support();
    let interior = distance > section.depth_mm;
    let rn = nominal_local_yielding(section, &input.steel, forces.bearing_length_mm, interior);
    let pu = forces.factored_wheel_load();
    let capacity = input.available(rn, PHI_WLY, OMEGA_WLY);

    Ok(CheckResult::new(CheckKind::WebLocalYielding, kn(pu), kn(capacity), "kN", LimitState::WebLocalYielding)?
        .with_note(format!(
            "{} load: wheel {:.0} mm from support, k = {:.1} mm, lb = {:.0} mm",
            if interior { "Interior" } else { "End" },
            distance,
            section.k_mm,
            forces.bearing_length_mm
        )))
}

pub fn check_crippling(input: &CheckInput<'_>) -> CalcResult<CheckResult> {
    let section = input.section;
    let forces = input.forces;
    let distance = forces.wheel_distance_to_support();
    let interior = distance >= section.depth_mm / 2.0;
    let rn = nominal_crippling(section, &input.steel, forces.bearing_length_mm, interior);
    let pu = forces.factored_wheel_load();
    let capacity = input.available(rn, PHI_WCR, OMEGA_WCR);

    let equation = if interior {
        "J10-4"
    } else if forces.bearing_length_mm / section.depth_mm <= 0.2 {
        "J10-5a"
    } else {
        "J10-5b"
    };

    Ok(CheckResult::new(CheckKind::WebCrippling, kn(pu), kn(capacity), "kN", LimitState::WebCrippling)?
        .with_note(format!("Eq. {}, lb/d = {:.3}", equation, forces.bearing_length_mm / section.depth_mm)))
}
