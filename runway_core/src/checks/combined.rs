//! Combined axial force and biaxial flexure (AISC 360-16 H1.1).
//!
//! The longitudinal crane force is carried as axial compression in the
//! girder. Available axial strength uses flexural buckling (E3) about the
//! major axis over the span and about the minor axis over the lateral
//! unbraced length.

use std::f64::consts::PI;

use super::{kn, CheckInput, CheckKind, CheckResult, LimitState};
use crate::errors::CalcResult;
use crate::materials::SteelProperties;
use crate::section::SectionProperties;

const PHI_C: f64 = 0.90;
const OMEGA_C: f64 = 1.67;

/// Flexural buckling stress Fcr (E3-2/E3-3); a zero effective length gives Fy.
pub fn flexural_buckling_stress(effective_length_mm: f64, radius_mm: f64, steel: &SteelProperties) -> f64 {
    let fy = steel.fy_mpa;
    if effective_length_mm <= 0.0 {
        return fy;
    }
    let slenderness = effective_length_mm / radius_mm;
    let fe = PI * PI * steel.e_mpa / slenderness.powi(2);
    if slenderness <= 4.71 * steel.slenderness_scale() {
        0.658_f64.powf(fy / fe) * fy
    } else {
        0.877 * fe
    }
}

/// Nominal compressive strength Pn (N) for the girder
pub fn nominal_axial(section: &SectionProperties, steel: &SteelProperties, span_mm: f64, unbraced_mm: f64) -> f64 {
    let fcr_x = flexural_buckling_stress(span_mm, section.rx_mm, steel);
    let fcr_y = flexural_buckling_stress(unbraced_mm, section.ry_mm, steel);
    fcr_x.min(fcr_y) * section.area_mm2
}

/// H1-1a/b interaction using the flexure utilizations already computed.
///
/// `major` and `minor` must be the flexure results for the same input; their
/// ratios are Mrx/Mcx and Mry/Mcy.
pub fn check(input: &CheckInput<'_>, major: &CheckResult, minor: &CheckResult) -> CalcResult<CheckResult> {
    let forces = input.forces;
    let pn = nominal_axial(input.section, &input.steel, forces.span_mm, forces.unbraced_length_mm);
    let pc = input.available(pn, PHI_C, OMEGA_C);
    let pr = forces.factored_axial();

    let axial_ratio = pr / pc;
    let flexure_sum = major.ratio + minor.ratio;

    let (interaction, limit_state, equation) = if axial_ratio >= 0.2 {
        (
            axial_ratio + 8.0 / 9.0 * flexure_sum,
            LimitState::AxialDominantInteraction,
            "H1-1a",
        )
    } else {
        (
            axial_ratio / 2.0 + flexure_sum,
            LimitState::FlexureDominantInteraction,
            "H1-1b",
        )
    };

    Ok(CheckResult::new(CheckKind::CombinedForces, interaction, 1.0, "-", limit_state)?
        .with_note(format!(
            "Pr = {:.1} kN, Pc = {:.1} kN, Pr/Pc = {:.3} -> {}",
            kn(pr),
            kn(pc),
            axial_ratio,
            equation
        ))
        .with_note(format!(
            "Mrx/Mcx = {:.3}, Mry/Mcy = {:.3}",
            major.ratio, minor.ratio
        )))
}
