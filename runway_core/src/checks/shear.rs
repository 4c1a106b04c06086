//! Web shear (AISC 360-16 G2.1).

use super::{kn, CheckInput, CheckKind, CheckResult, LimitState};
use crate::errors::CalcResult;
use crate::materials::SteelProperties;
use crate::section::SectionProperties;

/// Nominal shear strength and the factors used to get it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShearStrength {
    pub vn_n: f64,
    pub cv1: f64,
    pub kv: f64,
    pub phi: f64,
    pub omega: f64,
}

/// Web plate buckling coefficient kv.
///
/// 5.34 for unstiffened webs; 5 + 5/(a/h)² when transverse stiffeners are
/// spaced at a/h <= 3.
pub fn web_buckling_coefficient(web_height_mm: f64, stiffener_spacing_mm: Option<f64>) -> f64 {
    match stiffener_spacing_mm {
        Some(a) if a / web_height_mm <= 3.0 => 5.0 + 5.0 / (a / web_height_mm).powi(2),
        _ => 5.34,
    }
}

/// Nominal shear strength Vn = 0.6·Fy·Aw·Cv1 with Aw = d·tw.
pub fn nominal_shear(
    section: &SectionProperties,
    steel: &SteelProperties,
    stiffener_spacing_mm: Option<f64>,
) -> ShearStrength {
    let fy = steel.fy_mpa;
    let e = steel.e_mpa;
    let h_tw = section.web_height_mm / section.web_thickness_mm;
    let aw = section.depth_mm * section.web_thickness_mm;

    // G2.1(a): stocky webs of rolled I-shapes
    if !section.built_up && h_tw <= 2.24 * steel.slenderness_scale() {
        return ShearStrength {
            vn_n: 0.6 * fy * aw,
            cv1: 1.0,
            kv: 5.34,
            phi: 1.00,
            omega: 1.50,
        };
    }

    let kv = web_buckling_coefficient(section.web_height_mm, stiffener_spacing_mm);
    let limit = 1.10 * (kv * e / fy).sqrt();
    let cv1 = if h_tw <= limit { 1.0 } else { limit / h_tw };

    ShearStrength {
        vn_n: 0.6 * fy * aw * cv1,
        cv1,
        kv,
        phi: 0.90,
        omega: 1.67,
    }
}

/// Maximum end shear with a wheel over the support.
pub fn check(input: &CheckInput<'_>) -> CalcResult<CheckResult> {
    let section = input.section;
    let forces = input.forces;
    let strength = nominal_shear(section, &input.steel, forces.stiffener_spacing_mm);
    let vu = forces.factored_end_shear(section.area_mm2, input.steel.density_kg_m3);
    let capacity = input.available(strength.vn_n, strength.phi, strength.omega);

    let limit_state = if strength.cv1 < 1.0 {
        LimitState::ShearBuckling
    } else {
        LimitState::ShearYielding
    };

    Ok(CheckResult::new(CheckKind::Shear, kn(vu), kn(capacity), "kN", limit_state)?
        .with_note(format!(
            "h/tw = {:.1}, kv = {:.2}, Cv1 = {:.3}",
            section.web_height_mm / section.web_thickness_mm,
            strength.kv,
            strength.cv1
        ))
        .with_note(format!("Vn = {:.1} kN", kn(strength.vn_n))))
}
