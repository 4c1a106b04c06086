//! Major- and minor-axis flexure (AISC 360-16 Chapter F).
//!
//! The major-axis nominal moment is the least of the yielding (or
//! compression-flange yielding), lateral-torsional buckling and flange local
//! buckling strengths for the section's [`FlexuralForm`]. Cb is taken as 1.0
//! for the moving wheel loads.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::{knm, CheckInput, CheckKind, CheckResult, LimitState};
use crate::errors::{CalcError, CalcResult};
use crate::materials::SteelProperties;
use crate::section::{ElementClass, FlexuralForm, SectionProperties};

const PHI_B: f64 = 0.90;
const OMEGA_B: f64 = 1.67;

/// Lateral-torsional buckling modification factor
const CB: f64 = 1.0;

/// Nominal major-axis moment and the limit state that set it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MajorMomentStrength {
    pub mn_nmm: f64,
    pub limit_state: LimitState,
    pub lp_mm: f64,
    pub lr_mm: f64,
    pub form: FlexuralForm,
}

/// Lowest candidate wins; earlier candidates win ties.
fn governing_candidate(candidates: &[(f64, LimitState)]) -> (f64, LimitState) {
    candidates
        .iter()
        .copied()
        .fold((f64::INFINITY, LimitState::Yielding), |best, c| if c.0 < best.0 { c } else { best })
}

/// Linear interpolation between a plastic-side and an elastic-side value
fn interpolate(upper: f64, lower: f64, x: f64, x_start: f64, x_end: f64) -> f64 {
    upper - (upper - lower) * (x - x_start) / (x_end - x_start)
}

/// Limiting unbraced length Lr (F2-6 / F4-8) for a given radius
fn limiting_length_lr(r: f64, section: &SectionProperties, steel: &SteelProperties) -> f64 {
    let fl = 0.7 * steel.fy_mpa;
    let jc = section.j_mm4 / (section.sx_mm3 * section.ho_mm);
    1.95 * r * steel.e_mpa / fl * (jc + (jc * jc + 6.76 * (fl / steel.e_mpa).powi(2)).sqrt()).sqrt()
}

fn require_interpolation_domain(what: &str, start: f64, end: f64) -> CalcResult<()> {
    if !(end > start) {
        return Err(CalcError::formula_domain(
            CheckKind::MajorFlexure.display_name(),
            format!("{}: upper limit {:.3} does not exceed lower limit {:.3}", what, end, start),
        ));
    }
    Ok(())
}

fn require_radius(name: &str, r: f64) -> CalcResult<()> {
    if !r.is_finite() || r <= 0.0 {
        return Err(CalcError::formula_domain(
            CheckKind::MajorFlexure.display_name(),
            format!("{} must be positive to evaluate lateral-torsional buckling, got {}", name, r),
        ));
    }
    Ok(())
}

/// Nominal major-axis flexural strength Mn (N·mm) at unbraced length `lb_mm`.
///
/// When `lb_mm <= Lp` the lateral-torsional buckling branch is skipped
/// entirely, so a continuously braced flange (Lb = 0) never touches the
/// LTB formulas.
pub fn nominal_major_moment(
    section: &SectionProperties,
    steel: &SteelProperties,
    lb_mm: f64,
) -> CalcResult<MajorMomentStrength> {
    let fy = steel.fy_mpa;
    let e = steel.e_mpa;
    let fl = 0.7 * fy;
    let scale = steel.slenderness_scale();
    let sx = section.sx_mm3;
    let class = &section.classification;
    let limits = &class.limits;
    let mp = (fy * section.zx_mm3).min(1.6 * fy * sx);

    match section.flexural_form {
        FlexuralForm::CompactWeb => {
            let lp = 1.76 * section.ry_mm * scale;
            let lr = limiting_length_lr(section.rts_mm, section, steel);
            let mut candidates = vec![(mp, LimitState::Yielding)];

            if lb_mm > lp {
                require_radius("rts", section.rts_mm)?;
                if lb_mm <= lr {
                    require_interpolation_domain("Lr vs Lp", lp, lr)?;
                    let mn = CB * interpolate(mp, fl * sx, lb_mm, lp, lr);
                    candidates.push((mn.min(mp), LimitState::LateralTorsionalBuckling));
                } else {
                    let slenderness = lb_mm / section.rts_mm;
                    let jc = section.j_mm4 / (sx * section.ho_mm);
                    let fcr = CB * PI * PI * e / slenderness.powi(2)
                        * (1.0 + 0.078 * jc * slenderness.powi(2)).sqrt();
                    candidates.push(((fcr * sx).min(mp), LimitState::LateralTorsionalBuckling));
                }
            }

            match class.flange {
                ElementClass::Compact => {}
                ElementClass::Noncompact => {
                    require_interpolation_domain("flange λr vs λp", limits.flange_compact, limits.flange_noncompact)?;
                    let mn = interpolate(mp, fl * sx, class.flange_ratio, limits.flange_compact, limits.flange_noncompact);
                    candidates.push((mn, LimitState::FlangeLocalBuckling));
                }
                ElementClass::Slender => {
                    let mn = 0.9 * e * class.kc * sx / class.flange_ratio.powi(2);
                    candidates.push((mn, LimitState::FlangeLocalBuckling));
                }
            }

            let (mn, limit_state) = governing_candidate(&candidates);
            Ok(MajorMomentStrength { mn_nmm: mn, limit_state, lp_mm: lp, lr_mm: lr, form: section.flexural_form })
        }

        FlexuralForm::NoncompactWeb => {
            let myc = fy * sx;
            let rpc_max = mp / myc;
            let rpc = interpolate(rpc_max, 1.0, class.web_ratio, limits.web_compact, limits.web_noncompact).min(rpc_max);
            let cfy = rpc * myc;

            let lp = 1.1 * section.rt_mm * scale;
            let lr = limiting_length_lr(section.rt_mm, section, steel);
            let mut candidates = vec![(cfy, LimitState::CompressionFlangeYielding)];

            if lb_mm > lp {
                require_radius("rt", section.rt_mm)?;
                if lb_mm <= lr {
                    require_interpolation_domain("Lr vs Lp", lp, lr)?;
                    let mn = CB * interpolate(cfy, fl * sx, lb_mm, lp, lr);
                    candidates.push((mn.min(cfy), LimitState::LateralTorsionalBuckling));
                } else {
                    let slenderness = lb_mm / section.rt_mm;
                    let jc = section.j_mm4 / (sx * section.ho_mm);
                    let fcr = CB * PI * PI * e / slenderness.powi(2)
                        * (1.0 + 0.078 * jc * slenderness.powi(2)).sqrt();
                    candidates.push(((fcr * sx).min(cfy), LimitState::LateralTorsionalBuckling));
                }
            }

            match class.flange {
                ElementClass::Compact => {}
                ElementClass::Noncompact => {
                    require_interpolation_domain("flange λr vs λp", limits.flange_compact, limits.flange_noncompact)?;
                    let mn = interpolate(cfy, fl * sx, class.flange_ratio, limits.flange_compact, limits.flange_noncompact);
                    candidates.push((mn, LimitState::FlangeLocalBuckling));
                }
                ElementClass::Slender => {
                    let mn = 0.9 * e * class.kc * sx / class.flange_ratio.powi(2);
                    candidates.push((mn, LimitState::FlangeLocalBuckling));
                }
            }

            let (mn, limit_state) = governing_candidate(&candidates);
            Ok(MajorMomentStrength { mn_nmm: mn, limit_state, lp_mm: lp, lr_mm: lr, form: section.flexural_form })
        }

        FlexuralForm::SlenderWeb => {
            if section.aw > 10.0 {
                return Err(CalcError::formula_domain(
                    CheckKind::MajorFlexure.display_name(),
                    format!("aw = {:.2} exceeds 10, Rpg is not defined", section.aw),
                ));
            }
            let aw = section.aw;
            let rpg = (1.0 - aw / (1200.0 + 300.0 * aw) * (class.web_ratio - 5.7 * scale)).min(1.0);
            let lp = 1.1 * section.rt_mm * scale;
            let lr = PI * section.rt_mm * (e / fl).sqrt();
            let mut candidates = vec![(rpg * fy * sx, LimitState::CompressionFlangeYielding)];

            if lb_mm > lp {
                require_radius("rt", section.rt_mm)?;
                let fcr = if lb_mm <= lr {
                    require_interpolation_domain("Lr vs Lp", lp, lr)?;
                    CB * (fy - 0.3 * fy * (lb_mm - lp) / (lr - lp))
                } else {
                    CB * PI * PI * e / (lb_mm / section.rt_mm).powi(2)
                };
                candidates.push((rpg * fcr.min(fy) * sx, LimitState::LateralTorsionalBuckling));
            }

            match class.flange {
                ElementClass::Compact => {}
                ElementClass::Noncompact => {
                    require_interpolation_domain("flange λr vs λp", limits.flange_compact, limits.flange_noncompact)?;
                    let fcr = fy - 0.3 * fy * (class.flange_ratio - limits.flange_compact)
                        / (limits.flange_noncompact - limits.flange_compact);
                    candidates.push((rpg * fcr * sx, LimitState::FlangeLocalBuckling));
                }
                ElementClass::Slender => {
                    let fcr = 0.9 * e * class.kc / class.flange_ratio.powi(2);
                    candidates.push((rpg * fcr * sx, LimitState::FlangeLocalBuckling));
                }
            }

            let (mn, limit_state) = governing_candidate(&candidates);
            Ok(MajorMomentStrength { mn_nmm: mn, limit_state, lp_mm: lp, lr_mm: lr, form: section.flexural_form })
        }
    }
}

/// Major-axis flexure under vertical wheel loads plus dead load.
pub fn check_major(input: &CheckInput<'_>) -> CalcResult<CheckResult> {
    let section = input.section;
    let forces = input.forces;
    let strength = nominal_major_moment(section, &input.steel, forces.unbraced_length_mm)?;

    let mu = forces.factored_major_moment(section.area_mm2, input.steel.density_kg_m3);
    let capacity = input.available(strength.mn_nmm, PHI_B, OMEGA_B);

    let ltb_note = if forces.unbraced_length_mm <= strength.lp_mm {
        format!(
            "Lb = {:.0} mm <= Lp = {:.0} mm, lateral-torsional buckling does not apply",
            forces.unbraced_length_mm, strength.lp_mm
        )
    } else {
        format!(
            "Lb = {:.0} mm, Lp = {:.0} mm, Lr = {:.0} mm",
            forces.unbraced_length_mm, strength.lp_mm, strength.lr_mm
        )
    };

    Ok(CheckResult::new(CheckKind::MajorFlexure, knm(mu), knm(capacity), "kN·m", strength.limit_state)?
        .with_note(format!(
            "Mn = {:.1} kN·m governed by {} ({})",
            knm(strength.mn_nmm),
            strength.limit_state.display_name(),
            strength.form.code_reference()
        ))
        .with_note(ltb_note)
        .with_note(format!(
            "Flange {} (bf/2tf = {:.2}), web {} (h/tw = {:.1})",
            section.classification.flange.display_name(),
            section.classification.flange_ratio,
            section.classification.web.display_name(),
            section.classification.web_ratio
        )))
}

/// Nominal minor-axis moment, N·mm (yielding, Mp = Fy·Zy <= 1.6·Fy·Sy)
pub fn nominal_minor_moment(section: &SectionProperties, steel: &SteelProperties) -> f64 {
    let fy = steel.fy_mpa;
    (fy * section.zy_mm3).min(1.6 * fy * section.sy_mm3)
}

/// Minor-axis flexure from lateral wheel loads applied at the top of rail.
///
/// The rail height lifts the lateral load above the top flange; the demand is
/// amplified by (1 + rail height / ho) to account for that eccentricity.
pub fn check_minor(input: &CheckInput<'_>) -> CalcResult<CheckResult> {
    let section = input.section;
    let forces = input.forces;
    let amplification = 1.0 + forces.rail_height_mm / section.ho_mm;
    let muy = forces.factored_lateral_moment() * amplification;
    let mny = nominal_minor_moment(section, &input.steel);
    let capacity = input.available(mny, PHI_B, OMEGA_B);

    Ok(CheckResult::new(CheckKind::MinorFlexure, knm(muy), knm(capacity), "kN·m", LimitState::Yielding)?
        .with_note(format!(
            "Lateral load {:.2} kN per wheel, rail eccentricity factor {:.3}",
            super::kn(forces.lateral_wheel_load_n),
            amplification
        ))
        .with_note(format!("Mny = {:.1} kN·m", knm(mny))))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::loads::{DesignMethod, RunwayGeometry};
    use crate::materials::SteelGrade;
    use crate::service::ServiceSpec;

    #[test]
    fn test_compact_braced_reaches_plastic_moment() {
        let steel = SteelGrade::A992.properties();
        let section = built_up(400.0, 8.0, 200.0, 12.0);
        let strength = nominal_major_moment(&section, &steel, 0.0).unwrap();
        let mp = (345.0 * section.zx_mm3).min(1.6 * 345.0 * section.sx_mm3);
        assert!((strength.mn_nmm - mp).abs() < 1e-6);
        assert_eq!(strength.limit_state, LimitState::Yielding);
    }

    #[test]
    fn test_ltb_governs_long_unbraced_length() {
        let steel = SteelGrade::A992.properties();
        let section = built_up(300.0, 6.0, 150.0, 10.0);
        let strength = nominal_major_moment(&section, &steel, 4500.0).unwrap();
        assert_eq!(strength.limit_state, LimitState::LateralTorsionalBuckling);
        assert!(strength.lp_mm < 4500.0);
        assert!(strength.lr_mm > strength.lp_mm);
        assert!(strength.mn_nmm < 345.0 * section.zx_mm3);
    }

    #[test]
    fn test_ltb_strength_decreases_with_length() {
        let steel = SteelGrade::A992.properties();
        let section = built_up(300.0, 6.0, 150.0, 10.0);
        let mut previous = f64::INFINITY;
        for lb in [0.0, 1000.0, 2000.0, 4000.0, 8000.0, 16000.0] {
            let mn = nominal_major_moment(&section, &steel, lb).unwrap().mn_nmm;
            assert!(mn <= previous + 1e-6);
            previous = mn;
        }
    }

    #[test]
    fn test_flange_local_buckling() {
        // bf/2tf = 12.5 is noncompact for A992
        let steel = SteelGrade::A992.properties();
        let section = built_up(300.0, 8.0, 250.0, 10.0);
        let strength = nominal_major_moment(&section, &steel, 0.0).unwrap();
        assert_eq!(strength.limit_state, LimitState::FlangeLocalBuckling);
    }

    #[test]
    fn test_noncompact_and_slender_web_forms() {
        let steel = SteelGrade::A992.properties();
        let noncompact = built_up(550.0, 5.0, 200.0, 12.0);
        assert_eq!(noncompact.flexural_form, FlexuralForm::NoncompactWeb);
        let strength = nominal_major_moment(&noncompact, &steel, 0.0).unwrap();
        assert!(strength.mn_nmm <= 345.0 * noncompact.zx_mm3);
        assert!(strength.mn_nmm >= 345.0 * noncompact.sx_mm3 - 1e-6);

        let slender = built_up(1200.0, 8.0, 300.0, 20.0);
        let strength = nominal_major_moment(&slender, &steel, 0.0).unwrap();
        assert_eq!(strength.form, FlexuralForm::SlenderWeb);
        assert!(strength.mn_nmm < 345.0 * slender.sx_mm3);
    }

    #[test]
    fn test_zero_unbraced_length_skips_ltb() {
        let geometry = RunwayGeometry {
            unbraced_length_m: 0.0,
            ..RunwayGeometry::default()
        };
        let forces = forces_with(geometry);
        let section = built_up(300.0, 6.0, 150.0, 10.0);
        let service = ServiceSpec::default();
        let input = CheckInput::new(&forces, &section, SteelGrade::A992, &service);
        let result = check_major(&input).unwrap();
        assert_ne!(result.limit_state, LimitState::LateralTorsionalBuckling);
        assert!(result.notes.iter().any(|n| n.contains("does not apply")));
    }

    #[test]
    fn test_major_flexure_lrfd_vs_asd() {
        let section = built_up(400.0, 8.0, 200.0, 12.0);
        let service = ServiceSpec::default();
        let lrfd_forces = forces(DesignMethod::Lrfd);
        let asd_forces = forces(DesignMethod::Asd);
        let lrfd = check_major(&CheckInput::new(&lrfd_forces, &section, SteelGrade::A992, &service)).unwrap();
        let asd = check_major(&CheckInput::new(&asd_forces, &section, SteelGrade::A992, &service)).unwrap();
        assert!(lrfd.demand > asd.demand);
        assert!(lrfd.capacity > asd.capacity);
        assert!(lrfd.ratio > 0.0 && asd.ratio > 0.0);
    }

    #[test]
    fn test_minor_axis_capacity() {
        let steel = SteelGrade::A992.properties();
        let section = built_up(300.0, 6.0, 150.0, 10.0);
        let mny = nominal_minor_moment(&section, &steel);
        assert!((mny - (345.0 * section.zy_mm3).min(1.6 * 345.0 * section.sy_mm3)).abs() < 1e-6);
    }

    #[test]
    fn test_minor_axis_wide_flange_stays_at_yield() {
        // bf/2tf = 15 sits between 0.38 and 1.0 √(E/Fy); no flange local buckling reduction
        let steel = SteelGrade::A992.properties();
        let section = built_up(400.0, 8.0, 300.0, 10.0);
        assert_eq!(section.classification.flange, ElementClass::Noncompact);
        let mny = nominal_minor_moment(&section, &steel);
        let mp = (345.0 * section.zy_mm3).min(1.6 * 345.0 * section.sy_mm3);
        assert!((mny - mp).abs() < 1e-6);

        let forces = forces(DesignMethod::Lrfd);
        let service = ServiceSpec::default();
        let result = check_minor(&CheckInput::new(&forces, &section, SteelGrade::A992, &service)).unwrap();
        assert_eq!(result.limit_state, LimitState::Yielding);
        assert!((result.capacity - knm(0.9 * mp)).abs() < 1e-9);
    }

    #[test]
    fn test_slender_web_rejects_aw_above_ten() {
        let steel = SteelGrade::A992.properties();
        let mut section = built_up(1300.0, 6.0, 250.0, 16.0);
        assert_eq!(section.flexural_form, FlexuralForm::SlenderWeb);
        assert!(nominal_major_moment(&section, &steel, 0.0).is_ok());

        section.aw = 12.0;
        let err = nominal_major_moment(&section, &steel, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "FORMULA_DOMAIN_ERROR");
        assert!(err.to_string().contains("aw"));
    }

    #[test]
    fn test_major_strength_grows_with_flange_plates() {
        let forces = forces(DesignMethod::Lrfd);
        let service = ServiceSpec::default();
        let ratio = |hw, tw, bf, tf| {
            let section = built_up(hw, tw, bf, tf);
            check_major(&CheckInput::new(&forces, &section, SteelGrade::A992, &service)).unwrap().ratio
        };
        let base = ratio(400.0, 8.0, 200.0, 12.0);
        assert!(ratio(400.0, 8.0, 200.0, 16.0) < base);
        assert!(ratio(400.0, 8.0, 216.0, 12.0) < base);
        assert!(ratio(450.0, 8.0, 200.0, 12.0) < base);
    }

    #[test]
    fn test_minor_demand_includes_rail_eccentricity() {
        let forces = forces(DesignMethod::Lrfd);
        let section = built_up(300.0, 6.0, 150.0, 10.0);
        let service = ServiceSpec::default();
        let result = check_minor(&CheckInput::new(&forces, &section, SteelGrade::A992, &service)).unwrap();
        let bare = knm(forces.factored_lateral_moment());
        assert!((result.demand - bare * (1.0 + 65.0 / 310.0)).abs() < 1e-9);
    }

    #[test]
    fn test_wider_flange_reduces_minor_ratio() {
        let forces = forces(DesignMethod::Lrfd);
        let service = ServiceSpec::default();
        let narrow = built_up(300.0, 6.0, 150.0, 10.0);
        let wide = built_up(300.0, 6.0, 180.0, 10.0);
        let r1 = check_minor(&CheckInput::new(&forces, &narrow, SteelGrade::A992, &service)).unwrap();
        let r2 = check_minor(&CheckInput::new(&forces, &wide, SteelGrade::A992, &service)).unwrap();
        assert!(r2.ratio < r1.ratio);
    }
}
