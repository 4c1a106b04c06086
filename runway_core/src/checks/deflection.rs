//! Vertical deflection under service crane loads.
//!
//! Static wheel loads without impact, no dead load. The limit is span/N
//! with N from the crane service class (600, 800 or 1000).

use super::{CheckInput, CheckKind, CheckResult, LimitState};
use crate::errors::CalcResult;

/// Maximum elastic deflection (mm) from the moving-load coefficient
pub fn max_deflection_mm(static_wheel_load_n: f64, coefficient_mm3: f64, e_mpa: f64, ix_mm4: f64) -> f64 {
    static_wheel_load_n * coefficient_mm3 / (e_mpa * ix_mm4)
}

pub fn check(input: &CheckInput<'_>) -> CalcResult<CheckResult> {
    let forces = input.forces;
    let limit = input.service.crane_class.deflection_limit();
    let delta = max_deflection_mm(
        forces.static_wheel_load_n,
        forces.deflection_coefficient_mm3,
        input.steel.e_mpa,
        input.section.ix_mm4,
    );
    let allowable = forces.span_mm / limit;

    Ok(CheckResult::new(CheckKind::Deflection, delta, allowable, "mm", LimitState::Serviceability)?
        .with_note(format!(
            "Limit L/{:.0} for {}, actual L/{:.0}",
            limit,
            input.service.crane_class,
            if delta > 0.0 { forces.span_mm / delta } else { f64::INFINITY }
        )))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::loads::DesignMethod;
    use crate::materials::SteelGrade;
    use crate::service::{CraneClass, ServiceSpec};

    #[test]
    fn test_single_load_formula() {
        // PL³/48EI for a midspan point load
        let span: f64 = 6000.0;
        let delta = max_deflection_mm(10_000.0, span.powi(3) / 48.0, 200_000.0, 1.0e8);
        assert!((delta - 10_000.0 * span.powi(3) / (48.0 * 200_000.0 * 1.0e8)).abs() < 1e-12);
    }

    #[test]
    fn test_class_limit_changes_allowable() {
        let forces = forces(DesignMethod::Lrfd);
        let section = built_up(400.0, 8.0, 200.0, 12.0);
        let moderate = ServiceSpec::default();
        let severe = ServiceSpec {
            crane_class: CraneClass::F,
            ..ServiceSpec::default()
        };
        let a = check(&CheckInput::new(&forces, &section, SteelGrade::A992, &moderate)).unwrap();
        let b = check(&CheckInput::new(&forces, &section, SteelGrade::A992, &severe)).unwrap();
        assert!((a.capacity - 7.5).abs() < 1e-12);
        assert!((b.capacity - 4.5).abs() < 1e-12);
        assert!((a.demand - b.demand).abs() < 1e-12);
    }

    #[test]
    fn test_method_independent() {
        let section = built_up(400.0, 8.0, 200.0, 12.0);
        let service = ServiceSpec::default();
        let lrfd = forces(DesignMethod::Lrfd);
        let asd = forces(DesignMethod::Asd);
        let a = check(&CheckInput::new(&lrfd, &section, SteelGrade::A992, &service)).unwrap();
        let b = check(&CheckInput::new(&asd, &section, SteelGrade::A992, &service)).unwrap();
        assert_eq!(a.ratio, b.ratio);
    }

    #[test]
    fn test_deeper_or_thicker_section_deflects_less() {
        let forces = forces(DesignMethod::Lrfd);
        let service = ServiceSpec::default();
        let ratio = |hw, tf| {
            let section = built_up(hw, 8.0, 200.0, tf);
            check(&CheckInput::new(&forces, &section, SteelGrade::A992, &service)).unwrap().ratio
        };
        let base = ratio(400.0, 12.0);
        assert!(ratio(425.0, 12.0) < base);
        assert!(ratio(400.0, 14.0) < base);
    }
}
