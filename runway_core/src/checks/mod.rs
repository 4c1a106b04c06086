//! # Check Engine
//!
//! The eight strength and serviceability checks for a crane runway girder.
//! Each check is an independent pure function of the design forces, the
//! section properties, the steel and the crane service, producing one
//! [`CheckResult`] with demand, capacity and utilization.
//!
//! ## Check Order
//!
//! [`evaluate_all`] always returns the checks in [`CheckKind::ALL`] order,
//! which is also the tie-break order for the governing check:
//!
//! 1. Major-axis flexure (yielding, LTB, FLB) - AISC F2–F5
//! 2. Minor-axis flexure - AISC F6
//! 3. Shear - AISC G2.1
//! 4. Combined forces - AISC H1-1a/b
//! 5. Web local yielding - AISC J10.2
//! 6. Web crippling - AISC J10.3
//! 7. Deflection - CMAA span/N limits
//! 8. Fatigue - AISC Appendix 3
//!
//! ## Example
//!
//! ```rust
//! use runway_core::checks::{evaluate_all, CheckInput, CheckKind};
//! use runway_core::loads::{derive_forces, CraneInput, RunwayGeometry, DesignMethod};
//! use runway_core::materials::SteelGrade;
//! use runway_core::section::{BuiltUpSection, SectionCandidate};
//! use runway_core::service::ServiceSpec;
//!
//! let forces = derive_forces(&CraneInput::default(), &RunwayGeometry::default(), DesignMethod::Lrfd).unwrap();
//! let section = SectionCandidate::BuiltUp(BuiltUpSection::new(400.0, 8.0, 200.0, 12.0))
//!     .properties(SteelGrade::A992)
//!     .unwrap();
//!
//! let service = ServiceSpec::default();
//! let input = CheckInput::new(&forces, &section, SteelGrade::A992, &service);
//! let results = evaluate_all(&input).unwrap();
//!
//! assert_eq!(results.len(), 8);
//! assert_eq!(results[0].kind, CheckKind::MajorFlexure);
//! ```

pub mod combined;
pub mod deflection;
pub mod fatigue;
pub mod flexure;
pub mod shear;
pub mod web;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::loads::DesignForces;
use crate::materials::{SteelGrade, SteelProperties};
use crate::section::{check_proportions, SectionProperties};
use crate::service::ServiceSpec;

/// A ratio may exceed 1.0 by this much and still pass (round-off).
pub const PASS_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Check identity
// ============================================================================

/// The eight checks, in reporting and tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckKind {
    MajorFlexure,
    MinorFlexure,
    Shear,
    CombinedForces,
    WebLocalYielding,
    WebCrippling,
    Deflection,
    Fatigue,
}

impl CheckKind {
    pub const ALL: [CheckKind; 8] = [
        CheckKind::MajorFlexure,
        CheckKind::MinorFlexure,
        CheckKind::Shear,
        CheckKind::CombinedForces,
        CheckKind::WebLocalYielding,
        CheckKind::WebCrippling,
        CheckKind::Deflection,
        CheckKind::Fatigue,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckKind::MajorFlexure => "Major-axis flexure",
            CheckKind::MinorFlexure => "Minor-axis flexure",
            CheckKind::Shear => "Shear",
            CheckKind::CombinedForces => "Combined forces",
            CheckKind::WebLocalYielding => "Web local yielding",
            CheckKind::WebCrippling => "Web crippling",
            CheckKind::Deflection => "Deflection",
            CheckKind::Fatigue => "Fatigue",
        }
    }

    /// Code clause the check is based on
    pub fn code_reference(&self) -> &'static str {
        match self {
            CheckKind::MajorFlexure => "AISC 360-16 F2-F5",
            CheckKind::MinorFlexure => "AISC 360-16 F6",
            CheckKind::Shear => "AISC 360-16 G2.1",
            CheckKind::CombinedForces => "AISC 360-16 H1.1",
            CheckKind::WebLocalYielding => "AISC 360-16 J10.2",
            CheckKind::WebCrippling => "AISC 360-16 J10.3",
            CheckKind::Deflection => "CMAA 70 / AISC DG7",
            CheckKind::Fatigue => "AISC 360-16 Appendix 3",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Limit state that produced a check's capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitState {
    Yielding,
    CompressionFlangeYielding,
    LateralTorsionalBuckling,
    FlangeLocalBuckling,
    ShearYielding,
    ShearBuckling,
    AxialDominantInteraction,
    FlexureDominantInteraction,
    WebLocalYielding,
    WebCrippling,
    Serviceability,
    StressRange,
}

impl LimitState {
    pub fn display_name(&self) -> &'static str {
        match self {
            LimitState::Yielding => "yielding",
            LimitState::CompressionFlangeYielding => "compression flange yielding",
            LimitState::LateralTorsionalBuckling => "lateral-torsional buckling",
            LimitState::FlangeLocalBuckling => "flange local buckling",
            LimitState::ShearYielding => "web shear yielding",
            LimitState::ShearBuckling => "web shear buckling",
            LimitState::AxialDominantInteraction => "interaction (H1-1a)",
            LimitState::FlexureDominantInteraction => "interaction (H1-1b)",
            LimitState::WebLocalYielding => "web local yielding",
            LimitState::WebCrippling => "web crippling",
            LimitState::Serviceability => "deflection limit",
            LimitState::StressRange => "fatigue stress range",
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Verdict of one check. Demand and capacity share `units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub demand: f64,
    pub capacity: f64,
    /// demand / capacity
    pub ratio: f64,
    pub passes: bool,
    pub units: String,
    pub limit_state: LimitState,
    pub notes: Vec<String>,
}

impl CheckResult {
    /// Build a result, failing closed on an unusable capacity or demand.
    pub fn new(
        kind: CheckKind,
        demand: f64,
        capacity: f64,
        units: impl Into<String>,
        limit_state: LimitState,
    ) -> CalcResult<Self> {
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(CalcError::formula_domain(
                kind.display_name(),
                format!("capacity must be positive and finite, got {}", capacity),
            ));
        }
        if !demand.is_finite() || demand < 0.0 {
            return Err(CalcError::formula_domain(
                kind.display_name(),
                format!("demand must be non-negative and finite, got {}", demand),
            ));
        }
        let ratio = demand / capacity;
        Ok(Self {
            kind,
            demand,
            capacity,
            ratio,
            passes: ratio <= 1.0 + PASS_TOLERANCE,
            units: units.into(),
            limit_state,
            notes: Vec::new(),
        })
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Status label for reports
    pub fn status(&self) -> &'static str {
        if self.passes {
            "OK"
        } else {
            "NG"
        }
    }
}

// ============================================================================
// Input bundle and dispatcher
// ============================================================================

/// Everything a check reads. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct CheckInput<'a> {
    pub forces: &'a DesignForces,
    pub section: &'a SectionProperties,
    pub grade: SteelGrade,
    pub steel: SteelProperties,
    pub service: &'a ServiceSpec,
}

impl<'a> CheckInput<'a> {
    pub fn new(
        forces: &'a DesignForces,
        section: &'a SectionProperties,
        grade: SteelGrade,
        service: &'a ServiceSpec,
    ) -> Self {
        Self {
            forces,
            section,
            grade,
            steel: grade.properties(),
            service,
        }
    }

    /// Method-dependent available strength
    pub(crate) fn available(&self, nominal: f64, phi: f64, omega: f64) -> f64 {
        self.forces.method.available(nominal, phi, omega)
    }
}

/// Run all eight checks in [`CheckKind::ALL`] order.
///
/// Sections outside the plate girder proportion limits are rejected as
/// degenerate before any check runs.
pub fn evaluate_all(input: &CheckInput<'_>) -> CalcResult<Vec<CheckResult>> {
    check_proportions(input.section, &input.steel, input.forces.stiffener_spacing_mm)?;
    let major = flexure::check_major(input)?;
    let minor = flexure::check_minor(input)?;
    let shear = shear::check(input)?;
    let combined = combined::check(input, &major, &minor)?;
    let yielding = web::check_local_yielding(input)?;
    let crippling = web::check_crippling(input)?;
    let deflection = deflection::check(input)?;
    let fatigue = fatigue::check(input)?;

    Ok(vec![major, minor, shear, combined, yielding, crippling, deflection, fatigue])
}

/// Highest-utilization result; ties go to the earlier check.
pub fn governing(results: &[CheckResult]) -> Option<&CheckResult> {
    results.iter().fold(None, |best: Option<&CheckResult>, r| match best {
        Some(b) if r.ratio > b.ratio || (r.ratio == b.ratio && r.kind < b.kind) => Some(r),
        Some(b) => Some(b),
        None => Some(r),
    })
}

/// Newton-millimetres to kilonewton-metres for reporting
pub(crate) fn knm(nmm: f64) -> f64 {
    crate::units::KiloNewtonMeters::from(crate::units::NewtonMillimeters(nmm)).value()
}

/// Newtons to kilonewtons for reporting
pub(crate) fn kn(n: f64) -> f64 {
    crate::units::KiloNewtons::from(crate::units::Newtons(n)).value()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::loads::{derive_forces, CraneInput, DesignForces, DesignMethod, RunwayGeometry};
    use crate::materials::SteelGrade;
    use crate::section::{BuiltUpSection, SectionCandidate, SectionProperties};

    pub fn forces(method: DesignMethod) -> DesignForces {
        derive_forces(&CraneInput::default(), &RunwayGeometry::default(), method).unwrap()
    }

    pub fn forces_with(geometry: RunwayGeometry) -> DesignForces {
        derive_forces(&CraneInput::default(), &geometry, DesignMethod::Lrfd).unwrap()
    }

    pub fn built_up(hw: f64, tw: f64, bf: f64, tf: f64) -> SectionProperties {
        SectionCandidate::BuiltUp(BuiltUpSection::new(hw, tw, bf, tf))
            .properties(SteelGrade::A992)
            .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::loads::DesignMethod;

    #[test]
    fn test_result_rejects_bad_capacity() {
        let err = CheckResult::new(CheckKind::Shear, 10.0, 0.0, "kN", LimitState::ShearYielding).unwrap_err();
        assert_eq!(err.error_code(), "FORMULA_DOMAIN_ERROR");
        assert!(CheckResult::new(CheckKind::Shear, 10.0, f64::NAN, "kN", LimitState::ShearYielding).is_err());
        assert!(CheckResult::new(CheckKind::Shear, -1.0, 10.0, "kN", LimitState::ShearYielding).is_err());
    }

    #[test]
    fn test_pass_tolerance() {
        let exact = CheckResult::new(CheckKind::Shear, 100.0, 100.0, "kN", LimitState::ShearYielding).unwrap();
        assert!(exact.passes);
        let over = CheckResult::new(CheckKind::Shear, 100.01, 100.0, "kN", LimitState::ShearYielding).unwrap();
        assert!(!over.passes);
        assert_eq!(over.status(), "NG");
    }

    #[test]
    fn test_evaluate_all_order_and_bounds() {
        let forces = forces(DesignMethod::Lrfd);
        let section = built_up(400.0, 8.0, 200.0, 12.0);
        let service = crate::service::ServiceSpec::default();
        let input = CheckInput::new(&forces, &section, SteelGrade::A992, &service);
        let results = evaluate_all(&input).unwrap();

        let kinds: Vec<CheckKind> = results.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, CheckKind::ALL.to_vec());
        for r in &results {
            assert!(r.ratio >= 0.0);
            assert!(r.capacity > 0.0);
            assert_eq!(r.passes, r.ratio <= 1.0 + PASS_TOLERANCE);
        }
    }

    #[test]
    fn test_evaluate_all_rejects_out_of_proportion_web() {
        let forces = forces(DesignMethod::Lrfd);
        let service = crate::service::ServiceSpec::default();
        // h/tw = 300 without stiffeners
        let section = built_up(1500.0, 5.0, 300.0, 20.0);
        let err = evaluate_all(&CheckInput::new(&forces, &section, SteelGrade::A992, &service)).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SECTION");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_governing_tie_break() {
        let a = CheckResult::new(CheckKind::Shear, 50.0, 100.0, "kN", LimitState::ShearYielding).unwrap();
        let b = CheckResult::new(CheckKind::MajorFlexure, 5.0, 10.0, "kN·m", LimitState::Yielding).unwrap();
        let c = CheckResult::new(CheckKind::Fatigue, 1.0, 10.0, "MPa", LimitState::StressRange).unwrap();
        let results = vec![a, b, c];
        assert_eq!(governing(&results).unwrap().kind, CheckKind::MajorFlexure);
        assert!(governing(&[]).is_none());
    }
}
