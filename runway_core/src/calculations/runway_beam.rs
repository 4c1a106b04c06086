//! # Crane Runway Girder
//!
//! Designs or checks a simply supported top-running crane runway girder per
//! AISC 360-16, CMAA 70 and AISC Design Guide 7.
//!
//! ## Assumptions
//!
//! - Simply supported single span, one crane on the runway
//! - Rail bears directly on the top flange (no cap channel)
//! - Cb = 1.0 for lateral-torsional buckling
//! - Lateral load shared equally by all wheels on both rails
//!
//! ## Example
//!
//! ```rust
//! use runway_core::calculations::runway_beam::{calculate, RunwayBeamInput};
//! use runway_core::loads::DesignMethod;
//!
//! let input = RunwayBeamInput {
//!     label: "RB-1".to_string(),
//!     design_method: DesignMethod::Asd,
//!     ..RunwayBeamInput::default()
//! };
//!
//! let report = calculate(&input).unwrap();
//!
//! println!("Section: {}", report.section.label());
//! println!("Governing: {} ({:.3})", report.governing_condition(), report.governing_unity());
//! assert!(report.passes());
//! ```

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::checks::{evaluate_all, CheckInput};
use crate::errors::CalcResult;
use crate::loads::{derive_forces, CraneInput, DesignForces, DesignMethod, RunwayGeometry};
use crate::materials::SteelGrade;
use crate::optimizer::{optimize, OptimizerSettings};
use crate::report::{assemble, DesignOutcome, DesignReport, ReportContext};
use crate::section::SectionCandidate;
use crate::service::ServiceSpec;

fn default_label() -> String {
    "RB-1".to_string()
}

/// Input for one runway girder.
///
/// Leave `section` empty to let the optimizer size a welded plate girder;
/// give one to check it as-is.
///
/// ## JSON Example (check a rolled shape)
///
/// ```json
/// {
///   "label": "RB-2",
///   "crane": {
///     "capacity_t": 10.0,
///     "bridge_span_m": 11.5,
///     "bridge_weight_t": 3.9,
///     "trolley_weight_t": 0.72,
///     "max_static_wheel_load_kn": 57.6,
///     "wheel_base_m": 2.5,
///     "wheels_per_rail": 2,
///     "vertical_impact_pct": 25.0,
///     "horizontal_impact_pct": 20.0,
///     "longitudinal_impact_pct": 10.0
///   },
///   "geometry": {
///     "beam_span_m": 4.5,
///     "unbraced_length_m": 4.5,
///     "rail_weight_kg_per_m": 30.0,
///     "rail_width_mm": 65.0,
///     "rail_height_mm": 65.0
///   },
///   "material": "A992",
///   "design_method": "Lrfd",
///   "section": {
///     "type": "Rolled",
///     "label": "W410x46.1",
///     "depth_mm": 403.0,
///     "flange_width_mm": 140.0,
///     "flange_thickness_mm": 11.2,
///     "web_thickness_mm": 7.0,
///     "area_mm2": 5890.0,
///     "ix_mm4": 156.0e6,
///     "iy_mm4": 5.14e6,
///     "sx_mm3": 774.0e3,
///     "sy_mm3": 73.4e3,
///     "zx_mm3": 885.0e3,
///     "zy_mm3": 115.0e3,
///     "j_mm4": 192.0e3,
///     "cw_mm6": 1.99e11,
///     "k_des_mm": 24.0
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayBeamInput {
    /// User label (e.g., "RB-1", "Runway girder line A")
    #[serde(default = "default_label")]
    pub label: String,

    #[serde(default)]
    pub material: SteelGrade,

    #[serde(default)]
    pub design_method: DesignMethod,

    pub crane: CraneInput,

    pub geometry: RunwayGeometry,

    #[serde(default)]
    pub service: ServiceSpec,

    /// Fixed section to check; `None` runs the optimizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionCandidate>,

    #[serde(default)]
    pub optimizer: OptimizerSettings,
}

impl Default for RunwayBeamInput {
    fn default() -> Self {
        Self {
            label: default_label(),
            material: SteelGrade::default(),
            design_method: DesignMethod::default(),
            crane: CraneInput::default(),
            geometry: RunwayGeometry::default(),
            service: ServiceSpec::default(),
            section: None,
            optimizer: OptimizerSettings::default(),
        }
    }
}

impl RunwayBeamInput {
    /// Validate everything before any calculation runs.
    pub fn validate(&self) -> CalcResult<()> {
        self.crane.validate()?;
        self.geometry.validate()?;
        self.geometry.validate_against(&self.crane)?;
        self.service.validate()?;
        match &self.section {
            Some(section) => {
                section.properties(self.material)?;
            }
            None => self.optimizer.validate()?,
        }
        Ok(())
    }
}

/// Run a design (no section given) or a check (section given).
pub fn calculate(input: &RunwayBeamInput) -> CalcResult<DesignReport> {
    input.validate()?;
    let forces = derive_forces(&input.crane, &input.geometry, input.design_method)?;

    info!(
        label = %input.label,
        method = %input.design_method,
        grade = %input.material,
        "runway girder calculation"
    );

    let report = match &input.section {
        Some(section) => check_section(&input.label, section, &forces, input.material, &input.service)?,
        None => optimize(&input.label, &forces, input.material, &input.service, &input.optimizer)?,
    };

    if !report.passes {
        warn!(
            label = %report.label,
            governing = %report.governing_check,
            ratio = report.governing_ratio,
            "runway girder does not satisfy all checks"
        );
    }
    Ok(report)
}

/// Evaluate all checks on a fixed section without resizing it.
pub fn check_section(
    label: &str,
    section: &SectionCandidate,
    forces: &DesignForces,
    grade: SteelGrade,
    service: &ServiceSpec,
) -> CalcResult<DesignReport> {
    let properties = section.properties(grade)?;
    let checks = evaluate_all(&CheckInput::new(forces, &properties, grade, service))?;
    assemble(
        ReportContext {
            label: label.to_string(),
            grade,
            outcome: DesignOutcome::Checked,
            iterations: 0,
        },
        section.clone(),
        properties,
        forces.clone(),
        checks,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::{CheckKind, LimitState};
    use crate::section::{BuiltUpSection, RolledShape};

    /// Light rolled shape, far too small for a 10 t crane
    fn light_shape() -> RolledShape {
        RolledShape {
            label: "W150x13.5".to_string(),
            depth_mm: 150.0,
            flange_width_mm: 100.0,
            flange_thickness_mm: 5.5,
            web_thickness_mm: 4.3,
            area_mm2: 1730.0,
            ix_mm4: 6.83e6,
            iy_mm4: 0.91e6,
            sx_mm3: 91.0e3,
            sy_mm3: 18.2e3,
            zx_mm3: 103.0e3,
            zy_mm3: 28.0e3,
            j_mm4: 17.0e3,
            cw_mm6: 4.74e9,
            k_des_mm: Some(14.5),
        }
    }

    #[test]
    fn test_default_design_converges() {
        let report = calculate(&RunwayBeamInput::default()).unwrap();
        assert_eq!(report.outcome, DesignOutcome::Converged);
        assert!(report.passes());
        assert_eq!(report.checks.len(), 8);
        assert!(report.iterations <= 200);
        assert!(report.governing_unity() <= 1.0 + 1e-6);
        match report.section {
            SectionCandidate::BuiltUp(plates) => {
                assert!(plates.web_height_mm >= 300.0);
                assert!(plates.flange_width_mm >= 150.0);
            }
            SectionCandidate::Rolled(_) => panic!("expected a built-up section"),
        }
        assert!(report.web_flange_weld.is_some());
        assert!(report.reaction.design_n > report.reaction.crane_n);
    }

    #[test]
    fn test_asd_design_converges() {
        let input = RunwayBeamInput {
            design_method: DesignMethod::Asd,
            ..RunwayBeamInput::default()
        };
        let report = calculate(&input).unwrap();
        assert!(report.passes());
        assert_eq!(report.method, DesignMethod::Asd);
    }

    #[test]
    fn test_wheel_base_longer_than_span() {
        let mut input = RunwayBeamInput::default();
        input.crane.wheel_base_m = 5.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("wheel_base"));
    }

    #[test]
    fn test_undersized_rolled_shape_fails_ltb_and_shear() {
        let input = RunwayBeamInput {
            section: Some(SectionCandidate::Rolled(light_shape())),
            ..RunwayBeamInput::default()
        };
        let report = calculate(&input).unwrap();

        assert_eq!(report.outcome, DesignOutcome::Checked);
        assert_eq!(report.iterations, 0);
        assert!(!report.passes());

        let major = report.check(CheckKind::MajorFlexure).unwrap();
        assert!(!major.passes);
        assert!(major.ratio > 1.0);
        assert_eq!(major.limit_state, LimitState::LateralTorsionalBuckling);
        assert!(major.notes.iter().any(|n| n.contains("lateral-torsional buckling")));

        let shear = report.check(CheckKind::Shear).unwrap();
        assert!(!shear.passes);
        assert!(shear.ratio > 1.0);

        assert!(report.failing_checks.contains(&CheckKind::MajorFlexure));
        assert!(report.failing_checks.contains(&CheckKind::Shear));
        assert!(report.web_flange_weld.is_none());
    }

    #[test]
    fn test_fully_braced_girder() {
        let mut input = RunwayBeamInput::default();
        input.geometry.unbraced_length_m = 0.0;
        let report = calculate(&input).unwrap();
        assert!(report.passes());
        let major = report.check(CheckKind::MajorFlexure).unwrap();
        assert_ne!(major.limit_state, LimitState::LateralTorsionalBuckling);
    }

    #[test]
    fn test_bracing_never_hurts_a_fixed_section() {
        let section = SectionCandidate::BuiltUp(BuiltUpSection::new(400.0, 8.0, 200.0, 12.0));
        let mut braced = RunwayBeamInput {
            section: Some(section.clone()),
            ..RunwayBeamInput::default()
        };
        braced.geometry.unbraced_length_m = 1.5;
        let unbraced = RunwayBeamInput {
            section: Some(section),
            ..RunwayBeamInput::default()
        };
        let a = calculate(&braced).unwrap();
        let b = calculate(&unbraced).unwrap();
        let ra = a.check(CheckKind::MajorFlexure).unwrap().ratio;
        let rb = b.check(CheckKind::MajorFlexure).unwrap().ratio;
        assert!(ra <= rb);
    }

    #[test]
    fn test_degenerate_manual_section() {
        let input = RunwayBeamInput {
            section: Some(SectionCandidate::BuiltUp(BuiltUpSection::new(300.0, 0.0, 150.0, 10.0))),
            ..RunwayBeamInput::default()
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SECTION");
    }

    #[test]
    fn test_manual_section_outside_proportion_limits() {
        // h/tw = 300 with no transverse stiffeners
        let input = RunwayBeamInput {
            section: Some(SectionCandidate::BuiltUp(BuiltUpSection::new(1500.0, 5.0, 300.0, 20.0))),
            ..RunwayBeamInput::default()
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_SECTION");
        assert!(err.to_string().contains("h/tw"));
    }

    #[test]
    fn test_input_json_defaults() {
        let json = r#"{
            "crane": {
                "capacity_t": 10.0,
                "bridge_span_m": 11.5,
                "bridge_weight_t": 3.9,
                "trolley_weight_t": 0.72,
                "max_static_wheel_load_kn": 57.6,
                "wheel_base_m": 2.5,
                "wheels_per_rail": 2,
                "vertical_impact_pct": 25.0,
                "horizontal_impact_pct": 20.0,
                "longitudinal_impact_pct": 10.0
            },
            "geometry": {
                "beam_span_m": 4.5,
                "unbraced_length_m": 4.5,
                "rail_weight_kg_per_m": 30.0,
                "rail_width_mm": 65.0,
                "rail_height_mm": 65.0
            }
        }"#;
        let input: RunwayBeamInput = serde_json::from_str(json).unwrap();
        assert_eq!(input, RunwayBeamInput::default());
    }
}
