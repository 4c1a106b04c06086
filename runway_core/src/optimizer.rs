//! # Section Optimizer
//!
//! Deterministic local search over the four plate dimensions of a welded
//! I-section. Starting from an initial (possibly undersized) section, each
//! iteration evaluates all checks on an immutable snapshot, picks the
//! governing failing check, and grows the first dimension on that check's
//! preference list that still fits inside its bound.
//!
//! The search ends when
//! - every check passes ([`DesignOutcome::Converged`]),
//! - the iteration cap is hit, or
//! - no preferred dimension can grow ([`DesignOutcome::UnboundedSearch`],
//!   reporting the best candidate seen).
//!
//! ## Example
//!
//! ```rust
//! use runway_core::loads::{derive_forces, CraneInput, RunwayGeometry, DesignMethod};
//! use runway_core::materials::SteelGrade;
//! use runway_core::optimizer::{optimize, OptimizerSettings};
//! use runway_core::service::ServiceSpec;
//!
//! let forces = derive_forces(&CraneInput::default(), &RunwayGeometry::default(), DesignMethod::Lrfd).unwrap();
//! let report = optimize("RB-1", &forces, SteelGrade::A992, &ServiceSpec::default(), &OptimizerSettings::default()).unwrap();
//!
//! assert!(report.passes);
//! assert!(report.iterations <= 200);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::checks::{evaluate_all, governing, CheckInput, CheckKind, CheckResult, LimitState};
use crate::errors::{CalcError, CalcResult};
use crate::loads::DesignForces;
use crate::materials::SteelGrade;
use crate::report::{assemble, DesignOutcome, DesignReport, ReportContext};
use crate::section::{BuiltUpSection, SectionCandidate, SectionProperties};
use crate::service::ServiceSpec;

// ============================================================================
// Settings
// ============================================================================

/// One resizable plate dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dimension {
    WebHeight,
    WebThickness,
    FlangeWidth,
    FlangeThickness,
}

impl Dimension {
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::WebHeight => "web height",
            Dimension::WebThickness => "web thickness",
            Dimension::FlangeWidth => "flange width",
            Dimension::FlangeThickness => "flange thickness",
        }
    }

    fn get(&self, plates: &BuiltUpSection) -> f64 {
        match self {
            Dimension::WebHeight => plates.web_height_mm,
            Dimension::WebThickness => plates.web_thickness_mm,
            Dimension::FlangeWidth => plates.flange_width_mm,
            Dimension::FlangeThickness => plates.flange_thickness_mm,
        }
    }

    fn grown(&self, plates: &BuiltUpSection, step: f64) -> BuiltUpSection {
        let mut next = *plates;
        match self {
            Dimension::WebHeight => next.web_height_mm += step,
            Dimension::WebThickness => next.web_thickness_mm += step,
            Dimension::FlangeWidth => next.flange_width_mm += step,
            Dimension::FlangeThickness => next.flange_thickness_mm += step,
        }
        next
    }
}

/// Inclusive range for one dimension (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionBounds {
    pub min_mm: f64,
    pub max_mm: f64,
}

impl DimensionBounds {
    pub const fn new(min_mm: f64, max_mm: f64) -> Self {
        Self { min_mm, max_mm }
    }
}

/// Search box for the four plate dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub web_height: DimensionBounds,
    pub web_thickness: DimensionBounds,
    pub flange_width: DimensionBounds,
    pub flange_thickness: DimensionBounds,
}

impl Default for SectionBounds {
    fn default() -> Self {
        Self {
            web_height: DimensionBounds::new(150.0, 1500.0),
            web_thickness: DimensionBounds::new(5.0, 40.0),
            flange_width: DimensionBounds::new(100.0, 600.0),
            flange_thickness: DimensionBounds::new(6.0, 60.0),
        }
    }
}

impl SectionBounds {
    pub fn for_dimension(&self, dimension: Dimension) -> DimensionBounds {
        match dimension {
            Dimension::WebHeight => self.web_height,
            Dimension::WebThickness => self.web_thickness,
            Dimension::FlangeWidth => self.flange_width,
            Dimension::FlangeThickness => self.flange_thickness,
        }
    }
}

/// Increment applied to a dimension per growth step (mm)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSizes {
    pub web_height_mm: f64,
    pub web_thickness_mm: f64,
    pub flange_width_mm: f64,
    pub flange_thickness_mm: f64,
}

impl Default for StepSizes {
    fn default() -> Self {
        Self {
            web_height_mm: 25.0,
            web_thickness_mm: 1.0,
            flange_width_mm: 10.0,
            flange_thickness_mm: 2.0,
        }
    }
}

impl StepSizes {
    pub fn for_dimension(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::WebHeight => self.web_height_mm,
            Dimension::WebThickness => self.web_thickness_mm,
            Dimension::FlangeWidth => self.flange_width_mm,
            Dimension::FlangeThickness => self.flange_thickness_mm,
        }
    }
}

fn default_max_iterations() -> usize {
    200
}

/// Optimizer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Starting section
    pub initial: BuiltUpSection,
    #[serde(default)]
    pub bounds: SectionBounds,
    #[serde(default)]
    pub steps: StepSizes,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            initial: BuiltUpSection::new(300.0, 6.0, 150.0, 10.0),
            bounds: SectionBounds::default(),
            steps: StepSizes::default(),
        }
    }
}

const ALL_DIMENSIONS: [Dimension; 4] = [
    Dimension::WebHeight,
    Dimension::WebThickness,
    Dimension::FlangeWidth,
    Dimension::FlangeThickness,
];

impl OptimizerSettings {
    pub fn validate(&self) -> CalcResult<()> {
        for dimension in ALL_DIMENSIONS {
            let bounds = self.bounds.for_dimension(dimension);
            let step = self.steps.for_dimension(dimension);
            let start = dimension.get(&self.initial);
            let name = dimension.display_name();

            if !bounds.min_mm.is_finite() || !bounds.max_mm.is_finite() || bounds.min_mm <= 0.0 || bounds.min_mm > bounds.max_mm {
                return Err(CalcError::invalid_input(
                    format!("optimizer.bounds.{}", name),
                    format!("{}..{}", bounds.min_mm, bounds.max_mm),
                    "Bounds must be positive with min <= max",
                ));
            }
            if !step.is_finite() || step <= 0.0 {
                return Err(CalcError::invalid_input(
                    format!("optimizer.steps.{}", name),
                    step.to_string(),
                    "Step must be positive",
                ));
            }
            if !(start >= bounds.min_mm && start <= bounds.max_mm) {
                return Err(CalcError::invalid_input(
                    format!("optimizer.initial.{}", name),
                    start.to_string(),
                    format!("Initial value must lie within {}..{} mm", bounds.min_mm, bounds.max_mm),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Search
// ============================================================================

/// Dimensions to grow, in order, for a governing failing check.
pub fn growth_order(governing: &CheckResult, checks: &[CheckResult]) -> &'static [Dimension] {
    use Dimension::*;

    fn flexure_order(limit_state: LimitState) -> &'static [Dimension] {
        match limit_state {
            LimitState::FlangeLocalBuckling => &[FlangeThickness, FlangeWidth, WebHeight],
            LimitState::LateralTorsionalBuckling => &[FlangeWidth, FlangeThickness, WebHeight],
            _ => &[WebHeight, FlangeThickness, FlangeWidth],
        }
    }

    match governing.kind {
        CheckKind::MajorFlexure => flexure_order(governing.limit_state),
        CheckKind::MinorFlexure => &[FlangeWidth, FlangeThickness],
        CheckKind::CombinedForces => {
            let major = checks.iter().find(|c| c.kind == CheckKind::MajorFlexure);
            let minor = checks.iter().find(|c| c.kind == CheckKind::MinorFlexure);
            match (major, minor) {
                (Some(major), Some(minor)) if major.ratio >= minor.ratio => flexure_order(major.limit_state),
                _ => &[FlangeWidth, FlangeThickness],
            }
        }
        CheckKind::Shear | CheckKind::WebLocalYielding | CheckKind::WebCrippling => &[WebThickness],
        CheckKind::Deflection | CheckKind::Fatigue => &[WebHeight, FlangeThickness, FlangeWidth],
    }
}

/// One evaluated snapshot
struct Snapshot {
    plates: BuiltUpSection,
    properties: SectionProperties,
    checks: Vec<CheckResult>,
    worst: f64,
}

fn evaluate(
    plates: BuiltUpSection,
    properties: SectionProperties,
    forces: &DesignForces,
    grade: SteelGrade,
    service: &ServiceSpec,
) -> CalcResult<Snapshot> {
    let checks = evaluate_all(&CheckInput::new(forces, &properties, grade, service))?;
    let worst = governing(&checks).map(|g| g.ratio).unwrap_or(f64::INFINITY);
    Ok(Snapshot { plates, properties, checks, worst })
}

/// First dimension on `order` whose grown section stays inside its bound and
/// is a usable section. Degenerate candidates are skipped.
fn grow(
    current: &Snapshot,
    order: &[Dimension],
    settings: &OptimizerSettings,
    forces: &DesignForces,
    grade: SteelGrade,
    service: &ServiceSpec,
) -> CalcResult<Option<(Dimension, Snapshot)>> {
    for &dimension in order {
        let bounds = settings.bounds.for_dimension(dimension);
        let step = settings.steps.for_dimension(dimension);
        let candidate = dimension.grown(&current.plates, step);
        if dimension.get(&candidate) > bounds.max_mm + 1e-9 {
            continue;
        }
        let attempt = SectionCandidate::BuiltUp(candidate)
            .properties(grade)
            .and_then(|properties| evaluate(candidate, properties, forces, grade, service));
        match attempt {
            Ok(snapshot) => return Ok(Some((dimension, snapshot))),
            Err(err) if err.is_recoverable() => {
                debug!(error = %err, section = %candidate, "discarding degenerate candidate");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(None)
}

/// Size a built-up runway girder for the given forces.
///
/// Returns a complete report either way; only invalid settings, a degenerate
/// initial section, or an undefined code formula produce an error.
pub fn optimize(
    label: &str,
    forces: &DesignForces,
    grade: SteelGrade,
    service: &ServiceSpec,
    settings: &OptimizerSettings,
) -> CalcResult<DesignReport> {
    settings.validate()?;

    let initial_props = SectionCandidate::BuiltUp(settings.initial).properties(grade)?;
    let mut current = evaluate(settings.initial, initial_props, forces, grade, service)?;
    let mut best: Option<Snapshot> = None;
    let mut iterations = 0usize;

    let outcome = loop {
        let failing = current.checks.iter().any(|c| !c.passes);
        if !failing {
            info!(iterations, section = %current.plates, "runway girder converged");
            break DesignOutcome::Converged;
        }
        if iterations >= settings.max_iterations {
            break DesignOutcome::UnboundedSearch {
                reason: format!("iteration limit of {} reached", settings.max_iterations),
            };
        }

        let driver = match governing(&current.checks) {
            Some(g) => g.clone(),
            None => return Err(CalcError::internal("no check results for current candidate")),
        };
        let order = growth_order(&driver, &current.checks);

        match grow(&current, order, settings, forces, grade, service)? {
            Some((dimension, snapshot)) => {
                iterations += 1;
                debug!(
                    iteration = iterations,
                    governing = %driver.kind,
                    ratio = driver.ratio,
                    grow = dimension.display_name(),
                    section = %snapshot.plates,
                    "optimizer step"
                );
                let previous = std::mem::replace(&mut current, snapshot);
                if best.as_ref().map_or(true, |b| previous.worst < b.worst) {
                    best = Some(previous);
                }
            }
            None => {
                break DesignOutcome::UnboundedSearch {
                    reason: format!(
                        "{} governs (ratio {:.3}) and no preferred dimension can grow within bounds",
                        driver.kind, driver.ratio
                    ),
                };
            }
        }
    };

    // Report the passing snapshot, or the best one seen on failure
    let reported = match (&outcome, best) {
        (DesignOutcome::Converged, _) => current,
        (_, Some(candidate)) if candidate.worst < current.worst => candidate,
        _ => current,
    };

    if let DesignOutcome::UnboundedSearch { reason } = &outcome {
        info!(iterations, worst = reported.worst, reason = %reason, "optimizer stopped without a passing section");
    }

    assemble(
        ReportContext {
            label: label.to_string(),
            grade,
            outcome,
            iterations,
        },
        SectionCandidate::BuiltUp(reported.plates),
        reported.properties,
        forces.clone(),
        reported.checks,
    )
}
