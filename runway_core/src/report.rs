//! # Design Report
//!
//! Aggregates the eight check verdicts, the final section and the derived
//! forces into one serializable structure for the front end.
//!
//! ## Example
//!
//! ```rust
//! use runway_core::calculations::runway_beam::{calculate, RunwayBeamInput};
//! use runway_core::report::DesignOutcome;
//!
//! let report = calculate(&RunwayBeamInput::default()).unwrap();
//!
//! assert_eq!(report.outcome, DesignOutcome::Converged);
//! assert!(report.passes);
//! println!("{}", report.summary());
//! ```

use serde::{Deserialize, Serialize};

use crate::checks::{governing, CheckKind, CheckResult};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{DesignForces, DesignMethod, SupportReaction};
use crate::materials::SteelGrade;
use crate::section::{SectionCandidate, SectionProperties};
use crate::weld::{design_web_flange_weld, WeldDesign};

/// How the run ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum DesignOutcome {
    /// The optimizer reached a section that passes every check
    Converged,
    /// A fixed section was checked; see `passes` for the verdict
    Checked,
    /// The optimizer stopped without a passing section
    UnboundedSearch { reason: String },
}

impl DesignOutcome {
    pub fn display_name(&self) -> String {
        match self {
            DesignOutcome::Converged => "Converged".to_string(),
            DesignOutcome::Checked => "Checked".to_string(),
            DesignOutcome::UnboundedSearch { reason } => format!("Search exhausted: {}", reason),
        }
    }
}

/// Complete result of one design or check run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignReport {
    pub label: String,
    pub outcome: DesignOutcome,
    /// True when every check passes
    pub passes: bool,
    pub method: DesignMethod,
    pub grade: SteelGrade,
    pub section: SectionCandidate,
    pub properties: SectionProperties,
    /// All eight checks in fixed order
    pub checks: Vec<CheckResult>,
    pub governing_check: CheckKind,
    pub governing_ratio: f64,
    pub failing_checks: Vec<CheckKind>,
    /// Optimizer steps taken (0 for a check-only run)
    pub iterations: usize,
    pub forces: DesignForces,
    /// Maximum reaction on one runway support
    pub reaction: SupportReaction,
    /// Web-to-flange welds; welded sections only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_flange_weld: Option<WeldDesign>,
}

/// Parts of a report that are not derived from the checks
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub label: String,
    pub grade: SteelGrade,
    pub outcome: DesignOutcome,
    pub iterations: usize,
}

/// Bundle a section's check results into a report.
pub fn assemble(
    context: ReportContext,
    section: SectionCandidate,
    properties: SectionProperties,
    forces: DesignForces,
    checks: Vec<CheckResult>,
) -> CalcResult<DesignReport> {
    let kinds: Vec<CheckKind> = checks.iter().map(|c| c.kind).collect();
    if kinds != CheckKind::ALL {
        return Err(CalcError::internal(format!(
            "expected the eight checks in order, got {:?}",
            kinds
        )));
    }

    let (governing_check, governing_ratio) = governing(&checks)
        .map(|g| (g.kind, g.ratio))
        .ok_or_else(|| CalcError::internal("no check results to assemble"))?;

    let failing_checks: Vec<CheckKind> = checks.iter().filter(|c| !c.passes).map(|c| c.kind).collect();

    let density = context.grade.properties().density_kg_m3;
    let reaction = forces.support_reaction(properties.area_mm2, density);
    let web_flange_weld = if properties.built_up {
        Some(design_web_flange_weld(&properties, &forces, context.grade)?)
    } else {
        None
    };

    Ok(DesignReport {
        label: context.label,
        outcome: context.outcome,
        passes: failing_checks.is_empty(),
        method: forces.method,
        grade: context.grade,
        section,
        properties,
        checks,
        governing_check,
        governing_ratio,
        failing_checks,
        iterations: context.iterations,
        forces,
        reaction,
        web_flange_weld,
    })
}

impl DesignReport {
    /// Overall verdict
    pub fn passes(&self) -> bool {
        self.passes
    }

    /// Highest utilization across all checks
    pub fn governing_unity(&self) -> f64 {
        self.governing_ratio
    }

    /// Name of the governing check
    pub fn governing_condition(&self) -> &'static str {
        self.governing_check.display_name()
    }

    /// Result for one check
    pub fn check(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.kind == kind)
    }

    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Short plain-text summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("{} - {} ({})", self.label, self.section.label(), self.grade),
            format!(
                "{}: {} after {} iteration(s), {}",
                self.method,
                if self.passes { "PASS" } else { "FAIL" },
                self.iterations,
                self.outcome.display_name()
            ),
        ];
        for check in &self.checks {
            lines.push(format!(
                "  {:<20} {:>10.2} / {:>10.2} {:<5} ratio {:.3} {}",
                check.kind.display_name(),
                check.demand,
                check.capacity,
                check.units,
                check.ratio,
                check.status()
            ));
        }
        lines.push(format!(
            "Support reaction: {:.1} kN design, {:.1} kN crane with impact, {:.1} kN dead",
            self.reaction.design_n / 1000.0,
            self.reaction.crane_n / 1000.0,
            self.reaction.dead_n / 1000.0
        ));
        if let Some(weld) = &self.web_flange_weld {
            lines.push(format!(
                "Web-to-flange weld: 2 x {:.0} mm fillet (required {:.1} mm, min {:.0} mm), ratio {:.3}",
                weld.size_mm, weld.required_size_mm, weld.minimum_size_mm, weld.ratio
            ));
        }
        lines.push(format!(
            "Governing: {} (ratio {:.3})",
            self.governing_condition(),
            self.governing_ratio
        ));
        lines.join("\n")
    }
}
