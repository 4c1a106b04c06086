//! Fatigue of the girder under repeated crane passes (AISC 360-16 Appendix 3).
//!
//! The stress range is the unfactored crane moment, including vertical
//! impact, over the elastic section modulus. The allowable range comes from
//! the detail category and the design number of cycles. On light runway
//! girders this is often the governing check.

use super::{CheckInput, CheckKind, CheckResult, LimitState};
use crate::errors::CalcResult;

pub fn check(input: &CheckInput<'_>) -> CalcResult<CheckResult> {
    let service = input.service;
    let cycles = service.design_cycles();
    let allowable = service.fatigue_category.allowable_stress_range_mpa(cycles)?;
    let stress_range = input.forces.crane_moment_nmm / input.section.sx_mm3;

    Ok(CheckResult::new(CheckKind::Fatigue, stress_range, allowable, "MPa", LimitState::StressRange)?
        .with_note(format!(
            "{}, N = {:.3e} cycles, threshold {:.0} MPa",
            service.fatigue_category,
            cycles,
            service.fatigue_category.threshold_mpa()
        )))
}
