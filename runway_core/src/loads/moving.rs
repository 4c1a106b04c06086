//! Moving wheel-train analysis on a simple span.
//!
//! A crane end truck is modelled as equal wheel loads at fixed offsets from
//! the lead wheel (evenly spaced unless the data sheet says otherwise)
//! rolling across a simply supported beam. Results are influence
//! coefficients for a unit wheel load, so the caller scales them by the
//! vertical or lateral wheel load.
//!
//! The governing position is found from the union of
//! - closed-form positions: for every critical wheel and every contiguous
//!   group of wheels containing it, the span midpoint bisects the critical
//!   wheel and the group resultant,
//! - each wheel placed exactly on either support,
//! - a uniform sweep of the train from fully left of the span to fully right.
//!
//! Wheels off the span carry nothing. Mid-span is never assumed.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Uniform sweep resolution between the closed-form candidates
const SWEEP_STEPS: usize = 200;

/// Deflection is sampled at span/DEFLECTION_STATIONS intervals
const DEFLECTION_STATIONS: usize = 50;

/// Tolerance (mm) for "on the span" at the supports
const SUPPORT_TOL_MM: f64 = 1e-6;

/// Equal wheel loads at fixed offsets from the lead wheel
#[derive(Debug, Clone, PartialEq)]
pub struct WheelTrain {
    /// Ascending, first entry 0 (mm)
    offsets_mm: Vec<f64>,
}

/// Governing bending position for a unit wheel load
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentInfluence {
    /// Maximum moment per unit wheel load (N·mm per N, i.e. mm)
    pub coefficient_mm: f64,
    /// Position of the first wheel when the maximum occurs (mm from left support)
    pub lead_wheel_mm: f64,
    /// Wheel under which the maximum moment occurs (mm from left support)
    pub station_mm: f64,
}

impl WheelTrain {
    /// `wheel_count` wheels at a constant spacing
    pub fn new(wheel_count: usize, spacing_mm: f64) -> Self {
        Self {
            offsets_mm: (0..wheel_count).map(|i| i as f64 * spacing_mm).collect(),
        }
    }

    /// Wheels at arbitrary offsets from the lead wheel (mm).
    ///
    /// The first offset must be 0 and the rest strictly increasing.
    pub fn from_offsets(offsets_mm: Vec<f64>) -> CalcResult<Self> {
        let reject = |reason: &str| {
            Err(CalcError::invalid_input("crane.wheel_offsets_m", format!("{:?}", offsets_mm), reason))
        };
        match offsets_mm.first() {
            None => return reject("At least one wheel is required"),
            Some(&first) if first != 0.0 => return reject("The lead wheel offset must be 0"),
            Some(_) => {}
        }
        if offsets_mm.iter().any(|x| !x.is_finite()) {
            return reject("Offsets must be finite");
        }
        if offsets_mm.windows(2).any(|w| w[1] <= w[0]) {
            return reject("Offsets must be strictly increasing");
        }
        Ok(Self { offsets_mm })
    }

    pub fn wheel_count(&self) -> usize {
        self.offsets_mm.len()
    }

    fn offsets(&self) -> &[f64] {
        &self.offsets_mm
    }

    /// Distance from first to last wheel
    pub fn length_mm(&self) -> f64 {
        self.offsets_mm.last().copied().unwrap_or(0.0)
    }

    /// Candidate lead-wheel positions, sorted and de-duplicated.
    pub fn candidate_positions(&self, span_mm: f64) -> Vec<f64> {
        let offsets = self.offsets();
        let length = self.length_mm();
        let mut positions = Vec::with_capacity(SWEEP_STEPS + 1 + self.wheel_count().pow(3));

        for k in 0..=SWEEP_STEPS {
            positions.push(-length + (span_mm + length) * k as f64 / SWEEP_STEPS as f64);
        }

        for (i, &critical) in offsets.iter().enumerate() {
            for first in 0..=i {
                for last in i..offsets.len() {
                    let group = &offsets[first..=last];
                    let resultant = group.iter().sum::<f64>() / group.len() as f64;
                    positions.push(span_mm / 2.0 - (critical + resultant) / 2.0);
                }
            }
            positions.push(-critical);
            positions.push(span_mm - critical);
        }

        positions.sort_by(f64::total_cmp);
        positions.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
        positions
    }

    /// Wheel positions on the span for a given lead-wheel position
    fn wheels_on_span(&self, lead_mm: f64, span_mm: f64) -> Vec<f64> {
        self.offsets()
            .iter()
            .map(|&offset| lead_mm + offset)
            .filter(|&x| x >= -SUPPORT_TOL_MM && x <= span_mm + SUPPORT_TOL_MM)
            .map(|x| x.clamp(0.0, span_mm))
            .collect()
    }

    /// Maximum bending moment per unit wheel load over all candidate positions.
    pub fn max_moment(&self, span_mm: f64) -> MomentInfluence {
        let mut best = MomentInfluence {
            coefficient_mm: 0.0,
            lead_wheel_mm: 0.0,
            station_mm: span_mm / 2.0,
        };

        for lead in self.candidate_positions(span_mm) {
            let wheels = self.wheels_on_span(lead, span_mm);
            let left_reaction: f64 = wheels.iter().map(|&x| (span_mm - x) / span_mm).sum();

            for &station in &wheels {
                let moment = left_reaction * station
                    - wheels
                        .iter()
                        .filter(|&&x| x < station)
                        .map(|&x| station - x)
                        .sum::<f64>();
                if moment > best.coefficient_mm {
                    best = MomentInfluence {
                        coefficient_mm: moment,
                        lead_wheel_mm: lead,
                        station_mm: station,
                    };
                }
            }
        }
        best
    }

    /// Maximum end reaction (= end shear) per unit wheel load.
    ///
    /// Occurs with a wheel directly over a support; every wheel is tried
    /// over both supports since an uneven train is not symmetric.
    pub fn max_end_shear(&self, span_mm: f64) -> f64 {
        self.offsets()
            .iter()
            .map(|&offset| {
                let left: f64 = self
                    .wheels_on_span(-offset, span_mm)
                    .iter()
                    .map(|&x| (span_mm - x) / span_mm)
                    .sum();
                let right: f64 = self
                    .wheels_on_span(span_mm - offset, span_mm)
                    .iter()
                    .map(|&x| x / span_mm)
                    .sum();
                left.max(right)
            })
            .fold(0.0, f64::max)
    }

    /// Maximum midspan-region deflection for a unit wheel load and unit EI
    /// (mm³). Divide by E·I and multiply by the wheel load to get mm.
    pub fn max_deflection_coefficient(&self, span_mm: f64) -> f64 {
        let mut best = 0.0_f64;
        for lead in self.candidate_positions(span_mm) {
            let wheels = self.wheels_on_span(lead, span_mm);
            if wheels.is_empty() {
                continue;
            }
            for k in 1..DEFLECTION_STATIONS {
                let x = span_mm * k as f64 / DEFLECTION_STATIONS as f64;
                let total: f64 = wheels.iter().map(|&a| point_load_deflection(span_mm, a, x)).sum();
                best = best.max(total);
            }
        }
        best
    }
}

/// Deflection at `x` of a simple span under a unit point load at `a` (EI = 1).
fn point_load_deflection(span: f64, a: f64, x: f64) -> f64 {
    let b = span - a;
    if x <= a {
        b * x * (span * span - b * b - x * x) / (6.0 * span)
    } else {
        let xr = span - x;
        a * xr * (span * span - a * a - xr * xr) / (6.0 * span)
    }
}
