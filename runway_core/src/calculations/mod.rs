//! # Calculations
//!
//! Top-level entry points. Each calculation follows the pattern:
//!
//! - `*Input` - input parameters (JSON/TOML-serializable)
//! - `calculate(input) -> CalcResult<DesignReport>` - pure calculation
//!
//! ## Available Calculations
//!
//! - [`runway_beam`] - crane runway girder design and check

pub mod runway_beam;

pub use runway_beam::{calculate, check_section, RunwayBeamInput};
