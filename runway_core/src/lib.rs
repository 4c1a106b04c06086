//! # runway_core - Crane Runway Girder Design Engine
//!
//! `runway_core` sizes and checks simply supported crane runway girders for
//! top-running overhead cranes per AISC 360-16 (LRFD or ASD), CMAA 70 and
//! AISC Design Guide 7. Inputs and reports are plain serde types so the
//! engine can sit behind a CLI, a web form or another program.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: pure functions from input to report
//! - **SI inside**: N, mm and MPa internally; input fields name their units
//! - **Complete reports**: a failing or exhausted design still returns every check
//!
//! ## Quick Start
//!
//! ```rust
//! use runway_core::{calculate, RunwayBeamInput};
//!
//! let report = calculate(&RunwayBeamInput::default()).unwrap();
//! println!("{}", report.summary());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - entry points (`calculate`, `check_section`)
//! - [`loads`] - crane and runway inputs, moving-load envelope, design forces
//! - [`section`] - built-up and rolled sections, properties, classification
//! - [`checks`] - the eight limit-state checks
//! - [`optimizer`] - plate girder sizing search
//! - [`report`] - design report assembly
//! - [`weld`] - web-to-flange fillet weld sizing
//! - [`materials`] - structural steel grades
//! - [`service`] - CMAA service class and fatigue category
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types
//! - [`logging`] - tracing subscriber setup

pub mod calculations;
pub mod checks;
pub mod errors;
pub mod loads;
pub mod logging;
pub mod materials;
pub mod optimizer;
pub mod report;
pub mod section;
pub mod service;
pub mod units;
pub mod weld;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate, check_section, RunwayBeamInput};
pub use errors::{CalcError, CalcResult};
pub use loads::DesignMethod;
pub use report::{DesignOutcome, DesignReport};
