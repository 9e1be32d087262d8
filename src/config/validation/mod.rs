//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `profile_validators`: Profile source validators
//! - `logging_validators`: Logging validators
//! - `gate_validators`: Gate policy validators
//! - `tests`: Test suite for all validators

mod gate_validators;
mod logging_validators;
mod profile_validators;
mod trait_def;

pub use trait_def::Validate;
