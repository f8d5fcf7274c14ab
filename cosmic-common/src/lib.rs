//! Shared data model for Cosmic Watch: normalized NEO records, risk tiers
//! and health samples.

pub mod types;

pub use types::*;
