//! Scoring and comparison engine for RFX vendor assessments.
//!
//! The library consumes an already-structured scorecard and already-extracted
//! evidence records and produces deterministic vendor scores, cross-vendor
//! rankings, and confidence annotations. Document parsing and LLM-driven
//! extraction live in upstream collaborators and never enter this crate.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
