//! Symptom-based disease suggestions over a static knowledge base.

pub mod config;
pub mod diagnosis;
pub mod error;
pub mod telemetry;
