//! Mortgage underwriting engine.
//!
//! The crate scores an application with a fixed rule table, maps the score onto a
//! decision, and optionally attaches a risk model's probability and feature attributions
//! to the explanation. The model is an injected collaborator; the decision itself is
//! always derived from the rules.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
