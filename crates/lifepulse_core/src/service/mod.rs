//! Application-state services.
//!
//! # Responsibility
//! - Orchestrate repository and alert-scheduler calls into the home,
//!   settings and onboarding use-cases.
//! - Keep hosting UI layers decoupled from storage and alert details.
//!
//! # Invariants
//! - Every mutation runs mutate -> persist -> notify synchronously and
//!   never rolls back the in-memory change on side-effect failure.

pub mod home_service;
pub mod onboarding_service;
pub mod settings_service;
pub mod stats;
