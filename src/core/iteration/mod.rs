//! Real root-finding: one method per scheme, stepped by an engine that owns
//! the run state.

pub mod config;
pub mod engine;
pub mod methods;
pub mod outcome;
pub mod request;
pub mod sign_scan;
pub mod stability_guard;
