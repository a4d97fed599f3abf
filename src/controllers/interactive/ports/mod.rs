//! Port definitions for the interactive controller.
//!
//! Contains the trait the controller reports through; the presentation
//! layer implements it.

pub mod presenter_port;
