//! Formicary: a headless scent-trail foraging simulation.
//!
//! `model` re-exports the simulation crates under one roof; `app` holds the
//! headless runner used by the `formicary` binary.

pub mod app;
pub mod model;

pub use model::{AppConfig, Colony, World};
