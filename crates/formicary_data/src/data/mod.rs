//! Core data structures for the formicary simulation.

pub mod geometry;
pub mod scent;
