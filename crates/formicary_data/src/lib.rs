//! Plain data types shared by the formicary simulation and its drivers.
//!
//! Nothing here knows about grids or agents; these are the values that flow
//! between them and out to renderers.

pub mod data;

pub use data::geometry::Vec2;
pub use data::scent::{Marker, MarkerKind, Phase};
