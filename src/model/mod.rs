pub use formicary_core::{Colony, Located, SpatialGrid, World};
pub use formicary_data::{Marker, MarkerKind, Phase, Vec2};

pub mod ant {
    pub use formicary_core::ant::*;
}
pub mod colony {
    pub use formicary_core::colony::*;
}
pub mod config {
    pub use formicary_core::config::*;
}
pub mod food {
    pub use formicary_core::food::*;
}
pub mod metrics {
    pub use formicary_core::metrics::*;
}
pub mod snapshot {
    pub use formicary_core::snapshot::*;
}
pub mod spatial_grid {
    pub use formicary_core::spatial_grid::*;
}
pub mod world {
    pub use formicary_core::world::*;
}

pub use config::AppConfig;
