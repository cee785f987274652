#![deny(unsafe_code)]
//! click_sim: synthetic annotator clicks for interactive segmentation on labeled volumes.
//!
//! Modules:
//! - volume: labeled volumes, coordinates, per-object coordinate pools, background bands
//! - distance: pluggable distance transforms (exact separable EDT built in)
//! - sampling: uniform, margin/step-constrained uniform, and border-biased click samplers
//! - overlay: compose labels and click maps into a three-channel array
//!
//! For examples and docs, see README and the `click_sim_examples` crate.
pub mod distance;
pub mod error;
pub mod overlay;
pub mod sampling;
pub mod volume;

/// Convenient re-exports for common types. Import with `use click_sim::prelude::*;`.
pub mod prelude {
    pub use crate::distance::{DistanceTransform, ExactEuclidean};
    pub use crate::error::{Error, Result};
    pub use crate::overlay::compose_overlay;
    pub use crate::sampling::{
        BorderBiasedConfig, BorderBiasedSampler, ClickRecord, ClickSampling, ClickSet,
        ClickStream, ConstrainedUniformConfig, ConstrainedUniformSampler, UniformConfig,
        UniformSampler,
    };
    pub use crate::volume::{
        background_band, ClickMap, Coord, CoordinatePools, DistanceField, EligibilityMask,
        LabeledVolume,
    };
}
