//! Volume model shared by the distance transform and the samplers.
//!
//! All arrays are dynamic-rank [`ndarray`] arrays restricted to rank 2 or 3:
//! - [`LabeledVolume`]: object ids, `0` is background and `1..=N` are objects.
//! - [`EligibilityMask`]: where a coordinate may be sampled.
//! - [`DistanceField`]: per-cell distance to the nearest object boundary.
//! - [`ClickMap`]: `1` at every sampled coordinate.
use ndarray::{Array, ArrayD, Dimension};

use crate::error::{ensure_supported_rank, Result};

pub mod band;
pub mod coord;
pub mod pool;

pub use band::background_band;
pub use coord::Coord;
pub use pool::CoordinatePools;

pub type EligibilityMask = ArrayD<bool>;
pub type DistanceField = ArrayD<f32>;
pub type ClickMap = ArrayD<u8>;

/// An integer label volume of rank 2 or 3.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledVolume {
    data: ArrayD<u32>,
    object_count: u32,
}

impl LabeledVolume {
    /// Wrap a label array. The object count is the maximum label present.
    pub fn new<D: Dimension>(data: Array<u32, D>) -> Result<Self> {
        let data = data.into_dyn();
        ensure_supported_rank(data.shape())?;
        let object_count = data.iter().copied().max().unwrap_or(0);
        Ok(Self { data, object_count })
    }

    /// Treat every `true` cell of `mask` as part of a single object with id `1`.
    pub fn from_mask(mask: &EligibilityMask) -> Result<Self> {
        Self::new(mask.mapv(u32::from))
    }

    /// Number of objects `N`; ids run from `1` to `N`.
    pub fn object_count(&self) -> u32 {
        self.object_count
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    pub fn as_array(&self) -> &ArrayD<u32> {
        &self.data
    }

    /// Label at `coord`, or `None` when it lies outside the volume.
    pub fn get(&self, coord: &Coord) -> Option<u32> {
        self.data.get(coord.as_slice()).copied()
    }

    /// Mask of every labeled (non-background) cell.
    pub fn foreground(&self) -> EligibilityMask {
        self.data.mapv(|v| v > 0)
    }
}
