//! Click sampling strategies over labeled volumes.
//!
//! Every sampler precomputes its per-object [`CoordinatePools`] at construction and
//! implements [`ClickSampling`]: each `produce` call draws a fresh [`ClickSet`] holding
//! `click` coordinates per object. Use [`ClickStream`] to pull samples as an iterator.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::volume::{Coord, CoordinatePools};

pub mod border_biased;
pub mod click_set;
pub mod constrained_uniform;
pub mod stream;
pub mod uniform;

pub use border_biased::{BorderBiasedConfig, BorderBiasedSampler};
pub use click_set::{ClickRecord, ClickSet};
pub use constrained_uniform::{ConstrainedUniformConfig, ConstrainedUniformSampler};
pub use stream::ClickStream;
pub use uniform::{UniformConfig, UniformSampler};

/// Trait for click sampling.
pub trait ClickSampling: Send + Sync {
    /// Draw the next click set. Fails with [`Error::EmptyObjectPool`] when an object has
    /// nothing to draw from.
    fn produce(&self, rng: &mut dyn RngCore) -> Result<ClickSet>;

    /// Number of objects `N` clicks are drawn for.
    fn object_count(&self) -> usize;

    fn clicks_per_object(&self) -> usize;

    /// The eligible coordinate pools, one per object.
    fn pools(&self) -> &CoordinatePools;

    /// Turn the sampler into an endless iterator of click sets.
    fn stream<R: RngCore>(self, rng: R) -> ClickStream<Self, R>
    where
        Self: Sized,
    {
        ClickStream::new(self, rng)
    }
}

impl<S: ClickSampling + ?Sized> ClickSampling for &S {
    fn produce(&self, rng: &mut dyn RngCore) -> Result<ClickSet> {
        (**self).produce(rng)
    }

    fn object_count(&self) -> usize {
        (**self).object_count()
    }

    fn clicks_per_object(&self) -> usize {
        (**self).clicks_per_object()
    }

    fn pools(&self) -> &CoordinatePools {
        (**self).pools()
    }
}

/// Draw a uniform index in `0..len`. `len` must be non-zero.
#[inline]
pub(crate) fn random_index(rng: &mut dyn RngCore, len: usize) -> usize {
    debug_assert!(len > 0);
    ((u128::from(rng.next_u64()) * len as u128) >> 64) as usize
}

/// Borrow the pool of `object_id`, failing when it cannot be drawn from.
#[inline]
pub(crate) fn non_empty(object_id: u32, pool: &[Coord]) -> Result<&[Coord]> {
    if pool.is_empty() {
        return Err(Error::EmptyObjectPool { object_id });
    }
    Ok(pool)
}

/// Log objects that will fail to produce.
pub(crate) fn warn_empty_pools(sampler: &str, pools: &CoordinatePools, click: usize) {
    if click == 0 {
        return;
    }
    let empty = pools.empty_objects();
    if !empty.is_empty() {
        tracing::warn!(
            sampler,
            objects = ?empty,
            "objects without eligible coordinates; produce will fail"
        );
    }
}
