//! Uniform click sampling with a border margin and a minimum spacing between clicks.
//!
//! Eligibility is `distance > d_margin` on a distance field of the foreground. Within one
//! `produce` call each object draws from a working copy of its eligible pool; after every
//! pick, candidates within `d_step` of it are dropped. An exhausted working pool is refilled
//! from the full eligible pool, so `click` picks are always returned, but picks after a
//! refill may sit closer than `d_step` to earlier ones or repeat them.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::distance::{DistanceTransform, ExactEuclidean};
use crate::error::{ensure_same_shape, Error, Result};
use crate::sampling::{non_empty, random_index, warn_empty_pools, ClickSampling, ClickSet};
use crate::volume::{Coord, CoordinatePools, DistanceField, LabeledVolume};

/// Configuration for [`ConstrainedUniformSampler`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstrainedUniformConfig {
    /// Clicks drawn per object.
    pub click: usize,
    /// Minimum spacing between picks of one call. `None` disables declustering.
    pub d_step: Option<f32>,
    /// Cells at distance `<= d_margin` from the border are never eligible. `None` admits all
    /// foreground.
    pub d_margin: Option<f32>,
}

impl Default for ConstrainedUniformConfig {
    fn default() -> Self {
        Self {
            click: 5,
            d_step: Some(10.0),
            d_margin: Some(10.0),
        }
    }
}

impl ConstrainedUniformConfig {
    pub fn new(click: usize) -> Self {
        Self {
            click,
            ..Default::default()
        }
    }

    /// Sets the clicks per object.
    pub fn with_click(mut self, click: usize) -> Self {
        self.click = click;
        self
    }

    /// Sets the minimum spacing between picks.
    pub fn with_d_step(mut self, d_step: Option<f32>) -> Self {
        self.d_step = d_step;
        self
    }

    /// Sets the border margin.
    pub fn with_d_margin(mut self, d_margin: Option<f32>) -> Self {
        self.d_margin = d_margin;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if let Some(step) = self.d_step {
            if !step.is_finite() || step < 0.0 {
                return Err(Error::InvalidParameter(
                    "d_step must be finite and >= 0".into(),
                ));
            }
        }
        if self.d_margin.is_some_and(f32::is_nan) {
            return Err(Error::InvalidParameter("d_margin must not be NaN".into()));
        }
        Ok(())
    }
}

/// Margin- and spacing-constrained uniform sampler.
#[derive(Debug, Clone)]
pub struct ConstrainedUniformSampler {
    shape: Vec<usize>,
    pools: CoordinatePools,
    config: ConstrainedUniformConfig,
}

impl ConstrainedUniformSampler {
    /// Build the sampler, computing the foreground distance field with [`ExactEuclidean`]
    /// when a margin is configured.
    pub fn new(labels: &LabeledVolume, config: ConstrainedUniformConfig) -> Result<Self> {
        Self::with_transform(labels, &ExactEuclidean::new(), config)
    }

    /// Build the sampler, computing the foreground distance field with `transform` when a
    /// margin is configured.
    pub fn with_transform(
        labels: &LabeledVolume,
        transform: &dyn DistanceTransform,
        config: ConstrainedUniformConfig,
    ) -> Result<Self> {
        config.validate()?;
        let field = match config.d_margin {
            Some(_) => Some(transform.transform(&labels.foreground())?),
            None => None,
        };
        Self::build(labels, field.as_ref(), config)
    }

    /// Build the sampler from a precomputed distance field. The field is only read here.
    pub fn with_distance_field(
        labels: &LabeledVolume,
        field: &DistanceField,
        config: ConstrainedUniformConfig,
    ) -> Result<Self> {
        config.validate()?;
        ensure_same_shape(labels.shape(), field.shape())?;
        Self::build(labels, Some(field), config)
    }

    fn build(
        labels: &LabeledVolume,
        field: Option<&DistanceField>,
        config: ConstrainedUniformConfig,
    ) -> Result<Self> {
        let mask = match (config.d_margin, field) {
            (Some(margin), Some(field)) => Some(field.mapv(|d| d > margin)),
            _ => None,
        };
        let pools = CoordinatePools::build(labels, mask.as_ref())?;
        warn_empty_pools("constrained_uniform", &pools, config.click);
        debug!(
            click = config.click,
            d_step = ?config.d_step,
            d_margin = ?config.d_margin,
            "constrained uniform sampler ready"
        );

        Ok(Self {
            shape: labels.shape().to_vec(),
            pools,
            config,
        })
    }

    pub fn config(&self) -> &ConstrainedUniformConfig {
        &self.config
    }

    fn sample_object(
        &self,
        object_id: u32,
        pool: &[Coord],
        rng: &mut dyn RngCore,
        out: &mut ClickSet,
    ) {
        let step_squared = self.config.d_step.map(|s| s * s);
        let mut working = pool.to_vec();

        for _ in 0..self.config.click {
            if working.is_empty() {
                trace!(object_id, "working pool exhausted, refilling");
                working.extend_from_slice(pool);
            }

            let picked = working[random_index(rng, working.len())];
            out.push(picked);

            if let Some(limit) = step_squared {
                working.retain(|c| c.distance_squared(&picked) > limit);
            }
        }
    }
}

impl ClickSampling for ConstrainedUniformSampler {
    fn produce(&self, rng: &mut dyn RngCore) -> Result<ClickSet> {
        let click = self.config.click;
        let mut out = ClickSet::new(&self.shape, self.pools.object_count(), click);
        if click == 0 {
            return Ok(out);
        }

        for (object_id, pool) in self.pools.iter() {
            let pool = non_empty(object_id, pool)?;
            self.sample_object(object_id, pool, rng, &mut out);
        }

        Ok(out)
    }

    fn object_count(&self) -> usize {
        self.pools.object_count()
    }

    fn clicks_per_object(&self) -> usize {
        self.config.click
    }

    fn pools(&self) -> &CoordinatePools {
        &self.pools
    }
}
