//! Uniform random click sampling with replacement.
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::sampling::{non_empty, random_index, warn_empty_pools, ClickSampling, ClickSet};
use crate::volume::{CoordinatePools, LabeledVolume};

/// Configuration for [`UniformSampler`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UniformConfig {
    /// Clicks drawn per object.
    pub click: usize,
}

impl Default for UniformConfig {
    fn default() -> Self {
        Self { click: 5 }
    }
}

impl UniformConfig {
    pub fn new(click: usize) -> Self {
        Self { click }
    }

    /// Sets the clicks per object.
    pub fn with_click(mut self, click: usize) -> Self {
        self.click = click;
        self
    }

    /// Validates the configuration. Every click count is valid.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Draws clicks i.i.d. from every labeled cell of each object.
///
/// Successive calls are independent; nothing but the fixed pools is kept between them.
#[derive(Debug, Clone)]
pub struct UniformSampler {
    shape: Vec<usize>,
    pools: CoordinatePools,
    config: UniformConfig,
}

impl UniformSampler {
    pub fn new(labels: &LabeledVolume, config: UniformConfig) -> Result<Self> {
        config.validate()?;
        let pools = CoordinatePools::build(labels, None)?;
        warn_empty_pools("uniform", &pools, config.click);
        debug!(click = config.click, "uniform sampler ready");

        Ok(Self {
            shape: labels.shape().to_vec(),
            pools,
            config,
        })
    }

    pub fn config(&self) -> &UniformConfig {
        &self.config
    }
}

impl ClickSampling for UniformSampler {
    fn produce(&self, rng: &mut dyn RngCore) -> Result<ClickSet> {
        let click = self.config.click;
        let mut out = ClickSet::new(&self.shape, self.pools.object_count(), click);
        if click == 0 {
            return Ok(out);
        }

        for (object_id, pool) in self.pools.iter() {
            let pool = non_empty(object_id, pool)?;
            for _ in 0..click {
                out.push(pool[random_index(rng, pool.len())]);
            }
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

#[cfg(test)]
mod tests {
    use ndarray::{arr2, Array2};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::error::Error;
    use crate::sampling::tests::FixedRng;
    use crate::volume::Coord;

    fn two_objects() -> LabeledVolume {
        LabeledVolume::new(arr2(&[
            [1, 1, 0, 0],
            [1, 1, 0, 2],
            [0, 0, 0, 2],
        ]))
        .unwrap()
    }

    #[test]
    fn count_and_membership_are_respected() {
        let labels = two_objects();
        let sampler = UniformSampler::new(&labels, UniformConfig::new(7)).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let set = sampler.produce(&mut rng).unwrap();

        assert_eq!(set.positions.len(), 2 * 7);
        for record in set.records() {
            assert_eq!(labels.get(&record.coord), Some(record.object_id));
        }
        for c in &set.positions {
            assert_eq!(set.click_map[c.as_slice()], 1);
        }
        let marked = set.click_map.iter().filter(|&&v| v == 1).count();
        let mut distinct = set.positions.clone();
        distinct.sort();
        distinct.dedup();
        assert_eq!(marked, distinct.len());
    }

    #[test]
    fn determinism_for_same_seed() {
        let sampler = UniformSampler::new(&two_objects(), UniformConfig::new(4)).unwrap();

        let mut rng_a = StdRng::seed_from_u64(123);
        let mut rng_b = StdRng::seed_from_u64(123);
        let a = sampler.produce(&mut rng_a).unwrap();
        let b = sampler.produce(&mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn draws_with_replacement() {
        let labels = LabeledVolume::new(arr2(&[[0, 1], [0, 0]])).unwrap();
        let sampler = UniformSampler::new(&labels, UniformConfig::new(3)).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let set = sampler.produce(&mut rng).unwrap();
        assert_eq!(set.positions, vec![Coord::new2(0, 1); 3]);
    }

    #[test]
    fn fixed_rng_selects_pool_ends() {
        let labels = LabeledVolume::new(Array2::<u32>::ones((2, 2))).unwrap();
        let sampler = UniformSampler::new(&labels, UniformConfig::new(1)).unwrap();

        let first = sampler.produce(&mut FixedRng { value: 0 }).unwrap();
        assert_eq!(first.positions, vec![Coord::new2(0, 0)]);

        let last = sampler.produce(&mut FixedRng { value: u64::MAX }).unwrap();
        assert_eq!(last.positions, vec![Coord::new2(1, 1)]);
    }

    #[test]
    fn empty_object_is_reported() {
        let labels = LabeledVolume::new(arr2(&[[0, 2], [0, 2]])).unwrap();
        let sampler = UniformSampler::new(&labels, UniformConfig::new(1)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            sampler.produce(&mut rng),
            Err(Error::EmptyObjectPool { object_id: 1 })
        ));
    }

    #[test]
    fn zero_clicks_never_fail() {
        let labels = LabeledVolume::new(arr2(&[[0, 2]])).unwrap();
        let sampler = UniformSampler::new(&labels, UniformConfig::new(0)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let set = sampler.produce(&mut rng).unwrap();
        assert!(set.positions.is_empty());
    }
}
