//! Border-biased dispersive click sampling.
//!
//! Eligible cells form a band `min_border_distance < distance < max_border_distance`
//! around each object's boundary. The first click of an object is uniform over the band;
//! each further click is the band cell with the largest sum of distances to the clicks
//! already chosen for that object (first such cell in pool order on ties).
//!
//! Chosen cells stay candidates, so a cell may be chosen again if it still maximizes the sum.
use glam::Vec3;
use rand::RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::distance::{DistanceTransform, ExactEuclidean};
use crate::error::{ensure_same_shape, Error, Result};
use crate::sampling::{non_empty, random_index, warn_empty_pools, ClickSampling, ClickSet};
use crate::volume::{Coord, CoordinatePools, DistanceField, LabeledVolume};

/// Configuration for [`BorderBiasedSampler`].
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BorderBiasedConfig {
    /// Clicks drawn per object.
    pub click: usize,
    /// Exclusive lower bound of the eligible band.
    pub min_border_distance: f32,
    /// Exclusive upper bound of the eligible band; `f32::INFINITY` disables it.
    pub max_border_distance: f32,
}

impl Default for BorderBiasedConfig {
    fn default() -> Self {
        Self {
            click: 5,
            min_border_distance: 0.0,
            max_border_distance: 10.0,
        }
    }
}

impl BorderBiasedConfig {
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

    /// Sets both band bounds.
    pub fn with_band(mut self, min_border_distance: f32, max_border_distance: f32) -> Self {
        self.min_border_distance = min_border_distance;
        self.max_border_distance = max_border_distance;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.min_border_distance.is_nan() || self.max_border_distance.is_nan() {
            return Err(Error::InvalidParameter(
                "border distances must not be NaN".into(),
            ));
        }
        if self.max_border_distance.is_finite()
            && self.min_border_distance >= self.max_border_distance
        {
            return Err(Error::InvalidParameter(format!(
                "min_border_distance ({}) must be < max_border_distance ({})",
                self.min_border_distance, self.max_border_distance
            )));
        }
        Ok(())
    }

    fn in_band(&self, distance: f32) -> bool {
        distance > self.min_border_distance
            && (distance < self.max_border_distance || self.max_border_distance == f32::INFINITY)
    }
}

/// Greedy border-biased sampler.
#[derive(Debug, Clone)]
pub struct BorderBiasedSampler {
    shape: Vec<usize>,
    pools: CoordinatePools,
    /// Pool positions as float vectors, parallel to `pools`.
    points: Vec<Vec<Vec3>>,
    config: BorderBiasedConfig,
}

impl BorderBiasedSampler {
    /// Build the sampler, computing the per-label distance field with [`ExactEuclidean`].
    pub fn new(labels: &LabeledVolume, config: BorderBiasedConfig) -> Result<Self> {
        Self::with_transform(labels, &ExactEuclidean::new(), config)
    }

    /// Build the sampler, computing the per-label distance field with `transform`.
    pub fn with_transform(
        labels: &LabeledVolume,
        transform: &dyn DistanceTransform,
        config: BorderBiasedConfig,
    ) -> Result<Self> {
        config.validate()?;
        let field = transform.transform_labels(labels)?;
        Self::build(labels, &field, config)
    }

    /// Build the sampler from a precomputed distance field. The field is only read here.
    pub fn with_distance_field(
        labels: &LabeledVolume,
        field: &DistanceField,
        config: BorderBiasedConfig,
    ) -> Result<Self> {
        config.validate()?;
        ensure_same_shape(labels.shape(), field.shape())?;
        Self::build(labels, field, config)
    }

    fn build(
        labels: &LabeledVolume,
        field: &DistanceField,
        config: BorderBiasedConfig,
    ) -> Result<Self> {
        let mask = field.mapv(|d| config.in_band(d));
        let pools = CoordinatePools::build(labels, Some(&mask))?;
        warn_empty_pools("border_biased", &pools, config.click);

        let points = pools
            .iter()
            .map(|(_, pool)| pool.iter().map(Coord::to_vec3).collect())
            .collect();

        debug!(
            click = config.click,
            min_border_distance = config.min_border_distance,
            max_border_distance = config.max_border_distance,
            "border-biased sampler ready"
        );

        Ok(Self {
            shape: labels.shape().to_vec(),
            pools,
            points,
            config,
        })
    }

    pub fn config(&self) -> &BorderBiasedConfig {
        &self.config
    }

    fn sample_object(
        &self,
        pool: &[Coord],
        points: &[Vec3],
        rng: &mut dyn RngCore,
        out: &mut ClickSet,
    ) {
        let mut current = random_index(rng, pool.len());
        out.push(pool[current]);

        // Running sum of distances from every candidate to the picks so far.
        let mut sums = vec![0.0_f32; points.len()];
        for _ in 1..self.config.click {
            let last = points[current];
            for (sum, p) in sums.iter_mut().zip(points) {
                *sum += p.distance(last);
            }
            current = first_max(&sums);
            out.push(pool[current]);
        }
    }
}

/// Index of the first maximum.
fn first_max(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

impl ClickSampling for BorderBiasedSampler {
    fn produce(&self, rng: &mut dyn RngCore) -> Result<ClickSet> {
        let click = self.config.click;
        let mut out = ClickSet::new(&self.shape, self.pools.object_count(), click);
        if click == 0 {
            return Ok(out);
        }

        for ((object_id, pool), points) in self.pools.iter().zip(&self.points) {
            let pool = non_empty(object_id, pool)?;
            self.sample_object(pool, points, rng, &mut out);
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
    use crate::sampling::tests::FixedRng;

    fn line(n: usize) -> LabeledVolume {
        LabeledVolume::new(Array2::<u32>::ones((1, n))).unwrap()
    }

    #[test]
    fn config_validation() {
        assert!(BorderBiasedConfig::default().validate().is_ok());
        assert!(BorderBiasedConfig::new(2).with_band(3.0, 3.0).validate().is_err());
        assert!(BorderBiasedConfig::new(2).with_band(4.0, 3.0).validate().is_err());
        assert!(BorderBiasedConfig::new(2)
            .with_band(f32::NAN, 3.0)
            .validate()
            .is_err());
        assert!(BorderBiasedConfig::new(2)
            .with_band(5.0, f32::INFINITY)
            .validate()
            .is_ok());
    }

    #[test]
    fn first_max_prefers_earliest_tie() {
        assert_eq!(first_max(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(first_max(&[0.0]), 0);
    }

    #[test]
    fn second_pick_is_farthest_from_seed() {
        let field = DistanceField::from_elem(vec![1, 6], 1.0);
        let sampler = BorderBiasedSampler::with_distance_field(
            &line(6),
            &field,
            BorderBiasedConfig::new(2).with_band(0.0, f32::INFINITY),
        )
        .unwrap();

        let set = sampler.produce(&mut FixedRng { value: 0 }).unwrap();
        assert_eq!(set.positions, vec![Coord::new2(0, 0), Coord::new2(0, 5)]);
    }

    #[test]
    fn chosen_cells_may_be_chosen_again() {
        // Two cells: after seeding on one, the other maximizes the sum; then both tie
        // at the same sum and the first in pool order is picked again.
        let field = DistanceField::from_elem(vec![1, 2], 1.0);
        let sampler = BorderBiasedSampler::with_distance_field(
            &line(2),
            &field,
            BorderBiasedConfig::new(3).with_band(0.0, f32::INFINITY),
        )
        .unwrap();
        let set = sampler.produce(&mut FixedRng { value: u64::MAX }).unwrap();
        assert_eq!(
            set.positions,
            vec![Coord::new2(0, 1), Coord::new2(0, 0), Coord::new2(0, 0)]
        );
    }

    #[test]
    fn band_selects_ring_by_label_distance() {
        let mut data = Array2::<u32>::zeros((9, 9));
        data.slice_mut(ndarray::s![1..8, 1..8]).fill(1);
        let labels = LabeledVolume::new(data).unwrap();
        let sampler = BorderBiasedSampler::new(
            &labels,
            BorderBiasedConfig::new(1).with_band(0.0, 2.0),
        )
        .unwrap();
        // The outermost ring of the 7x7 block sits at distance 1.
        assert_eq!(sampler.pools().get(1).unwrap().len(), 24);
    }

    #[test]
    fn greedy_pick_maximizes_distance_sum() {
        let labels = LabeledVolume::new(arr2(&[
            [1, 1, 1, 1, 0, 2, 2],
            [1, 1, 1, 1, 0, 2, 2],
            [1, 1, 1, 1, 0, 2, 2],
        ]))
        .unwrap();
        let config = BorderBiasedConfig::new(4).with_band(0.0, f32::INFINITY);
        let sampler = BorderBiasedSampler::new(&labels, config).unwrap();

        for seed in 0..10 {
            let set = sampler.produce(&mut StdRng::seed_from_u64(seed)).unwrap();
            for object_id in 1..=2 {
                let pool = sampler.pools().get(object_id).unwrap();
                let picks = set.object_clicks(object_id);
                for k in 1..picks.len() {
                    let score = |c: &Coord| picks[..k].iter().map(|p| p.distance(c)).sum::<f32>();
                    let best = pool.iter().map(score).fold(f32::MIN, f32::max);
                    assert!((score(&picks[k]) - best).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn open_band_admits_cells_without_boundary() {
        let open = BorderBiasedSampler::new(
            &line(4),
            BorderBiasedConfig::new(1).with_band(0.0, f32::INFINITY),
        )
        .unwrap();
        assert_eq!(open.pools().get(1).unwrap().len(), 4);

        let closed =
            BorderBiasedSampler::new(&line(4), BorderBiasedConfig::new(1).with_band(0.0, 1e6))
                .unwrap();
        assert!(closed.pools().get(1).unwrap().is_empty());
    }

    #[test]
    fn empty_band_is_reported() {
        let sampler =
            BorderBiasedSampler::new(&line(3), BorderBiasedConfig::new(2).with_band(50.0, 60.0))
                .unwrap();
        assert!(matches!(
            sampler.produce(&mut StdRng::seed_from_u64(1)),
            Err(Error::EmptyObjectPool { object_id: 1 })
        ));
    }

    #[test]
    fn determinism_for_same_seed() {
        let mut data = Array2::<u32>::zeros((12, 12));
        data.slice_mut(ndarray::s![2..10, 2..10]).fill(1);
        let labels = LabeledVolume::new(data).unwrap();
        let sampler = BorderBiasedSampler::new(&labels, BorderBiasedConfig::new(5)).unwrap();
        let a = sampler.produce(&mut StdRng::seed_from_u64(4)).unwrap();
        let b = sampler.produce(&mut StdRng::seed_from_u64(4)).unwrap();
        assert_eq!(a, b);
    }
}
