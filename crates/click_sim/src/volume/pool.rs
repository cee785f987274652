//! Per-object coordinate pools.
//!
//! A pool holds every coordinate of one object that passes an eligibility
//! mask, in row-major scan order. Pools are built once per sampler and are
//! read-only afterwards.
use ndarray::Dimension;
use tracing::debug;

use crate::error::{ensure_same_shape, Result};
use crate::volume::{Coord, EligibilityMask, LabeledVolume};

/// One coordinate collection per object id `1..=N`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinatePools {
    pools: Vec<Vec<Coord>>,
}

impl CoordinatePools {
    /// Collect, for each object, the coordinates where the label equals its id and the
    /// mask is `true`. Without a mask every labeled cell is eligible.
    ///
    /// Objects with no qualifying coordinate get an empty pool; only a mask whose
    /// shape differs from `labels` is an error.
    pub fn build(labels: &LabeledVolume, mask: Option<&EligibilityMask>) -> Result<Self> {
        if let Some(mask) = mask {
            ensure_same_shape(labels.shape(), mask.shape())?;
        }

        let mut pools = vec![Vec::new(); labels.object_count() as usize];
        let data = labels.as_array();

        match mask {
            Some(mask) => {
                for ((index, &label), &eligible) in data.indexed_iter().zip(mask.iter()) {
                    if label > 0 && eligible {
                        push(&mut pools, label, index.slice());
                    }
                }
            }
            None => {
                for (index, &label) in data.indexed_iter() {
                    if label > 0 {
                        push(&mut pools, label, index.slice());
                    }
                }
            }
        }

        let result = Self { pools };
        debug!(
            objects = result.object_count(),
            eligible = result.total_len(),
            masked = mask.is_some(),
            "built coordinate pools"
        );
        Ok(result)
    }

    pub fn object_count(&self) -> usize {
        self.pools.len()
    }

    /// Pool of `object_id` (1-based), or `None` for ids outside `1..=N`.
    pub fn get(&self, object_id: u32) -> Option<&[Coord]> {
        let index = (object_id as usize).checked_sub(1)?;
        self.pools.get(index).map(Vec::as_slice)
    }

    /// Iterate `(object_id, pool)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &[Coord])> + '_ {
        self.pools
            .iter()
            .enumerate()
            .map(|(i, pool)| (i as u32 + 1, pool.as_slice()))
    }

    /// Ids of objects whose pool is empty.
    pub fn empty_objects(&self) -> Vec<u32> {
        self.iter()
            .filter(|(_, pool)| pool.is_empty())
            .map(|(id, _)| id)
            .collect()
    }

    /// Total number of coordinates across all pools.
    pub fn total_len(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }
}

#[inline]
fn push(pools: &mut [Vec<Coord>], label: u32, index: &[usize]) {
    if let Some(coord) = Coord::from_slice(index) {
        pools[label as usize - 1].push(coord);
    }
}
