//! Distance transforms producing [`DistanceField`]s for eligibility masks.
//!
//! Samplers only consume a field; any [`DistanceTransform`] implementation can
//! supply it. [`ExactEuclidean`] is the built-in exact transform.
use ndarray::{Axis, Slice, Zip};

use crate::error::Result;
use crate::volume::{DistanceField, EligibilityMask, LabeledVolume};

pub mod edt;

pub use edt::ExactEuclidean;

/// Computes distance fields over binary and labeled volumes.
pub trait DistanceTransform: Send + Sync {
    /// For every `true` cell, the distance to the nearest `false` cell; `false` cells hold `0`.
    ///
    /// Volume borders do not count as `false` cells.
    fn transform(&self, mask: &EligibilityMask) -> Result<DistanceField>;

    /// For every labeled cell, the distance to the nearest cell carrying a different label
    /// (background included); background cells hold `0`.
    ///
    /// The default runs [`DistanceTransform::transform`] once per object on the object's
    /// bounding box grown by one cell, which always contains the nearest foreign cell.
    fn transform_labels(&self, labels: &LabeledVolume) -> Result<DistanceField> {
        let data = labels.as_array();
        let mut field = DistanceField::zeros(data.raw_dim());

        for (object_id, bounds) in object_bounds(labels).into_iter().enumerate() {
            let Some(bounds) = bounds else {
                continue;
            };
            let object_id = object_id as u32 + 1;

            let mut view = data.view();
            let mut out = field.view_mut();
            for (axis, (lo, hi)) in bounds.iter().enumerate() {
                let lo = lo.saturating_sub(1);
                let hi = (hi + 2).min(data.len_of(Axis(axis)));
                view.slice_axis_inplace(Axis(axis), Slice::from(lo..hi));
                out.slice_axis_inplace(Axis(axis), Slice::from(lo..hi));
            }

            let mask = view.mapv(|v| v == object_id);
            let local = self.transform(&mask)?;
            Zip::from(&mut out)
                .and(&local)
                .and(&view)
                .for_each(|o, &d, &label| {
                    if label == object_id {
                        *o = d;
                    }
                });
        }

        Ok(field)
    }
}

/// Inclusive per-axis `(min, max)` index bounds of every object, `None` for absent ids.
fn object_bounds(labels: &LabeledVolume) -> Vec<Option<Vec<(usize, usize)>>> {
    let mut bounds: Vec<Option<Vec<(usize, usize)>>> =
        vec![None; labels.object_count() as usize];

    for (index, &label) in labels.as_array().indexed_iter() {
        if label == 0 {
            continue;
        }
        let index = ndarray::Dimension::slice(&index);
        let slot = &mut bounds[label as usize - 1];
        if let Some(b) = slot.as_mut() {
            for (axis, &i) in index.iter().enumerate() {
                b[axis].0 = b[axis].0.min(i);
                b[axis].1 = b[axis].1.max(i);
            }
        } else {
            *slot = Some(index.iter().map(|&i| (i, i)).collect());
        }
    }

    bounds
}
