//! Overlay composition of a label volume with positive and negative click maps.
//!
//! Produces an in-memory float array with a trailing channel axis laid out as
//! `[negative, positive, label]`, each `0.0` or `1.0`. Click marks are grown with a
//! disk (2D) or ball (3D) so single-voxel clicks stay visible.
use ndarray::{ArrayD, Axis, Dimension, Zip};

use crate::error::{ensure_same_shape, ensure_supported_rank, Result};
use crate::volume::{ClickMap, LabeledVolume};

/// Radius of the structuring element applied per dilation pass.
pub const STAMP_RADIUS: usize = 3;

/// Channel order of [`compose_overlay`] output.
pub const NEGATIVE_CHANNEL: usize = 0;
pub const POSITIVE_CHANNEL: usize = 1;
pub const LABEL_CHANNEL: usize = 2;

/// Combine `labels`, a positive and a negative click map into a three-channel overlay.
///
/// Each click map is dilated `dilation` times by a radius-[`STAMP_RADIUS`] disk or ball.
/// The label channel is cleared wherever either dilated map is set.
pub fn compose_overlay(
    labels: &LabeledVolume,
    positive: &ClickMap,
    negative: &ClickMap,
    dilation: usize,
) -> Result<ArrayD<f32>> {
    let shape = labels.shape();
    ensure_supported_rank(shape)?;
    ensure_same_shape(shape, positive.shape())?;
    ensure_same_shape(shape, negative.shape())?;

    let stamp = ball_offsets(shape.len(), STAMP_RADIUS);
    let positive = dilate(&positive.mapv(|v| v > 0), &stamp, dilation);
    let negative = dilate(&negative.mapv(|v| v > 0), &stamp, dilation);

    let mut channel_shape = shape.to_vec();
    channel_shape.push(3);
    let mut out = ArrayD::<f32>::zeros(channel_shape);
    let channel_axis = Axis(shape.len());

    Zip::from(out.index_axis_mut(channel_axis, NEGATIVE_CHANNEL))
        .and(&negative)
        .for_each(|o, &n| *o = f32::from(u8::from(n)));
    Zip::from(out.index_axis_mut(channel_axis, POSITIVE_CHANNEL))
        .and(&positive)
        .for_each(|o, &p| *o = f32::from(u8::from(p)));
    Zip::from(out.index_axis_mut(channel_axis, LABEL_CHANNEL))
        .and(labels.as_array())
        .and(&positive)
        .and(&negative)
        .for_each(|o, &l, &p, &n| *o = f32::from(u8::from(l > 0 && !p && !n)));

    Ok(out)
}

/// Integer offsets within `radius` of the origin, Euclidean metric.
fn ball_offsets(rank: usize, radius: usize) -> Vec<Vec<isize>> {
    let r = radius as isize;
    let mut offsets = vec![Vec::new()];
    for _ in 0..rank {
        offsets = offsets
            .into_iter()
            .flat_map(|prefix| {
                (-r..=r).map(move |d| {
                    let mut next = prefix.clone();
                    next.push(d);
                    next
                })
            })
            .collect();
    }
    offsets.retain(|o| o.iter().map(|d| d * d).sum::<isize>() <= r * r);
    offsets
}

/// Binary dilation of `mask` by `stamp`, applied `passes` times.
fn dilate(mask: &ArrayD<bool>, stamp: &[Vec<isize>], passes: usize) -> ArrayD<bool> {
    let shape = mask.shape().to_vec();
    let mut current = mask.clone();
    let mut target = vec![0usize; shape.len()];

    for _ in 0..passes {
        let mut next = current.clone();
        for (index, &set) in current.indexed_iter() {
            if !set {
                continue;
            }
            let index = index.slice();
            'stamp: for offset in stamp {
                for (axis, (&i, &d)) in index.iter().zip(offset).enumerate() {
                    let t = i as isize + d;
                    if t < 0 || t >= shape[axis] as isize {
                        continue 'stamp;
                    }
                    target[axis] = t as usize;
                }
                next[target.as_slice()] = true;
            }
        }
        current = next;
    }

    current
}

#[cfg(test)]
mod tests {
    use ndarray::{arr2, Array2, Array3};

    use super::*;
    use crate::error::Error;

    #[test]
    fn disk_offsets_match_radius_three_disk() {
        // 7x7 grid minus the corners outside the radius-3 circle.
        assert_eq!(ball_offsets(2, 3).len(), 29);
        assert_eq!(ball_offsets(3, 1).len(), 7);
    }

    #[test]
    fn zero_passes_keep_clicks_as_is() {
        let labels = LabeledVolume::new(arr2(&[[1, 1, 0], [0, 0, 0]])).unwrap();
        let pos = arr2(&[[0u8, 1, 0], [0, 0, 0]]).into_dyn();
        let neg = arr2(&[[0u8, 0, 0], [0, 0, 1]]).into_dyn();
        let out = compose_overlay(&labels, &pos, &neg, 0).unwrap();

        assert_eq!(out.shape(), &[2, 3, 3]);
        let at = |r: usize, c: usize, ch: usize| out[[r, c, ch].as_slice()];
        assert_eq!(at(0, 1, POSITIVE_CHANNEL), 1.0);
        assert_eq!(at(0, 1, LABEL_CHANNEL), 0.0);
        assert_eq!(at(0, 0, LABEL_CHANNEL), 1.0);
        assert_eq!(at(1, 2, NEGATIVE_CHANNEL), 1.0);
        assert_eq!(at(1, 2, LABEL_CHANNEL), 0.0);
        assert_eq!(at(0, 2, LABEL_CHANNEL), 0.0);
    }

    #[test]
    fn one_pass_grows_click_to_a_disk() {
        let labels = LabeledVolume::new(Array2::<u32>::zeros((11, 11))).unwrap();
        let mut pos = Array2::<u8>::zeros((11, 11));
        pos[[5, 5]] = 1;
        let neg = Array2::<u8>::zeros((11, 11)).into_dyn();
        let out = compose_overlay(&labels, &pos.into_dyn(), &neg, 1).unwrap();

        let lit = out
            .index_axis(Axis(2), POSITIVE_CHANNEL)
            .iter()
            .filter(|&&v| v == 1.0)
            .count();
        assert_eq!(lit, 29);
    }

    #[test]
    fn dilation_is_clipped_at_volume_edges() {
        let mut mask = Array3::from_elem((3, 3, 3), false);
        mask[[0, 0, 0]] = true;
        let grown = dilate(&mask.into_dyn(), &ball_offsets(3, 1), 1);
        assert_eq!(grown.iter().filter(|&&v| v).count(), 4);
    }

    #[test]
    fn mismatched_maps_are_rejected() {
        let labels = LabeledVolume::new(Array2::<u32>::zeros((2, 2))).unwrap();
        let ok = Array2::<u8>::zeros((2, 2)).into_dyn();
        let bad = Array2::<u8>::zeros((3, 2)).into_dyn();
        assert!(matches!(
            compose_overlay(&labels, &ok, &bad, 1),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
