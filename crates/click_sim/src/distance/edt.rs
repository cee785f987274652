//! Exact Euclidean Distance Transform (EDT) over rank-2 and rank-3 masks.
//!
//! This implementation is based on the Felzenszwalb-Huttenlocher algorithm,
//! which computes exact Euclidean distances using a separable approach with
//! one 1D lower-envelope pass per axis. Axes may carry their own voxel spacing.
use ndarray::Axis;
use tracing::debug;

use crate::distance::DistanceTransform;
use crate::error::{ensure_supported_rank, Error, Result};
use crate::volume::{DistanceField, EligibilityMask};

/// Exact separable Euclidean distance transform.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactEuclidean {
    /// Voxel spacing per axis, in array axis order.
    anisotropy: [f32; 3],
}

impl Default for ExactEuclidean {
    fn default() -> Self {
        Self {
            anisotropy: [1.0; 3],
        }
    }
}

impl ExactEuclidean {
    /// Create a transform with unit spacing on every axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voxel spacing; takes 2 or 3 positive finite values, one per axis.
    ///
    /// With 2 values the third axis keeps unit spacing.
    pub fn with_anisotropy(mut self, spacing: &[f32]) -> Result<Self> {
        if !(2..=3).contains(&spacing.len()) {
            return Err(Error::InvalidParameter(format!(
                "anisotropy needs 2 or 3 values, got {}",
                spacing.len()
            )));
        }
        if spacing.iter().any(|s| !s.is_finite() || *s <= 0.0) {
            return Err(Error::InvalidParameter(
                "anisotropy values must be finite and > 0".into(),
            ));
        }
        self.anisotropy = [1.0; 3];
        self.anisotropy[..spacing.len()].copy_from_slice(spacing);
        Ok(self)
    }

    pub fn anisotropy(&self) -> &[f32; 3] {
        &self.anisotropy
    }
}

impl DistanceTransform for ExactEuclidean {
    fn transform(&self, mask: &EligibilityMask) -> Result<DistanceField> {
        let shape = mask.shape();
        ensure_supported_rank(shape)?;

        // No false cell anywhere in reach means no boundary: the distance stays infinite.
        let mut f = mask.mapv(|m| if m { f32::INFINITY } else { 0.0 });

        let longest = shape.iter().copied().max().unwrap_or(0);
        let mut lane_in = vec![0.0; longest];
        let mut lane_out = vec![0.0; longest];
        let mut envelope = Envelope::with_capacity(longest);

        for axis in 0..shape.len() {
            let n = shape[axis];
            let w2 = self.anisotropy[axis] * self.anisotropy[axis];
            for mut lane in f.lanes_mut(Axis(axis)) {
                for (dst, src) in lane_in[..n].iter_mut().zip(lane.iter()) {
                    *dst = *src;
                }
                edt_1d(&lane_in[..n], w2, &mut envelope, &mut lane_out[..n]);
                for (dst, src) in lane.iter_mut().zip(&lane_out[..n]) {
                    *dst = *src;
                }
            }
        }

        // Convert squared distances to actual distances
        f.mapv_inplace(f32::sqrt);

        debug!(shape = ?shape, "computed euclidean distance transform");
        Ok(f)
    }
}

/// Scratch buffers for the lower envelope of parabolas.
struct Envelope {
    v: Vec<usize>,
    z: Vec<f32>,
}

impl Envelope {
    fn with_capacity(n: usize) -> Self {
        Self {
            v: vec![0; n],
            z: vec![0.0; n + 1],
        }
    }
}

/// Computes the 1D squared distance transform `min_p w2 * (q - p)^2 + f[p]` for every `q`.
///
/// Only finite entries root a parabola; a lane without any yields infinity everywhere.
fn edt_1d(f: &[f32], w2: f32, env: &mut Envelope, output: &mut [f32]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    debug_assert_eq!(
        f.len(),
        output.len(),
        "Input and output must have same length"
    );

    let Some(first) = f.iter().position(|v| v.is_finite()) else {
        output.fill(f32::INFINITY);
        return;
    };

    let v = &mut env.v;
    let z = &mut env.z;
    let mut k = 0;

    v[0] = first;
    z[0] = f32::NEG_INFINITY;
    z[1] = f32::INFINITY;

    // Compute lower envelope
    for q in first + 1..n {
        if !f[q].is_finite() {
            continue;
        }
        let mut s = intersection(q, v[k], f, w2);
        while k > 0 && s <= z[k] {
            k -= 1;
            s = intersection(q, v[k], f, w2);
        }

        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f32::INFINITY;
    }

    // Fill output from the envelope
    k = 0;
    for (q, dq) in output.iter_mut().enumerate() {
        while z[k + 1] < q as f32 {
            k += 1;
        }

        let dx = (q as f32) - (v[k] as f32);
        *dq = w2 * dx * dx + f[v[k]];
    }
}

/// Horizontal position where the parabolas rooted at `i` and `j` intersect.
fn intersection(i: usize, j: usize, f: &[f32], w2: f32) -> f32 {
    debug_assert!(i < f.len() && j < f.len(), "Indices must be within bounds");

    if i == j {
        return f32::INFINITY;
    }

    let fi = f[i];
    let fj = f[j];

    if !fi.is_finite() || !fj.is_finite() {
        return f32::INFINITY;
    }

    let (fi_sq, fj_sq) = ((i * i) as f32, (j * j) as f32);
    let numerator = (fi + w2 * fi_sq) - (fj + w2 * fj_sq);
    let denominator = 2.0 * w2 * (i as f32 - j as f32);

    numerator / denominator
}
