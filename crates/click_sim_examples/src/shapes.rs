use click_sim::prelude::*;
use ndarray::{Array2, Array3};

/// Square image of side `size` with a disk of `radius` at its center labeled `1`.
pub fn disk_labels(size: usize, radius: f32) -> Result<LabeledVolume> {
    let c = size as f32 / 2.0;
    let data = Array2::from_shape_fn((size, size), |(r, col)| {
        let (dr, dc) = (r as f32 - c, col as f32 - c);
        u32::from(dr * dr + dc * dc < radius * radius)
    });
    LabeledVolume::new(data)
}

/// Ellipsoid with semi-axes `radii` labeled `1`, padded by `pad` voxels on every side.
pub fn ellipsoid_labels(radii: [f32; 3], pad: usize) -> Result<LabeledVolume> {
    let shape = radii.map(|r| (2.0 * r).ceil() as usize + 1 + 2 * pad);
    let data = Array3::from_shape_fn((shape[0], shape[1], shape[2]), |(z, y, x)| {
        let idx = [z, y, x];
        let sum: f32 = (0..3)
            .map(|a| {
                let d = (idx[a] as f32 - (shape[a] as f32 - 1.0) / 2.0) / radii[a];
                d * d
            })
            .sum();
        u32::from(sum <= 1.0)
    });
    LabeledVolume::new(data)
}
