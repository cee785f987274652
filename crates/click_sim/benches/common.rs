use std::time::Duration;

use click_sim::volume::LabeledVolume;
use criterion::{Criterion, Throughput};
use ndarray::Array3;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// A ball of diameter `extent` split into two objects along the first axis, padded by a
/// quarter of the extent on each side.
pub fn ellipsoid_labels(extent: usize) -> LabeledVolume {
    let pad = extent / 4;
    let side = extent + 2 * pad;
    let radius = extent as f32 * 0.5;
    let center = pad as f32 + radius;

    let data = Array3::from_shape_fn((side, side, side), |(z, y, x)| {
        let d = |i: usize| (i as f32 + 0.5 - center) / radius;
        let inside = d(z) * d(z) + d(y) * d(y) + d(x) * d(x) <= 1.0;
        match (inside, (z as f32) < center) {
            (false, _) => 0,
            (true, true) => 1,
            (true, false) => 2,
        }
    });
    LabeledVolume::new(data).expect("rank-3 volume")
}
