use click_sim::prelude::*;
use click_sim_examples::{disk_labels, init_tracing, print_records, render_overlay_2d};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let labels = disk_labels(48, 16.0)?;
    let edt = ExactEuclidean::new();

    // Positive clicks well inside the disk, spread at least 6 px apart.
    let positive = ConstrainedUniformSampler::with_transform(
        &labels,
        &edt,
        ConstrainedUniformConfig::new(4)
            .with_d_step(Some(6.0))
            .with_d_margin(Some(3.0)),
    )?;

    // Negative clicks in a band of background around the disk.
    let band = background_band(&labels, &edt, 6.0)?;
    let negative = BorderBiasedSampler::with_transform(
        &band,
        &edt,
        BorderBiasedConfig::new(5).with_band(0.0, f32::INFINITY),
    )?;

    let mut rng = StdRng::seed_from_u64(42);
    let pos = positive.produce(&mut rng)?;
    let neg = negative.produce(&mut rng)?;

    print_records("positive", &pos);
    print_records("negative", &neg);

    let overlay = compose_overlay(&labels, &pos.click_map, &neg.click_map, 0)?;
    print!("{}", render_overlay_2d(&overlay)?);
    Ok(())
}
