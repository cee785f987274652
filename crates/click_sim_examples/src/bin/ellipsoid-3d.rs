use click_sim::prelude::*;
use click_sim_examples::{ellipsoid_labels, init_tracing, print_records};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let labels = ellipsoid_labels([12.0, 16.0, 16.0], 4)?;
    println!("volume shape: {:?}", labels.shape());

    let edt = ExactEuclidean::new().with_anisotropy(&[2.0, 1.0, 1.0])?;
    let field = edt.transform(&labels.foreground())?;

    let positive = ConstrainedUniformSampler::with_distance_field(
        &labels,
        &field,
        ConstrainedUniformConfig::new(5)
            .with_d_step(Some(8.0))
            .with_d_margin(Some(4.0)),
    )?;

    let border = BorderBiasedSampler::with_transform(
        &labels,
        &edt,
        BorderBiasedConfig::new(8).with_band(0.0, 3.0),
    )?;

    let mut rng = StdRng::seed_from_u64(7);
    let pos = positive.produce(&mut rng)?;
    let near_border = border.produce(&mut rng)?;

    print_records("interior clicks", &pos);
    print_records("border clicks", &near_border);
    for c in &near_border.positions {
        println!("  distance to border at {:?}: {:.2}", c.as_slice(), field[c.as_slice()]);
    }
    Ok(())
}
