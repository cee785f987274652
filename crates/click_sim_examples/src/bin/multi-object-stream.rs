use click_sim::prelude::*;
use click_sim_examples::{init_tracing, print_records};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let mut data = Array2::<u32>::zeros((24, 24));
    data.slice_mut(ndarray::s![2..10, 2..10]).fill(1);
    data.slice_mut(ndarray::s![12..22, 4..8]).fill(2);
    data.slice_mut(ndarray::s![6..20, 12..22]).fill(3);
    let labels = LabeledVolume::new(data)?;
    println!("objects: {}", labels.object_count());

    let sampler = UniformSampler::new(&labels, UniformConfig::new(2))?;
    for (i, set) in sampler.stream(StdRng::seed_from_u64(3)).take(3).enumerate() {
        print_records(&format!("uniform sample {i}"), &set?);
    }

    let spread = BorderBiasedSampler::new(&labels, BorderBiasedConfig::new(3).with_band(0.0, 2.0))?;
    let mut rng = StdRng::seed_from_u64(3);
    print_records("border-biased", &spread.produce(&mut rng)?);
    Ok(())
}
