//! Background band around labeled objects, the usual source of negative clicks.
use ndarray::Zip;

use crate::distance::DistanceTransform;
use crate::error::{Error, Result};
use crate::volume::LabeledVolume;

/// Background cells lying strictly closer than `max_distance` to any labeled cell,
/// returned as a single object with id `1`.
///
/// Splitting the band into connected components is left to the caller.
pub fn background_band(
    labels: &LabeledVolume,
    transform: &dyn DistanceTransform,
    max_distance: f32,
) -> Result<LabeledVolume> {
    if max_distance.is_nan() {
        return Err(Error::InvalidParameter("max_distance must not be NaN".into()));
    }

    let background = labels.as_array().mapv(|v| v == 0);
    let distance = transform.transform(&background)?;

    let mut band = background.clone();
    Zip::from(&mut band)
        .and(&distance)
        .for_each(|b, &d| *b = *b && d < max_distance);

    LabeledVolume::from_mask(&band)
}

#[cfg(test)]
mod tests {
    use ndarray::arr2;

    use super::*;
    use crate::distance::ExactEuclidean;
    use crate::volume::Coord;

    #[test]
    fn band_covers_background_near_objects_only() {
        let labels = LabeledVolume::new(arr2(&[[0, 0, 0, 0, 0, 0, 2]])).unwrap();
        let band = background_band(&labels, &ExactEuclidean::new(), 2.5).unwrap();

        assert_eq!(band.object_count(), 1);
        let row: Vec<u32> = band.as_array().iter().copied().collect();
        assert_eq!(row, vec![0, 0, 0, 0, 1, 1, 0]);
    }

    #[test]
    fn infinite_distance_keeps_all_background() {
        let labels = LabeledVolume::new(arr2(&[[1, 0], [0, 0]])).unwrap();
        let band = background_band(&labels, &ExactEuclidean::new(), f32::INFINITY).unwrap();
        assert_eq!(band.get(&Coord::new2(0, 0)), Some(0));
        assert_eq!(band.as_array().iter().filter(|&&v| v == 1).count(), 3);
    }

    #[test]
    fn nan_distance_is_rejected() {
        let labels = LabeledVolume::new(arr2(&[[1, 0]])).unwrap();
        assert!(matches!(
            background_band(&labels, &ExactEuclidean::new(), f32::NAN),
            Err(Error::InvalidParameter(_))
        ));
    }
}
