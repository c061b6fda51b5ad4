use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{DeskError, Result};

/// Train and test partitions of a feature/target pair.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Shuffle the rows with a seeded RNG and hold out `ceil(n * test_fraction)`
/// of them. The same seed always yields the same partitions.
pub fn train_test_split(
    x: &Array2<f64>,
    y: &Array1<f64>,
    test_fraction: f64,
    seed: u64,
) -> Result<TrainTestSplit> {
    let n_samples = x.nrows();
    if n_samples != y.len() {
        return Err(DeskError::Computation(format!(
            "Found input variables with inconsistent numbers of samples: [{}, {}]",
            n_samples,
            y.len()
        )));
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(DeskError::Computation(format!(
            "test_size={} should be in the range (0, 1)",
            test_fraction
        )));
    }

    let n_test = (n_samples as f64 * test_fraction).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(DeskError::Computation(format!(
            "With n_samples={}, test_size={} the resulting train set will be empty. Adjust the data or the test fraction.",
            n_samples, test_fraction
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let (test_idx, train_idx) = indices.split_at(n_test);

    log::debug!("Split {} samples into {} train / {} test", n_samples, n_train, n_test);

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), train_idx),
        x_test: x.select(Axis(0), test_idx),
        y_train: y.select(Axis(0), train_idx),
        y_test: y.select(Axis(0), test_idx),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array2::from_shape_fn((n, 2), |(r, c)| (r * 2 + c) as f64);
        let y = Array1::from_shape_fn(n, |r| r as f64);
        (x, y)
    }

    #[test]
    fn partitions_cover_every_row_once() {
        let (x, y) = data(10);
        let split = train_test_split(&x, &y, 0.2, 42).unwrap();
        assert_eq!(split.y_test.len(), 2);
        assert_eq!(split.y_train.len(), 8);

        let mut seen: Vec<f64> = split.y_train.iter().chain(split.y_test.iter()).copied().collect();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(seen, (0..10).map(|v| v as f64).collect::<Vec<_>>());

        // rows stay aligned with their targets
        for (row, target) in split.x_test.rows().into_iter().zip(split.y_test.iter()) {
            assert_eq!(row[0], target * 2.0);
        }
    }

    #[test]
    fn same_seed_same_split() {
        let (x, y) = data(25);
        let a = train_test_split(&x, &y, 0.2, 7).unwrap();
        let b = train_test_split(&x, &y, 0.2, 7).unwrap();
        assert_eq!(a.y_test, b.y_test);
    }

    #[test]
    fn single_sample_cannot_be_split() {
        let (x, y) = data(1);
        assert!(train_test_split(&x, &y, 0.2, 42).is_err());
    }
}
