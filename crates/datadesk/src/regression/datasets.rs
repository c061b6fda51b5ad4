//! Feature/target sample sets and their three loaders.
use std::fmt;
use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

use crate::config::SyntheticConfig;
use crate::data_handling::{Column, Dataset};
use crate::error::{DeskError, Result};
use crate::io::read_table;

/// Where the current sample set came from.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSource {
    Housing,
    CustomCsv { path: PathBuf, target: String },
    Synthetic,
}

impl SampleSource {
    pub fn label(&self) -> &'static str {
        match self {
            SampleSource::Housing => "Predefined Data (Housing)",
            SampleSource::CustomCsv { .. } => "Custom Data",
            SampleSource::Synthetic => "Synthetic Data",
        }
    }

    fn status_prefix(&self) -> &'static str {
        match self {
            SampleSource::Housing => "Predefined Data Loaded",
            SampleSource::CustomCsv { .. } => "Custom Data Loaded",
            SampleSource::Synthetic => "Sample Data Generated",
        }
    }
}

impl fmt::Display for SampleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Numeric features `x` (rows are samples) with a continuous target `y`.
#[derive(Debug, Clone)]
pub struct SampleSet {
    pub x: Array2<f64>,
    pub y: Array1<f64>,
    pub feature_names: Vec<String>,
    pub target_name: String,
    pub source: SampleSource,
}

impl SampleSet {
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// One-line status such as `✓ Custom Data Loaded | 20 samples, 3 features`.
    pub fn status(&self) -> String {
        format!(
            "✓ {} | {} samples, {} features",
            self.source.status_prefix(),
            self.n_samples(),
            self.n_features()
        )
    }

    /// Build a sample set from a dataset whose rows are all complete.
    /// Every non-target numeric column becomes a feature.
    fn from_complete_dataset(dataset: &Dataset, target: &str, source: SampleSource) -> Result<Self> {
        let target_col = dataset
            .column(target)
            .ok_or_else(|| DeskError::ColumnNotFound(target.to_string()))?;
        let y_values = target_col.as_numeric().ok_or_else(|| {
            DeskError::MissingColumnKind(format!("Target column '{}' must be numeric", target))
        })?;

        let features: Vec<&Column> = dataset
            .numeric_columns()
            .into_iter()
            .filter(|c| c.name != target)
            .collect();
        if features.is_empty() {
            return Err(DeskError::MissingColumnKind(
                "No numeric features found in the data".to_string(),
            ));
        }

        let n_rows = dataset.n_rows();
        let y: Array1<f64> = y_values.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        let x = Array2::from_shape_fn((n_rows, features.len()), |(r, c)| {
            features[c]
                .as_numeric()
                .and_then(|v| v[r])
                .unwrap_or(f64::NAN)
        });

        Ok(Self {
            x,
            y,
            feature_names: features.iter().map(|c| c.name.clone()).collect(),
            target_name: target.to_string(),
            source,
        })
    }
}

/// A CSV read for regression that still waits for its target column.
#[derive(Debug, Clone)]
pub struct CustomCsv {
    path: PathBuf,
    dataset: Dataset,
}

impl CustomCsv {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dataset = read_table(&path)?;
        Ok(Self { path, dataset })
    }

    pub fn from_dataset(path: impl Into<PathBuf>, dataset: Dataset) -> Self {
        Self {
            path: path.into(),
            dataset,
        }
    }

    /// Columns offered for target selection.
    pub fn column_names(&self) -> Vec<&str> {
        self.dataset.column_names()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop incomplete rows, split off `target` and keep the numeric
    /// remainder as features.
    pub fn select_target(&self, target: &str) -> Result<SampleSet> {
        if self.dataset.column(target).is_none() {
            return Err(DeskError::ColumnNotFound(target.to_string()));
        }
        let clean = self.dataset.drop_missing_rows();
        let samples = SampleSet::from_complete_dataset(
            &clean,
            target,
            SampleSource::CustomCsv {
                path: self.path.clone(),
                target: target.to_string(),
            },
        )?;
        log::info!(
            "Custom data loaded from {}: {} samples, {} features, target '{}'",
            self.path.display(),
            samples.n_samples(),
            samples.n_features(),
            target
        );
        Ok(samples)
    }
}

/// Read the California housing table. Every column must be numeric.
pub fn load_housing<P: AsRef<Path>>(path: P, target: &str) -> Result<SampleSet> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DeskError::io(
            format!(
                "California housing data not found at {}. Save scikit-learn's \
                 fetch_california_housing(as_frame=True).frame as CSV there or set housing_path",
                path.display()
            ),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        ));
    }
    let dataset = read_table(path)?;
    if let Some(bad) = dataset.categorical_columns().first() {
        return Err(DeskError::MissingColumnKind(format!(
            "Housing data column '{}' is not numeric",
            bad.name
        )));
    }
    let clean = dataset.drop_missing_rows();
    let samples = SampleSet::from_complete_dataset(&clean, target, SampleSource::Housing)?;
    log::info!(
        "Housing data loaded: {} samples, {} features",
        samples.n_samples(),
        samples.n_features()
    );
    Ok(samples)
}

/// Standard-normal features with `y = x · coefficients + noise_std · ε`.
/// Deterministic for a given seed.
pub fn synthetic(config: &SyntheticConfig) -> Result<SampleSet> {
    let n_features = config.coefficients.len();
    if config.n_samples == 0 || n_features == 0 {
        return Err(DeskError::Config(
            "synthetic data needs at least one sample and one coefficient".to_string(),
        ));
    }

    let normal = Normal::new(0.0, 1.0).map_err(|e| DeskError::Computation(e.to_string()))?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let x = Array2::from_shape_simple_fn((config.n_samples, n_features), || normal.sample(&mut rng));
    let coefficients = Array1::from_vec(config.coefficients.clone());
    let noise = Array1::from_shape_simple_fn(config.n_samples, || normal.sample(&mut rng));
    let y = x.dot(&coefficients) + noise * config.noise_std;

    log::info!(
        "Generated {} synthetic samples with {} features",
        config.n_samples,
        n_features
    );
    Ok(SampleSet {
        x,
        y,
        feature_names: (1..=n_features).map(|i| format!("Feature_{}", i)).collect(),
        target_name: "Target".to_string(),
        source: SampleSource::Synthetic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Dataset {
        Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0), None, Some(4.0)]),
            Column::categorical(
                "label",
                vec![Some("x".into()), Some("y".into()), Some("z".into()), Some("w".into())],
            ),
            Column::numeric("b", vec![Some(0.5), Some(0.1), Some(0.2), Some(0.3)]),
            Column::numeric("price", vec![Some(10.0), Some(20.0), Some(30.0), Some(40.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn select_target_drops_missing_and_non_numeric() {
        let csv = CustomCsv::from_dataset("t.csv", table());
        let samples = csv.select_target("price").unwrap();
        assert_eq!(samples.feature_names, vec!["a", "b"]);
        assert_eq!(samples.n_samples(), 3);
        assert_eq!(samples.y.to_vec(), vec![10.0, 20.0, 40.0]);
        assert_eq!(samples.source.label(), "Custom Data");
    }

    #[test]
    fn select_target_requires_numeric_features() {
        let dataset = Dataset::new(vec![
            Column::categorical("name", vec![Some("a".into()), Some("b".into())]),
            Column::numeric("y", vec![Some(1.0), Some(2.0)]),
        ])
        .unwrap();
        let err = CustomCsv::from_dataset("t.csv", dataset)
            .select_target("y")
            .unwrap_err();
        assert_eq!(err.to_string(), "No numeric features found in the data");
    }

    #[test]
    fn unknown_or_text_target_is_rejected() {
        let csv = CustomCsv::from_dataset("t.csv", table());
        assert!(matches!(csv.select_target("nope"), Err(DeskError::ColumnNotFound(_))));
        assert!(matches!(
            csv.select_target("label"),
            Err(DeskError::MissingColumnKind(_))
        ));
    }

    #[test]
    fn synthetic_is_reproducible() {
        let config = SyntheticConfig::default();
        let a = synthetic(&config).unwrap();
        let b = synthetic(&config).unwrap();
        assert_eq!(a.x.dim(), (100, 3));
        assert_eq!(a.y, b.y);
        assert_eq!(a.feature_names, vec!["Feature_1", "Feature_2", "Feature_3"]);
    }
}
