use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DeskError, Result};

/// Central configuration for the workbench.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Seed of the train/test shuffle.
    pub random_seed: u64,
    /// Fraction of samples held out for evaluation.
    pub test_fraction: f64,
    pub synthetic: SyntheticConfig,
    /// CSV holding the California housing table.
    pub housing_path: PathBuf,
    pub housing_target: String,
    /// Directory for rendered charts and default save targets.
    pub output_dir: PathBuf,
    pub preview_rows: usize,
    pub histogram_bins: usize,
    /// Open each rendered chart in the system browser.
    pub open_browser: bool,
    pub image: ImageConfig,
}

/// Parameters of the synthetic regression generator.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct SyntheticConfig {
    pub n_samples: usize,
    pub coefficients: Vec<f64>,
    pub noise_std: f64,
    pub seed: u64,
}

/// Size of static image exports.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ImageConfig {
    pub width: usize,
    pub height: usize,
    pub scale: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            random_seed: 42,
            test_fraction: 0.2,
            synthetic: SyntheticConfig::default(),
            housing_path: PathBuf::from("data/california_housing.csv"),
            housing_target: "MedHouseVal".to_string(),
            output_dir: PathBuf::from("datadesk_out"),
            preview_rows: 20,
            histogram_bins: 15,
            open_browser: false,
            image: ImageConfig::default(),
        }
    }
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            n_samples: 100,
            coefficients: vec![2.5, -1.2, 0.8],
            noise_std: 0.5,
            seed: 42,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            scale: 3.0,
        }
    }
}

impl AppConfig {
    /// Reject values the workbench cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(DeskError::Config(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.synthetic.n_samples == 0 {
            return Err(DeskError::Config(
                "synthetic.n_samples must be positive".to_string(),
            ));
        }
        if self.synthetic.coefficients.is_empty() {
            return Err(DeskError::Config(
                "synthetic.coefficients must not be empty".to_string(),
            ));
        }
        if !(self.synthetic.noise_std >= 0.0) {
            return Err(DeskError::Config(format!(
                "synthetic.noise_std must be non-negative, got {}",
                self.synthetic.noise_std
            )));
        }
        if self.histogram_bins == 0 {
            return Err(DeskError::Config(
                "histogram_bins must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
