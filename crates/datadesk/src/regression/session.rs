//! Regression session state machine.
//!
//! `Empty -> DataLoaded -> Trained`. Any successful load moves the session
//! to `DataLoaded`, discarding a previously trained model. Training produces
//! a fresh `Trained` state; a failed training leaves the state untouched.
use std::fmt;
use std::path::Path;

use ndarray::{Array1, Array2};

use crate::config::AppConfig;
use crate::error::{DeskError, Result};
use crate::metrics::{MetricsSummary, RegressionMetrics};
use crate::models::{LinearRegression, RegressorModel};
use crate::preprocessing::StandardScaler;
use crate::regression::datasets::{self, CustomCsv, SampleSet};
use crate::regression::split::train_test_split;
use crate::report::plots::{self, Chart};

/// A fitted model with its test-partition artifacts.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub samples: SampleSet,
    pub scaler: StandardScaler,
    pub model: LinearRegression,
    /// Feature names recorded at training time.
    pub feature_names: Vec<String>,
    pub y_test: Array1<f64>,
    pub predictions: Array1<f64>,
    pub metrics: RegressionMetrics,
    pub n_train: usize,
}

impl TrainedModel {
    pub fn coefficients(&self) -> Result<&Array1<f64>> {
        self.model.coefficients().ok_or(DeskError::NotTrained)
    }

    /// Predict unscaled feature rows with the training-time scaler.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        predict_scaled(&self.scaler, &self.model, x)
    }
}

fn predict_scaled(
    scaler: &StandardScaler,
    model: &LinearRegression,
    x: &Array2<f64>,
) -> Result<Array1<f64>> {
    model.predict(&scaler.transform(x)?)
}

#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Empty,
    DataLoaded(SampleSet),
    Trained(Box<TrainedModel>),
}

/// Summary returned by a successful training run.
#[derive(Debug, Clone, Copy)]
pub struct TrainingReport {
    pub n_train: usize,
    pub n_test: usize,
    pub metrics: RegressionMetrics,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "✓ Model Trained | MAE: {:.4} | MSE: {:.4} | R²: {:.4}",
            self.metrics.mae, self.metrics.mse, self.metrics.r2
        )
    }
}

#[derive(Debug, Default)]
pub struct RegressionSession {
    state: SessionState,
}

impl RegressionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.state, SessionState::Trained(_))
    }

    /// The loaded sample set, whether trained or not.
    pub fn samples(&self) -> Option<&SampleSet> {
        match &self.state {
            SessionState::Empty => None,
            SessionState::DataLoaded(s) => Some(s),
            SessionState::Trained(t) => Some(&t.samples),
        }
    }

    pub fn trained(&self) -> Result<&TrainedModel> {
        match &self.state {
            SessionState::Trained(t) => Ok(t),
            _ => Err(DeskError::NotTrained),
        }
    }

    /// Replace the sample set. Any trained model is discarded.
    pub fn load(&mut self, samples: SampleSet) -> Result<&SampleSet> {
        if self.is_trained() {
            log::info!("New data loaded; previous model discarded");
        }
        self.state = SessionState::DataLoaded(samples);
        self.samples().ok_or(DeskError::NoSamples)
    }

    pub fn load_housing(&mut self, config: &AppConfig) -> Result<&SampleSet> {
        let samples = datasets::load_housing(&config.housing_path, &config.housing_target)?;
        self.load(samples)
    }

    pub fn load_synthetic(&mut self, config: &AppConfig) -> Result<&SampleSet> {
        let samples = datasets::synthetic(&config.synthetic)?;
        self.load(samples)
    }

    pub fn load_custom(&mut self, csv: &CustomCsv, target: &str) -> Result<&SampleSet> {
        let samples = csv.select_target(target)?;
        self.load(samples)
    }

    /// Read a CSV for regression; the target is chosen afterwards with
    /// [`RegressionSession::load_custom`].
    pub fn read_custom<P: AsRef<Path>>(path: P) -> Result<CustomCsv> {
        CustomCsv::read(path)
    }

    /// Split, standardize, fit OLS and evaluate on the held-out partition.
    pub fn train(&mut self, config: &AppConfig) -> Result<TrainingReport> {
        let samples = self.samples().ok_or(DeskError::NoSamples)?.clone();

        let split = train_test_split(&samples.x, &samples.y, config.test_fraction, config.random_seed)?;
        let (scaler, x_train) = StandardScaler::fit_transform(&split.x_train)?;

        let mut model = LinearRegression::new();
        model.fit(&x_train, &split.y_train)?;
        let predictions = predict_scaled(&scaler, &model, &split.x_test)?;
        let metrics = RegressionMetrics::compute(split.y_test.view(), predictions.view())?;

        let report = TrainingReport {
            n_train: split.y_train.len(),
            n_test: split.y_test.len(),
            metrics,
        };
        log::info!(
            "Trained {} on {} samples ({}): R² {:.4}",
            model.name(),
            report.n_train,
            samples.source,
            metrics.r2
        );

        let feature_names = samples.feature_names.clone();
        self.state = SessionState::Trained(Box::new(TrainedModel {
            samples,
            scaler,
            model,
            feature_names,
            y_test: split.y_test,
            predictions,
            metrics,
            n_train: report.n_train,
        }));
        Ok(report)
    }

    pub fn actual_vs_predicted_chart(&self) -> Result<Chart> {
        let t = self.trained()?;
        plots::actual_vs_predicted(&t.y_test, &t.predictions, t.samples.source.label())
    }

    pub fn residuals_chart(&self) -> Result<Chart> {
        let t = self.trained()?;
        plots::residual_plot(&t.y_test, &t.predictions)
    }

    /// Fails with a feature mismatch when the recorded names and the model's
    /// coefficients disagree in count.
    pub fn coefficients_chart(&self) -> Result<Chart> {
        let t = self.trained()?;
        plots::coefficient_chart(&t.feature_names, t.coefficients()?)
    }

    pub fn metrics_summary(&self) -> Result<MetricsSummary> {
        Ok(MetricsSummary(self.trained()?.metrics))
    }

    pub fn clear(&mut self) {
        self.state = SessionState::Empty;
    }

    /// Status line for the regression tab.
    pub fn status(&self) -> String {
        match &self.state {
            SessionState::Empty => "No data loaded".to_string(),
            SessionState::DataLoaded(s) => s.status(),
            SessionState::Trained(t) => format!(
                "{} | trained on {}: R² {:.4}",
                t.samples.status(),
                t.n_train,
                t.metrics.r2
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_require_training() {
        let mut session = RegressionSession::new();
        assert!(matches!(session.metrics_summary(), Err(DeskError::NotTrained)));
        session.load_synthetic(&AppConfig::default()).unwrap();
        assert!(matches!(session.residuals_chart(), Err(DeskError::NotTrained)));
    }

    #[test]
    fn train_without_data_is_rejected() {
        let mut session = RegressionSession::new();
        let err = session.train(&AppConfig::default()).unwrap_err();
        assert!(matches!(err, DeskError::NoSamples));
        assert!(matches!(session.state(), SessionState::Empty));
    }

    #[test]
    fn failed_training_keeps_previous_model() {
        let config = AppConfig::default();
        let mut session = RegressionSession::new();
        session.load_synthetic(&config).unwrap();
        session.train(&config).unwrap();

        let bad = AppConfig {
            test_fraction: 1.5,
            ..AppConfig::default()
        };
        assert!(session.train(&bad).is_err());
        assert!(session.is_trained());
    }

    #[test]
    fn trained_model_reproduces_test_predictions_from_raw_rows() {
        let config = AppConfig::default();
        let mut session = RegressionSession::new();
        session.load_synthetic(&config).unwrap();
        session.train(&config).unwrap();

        let trained = session.trained().unwrap();
        let split = train_test_split(
            &trained.samples.x,
            &trained.samples.y,
            config.test_fraction,
            config.random_seed,
        )
        .unwrap();
        let again = trained.predict(&split.x_test).unwrap();
        assert_eq!(again, trained.predictions);
        assert_eq!(trained.n_train, 80);
        assert!(session.status().contains("| trained on 80: R²"), "{}", session.status());
    }
}
