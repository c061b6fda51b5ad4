//! Application state and the actions the front end dispatches.
//!
//! `Workbench` owns every store: the matrix slots, the dataset and its chart
//! canvas, and the regression session with its own canvas. Each action
//! returns a typed result and leaves presentation to the caller.
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::data_handling::{Dataset, DatasetSummary};
use crate::error::{DeskError, Result};
use crate::io::read_table;
use crate::math::{MatrixSlots, Slot};
use crate::metrics::MetricsSummary;
use crate::regression::{CustomCsv, RegressionSession, SampleSet, TrainingReport};
use crate::report::{ChartCanvas, ChartKind, Interaction};

const VIZ_DISPLAY_FILE: &str = "viz_chart.html";
const LR_DISPLAY_FILE: &str = "lr_chart.html";

/// The post-training views of the regression tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegressionView {
    Predictions,
    Residuals,
    Coefficients,
}

pub struct Workbench {
    config: AppConfig,
    matrices: MatrixSlots,
    dataset: Option<Dataset>,
    viz_canvas: ChartCanvas,
    regression: RegressionSession,
    lr_canvas: ChartCanvas,
}

impl Workbench {
    pub fn new(config: AppConfig) -> Self {
        let viz_canvas = ChartCanvas::new(
            config.output_dir.join(VIZ_DISPLAY_FILE),
            config.open_browser,
        );
        let lr_canvas = ChartCanvas::new(config.output_dir.join(LR_DISPLAY_FILE), config.open_browser);
        Self {
            config,
            matrices: MatrixSlots::new(),
            dataset: None,
            viz_canvas,
            regression: RegressionSession::new(),
            lr_canvas,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Clear every store and both canvases.
    pub fn reset(&mut self) -> Result<()> {
        self.matrices.clear();
        self.dataset = None;
        self.regression.clear();
        self.viz_canvas.clear()?;
        self.lr_canvas.clear()?;
        log::info!("Workbench reset");
        Ok(())
    }

    // Matrix tab

    pub fn matrices(&self) -> &MatrixSlots {
        &self.matrices
    }

    pub fn matrices_mut(&mut self) -> &mut MatrixSlots {
        &mut self.matrices
    }

    // Dataset tab

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn load_sample(&mut self) -> DatasetSummary {
        let dataset = Dataset::sample();
        let summary = dataset.summary();
        self.dataset = Some(dataset);
        log::info!("Sample data loaded");
        summary
    }

    /// Replace the dataset with a CSV. On failure the previous dataset stays.
    pub fn load_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<DatasetSummary> {
        let dataset = read_table(path)?;
        let summary = dataset.summary();
        self.dataset = Some(dataset);
        Ok(summary)
    }

    pub fn preview(&self) -> Result<String> {
        let dataset = self.dataset.as_ref().ok_or(DeskError::NoData)?;
        Ok(dataset.preview(self.config.preview_rows))
    }

    /// Build `kind` from the dataset and display it, replacing the current
    /// chart. Returns the chart title.
    pub fn show_chart(&mut self, kind: ChartKind) -> Result<String> {
        let dataset = self.dataset.as_ref().ok_or(DeskError::NoData)?;
        let chart = kind.build(dataset, self.config.histogram_bins)?;
        let title = chart.title.clone();
        self.viz_canvas.show(chart)?;
        Ok(title)
    }

    pub fn viz_canvas(&self) -> &ChartCanvas {
        &self.viz_canvas
    }

    pub fn save_viz_chart(&self, path: Option<&Path>) -> Result<PathBuf> {
        self.viz_canvas
            .save(path, &self.config.output_dir, &self.config.image)
    }

    pub fn clear_viz_chart(&mut self) -> Result<()> {
        self.viz_canvas.clear()
    }

    pub fn set_viz_interaction(&mut self, interaction: Interaction) -> Result<PathBuf> {
        self.viz_canvas
            .set_interaction(interaction)
            .map(Path::to_path_buf)
    }

    // Regression tab

    pub fn regression(&self) -> &RegressionSession {
        &self.regression
    }

    pub fn load_housing(&mut self) -> Result<&SampleSet> {
        self.regression.load_housing(&self.config)
    }

    pub fn load_synthetic(&mut self) -> Result<&SampleSet> {
        self.regression.load_synthetic(&self.config)
    }

    /// First step of a custom load: read the file and offer its columns.
    pub fn read_regression_csv<P: AsRef<Path>>(&self, path: P) -> Result<CustomCsv> {
        CustomCsv::read(path)
    }

    pub fn load_custom(&mut self, csv: &CustomCsv, target: &str) -> Result<&SampleSet> {
        self.regression.load_custom(csv, target)
    }

    pub fn train(&mut self) -> Result<TrainingReport> {
        self.regression.train(&self.config)
    }

    /// Display a post-training chart. Returns the chart title.
    pub fn show_regression_view(&mut self, view: RegressionView) -> Result<String> {
        let chart = match view {
            RegressionView::Predictions => self.regression.actual_vs_predicted_chart(),
            RegressionView::Residuals => self.regression.residuals_chart(),
            RegressionView::Coefficients => self.regression.coefficients_chart(),
        }?;
        let title = chart.title.clone();
        self.lr_canvas.show(chart)?;
        Ok(title)
    }

    pub fn metrics(&self) -> Result<MetricsSummary> {
        self.regression.metrics_summary()
    }

    pub fn lr_canvas(&self) -> &ChartCanvas {
        &self.lr_canvas
    }

    pub fn save_lr_chart(&self, path: Option<&Path>) -> Result<PathBuf> {
        self.lr_canvas
            .save(path, &self.config.output_dir, &self.config.image)
    }

    pub fn clear_lr_chart(&mut self) -> Result<()> {
        self.lr_canvas.clear()
    }

    pub fn set_lr_interaction(&mut self, interaction: Interaction) -> Result<PathBuf> {
        self.lr_canvas
            .set_interaction(interaction)
            .map(Path::to_path_buf)
    }

    /// One status line per store.
    pub fn status(&self) -> Vec<String> {
        let mut lines = vec![
            self.matrices.status(Slot::A),
            self.matrices.status(Slot::B),
        ];
        lines.push(match &self.dataset {
            Some(d) => format!("Dataset: {} rows x {} columns", d.n_rows(), d.n_columns()),
            None => "Dataset: Not loaded".to_string(),
        });
        lines.push(format!("Regression: {}", self.regression.status()));
        lines
    }
}
