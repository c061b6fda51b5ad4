use std::fmt;
use std::str::FromStr;

use itertools_num::linspace;
use ndarray::Array1;
use plotly::common::{ColorScale, ColorScalePalette, DashType, Fill, Line, Marker, Mode, Orientation};
use plotly::layout::{Axis, BarMode, Layout};
use plotly::{Bar, BoxPlot, HeatMap, Histogram, Pie, Plot, Scatter};

use crate::data_handling::{Column, Dataset};
use crate::error::{DeskError, Result};
use crate::stats;

/// A built figure together with its title.
pub struct Chart {
    pub title: String,
    pub plot: Plot,
}

impl Chart {
    fn new(title: impl Into<String>, mut plot: Plot, layout: Layout) -> Self {
        let title = title.into();
        plot.set_layout(layout.title(title.as_str()));
        Self { title, plot }
    }
}

impl fmt::Debug for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chart").field("title", &self.title).finish()
    }
}

/// The eight dataset chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Scatter,
    Line,
    Histogram,
    Heatmap,
    Pie,
    Box,
    Area,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::Bar,
        ChartKind::Scatter,
        ChartKind::Line,
        ChartKind::Histogram,
        ChartKind::Heatmap,
        ChartKind::Pie,
        ChartKind::Box,
        ChartKind::Area,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Scatter => "scatter",
            ChartKind::Line => "line",
            ChartKind::Histogram => "histogram",
            ChartKind::Heatmap => "heatmap",
            ChartKind::Pie => "pie",
            ChartKind::Box => "box",
            ChartKind::Area => "area",
        }
    }

    /// Build this chart from `dataset`. Each kind picks its own columns and
    /// fails when the required column kind is absent.
    pub fn build(self, dataset: &Dataset, histogram_bins: usize) -> Result<Chart> {
        let chart = match self {
            ChartKind::Bar => bar_chart(dataset),
            ChartKind::Scatter => scatter_chart(dataset),
            ChartKind::Line => line_chart(dataset),
            ChartKind::Histogram => histogram_chart(dataset, histogram_bins),
            ChartKind::Heatmap => correlation_heatmap(dataset),
            ChartKind::Pie => pie_chart(dataset),
            ChartKind::Box => box_plot(dataset),
            ChartKind::Area => area_chart(dataset),
        }?;
        log::debug!("Built {} chart '{}'", self, chart.title);
        Ok(chart)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ChartKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.as_str()).collect();
                format!("unknown chart '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

fn no_numeric() -> DeskError {
    DeskError::MissingColumnKind("No numeric columns found".to_string())
}

/// First `n` numeric columns, failing when there are none.
fn leading_numeric(dataset: &Dataset, n: usize) -> Result<Vec<&Column>> {
    let columns: Vec<&Column> = dataset.numeric_columns().into_iter().take(n).collect();
    if columns.is_empty() {
        return Err(no_numeric());
    }
    Ok(columns)
}

fn numeric_cells(column: &Column) -> Vec<Option<f64>> {
    column.as_numeric().map(|v| v.to_vec()).unwrap_or_default()
}

fn row_index(dataset: &Dataset) -> Vec<usize> {
    (0..dataset.n_rows()).collect()
}

/// Bars of the first numeric column over the first categorical column.
pub fn bar_chart(dataset: &Dataset) -> Result<Chart> {
    let categorical = dataset.first_categorical();
    let numeric = dataset.numeric_columns().into_iter().next();
    let (categorical, numeric) = match (categorical, numeric) {
        (Some(c), Some(n)) => (c, n),
        _ => {
            return Err(DeskError::MissingColumnKind(
                "CSV must have categorical and numeric columns".to_string(),
            ))
        }
    };

    let labels: Vec<String> = (0..dataset.n_rows()).map(|r| categorical.cell_text(r)).collect();
    let trace = Bar::new(labels, numeric_cells(numeric)).name(numeric.name.as_str());

    let mut plot = Plot::new();
    plot.add_trace(trace);
    let layout = Layout::new()
        .x_axis(Axis::new().title(categorical.name.as_str()))
        .y_axis(Axis::new().title(numeric.name.as_str()));
    Ok(Chart::new(
        format!("{} by {}", numeric.name, categorical.name),
        plot,
        layout,
    ))
}

/// The first two numeric columns against each other, one trace per
/// category of the first categorical column when there is one.
pub fn scatter_chart(dataset: &Dataset) -> Result<Chart> {
    let numeric = dataset.numeric_columns();
    if numeric.len() < 2 {
        return Err(DeskError::MissingColumnKind(
            "CSV needs at least 2 numeric columns".to_string(),
        ));
    }
    let (x_col, y_col) = (numeric[0], numeric[1]);
    let xs = numeric_cells(x_col);
    let ys = numeric_cells(y_col);
    let marker = || Marker::new().size(10).opacity(0.6);

    let mut plot = Plot::new();
    match dataset.first_categorical().and_then(Column::as_categorical) {
        Some(categories) => {
            let mut groups: Vec<&str> = Vec::new();
            for value in categories.iter().flatten() {
                if !groups.contains(&value.as_str()) {
                    groups.push(value);
                }
            }
            for group in groups {
                let rows: Vec<usize> = (0..dataset.n_rows())
                    .filter(|&r| categories[r].as_deref() == Some(group))
                    .collect();
                let trace = Scatter::new(
                    rows.iter().map(|&r| xs[r]).collect(),
                    rows.iter().map(|&r| ys[r]).collect(),
                )
                .mode(Mode::Markers)
                .marker(marker())
                .name(group);
                plot.add_trace(trace);
            }
        }
        None => {
            let trace = Scatter::new(xs, ys)
                .mode(Mode::Markers)
                .marker(marker())
                .name(y_col.name.as_str());
            plot.add_trace(trace);
        }
    }

    let layout = Layout::new()
        .x_axis(Axis::new().title(x_col.name.as_str()))
        .y_axis(Axis::new().title(y_col.name.as_str()));
    Ok(Chart::new(format!("{} vs {}", y_col.name, x_col.name), plot, layout))
}

/// Up to three numeric columns against the row index.
pub fn line_chart(dataset: &Dataset) -> Result<Chart> {
    let mut plot = Plot::new();
    for column in leading_numeric(dataset, 3)? {
        let trace = Scatter::new(row_index(dataset), numeric_cells(column))
            .mode(Mode::LinesMarkers)
            .marker(Marker::new().size(3))
            .name(column.name.as_str());
        plot.add_trace(trace);
    }
    let layout = Layout::new()
        .x_axis(Axis::new().title("Index"))
        .y_axis(Axis::new().title("Value"));
    Ok(Chart::new("Line Chart", plot, layout))
}

/// Up to three numeric columns overlaid as translucent histograms.
pub fn histogram_chart(dataset: &Dataset, bins: usize) -> Result<Chart> {
    let mut plot = Plot::new();
    for column in leading_numeric(dataset, 3)? {
        let trace = Histogram::new(column.present_values())
            .name(column.name.as_str())
            .opacity(0.6)
            .n_bins_x(bins);
        plot.add_trace(trace);
    }
    let layout = Layout::new()
        .bar_mode(BarMode::Overlay)
        .x_axis(Axis::new().title("Value"))
        .y_axis(Axis::new().title("Frequency"));
    Ok(Chart::new("Histogram", plot, layout))
}

/// Pairwise correlation of every numeric column, annotated with two
/// decimals.
pub fn correlation_heatmap(dataset: &Dataset) -> Result<Chart> {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        return Err(no_numeric());
    }
    let names: Vec<String> = numeric.iter().map(|c| c.name.clone()).collect();
    let cells: Vec<&[Option<f64>]> = numeric.iter().filter_map(|c| c.as_numeric()).collect();
    let corr = stats::correlation_matrix(&cells);

    let mut label_x = Vec::new();
    let mut label_y = Vec::new();
    let mut label_text = Vec::new();
    for (i, row) in corr.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            label_x.push(names[j].clone());
            label_y.push(names[i].clone());
            label_text.push(format!("{:.2}", value));
        }
    }

    let heatmap = HeatMap::new(names.clone(), names, corr)
        .color_scale(ColorScale::Palette(ColorScalePalette::Blues));
    let labels = Scatter::new(label_x, label_y)
        .mode(Mode::Text)
        .text_array(label_text)
        .show_legend(false);

    let mut plot = Plot::new();
    plot.add_trace(heatmap);
    plot.add_trace(labels);
    Ok(Chart::new("Correlation Heatmap", plot, Layout::new()))
}

/// Share of the eight most frequent values of the first categorical column.
pub fn pie_chart(dataset: &Dataset) -> Result<Chart> {
    let column = dataset.first_categorical().ok_or_else(|| {
        DeskError::MissingColumnKind("No categorical columns found for pie chart".to_string())
    })?;
    let counts: Vec<(String, usize)> = dataset.value_counts(column).into_iter().take(8).collect();
    let (labels, values): (Vec<String>, Vec<usize>) = counts.into_iter().unzip();

    let mut plot = Plot::new();
    plot.add_trace(Pie::new(values).labels(labels));
    Ok(Chart::new(format!("Pie Chart: {}", column.name), plot, Layout::new()))
}

/// Up to five numeric columns, missing values dropped per column.
pub fn box_plot(dataset: &Dataset) -> Result<Chart> {
    let mut plot = Plot::new();
    for column in leading_numeric(dataset, 5)? {
        plot.add_trace(BoxPlot::new(column.present_values()).name(column.name.as_str()));
    }
    let layout = Layout::new().y_axis(Axis::new().title("Value"));
    Ok(Chart::new("Box Plot", plot, layout))
}

/// Up to three numeric columns filled down to zero.
pub fn area_chart(dataset: &Dataset) -> Result<Chart> {
    let mut plot = Plot::new();
    for column in leading_numeric(dataset, 3)? {
        let trace = Scatter::new(row_index(dataset), numeric_cells(column))
            .mode(Mode::Lines)
            .fill(Fill::ToZeroY)
            .opacity(0.5)
            .name(column.name.as_str());
        plot.add_trace(trace);
    }
    let layout = Layout::new()
        .x_axis(Axis::new().title("Index"))
        .y_axis(Axis::new().title("Value"));
    Ok(Chart::new("Area Chart", plot, layout))
}

fn reference_line(xs: Vec<f64>, ys: Vec<f64>, name: &str) -> Box<Scatter<f64, f64>> {
    Scatter::new(xs, ys)
        .mode(Mode::Lines)
        .name(name)
        .line(Line::new().color("red").dash(DashType::Dash).width(2.0))
}

fn min_max(values: &Array1<f64>) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Test targets against predictions with the `y = x` diagonal.
pub fn actual_vs_predicted(actual: &Array1<f64>, predicted: &Array1<f64>, source: &str) -> Result<Chart> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(DeskError::Computation(format!(
            "actual and predicted values differ in length ({} vs {})",
            actual.len(),
            predicted.len()
        )));
    }
    let (lo, hi) = min_max(actual);
    let diagonal: Vec<f64> = linspace(lo, hi, 100).collect();

    let points = Scatter::new(actual.to_vec(), predicted.to_vec())
        .mode(Mode::Markers)
        .marker(Marker::new().size(5).opacity(0.5))
        .name("Test samples");

    let mut plot = Plot::new();
    plot.add_trace(points);
    plot.add_trace(reference_line(diagonal.clone(), diagonal, "y = x (Perfect prediction)"));
    let layout = Layout::new()
        .x_axis(Axis::new().title("Actual Values"))
        .y_axis(Axis::new().title("Predicted Values"));
    Ok(Chart::new(
        format!("Actual vs Predicted Values ({})", source),
        plot,
        layout,
    ))
}

/// Residuals (`actual - predicted`) against predictions with a zero line.
pub fn residual_plot(actual: &Array1<f64>, predicted: &Array1<f64>) -> Result<Chart> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(DeskError::Computation(format!(
            "actual and predicted values differ in length ({} vs {})",
            actual.len(),
            predicted.len()
        )));
    }
    let residuals = actual - predicted;
    let (lo, hi) = min_max(predicted);

    let points = Scatter::new(predicted.to_vec(), residuals.to_vec())
        .mode(Mode::Markers)
        .marker(Marker::new().size(5).opacity(0.5))
        .name("Residuals");

    let mut plot = Plot::new();
    plot.add_trace(points);
    plot.add_trace(reference_line(vec![lo, hi], vec![0.0, 0.0], "Zero residual"));
    let layout = Layout::new()
        .x_axis(Axis::new().title("Predicted Values"))
        .y_axis(Axis::new().title("Residuals"));
    Ok(Chart::new("Residual Plot", plot, layout))
}

/// Horizontal bars of the model coefficients, smallest first.
pub fn coefficient_chart(feature_names: &[String], coefficients: &Array1<f64>) -> Result<Chart> {
    if feature_names.len() != coefficients.len() {
        return Err(DeskError::FeatureMismatch {
            coefficients: coefficients.len(),
            features: feature_names.len(),
        });
    }
    let mut pairs: Vec<(&String, f64)> = feature_names.iter().zip(coefficients.iter().copied()).collect();
    pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
    let (names, values): (Vec<String>, Vec<f64>) =
        pairs.into_iter().map(|(n, v)| (n.clone(), v)).unzip();

    let mut plot = Plot::new();
    plot.add_trace(
        Bar::new(values, names)
            .orientation(Orientation::Horizontal)
            .name("Coefficient"),
    );
    let layout = Layout::new().x_axis(Axis::new().title("Coefficient Value"));
    Ok(Chart::new("Feature Importance (Coefficients)", plot, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn numeric_only() -> Dataset {
        Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0), Some(3.0)]),
            Column::numeric("b", vec![Some(3.0), Some(1.0), Some(2.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn chart_kind_parses_case_insensitively() {
        assert_eq!("Heatmap".parse::<ChartKind>().unwrap(), ChartKind::Heatmap);
        assert!("radar".parse::<ChartKind>().is_err());
    }

    #[test]
    fn bar_chart_needs_a_categorical_column() {
        let err = bar_chart(&numeric_only()).unwrap_err();
        assert_eq!(err.to_string(), "CSV must have categorical and numeric columns");
    }

    #[test]
    fn sample_charts_have_expected_titles() {
        let data = Dataset::sample();
        assert_eq!(bar_chart(&data).unwrap().title, "Units_Sold by Product");
        assert_eq!(scatter_chart(&data).unwrap().title, "Revenue vs Units_Sold");
        assert_eq!(pie_chart(&data).unwrap().title, "Pie Chart: Product");
    }

    #[test]
    fn every_kind_renders_the_sample() {
        let data = Dataset::sample();
        for kind in ChartKind::ALL {
            let chart = kind.build(&data, 15).unwrap();
            assert!(chart.plot.to_html().contains("plotly"), "{}", kind);
        }
    }

    #[test]
    fn coefficients_are_sorted_and_checked() {
        let names = vec!["x".to_string(), "y".to_string(), "z".to_string()];
        let chart = coefficient_chart(&names, &array![0.5, -2.0, 1.0]).unwrap();
        let json = chart.plot.to_json();
        assert!(json.contains(r#"["y","x","z"]"#), "{}", json);

        let err = coefficient_chart(&names[..2], &array![0.5, -2.0, 1.0]).unwrap_err();
        assert!(matches!(err, DeskError::FeatureMismatch { coefficients: 3, features: 2 }));
    }

    fn traces(chart: &Chart) -> Vec<serde_json::Value> {
        let json: serde_json::Value = serde_json::from_str(&chart.plot.to_json()).unwrap();
        json["data"].as_array().unwrap().clone()
    }

    #[test]
    fn pie_keeps_the_eight_most_frequent_categories() {
        // k0 appears 10 times, k1 9 times, ... k9 once
        let mut values = Vec::new();
        for k in 0..10 {
            for _ in 0..(10 - k) {
                values.push(Some(format!("k{}", k)));
            }
        }
        let data = Dataset::new(vec![Column::categorical("kind", values)]).unwrap();
        let chart = pie_chart(&data).unwrap();

        let traces = traces(&chart);
        assert_eq!(traces.len(), 1);
        let labels: Vec<&str> = traces[0]["labels"]
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l.as_str().unwrap())
            .collect();
        assert_eq!(labels, vec!["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"]);
        assert_eq!(traces[0]["values"][0], 10);
        assert_eq!(traces[0]["values"][7], 3);
    }

    #[test]
    fn scatter_has_one_trace_per_category() {
        // grouped by the first categorical column, Category is ignored
        let chart = scatter_chart(&Dataset::sample()).unwrap();
        let names: Vec<String> = traces(&chart)
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Laptop", "Mouse", "Monitor", "Keyboard", "Webcam", "Headset"]);

        let data = Dataset::new(vec![
            Column::numeric("x", vec![Some(1.0), Some(2.0), Some(3.0)]),
            Column::categorical(
                "group",
                vec![Some("g".to_string()), Some("h".to_string()), Some("g".to_string())],
            ),
            Column::numeric("y", vec![Some(4.0), Some(5.0), Some(6.0)]),
        ])
        .unwrap();
        let traces = traces(&scatter_chart(&data).unwrap());
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0]["name"], "g");
        assert_eq!(traces[0]["x"], serde_json::json!([1.0, 3.0]));
        assert_eq!(traces[1]["y"], serde_json::json!([5.0]));
    }

    #[test]
    fn scatter_without_categories_is_a_single_trace() {
        let chart = scatter_chart(&numeric_only()).unwrap();
        assert_eq!(traces(&chart).len(), 1);
        assert_eq!(chart.title, "b vs a");
    }

    #[test]
    fn area_fills_to_zero_for_up_to_three_columns() {
        let data = Dataset::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(2.0)]),
            Column::numeric("b", vec![Some(2.0), Some(1.0)]),
            Column::numeric("c", vec![Some(0.5), Some(0.5)]),
            Column::numeric("d", vec![Some(9.0), Some(9.0)]),
        ])
        .unwrap();
        let traces = traces(&area_chart(&data).unwrap());
        assert_eq!(traces.len(), 3);
        for trace in &traces {
            assert_eq!(trace["fill"], "tozeroy");
        }
    }
}
