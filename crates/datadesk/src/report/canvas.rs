//! Single-slot chart display.
//!
//! A `ChartCanvas` holds at most one chart. Showing a chart replaces the
//! previous one and renders it as interactive HTML to the canvas display
//! file; plotly's mode bar provides zoom and pan on the rendered page.
use std::fmt;
use std::path::{Path, PathBuf};

use plotly::layout::DragMode;

use crate::config::ImageConfig;
use crate::error::{DeskError, Result};
use crate::report::plots::Chart;

/// Default drag behaviour of the displayed chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Zoom,
    Pan,
}

impl Interaction {
    fn drag_mode(self) -> DragMode {
        match self {
            Interaction::Zoom => DragMode::Zoom,
            Interaction::Pan => DragMode::Pan,
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interaction::Zoom => f.write_str("zoom"),
            Interaction::Pan => f.write_str("pan"),
        }
    }
}

/// File formats a chart can be saved as, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Html,
    Png,
    Jpeg,
    Webp,
    Svg,
    Pdf,
}

impl SaveFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "html" | "htm" => Ok(SaveFormat::Html),
            "png" => Ok(SaveFormat::Png),
            "jpg" | "jpeg" => Ok(SaveFormat::Jpeg),
            "webp" => Ok(SaveFormat::Webp),
            "svg" => Ok(SaveFormat::Svg),
            "pdf" => Ok(SaveFormat::Pdf),
            "" => Err(DeskError::UnsupportedFormat(format!(
                "{} (no file extension)",
                path.display()
            ))),
            other => Err(DeskError::UnsupportedFormat(other.to_string())),
        }
    }
}

pub struct ChartCanvas {
    display_path: PathBuf,
    open_browser: bool,
    current: Option<Chart>,
    interaction: Interaction,
}

impl ChartCanvas {
    pub fn new(display_path: impl Into<PathBuf>, open_browser: bool) -> Self {
        Self {
            display_path: display_path.into(),
            open_browser,
            current: None,
            interaction: Interaction::Zoom,
        }
    }

    pub fn display_path(&self) -> &Path {
        &self.display_path
    }

    pub fn current(&self) -> Option<&Chart> {
        self.current.as_ref()
    }

    pub fn has_chart(&self) -> bool {
        self.current.is_some()
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Replace the displayed chart and render it. Returns the display file.
    pub fn show(&mut self, chart: Chart) -> Result<&Path> {
        let mut chart = chart;
        self.interaction = Interaction::Zoom;
        apply_interaction(&mut chart, self.interaction);
        self.current = Some(chart);
        self.render()?;
        Ok(&self.display_path)
    }

    /// Switch zoom/pan on the displayed chart and re-render it.
    pub fn set_interaction(&mut self, interaction: Interaction) -> Result<&Path> {
        let chart = self.current.as_mut().ok_or(DeskError::NoChart)?;
        apply_interaction(chart, interaction);
        self.interaction = interaction;
        self.render()?;
        Ok(&self.display_path)
    }

    /// Drop the displayed chart and delete its display file.
    pub fn clear(&mut self) -> Result<()> {
        self.current = None;
        self.interaction = Interaction::Zoom;
        match std::fs::remove_file(&self.display_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DeskError::io(
                format!("Failed to remove {}", self.display_path.display()),
                e,
            )),
        }
    }

    /// Write the displayed chart to `path`, or to a timestamped HTML file in
    /// `output_dir` when no path is given.
    pub fn save(&self, path: Option<&Path>, output_dir: &Path, image: &ImageConfig) -> Result<PathBuf> {
        let chart = self.current.as_ref().ok_or(DeskError::NoChart)?;
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => output_dir.join(default_file_name()),
        };
        let format = SaveFormat::from_path(&path)?;
        ensure_parent(&path)?;

        match format {
            SaveFormat::Html => write_html(chart, &path)?,
            _ => write_static(chart, &path, format, image)?,
        }
        log::info!("Saved chart '{}' to {}", chart.title, path.display());
        Ok(path)
    }

    fn render(&self) -> Result<()> {
        let chart = match &self.current {
            Some(c) => c,
            None => return Ok(()),
        };
        ensure_parent(&self.display_path)?;
        write_html(chart, &self.display_path)?;
        log::debug!("Rendered '{}' to {}", chart.title, self.display_path.display());
        if self.open_browser {
            chart.plot.show();
        }
        Ok(())
    }
}

fn apply_interaction(chart: &mut Chart, interaction: Interaction) {
    let layout = chart.plot.layout().clone().drag_mode(interaction.drag_mode());
    chart.plot.set_layout(layout);
}

/// `chart_YYYYmmdd_HHMMSS.html`
pub fn default_file_name() -> String {
    format!("chart_{}.html", chrono::Local::now().format("%Y%m%d_%H%M%S"))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir)
            .map_err(|e| DeskError::io(format!("Failed to create directory {}", dir.display()), e)),
        _ => Ok(()),
    }
}

fn write_html(chart: &Chart, path: &Path) -> Result<()> {
    std::fs::write(path, chart.plot.to_html())
        .map_err(|e| DeskError::io(format!("Failed to write {}", path.display()), e))
}

#[cfg(feature = "static-export")]
fn write_static(chart: &Chart, path: &Path, format: SaveFormat, image: &ImageConfig) -> Result<()> {
    use plotly::ImageFormat;

    let image_format = match format {
        SaveFormat::Png => ImageFormat::PNG,
        SaveFormat::Jpeg => ImageFormat::JPEG,
        SaveFormat::Webp => ImageFormat::WEBP,
        SaveFormat::Svg => ImageFormat::SVG,
        SaveFormat::Pdf => ImageFormat::PDF,
        SaveFormat::Html => return write_html(chart, path),
    };
    // plotly panics when kaleido is missing or the export fails
    let export = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        chart
            .plot
            .write_image(path, image_format, image.width, image.height, image.scale)
    }));
    match export {
        Ok(()) if path.exists() => Ok(()),
        _ => Err(DeskError::Computation(format!(
            "Static export to {} failed; save as .html instead",
            path.display()
        ))),
    }
}

#[cfg(not(feature = "static-export"))]
fn write_static(_chart: &Chart, path: &Path, format: SaveFormat, _image: &ImageConfig) -> Result<()> {
    Err(DeskError::UnsupportedFormat(format!(
        "{:?} export of {} needs the `static-export` feature; save as .html instead",
        format,
        path.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(SaveFormat::from_path(Path::new("a.HTML")).unwrap(), SaveFormat::Html);
        assert_eq!(SaveFormat::from_path(Path::new("a.jpg")).unwrap(), SaveFormat::Jpeg);
        assert!(SaveFormat::from_path(Path::new("a.docx")).is_err());
        assert!(SaveFormat::from_path(Path::new("chart")).is_err());
    }

    #[cfg(not(feature = "static-export"))]
    #[test]
    fn image_formats_name_the_missing_feature() {
        let dir = tempfile::tempdir().unwrap();
        let mut canvas = ChartCanvas::new(dir.path().join("view.html"), false);
        canvas
            .show(crate::report::ChartKind::Bar.build(&crate::data_handling::Dataset::sample(), 15).unwrap())
            .unwrap();
        let err = canvas
            .save(Some(&dir.path().join("chart.png")), dir.path(), &ImageConfig::default())
            .unwrap_err();
        assert!(err.to_string().contains("`static-export` feature"), "{}", err);
    }

    #[test]
    fn default_name_is_timestamped_html() {
        let name = default_file_name();
        assert!(name.starts_with("chart_") && name.ends_with(".html"));
        assert_eq!(name.len(), "chart_20240101_120000.html".len());
    }
}
