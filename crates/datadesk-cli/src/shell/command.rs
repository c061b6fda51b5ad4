use std::path::PathBuf;
use std::str::FromStr;

use datadesk::math::Slot;
use datadesk::report::{ChartKind, Interaction};
use datadesk::RegressionView;

/// One line of shell input, parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Guide,
    About,
    Status,
    Reset,
    Quit,
    Matrix(MatrixCommand),
    Viz(VizCommand),
    Lr(LrCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatrixCommand {
    Input(Slot),
    Add,
    Subtract,
    Multiply,
    Transpose(Slot),
    Determinant(Slot),
    Swap,
    Clear,
    Show,
}

/// Actions shared by both chart canvases.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasCommand {
    Save(Option<PathBuf>),
    Clear,
    Interact(Interaction),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VizCommand {
    Sample,
    Load(PathBuf),
    Preview,
    Chart(ChartKind),
    Canvas(CanvasCommand),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LrCommand {
    Housing,
    Csv(PathBuf),
    Synthetic,
    Train,
    View(RegressionView),
    Metrics,
    Canvas(CanvasCommand),
}

impl Command {
    /// Parse a line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (group, remainder) = next_word(line);
        let group = group.to_lowercase();
        let (action, rest) = next_word(remainder);
        let action = (!action.is_empty()).then(|| action.to_lowercase());

        let command = match group.as_str() {
            "help" | "?" => Command::Help,
            "guide" => Command::Guide,
            "about" => Command::About,
            "status" => Command::Status,
            "reset" | "refresh" => Command::Reset,
            "quit" | "exit" => Command::Quit,
            "matrix" | "m" => Command::Matrix(parse_matrix(action.as_deref(), rest)?),
            "viz" | "v" => Command::Viz(parse_viz(action.as_deref(), rest)?),
            "lr" => Command::Lr(parse_lr(action.as_deref(), rest)?),
            other => return Err(format!("Unknown command '{}'. Type 'help' for a list of commands", other)),
        };
        Ok(Some(command))
    }
}

/// Split off the first word; the remainder keeps its inner spacing.
fn next_word(text: &str) -> (&str, &str) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => (&text[..end], text[end..].trim()),
        None => (text, ""),
    }
}

fn slot_arg(action: &str, rest: &str) -> Result<Slot, String> {
    if rest.is_empty() {
        return Err(format!("'matrix {}' needs a slot: a or b", action));
    }
    Slot::from_str(rest)
}

fn path_arg(command: &str, rest: &str) -> Result<PathBuf, String> {
    if rest.is_empty() {
        Err(format!("'{}' needs a file path", command))
    } else {
        Ok(PathBuf::from(rest))
    }
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    if rest.is_empty() {
        None
    } else {
        Some(PathBuf::from(rest))
    }
}

fn parse_matrix(action: Option<&str>, rest: &str) -> Result<MatrixCommand, String> {
    let action = action.ok_or("'matrix' needs an action; type 'help'")?;
    Ok(match action {
        "input" => MatrixCommand::Input(slot_arg(action, rest)?),
        "add" => MatrixCommand::Add,
        "sub" | "subtract" => MatrixCommand::Subtract,
        "mul" | "multiply" => MatrixCommand::Multiply,
        "transpose" | "t" => MatrixCommand::Transpose(slot_arg(action, rest)?),
        "det" | "determinant" => MatrixCommand::Determinant(slot_arg(action, rest)?),
        "swap" => MatrixCommand::Swap,
        "clear" => MatrixCommand::Clear,
        "show" => MatrixCommand::Show,
        other => return Err(format!("Unknown matrix action '{}'", other)),
    })
}

fn parse_canvas(action: &str, rest: &str) -> Option<CanvasCommand> {
    match action {
        "save" => Some(CanvasCommand::Save(optional_path(rest))),
        "clear" => Some(CanvasCommand::Clear),
        "zoom" => Some(CanvasCommand::Interact(Interaction::Zoom)),
        "pan" => Some(CanvasCommand::Interact(Interaction::Pan)),
        _ => None,
    }
}

fn parse_viz(action: Option<&str>, rest: &str) -> Result<VizCommand, String> {
    let action = action.ok_or("'viz' needs an action; type 'help'")?;
    if let Some(canvas) = parse_canvas(action, rest) {
        return Ok(VizCommand::Canvas(canvas));
    }
    Ok(match action {
        "sample" => VizCommand::Sample,
        "load" => VizCommand::Load(path_arg("viz load", rest)?),
        "preview" => VizCommand::Preview,
        "chart" => {
            if rest.is_empty() {
                return Err("'viz chart' needs a chart kind".to_string());
            }
            VizCommand::Chart(ChartKind::from_str(rest)?)
        }
        // `viz bar` as a shorthand for `viz chart bar`
        other => match ChartKind::from_str(other) {
            Ok(kind) => VizCommand::Chart(kind),
            Err(_) => return Err(format!("Unknown viz action '{}'", other)),
        },
    })
}

fn parse_lr(action: Option<&str>, rest: &str) -> Result<LrCommand, String> {
    let action = action.ok_or("'lr' needs an action; type 'help'")?;
    if let Some(canvas) = parse_canvas(action, rest) {
        return Ok(LrCommand::Canvas(canvas));
    }
    Ok(match action {
        "housing" | "predefined" => LrCommand::Housing,
        "csv" | "custom" => LrCommand::Csv(path_arg("lr csv", rest)?),
        "synthetic" | "sample" => LrCommand::Synthetic,
        "train" => LrCommand::Train,
        "predictions" => LrCommand::View(RegressionView::Predictions),
        "residuals" => LrCommand::View(RegressionView::Residuals),
        "coefficients" | "importance" => LrCommand::View(RegressionView::Coefficients),
        "metrics" => LrCommand::Metrics,
        other => return Err(format!("Unknown lr action '{}'", other)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_groups_and_arguments() {
        assert_eq!(
            Command::parse("matrix det B").unwrap(),
            Some(Command::Matrix(MatrixCommand::Determinant(Slot::B)))
        );
        assert_eq!(
            Command::parse("viz chart heatmap").unwrap(),
            Some(Command::Viz(VizCommand::Chart(ChartKind::Heatmap)))
        );
        assert_eq!(
            Command::parse("lr save out/my chart.html").unwrap(),
            Some(Command::Lr(LrCommand::Canvas(CanvasCommand::Save(Some(
                PathBuf::from("out/my chart.html")
            )))))
        );
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn paths_keep_their_spacing() {
        assert_eq!(
            Command::parse("viz load  data/my  sales.csv ").unwrap(),
            Some(Command::Viz(VizCommand::Load(PathBuf::from("data/my  sales.csv"))))
        );
        assert_eq!(
            Command::parse("LR csv\tC:/Data Sets/x.csv").unwrap(),
            Some(Command::Lr(LrCommand::Csv(PathBuf::from("C:/Data Sets/x.csv"))))
        );
    }

    #[test]
    fn rejects_unknown_input() {
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("matrix det").is_err());
        assert!(Command::parse("viz chart radar").is_err());
        assert!(Command::parse("lr csv").is_err());
    }
}
