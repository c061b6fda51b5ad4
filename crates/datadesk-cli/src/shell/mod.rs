//! Line-oriented interactive session over the workbench.
//!
//! Every command maps to one action of the core. Failures print as a single
//! `Error: <message>` line and the session continues. Multi-step inputs (the
//! matrix form, target selection) re-prompt on invalid input until they
//! succeed or the user types `cancel`.
pub mod command;
pub mod text;

use std::io::{BufRead, Write};

use anyhow::Result;
use datadesk::math::{MatrixForm, Slot};
use datadesk::regression::CustomCsv;
use datadesk::report::Interaction;
use datadesk::{DeskError, Workbench};

pub use command::{CanvasCommand, Command, LrCommand, MatrixCommand, VizCommand};

const PROMPT: &str = "datadesk> ";
const CANCEL: &str = "cancel";

/// Whether the session keeps reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Outcome of one step of a multi-line form.
enum FormInput {
    Line(String),
    Cancelled,
}

#[derive(Clone, Copy)]
enum CanvasTab {
    Viz,
    Lr,
}

pub struct Shell<R, W> {
    workbench: Workbench,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(workbench: Workbench, input: R, output: W) -> Self {
        Self {
            workbench,
            input,
            output,
        }
    }

    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{}", text::BANNER)?;
        loop {
            write!(self.output, "{}", PROMPT)?;
            self.output.flush()?;
            let line = match self.read_line()? {
                Some(line) => line,
                None => {
                    writeln!(self.output)?;
                    break;
                }
            };
            if self.execute_line(&line)? == Flow::Quit {
                break;
            }
        }
        log::info!("Session ended");
        Ok(())
    }

    /// Parse and run one line. Only output failures are returned as errors.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => Ok(Flow::Continue),
            Err(message) => {
                writeln!(self.output, "Error: {}", message)?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        log::debug!("Executing {:?}", command);
        let outcome = match command {
            Command::Quit => {
                writeln!(self.output, "Goodbye!")?;
                return Ok(Flow::Quit);
            }
            Command::Help => self.print(text::HELP),
            Command::Guide => self.print(text::GUIDE),
            Command::About => self.print(text::ABOUT),
            Command::Status => self.status(),
            Command::Reset => self.reset(),
            Command::Matrix(cmd) => self.matrix(cmd),
            Command::Viz(cmd) => self.viz(cmd),
            Command::Lr(cmd) => self.lr(cmd),
        };
        match outcome {
            Ok(()) => {}
            Err(Failure::Desk(err)) => {
                log::debug!("{:?} error: {}", err.kind(), err);
                writeln!(self.output, "Error: {}", err)?;
            }
            Err(Failure::Output(err)) => return Err(err.into()),
        }
        Ok(Flow::Continue)
    }

    fn print(&mut self, text: &str) -> Outcome {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn status(&mut self) -> Outcome {
        for line in self.workbench.status() {
            writeln!(self.output, "{}", line)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Outcome {
        self.workbench.reset()?;
        writeln!(self.output, "Refreshed ✓")?;
        Ok(())
    }

    // Matrix tab

    fn matrix(&mut self, command: MatrixCommand) -> Outcome {
        let wb = &mut self.workbench;
        match command {
            MatrixCommand::Input(slot) => return self.matrix_form(slot),
            MatrixCommand::Add => {
                let result = wb.matrices().add()?;
                writeln!(self.output, "A + B:\n{}", result)?;
            }
            MatrixCommand::Subtract => {
                let result = wb.matrices().subtract()?;
                writeln!(self.output, "A - B:\n{}", result)?;
            }
            MatrixCommand::Multiply => {
                let result = wb.matrices().multiply()?;
                writeln!(self.output, "A × B:\n{}", result)?;
            }
            MatrixCommand::Transpose(slot) => {
                let result = wb.matrices().transpose(slot)?;
                writeln!(self.output, "Transpose of {}:\n{}", slot, result)?;
            }
            MatrixCommand::Determinant(slot) => {
                let det = wb.matrices().determinant(slot)?;
                writeln!(self.output, "Determinant of {}: {}", slot, det)?;
            }
            MatrixCommand::Swap => {
                wb.matrices_mut().swap();
                writeln!(self.output, "Matrices swapped successfully!")?;
                for slot in [Slot::A, Slot::B] {
                    writeln!(self.output, "{}", wb.matrices().status(slot))?;
                }
            }
            MatrixCommand::Clear => {
                wb.matrices_mut().clear();
                writeln!(self.output, "All matrices cleared.")?;
            }
            MatrixCommand::Show => {
                for slot in [Slot::A, Slot::B] {
                    writeln!(self.output, "{}", wb.matrices().status(slot))?;
                    if let Some(matrix) = wb.matrices().get(slot) {
                        writeln!(self.output, "{}", matrix)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// The matrix entry form. Invalid input shows the error and restarts the
    /// form; `cancel` or end of input leaves the slot unchanged.
    fn matrix_form(&mut self, slot: Slot) -> Outcome {
        writeln!(
            self.output,
            "Input Matrix {} (type '{}' at any prompt to abort)",
            slot, CANCEL
        )?;
        loop {
            let rows = match self.prompt("Rows: ")? {
                FormInput::Line(l) => l,
                FormInput::Cancelled => return self.form_cancelled(),
            };
            let cols = match self.prompt("Columns: ")? {
                FormInput::Line(l) => l,
                FormInput::Cancelled => return self.form_cancelled(),
            };
            let (n_rows, n_cols) = match datadesk::math::parse::parse_dimensions(&rows, &cols) {
                Ok(dims) => dims,
                Err(err) => {
                    writeln!(self.output, "Error: {}", err)?;
                    continue;
                }
            };

            writeln!(
                self.output,
                "Enter {} rows of {} values (space or comma separated):",
                n_rows, n_cols
            )?;
            let mut body = Vec::new();
            while body.len() < n_rows {
                match self.prompt(&format!("Row {}: ", body.len() + 1))? {
                    FormInput::Line(l) if l.trim().is_empty() => continue,
                    FormInput::Line(l) => body.push(l),
                    FormInput::Cancelled => return self.form_cancelled(),
                }
            }

            match MatrixForm::new(rows, cols, body.join("\n")).parse() {
                Ok(matrix) => {
                    let (r, c) = matrix.shape();
                    writeln!(self.output, "Matrix {} loaded: ({}, {})\n{}", slot, r, c, matrix)?;
                    self.workbench.matrices_mut().set(slot, matrix);
                    return Ok(());
                }
                Err(err) => writeln!(self.output, "Error: {}", err)?,
            }
        }
    }

    fn form_cancelled(&mut self) -> Outcome {
        writeln!(self.output, "Cancelled; nothing changed.")?;
        Ok(())
    }

    // Data visualization tab

    fn viz(&mut self, command: VizCommand) -> Outcome {
        match command {
            VizCommand::Sample => {
                let summary = self.workbench.load_sample();
                writeln!(self.output, "Sample data loaded!\n{}", summary)?;
            }
            VizCommand::Load(path) => {
                self.working(&format!("Loading {}...", path.display()))?;
                let summary = self.workbench.load_csv(&path)?;
                writeln!(self.output, "CSV loaded successfully!\n{}", summary)?;
            }
            VizCommand::Preview => {
                let preview = self.workbench.preview()?;
                write!(self.output, "{}", preview)?;
            }
            VizCommand::Chart(kind) => {
                let title = self.workbench.show_chart(kind)?;
                let path = self.workbench.viz_canvas().display_path().to_path_buf();
                writeln!(self.output, "✓ {} → {}", title, path.display())?;
            }
            VizCommand::Canvas(cmd) => return self.canvas(CanvasTab::Viz, cmd),
        }
        Ok(())
    }

    // Regression tab

    fn lr(&mut self, command: LrCommand) -> Outcome {
        match command {
            LrCommand::Housing => {
                self.working("Loading predefined data...")?;
                let status = self.workbench.load_housing()?.status();
                writeln!(
                    self.output,
                    "{}\nPredefined California Housing data loaded! Run 'lr train' to train.",
                    status
                )?;
            }
            LrCommand::Csv(path) => {
                self.working(&format!("Loading {}...", path.display()))?;
                let csv = self.workbench.read_regression_csv(&path)?;
                return self.target_selection(&csv);
            }
            LrCommand::Synthetic => {
                let status = self.workbench.load_synthetic()?.status();
                writeln!(self.output, "{}\nSample data generated successfully!", status)?;
            }
            LrCommand::Train => {
                self.working("Training model... Please wait")?;
                let report = self.workbench.train()?;
                writeln!(
                    self.output,
                    "{}\nModel trained successfully!\nR² Score: {:.4}\nMAE: {:.4}",
                    report, report.metrics.r2, report.metrics.mae
                )?;
            }
            LrCommand::View(view) => {
                let title = self.workbench.show_regression_view(view)?;
                let path = self.workbench.lr_canvas().display_path().to_path_buf();
                writeln!(self.output, "✓ {} → {}", title, path.display())?;
            }
            LrCommand::Metrics => {
                let summary = self.workbench.metrics()?;
                writeln!(self.output, "{}", summary)?;
            }
            LrCommand::Canvas(cmd) => return self.canvas(CanvasTab::Lr, cmd),
        }
        Ok(())
    }

    /// Target column selection for a custom regression CSV. Accepts a column
    /// name or its number; re-prompts until a load succeeds or is cancelled.
    fn target_selection(&mut self, csv: &CustomCsv) -> Outcome {
        let columns: Vec<String> = csv.column_names().iter().map(|c| c.to_string()).collect();
        writeln!(self.output, "Select the target column (dependent variable):")?;
        for (i, name) in columns.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, name)?;
        }
        loop {
            let answer = match self.prompt("Target: ")? {
                FormInput::Line(l) => l.trim().to_string(),
                FormInput::Cancelled => return self.form_cancelled(),
            };
            if answer.is_empty() {
                writeln!(self.output, "Error: Please select a target column")?;
                continue;
            }
            let target = match answer.parse::<usize>() {
                Ok(n) if n >= 1 && n <= columns.len() && !columns.contains(&answer) => {
                    columns[n - 1].clone()
                }
                _ => answer,
            };
            match self.workbench.load_custom(csv, &target) {
                Ok(samples) => {
                    let status = samples.status();
                    let (n, k) = (samples.n_samples(), samples.n_features());
                    writeln!(
                        self.output,
                        "{}\nCustom data loaded successfully!\nSamples: {}\nFeatures: {}",
                        status, n, k
                    )?;
                    return Ok(());
                }
                Err(err) => writeln!(self.output, "Error: Failed to load data: {}", err)?,
            }
        }
    }

    fn canvas(&mut self, tab: CanvasTab, command: CanvasCommand) -> Outcome {
        let wb = &mut self.workbench;
        match command {
            CanvasCommand::Save(path) => {
                let saved = match tab {
                    CanvasTab::Viz => wb.save_viz_chart(path.as_deref()),
                    CanvasTab::Lr => wb.save_lr_chart(path.as_deref()),
                }?;
                writeln!(self.output, "Chart saved to:\n{}", saved.display())?;
            }
            CanvasCommand::Clear => {
                match tab {
                    CanvasTab::Viz => wb.clear_viz_chart(),
                    CanvasTab::Lr => wb.clear_lr_chart(),
                }?;
                writeln!(self.output, "Chart cleared.")?;
            }
            CanvasCommand::Interact(interaction) => {
                let path = match tab {
                    CanvasTab::Viz => wb.set_viz_interaction(interaction),
                    CanvasTab::Lr => wb.set_lr_interaction(interaction),
                }?;
                let mode = match interaction {
                    Interaction::Zoom => "Zoom",
                    Interaction::Pan => "Pan",
                };
                writeln!(self.output, "{} mode enabled → {}", mode, path.display())?;
            }
        }
        Ok(())
    }

    /// Static notice printed before a blocking call.
    fn working(&mut self, message: &str) -> Outcome {
        writeln!(self.output, "{}", message)?;
        self.output.flush()?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Outcome<FormInput> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        Ok(match self.read_line()? {
            Some(line) if line.trim().eq_ignore_ascii_case(CANCEL) => FormInput::Cancelled,
            Some(line) => FormInput::Line(line),
            None => FormInput::Cancelled,
        })
    }

    fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Either a workbench error, shown to the user, or a failure writing output,
/// which ends the session.
enum Failure {
    Desk(DeskError),
    Output(std::io::Error),
}

impl From<DeskError> for Failure {
    fn from(err: DeskError) -> Self {
        Failure::Desk(err)
    }
}

impl From<std::io::Error> for Failure {
    fn from(err: std::io::Error) -> Self {
        Failure::Output(err)
    }
}

type Outcome<T = ()> = std::result::Result<T, Failure>;

/// Run a session on the process's stdin and stdout.
pub fn run_stdio(workbench: Workbench) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut shell = Shell::new(workbench, stdin.lock(), stdout.lock());
    shell.run()
}

/// Convenience for tests and scripts: run `script` and return the output.
pub fn run_script(workbench: Workbench, script: &str) -> Result<String> {
    let mut shell = Shell::new(workbench, script.as_bytes(), Vec::new());
    shell.run()?;
    Ok(String::from_utf8_lossy(&shell.into_output()).into_owned())
}
