//! datadesk: matrix arithmetic, dataset charting and linear regression.
//!
//! The crate is the UI-independent core of the workbench. It provides a
//! two-slot matrix store, a tabular dataset store with eight chart kinds
//! rendered through plotly, and a regression session that trains an
//! ordinary-least-squares model on standardized features.
//!
//! Every action returns a typed [`error::DeskError`] on failure so a front
//! end decides how to present it; the core never prompts or prints.
pub mod app;
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod metrics;
pub mod models;
pub mod preprocessing;
pub mod regression;
pub mod report;
pub mod stats;

pub use app::{RegressionView, Workbench};
pub use config::AppConfig;
pub use error::{DeskError, ErrorKind, Result};
