pub mod canvas;
pub mod plots;

pub use canvas::{ChartCanvas, Interaction, SaveFormat};
pub use plots::{Chart, ChartKind};
