//! Linear regression workflow: sample loaders, the train/test split and the
//! session state machine that owns a fitted model.
pub mod datasets;
pub mod session;
pub mod split;

pub use datasets::{CustomCsv, SampleSet, SampleSource};
pub use session::{RegressionSession, SessionState, TrainedModel, TrainingReport};
pub use split::{train_test_split, TrainTestSplit};
