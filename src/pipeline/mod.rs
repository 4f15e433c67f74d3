//! Pipeline module - load, clean, split, fit and evaluate

pub mod cleaner;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod missing;
pub mod model;
pub mod split;

pub use cleaner::*;
pub use encoder::*;
pub use error::PipelineError;
pub use loader::*;
pub use metrics::*;
pub use missing::*;
pub use model::{sigmoid, threshold, FittedModel, LogisticRegression, SolverConfig};
pub use split::*;
