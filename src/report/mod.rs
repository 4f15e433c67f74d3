//! Report module - metrics, plots, run summary and export

pub mod export;
pub mod plots;
pub mod scores;
pub mod summary;

pub use export::*;
pub use plots::*;
pub use scores::*;
pub use summary::*;
