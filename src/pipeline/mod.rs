//! Pipeline module - the cleaning stages and their orchestration

pub mod error;
pub mod loader;
pub mod missing;
pub mod normalize;
pub mod outliers;
pub mod runner;
pub mod table;

pub use error::*;
pub use loader::*;
pub use missing::*;
pub use normalize::*;
pub use outliers::*;
pub use runner::*;
pub use table::*;
