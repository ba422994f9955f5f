// Domain entities
pub mod detection_config;
pub mod flagged_set;
pub mod transaction;

pub use detection_config::*;
pub use flagged_set::*;
pub use transaction::*;
