// Domain services: shared primitives and the five screening rules

pub mod burst;
pub mod detectors;
pub mod frequency_spike;
pub mod grouping;
pub mod threshold;
pub mod time_of_day;
pub mod window;

pub use burst::*;
pub use detectors::*;
pub use frequency_spike::*;
pub use grouping::*;
pub use threshold::*;
pub use time_of_day::*;
pub use window::*;
