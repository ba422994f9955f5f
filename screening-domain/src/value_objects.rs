// Domain value objects
pub mod identifiers;
pub mod rule_id;

pub use identifiers::*;
pub use rule_id::*;
