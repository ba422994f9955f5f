// Port Traits (Interfaces)
// Define what the domain needs from infrastructure, and the seam every rule plugs into

pub mod detector;
pub mod loader;

pub use detector::*;
pub use loader::*;
