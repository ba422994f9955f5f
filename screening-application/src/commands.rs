pub mod screen_commands;

pub use screen_commands::*;
