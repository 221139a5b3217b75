// Shared infrastructure: configuration, artifact persistence, rounding.

pub mod artifacts;
pub mod config;
pub mod round;
