// Serving layer: a read-only context over the trained artifacts and the
// interactive views built on it. Rendering is left to the caller.

pub mod chase_calc;
pub mod context;
pub mod dream_team;
pub mod faceoff;
pub mod simulator;
pub mod venue_scout;

pub use context::{ServingContext, ViewError};
