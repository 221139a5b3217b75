// Cricket match analytics: data loading, derived lookups, feature encoding,
// the two outcome models, and the training pipeline that ties them together.

pub mod bundle;
pub mod chase;
pub mod data;
pub mod encoding;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod players;
pub mod prematch;
pub mod venue;
