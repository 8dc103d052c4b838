//! Keyword-heuristic detection of concerning content and significant moments.

pub mod concern;
pub mod keywords;
pub mod moment;

pub use concern::{compose_feedback, ConcernDetector, ConcernWeights};
pub use moment::{MomentDetector, SignificanceScore};
