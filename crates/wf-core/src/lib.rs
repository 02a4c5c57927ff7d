//! wf-core: stable foundation for wayfind.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - timing (env-gated wall-clock timers)

pub mod numeric;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use numeric::*;
pub use timing::Timer;
