//! Physical supply sources: the battery and the solar array.

/// Battery storage holding the charge carried across hours.
pub mod battery;
/// Solar availability policies.
pub mod solar;

pub use battery::Battery;
pub use solar::{SolarArray, SolarPolicy};
