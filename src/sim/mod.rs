/// Eco window definition for scheduled grid recharging.
pub mod eco;
pub mod engine;
/// Flat-reduction estimates for the simplified operating modes.
pub mod estimate;
pub mod profile;
pub mod summary;
pub mod types;

pub use engine::{Engine, simulate};
pub use profile::{HOURS_PER_DAY, HourlyProfile};
pub use types::{DispatchConfig, HourlyResult, Simulation};
