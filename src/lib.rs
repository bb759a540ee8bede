//! Hourly energy dispatch simulator for a home or office with solar, a
//! battery and a grid connection.

/// REST API over a finished run.
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod devices;
pub mod error;
/// CSV import and export.
pub mod io;
/// Dispatch engine, profiles, summaries and estimates.
pub mod sim;

pub use error::DispatchError;
