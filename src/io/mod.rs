/// CSV export of hourly dispatch results.
pub mod export;
/// CSV import of hourly demand profiles.
pub mod import;
