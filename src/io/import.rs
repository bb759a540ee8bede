//! CSV import of hourly demand profiles.
//!
//! Expects a header row and then one row per hour, `time_slot,demand_kwh`.
//! Only the second column is read; the first is a free-form label.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::error::DispatchError;
use crate::sim::HourlyProfile;

/// Failure to turn a CSV file into an [`HourlyProfile`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("cannot open demand CSV: {0}")]
    Io(#[from] io::Error),
    #[error("malformed demand CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: expected a demand column after the time slot")]
    MissingColumn { row: usize },
    #[error("row {row}: \"{value}\" is not a number")]
    InvalidNumber { row: usize, value: String },
    #[error(transparent)]
    Profile(#[from] DispatchError),
}

/// Reads a demand profile from a CSV file.
///
/// # Errors
///
/// Returns an [`ImportError`] if the file cannot be read, a row is
/// malformed, or the data does not hold exactly 24 finite values.
pub fn import_profile_csv(path: &Path) -> Result<HourlyProfile, ImportError> {
    let file = File::open(path)?;
    let profile = read_profile_csv(io::BufReader::new(file))?;
    debug!(path = %path.display(), total_kwh = profile.total_kwh(), "imported demand profile");
    Ok(profile)
}

/// Reads a demand profile from any CSV source.
///
/// # Errors
///
/// See [`import_profile_csv`].
pub fn read_profile_csv(reader: impl Read) -> Result<HourlyProfile, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut values = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        // 1-based, counting the header
        let row = i + 2;
        let field = record.get(1).ok_or(ImportError::MissingColumn { row })?;
        let value = field.parse::<f64>().map_err(|_| ImportError::InvalidNumber {
            row,
            value: field.to_string(),
        })?;
        values.push(value);
    }

    Ok(HourlyProfile::try_from(values)?)
}
