//! CSV export for hourly dispatch results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::profile::HourLabel;
use crate::sim::types::HourlyResult;

/// Column header for the hourly dispatch table.
const HEADER: &str = "hour,time_slot,demand_kwh,solar_kwh,battery_kwh,grid_kwh,\
                      grid_charge_kwh,battery_level_kwh,cost_yen";

/// Exports hourly results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Arguments
///
/// * `results` - Per-hour dispatch results
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[HourlyResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes hourly results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[HourlyResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            r.hour.to_string(),
            HourLabel(r.hour).to_string(),
            format!("{:.4}", r.demand_kwh),
            format!("{:.4}", r.solar_kwh),
            format!("{:.4}", r.battery_kwh),
            format!("{:.4}", r.grid_kwh),
            format!("{:.4}", r.grid_charge_kwh),
            format!("{:.4}", r.battery_level_kwh),
            format!("{:.2}", r.cost_yen),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_hour(hour: usize) -> HourlyResult {
        HourlyResult {
            hour,
            demand_kwh: 1.0,
            solar_kwh: 0.25,
            battery_kwh: 0.5,
            grid_kwh: 0.25,
            grid_charge_kwh: 0.0,
            battery_level_kwh: 1.5,
            cost_yen: 8.75,
        }
    }

    fn render(results: &[HourlyResult]) -> String {
        let mut buf = Vec::new();
        write_csv(results, &mut buf).expect("write to Vec");
        String::from_utf8(buf).expect("utf-8")
    }

    #[test]
    fn header_lists_every_column() {
        let output = render(&[make_hour(0)]);
        assert_eq!(
            output.lines().next(),
            Some(
                "hour,time_slot,demand_kwh,solar_kwh,battery_kwh,grid_kwh,\
                 grid_charge_kwh,battery_level_kwh,cost_yen"
            )
        );
    }

    #[test]
    fn row_count_matches_hour_count() {
        let results: Vec<HourlyResult> = (0..24).map(make_hour).collect();
        // 1 header + 24 data rows
        assert_eq!(render(&results).lines().count(), 25);
    }

    #[test]
    fn rows_carry_hour_label_and_cost() {
        let output = render(&[make_hour(7)]);
        let row = output.lines().nth(1).unwrap_or("");
        assert_eq!(
            row,
            "7,7:00-8:00,1.0000,0.2500,0.5000,0.2500,0.0000,1.5000,8.75"
        );
    }

    #[test]
    fn numeric_columns_parse_back() {
        let results: Vec<HourlyResult> = (0..3).map(make_hour).collect();
        let output = render(&results);
        let mut rdr = csv::ReaderBuilder::new().from_reader(output.as_bytes());
        let mut rows = 0;
        for record in rdr.records() {
            let rec = record.expect("row should parse");
            for i in 2..9 {
                assert!(rec[i].parse::<f64>().is_ok(), "column {i} should be numeric");
            }
            rows += 1;
        }
        assert_eq!(rows, 3);
    }
}
