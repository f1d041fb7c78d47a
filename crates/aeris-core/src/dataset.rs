//! Observation dataset loading and replay
//!
//! A sensor node replays a recorded CSV dataset instead of sampling real
//! hardware. The file has a header row naming the columns; the known
//! columns are `Temperature`, `Pressure`, `Humidity`, `CO`, and `SO2`
//! (anything else, such as a trailing timestamp, is ignored). Empty cells
//! parse as 0.0. The gas columns are optional.

use std::{fs, path::Path};

use aeris_api::Observation;
use aeris_common::AerisError;

const COL_TEMPERATURE: &str = "Temperature";
const COL_PRESSURE: &str = "Pressure";
const COL_HUMIDITY: &str = "Humidity";
const COL_CO: &str = "CO";
const COL_SO2: &str = "SO2";

/// A loaded dataset, replayed cyclically one row per tick.
#[derive(Clone, Debug)]
pub struct ReadingSet {
    rows: Vec<Observation>,
}

impl ReadingSet {
    /// Wrap pre-built rows. Fails on an empty set since the replay index
    /// is `tick % len`.
    pub fn from_rows(rows: Vec<Observation>) -> Result<Self, AerisError> {
        if rows.is_empty() {
            return Err(AerisError::DatasetError("no data rows".to_string()));
        }
        Ok(Self { rows })
    }

    /// Load a dataset from a CSV file.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, AerisError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AerisError::DatasetError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse_csv(&content)
    }

    fn parse_csv(content: &str) -> Result<Self, AerisError> {
        let mut lines = content.lines().enumerate();

        let (_, header_line) = lines
            .next()
            .ok_or_else(|| AerisError::DatasetError("missing header row".to_string()))?;
        let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();

        let mut rows = Vec::new();
        for (line_no, line) in lines {
            if line.trim().is_empty() {
                continue;
            }

            let cells: Vec<&str> = line.split(',').map(str::trim).collect();
            let mut row = Observation::default();

            for (i, header) in headers.iter().enumerate() {
                let cell = cells.get(i).copied().unwrap_or("");
                match *header {
                    COL_TEMPERATURE => row.temperature = parse_cell(cell, header, line_no)?,
                    COL_PRESSURE => row.pressure = parse_cell(cell, header, line_no)?,
                    COL_HUMIDITY => row.humidity = parse_cell(cell, header, line_no)?,
                    COL_CO => row.co = Some(parse_cell(cell, header, line_no)?),
                    COL_SO2 => row.so2 = Some(parse_cell(cell, header, line_no)?),
                    _ => {} // timestamps and other extra columns
                }
            }

            rows.push(row);
        }

        Self::from_rows(rows)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row replayed at tick `tick` (wraps around the dataset).
    pub fn row_for_tick(&self, tick: u64) -> Observation {
        self.rows[(tick % self.rows.len() as u64) as usize]
    }
}

fn parse_cell(cell: &str, header: &str, line_no: usize) -> Result<f64, AerisError> {
    if cell.is_empty() {
        return Ok(0.0);
    }
    cell.parse::<f64>().map_err(|_| {
        AerisError::DatasetError(format!(
            "line {}: column '{}' has non-numeric value '{}'",
            line_no + 1,
            header,
            cell
        ))
    })
}
