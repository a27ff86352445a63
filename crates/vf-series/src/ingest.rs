//! Whitespace-delimited monitor log ingestion.
//!
//! A monitor log starts with a fixed number of header rows followed by one
//! sample per line. Which column holds which quantity is declared by a
//! [`LogSchema`] instead of being assumed, and every row is checked against it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::series::{ObservationSeries, Sample};
use crate::{SeriesError, SeriesResult};

/// Location of a quantity in the log: a 0-based column position or a header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Position(usize),
    Header(String),
}

/// Named-column contract for a monitor log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSchema {
    /// Rows skipped before data; names are looked up in the first one.
    pub header_rows: usize,
    pub time: ColumnRef,
    pub temperature: ColumnRef,
    pub mass: ColumnRef,
    pub pressure: ColumnRef,
}

impl Default for LogSchema {
    fn default() -> Self {
        Self::monitor_conservation()
    }
}

impl LogSchema {
    /// Layout of the `conservation` monitor file: step, time, dt, T, mass, p.
    pub fn monitor_conservation() -> Self {
        Self {
            header_rows: 2,
            time: ColumnRef::Position(1),
            temperature: ColumnRef::Position(3),
            mass: ColumnRef::Position(4),
            pressure: ColumnRef::Position(5),
        }
    }

    fn resolve(&self, header: Option<&str>) -> Result<ResolvedColumns, String> {
        let names: Vec<&str> = header.map(|h| h.split_whitespace().collect()).unwrap_or_default();
        let lookup = |column: &ColumnRef, quantity: &str| -> Result<usize, String> {
            match column {
                ColumnRef::Position(index) => Ok(*index),
                ColumnRef::Header(name) => {
                    if header.is_none() {
                        return Err(format!(
                            "{quantity} column '{name}' needs a header row to be resolved"
                        ));
                    }
                    let mut hits = names
                        .iter()
                        .enumerate()
                        .filter(|(_, n)| n.eq_ignore_ascii_case(name))
                        .map(|(i, _)| i);
                    match (hits.next(), hits.next()) {
                        (Some(index), None) => Ok(index),
                        (None, _) => Err(format!(
                            "{quantity} column '{name}' not found in header"
                        )),
                        (Some(_), Some(_)) => Err(format!(
                            "{quantity} column '{name}' appears more than once in header"
                        )),
                    }
                }
            }
        };

        let columns = ResolvedColumns {
            time: lookup(&self.time, "time")?,
            temperature: lookup(&self.temperature, "temperature")?,
            mass: lookup(&self.mass, "mass")?,
            pressure: lookup(&self.pressure, "pressure")?,
        };

        let named = columns.named();
        for (i, (quantity, index)) in named.iter().enumerate() {
            if let Some((other, _)) = named[..i].iter().find(|(_, prev)| prev == index) {
                return Err(format!(
                    "{other} and {quantity} both resolve to column {index}"
                ));
            }
        }
        Ok(columns)
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedColumns {
    time: usize,
    temperature: usize,
    mass: usize,
    pressure: usize,
}

impl ResolvedColumns {
    fn named(&self) -> [(&'static str, usize); 4] {
        [
            ("time", self.time),
            ("temperature", self.temperature),
            ("mass", self.mass),
            ("pressure", self.pressure),
        ]
    }

    fn min_width(&self) -> usize {
        self.time
            .max(self.temperature)
            .max(self.mass)
            .max(self.pressure)
            + 1
    }
}

/// Parse log text into an observation series.
///
/// `origin` names the source in error messages (usually the file path).
pub fn parse_log(text: &str, schema: &LogSchema, origin: &str) -> SeriesResult<ObservationSeries> {
    let mut lines = text.lines().enumerate();

    let mut header = None;
    for row in 0..schema.header_rows {
        match lines.next() {
            Some((_, line)) => {
                if row == 0 {
                    header = Some(line);
                }
            }
            None => {
                return Err(SeriesError::malformed(
                    origin,
                    format!(
                        "expected {} header rows, found {}",
                        schema.header_rows, row
                    ),
                ));
            }
        }
    }

    let columns = schema
        .resolve(header)
        .map_err(|detail| SeriesError::malformed(origin, detail))?;
    let width = columns.min_width();

    let mut samples = Vec::new();
    for (idx, line) in lines {
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < width {
            return Err(SeriesError::malformed(
                origin,
                format!(
                    "line {line_no}: expected at least {width} columns, found {}",
                    fields.len()
                ),
            ));
        }

        let field = |index: usize, quantity: &str| -> SeriesResult<f64> {
            parse_real(fields[index]).ok_or_else(|| {
                SeriesError::malformed(
                    origin,
                    format!(
                        "line {line_no}: {quantity} value '{}' is not a finite number",
                        fields[index]
                    ),
                )
            })
        };

        samples.push(Sample::new(
            field(columns.time, "time")?,
            field(columns.temperature, "temperature")?,
            field(columns.mass, "mass")?,
            field(columns.pressure, "pressure")?,
        ));
    }

    let series = ObservationSeries::new(samples).map_err(|e| e.with_origin(origin))?;
    tracing::debug!(origin, samples = series.len(), "parsed monitor log");
    Ok(series)
}

/// Read and parse a monitor log from disk.
pub fn read_log(path: &Path, schema: &LogSchema) -> SeriesResult<ObservationSeries> {
    let origin = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => SeriesError::malformed(origin.clone(), e.to_string()),
        _ => SeriesError::unavailable(origin.clone(), e.to_string()),
    })?;
    parse_log(&text, schema, &origin)
}

/// Parse a float, accepting Fortran `D` exponents.
fn parse_real(token: &str) -> Option<f64> {
    let value = match token.parse::<f64>() {
        Ok(v) => v,
        Err(_) => token.replace(['D', 'd'], "E").parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONITOR: &str = "\
    Timestep           Time             Dt           Temp           Mass           Pres
 ------------- -------------- -------------- -------------- -------------- --------------
             0  0.0000000E+00  1.0000000E-02  3.0000000E+02  1.0000000E+00  1.0000000E+05
             1  6.0000000E+01  1.0000000E-02  3.1000000E+02  1.2000000E+00  1.1000000E+05

             2  1.2000000E+02  1.0000000E-02  3.2000000E+02  1.4000000E+00  1.2000000E+05
";

    #[test]
    fn parses_default_layout() {
        let series = parse_log(MONITOR, &LogSchema::default(), "mem").unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.times().collect::<Vec<_>>(), vec![0.0, 60.0, 120.0]);
        assert_eq!(series.masses().collect::<Vec<_>>(), vec![1.0, 1.2, 1.4]);
        assert_eq!(series.temperatures().collect::<Vec<_>>(), vec![300.0, 310.0, 320.0]);
        assert_eq!(
            series.pressures().collect::<Vec<_>>(),
            vec![1.0e5, 1.1e5, 1.2e5]
        );
    }

    #[test]
    fn resolves_columns_by_header_name() {
        let schema = LogSchema {
            header_rows: 2,
            time: ColumnRef::Header("time".to_string()),
            temperature: ColumnRef::Header("Temp".to_string()),
            mass: ColumnRef::Header("MASS".to_string()),
            pressure: ColumnRef::Header("Pres".to_string()),
        };
        let by_name = parse_log(MONITOR, &schema, "mem").unwrap();
        let by_position = parse_log(MONITOR, &LogSchema::default(), "mem").unwrap();
        assert_eq!(by_name, by_position);
    }

    #[test]
    fn unknown_header_is_malformed() {
        let schema = LogSchema {
            mass: ColumnRef::Header("Weight".to_string()),
            ..LogSchema::default()
        };
        let err = parse_log(MONITOR, &schema, "mem").unwrap_err();
        assert!(matches!(err, SeriesError::MalformedSource { .. }));
        assert!(err.to_string().contains("Weight"));
    }

    #[test]
    fn header_lookup_without_header_rows_is_malformed() {
        let schema = LogSchema {
            header_rows: 0,
            time: ColumnRef::Header("Time".to_string()),
            ..LogSchema::default()
        };
        let err = parse_log("0 0 0 300 1 1e5\n", &schema, "mem").unwrap_err();
        assert!(err.to_string().contains("needs a header row"));
    }

    #[test]
    fn duplicate_header_is_malformed() {
        let text = "a Time Time Temp Mass Pres\n--\n0 0 0 300 1 1e5\n";
        let schema = LogSchema {
            time: ColumnRef::Header("Time".to_string()),
            ..LogSchema::default()
        };
        let err = parse_log(text, &schema, "mem").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn overlapping_columns_are_malformed() {
        let text = "h\nh\n0 0.0 0.1 300.0 1.0 1e5\n1 1.0 0.1 301.0 1.1 1e5\n";
        let schema = LogSchema {
            temperature: ColumnRef::Position(4),
            ..LogSchema::default()
        };
        let err = parse_log(text, &schema, "mem").unwrap_err();
        assert!(matches!(err, SeriesError::MalformedSource { .. }));
        assert!(err.to_string().contains("temperature and mass"), "{err}");
    }

    #[test]
    fn header_name_colliding_with_position_is_malformed() {
        let text = "Step Time Dt Temp Mass Pres\n--\n0 0.0 0.1 300.0 1.0 1e5\n";
        let schema = LogSchema {
            pressure: ColumnRef::Header("time".to_string()),
            ..LogSchema::default()
        };
        let err = parse_log(text, &schema, "mem").unwrap_err();
        assert!(err.to_string().contains("column 1"), "{err}");
    }

    #[test]
    fn short_row_reports_line_number() {
        let text = "h\nh\n0 0.0 0.01 300 1.0 1e5\n1 1.0 0.01 301\n";
        let err = parse_log(text, &LogSchema::default(), "mem").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 4"), "{msg}");
        assert!(msg.contains("at least 6 columns"), "{msg}");
    }

    #[test]
    fn non_numeric_field_is_malformed() {
        let text = "h\nh\n0 0.0 0.01 warm 1.0 1e5\n";
        let err = parse_log(text, &LogSchema::default(), "mem").unwrap_err();
        assert!(err.to_string().contains("temperature value 'warm'"));
    }

    #[test]
    fn missing_header_rows_is_malformed() {
        let err = parse_log("only one line\n", &LogSchema::default(), "mem").unwrap_err();
        assert!(err.to_string().contains("expected 2 header rows, found 1"));
    }

    #[test]
    fn non_monotonic_time_is_malformed() {
        let text = "h\nh\n0 5.0 0.01 300 1.0 1e5\n1 4.0 0.01 301 1.1 1e5\n";
        let err = parse_log(text, &LogSchema::default(), "run-b").unwrap_err();
        match err {
            SeriesError::MalformedSource { origin, detail } => {
                assert_eq!(origin, "run-b");
                assert!(detail.contains("sample 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_log_is_empty_series() {
        let series = parse_log("h\nh\n", &LogSchema::default(), "mem").unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn fortran_exponents_are_accepted() {
        assert_eq!(parse_real("1.5D+02"), Some(150.0));
        assert_eq!(parse_real("2.0d-01"), Some(0.2));
        assert_eq!(parse_real("NaN"), None);
        assert_eq!(parse_real("inf"), None);
        assert_eq!(parse_real("abc"), None);
    }
}
