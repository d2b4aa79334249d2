//! Conversion pipeline: Phoenix CSV in, Koinly CSV out.
//!
//! The pipeline is a single sequential pass: read the whole export into
//! memory (exports are wallet-sized, thousands of rows at most), map each
//! record to a Koinly row while accumulating rounding residuals, optionally
//! append a correction entry, then serialize. Row-level problems never abort
//! the run; they are logged, counted and reported.

use crate::error::{ConvertError, Result};
use crate::koinly::{self, KoinlyRecord};
use crate::mapper::map_record;
use crate::phoenix::PhoenixRecord;
use crate::rounding::RoundingLedger;
use csv::ReaderBuilder;
use log::{debug, warn};
use std::io::{Read, Write};

/// Conversion options, passed in at construction.
///
/// There is deliberately no process-global state here: verbosity is part of
/// the configuration so concurrent tests (and library callers) cannot
/// interfere with each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertConfig {
    /// Append a synthetic cost entry compensating accumulated rounding
    /// residuals, when they round to at least one satoshi.
    pub add_rounding_adjustment: bool,

    /// Emit per-record debug diagnostics. Affects log volume only, never
    /// the output rows.
    pub verbose: bool,
}

/// Outcome summary of a conversion run.
///
/// Row-level anomalies are aggregated here rather than being observable only
/// through the log output.
#[derive(Debug, Default)]
pub struct ConvertReport {
    /// Rows successfully parsed and converted
    pub converted: usize,

    /// Rows dropped (bad timestamp, short row, CSV-level error)
    pub skipped: usize,

    /// Human-readable warnings, one per anomaly, in input order
    pub warnings: Vec<String>,
}

impl ConvertReport {
    /// Records a non-fatal anomaly that did not drop the row.
    fn warn(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
    }

    /// Records a dropped row.
    fn skip(&mut self, message: String) {
        warn!("{}", message);
        self.warnings.push(message);
        self.skipped += 1;
    }
}

/// The Phoenix → Koinly converter.
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    /// Creates a converter with the given configuration.
    pub fn new(config: ConvertConfig) -> Self {
        Converter { config }
    }

    /// Runs the full pipeline from an input stream to an output sink.
    ///
    /// Fatal conditions (unreadable input, missing header, unwritable sink)
    /// abort with an error; everything else degrades to skip-and-warn and is
    /// summarized in the returned report.
    pub fn convert<R: Read, W: Write>(&self, input: R, output: W) -> Result<ConvertReport> {
        let (records, mut report) = self.read_phoenix_csv(input)?;
        let entries = self.convert_records(&records);
        koinly::write_csv(&entries, output)?;

        report.converted = records.len();
        Ok(report)
    }

    /// Reads and parses a Phoenix export, skipping the header row.
    ///
    /// The header row must be present but its content is not inspected.
    /// Each data row either parses into a [`PhoenixRecord`] or is dropped
    /// with a warning; field-level warnings ride along in the report.
    pub fn read_phoenix_csv<R: Read>(
        &self,
        input: R,
    ) -> Result<(Vec<PhoenixRecord>, ConvertReport)> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        let mut rows = csv_reader.records();

        match rows.next() {
            Some(header) => {
                // An unreadable header row is corrupt input, not a bad row.
                header?;
            }
            None => return Err(ConvertError::MissingHeader),
        }

        let mut records = Vec::new();
        let mut report = ConvertReport::default();

        for (row_idx, row) in rows.enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    report.skip(format!("row {}: CSV error: {}; skipping", row_num, e));
                    continue;
                }
            };

            match PhoenixRecord::from_row(&row) {
                Ok((record, field_warnings)) => {
                    for warning in field_warnings {
                        report.warn(format!("row {}: {}", row_num, warning));
                    }
                    records.push(record);
                }
                Err(e) => {
                    report.skip(format!("row {}: {}; skipping", row_num, e));
                }
            }
        }

        Ok((records, report))
    }

    /// Maps a batch of records to Koinly rows, in input order.
    ///
    /// This is the pure core of the converter: no I/O, no state beyond the
    /// residual sum carried through the single pass. When the rounding
    /// adjustment is enabled and warranted, the correction entry is appended
    /// last.
    pub fn convert_records(&self, records: &[PhoenixRecord]) -> Vec<KoinlyRecord> {
        let mut entries = Vec::with_capacity(records.len() + 1);
        let mut rounding = RoundingLedger::new();

        for record in records {
            if self.config.verbose {
                debug!("processing record: {:?}", record);
            }
            let (entry, residual) = map_record(record);
            if self.config.verbose {
                debug!("mapped to {:?} (residual {} sats)", entry, residual);
            }
            rounding.record(residual);
            entries.push(entry);
        }

        if self.config.add_rounding_adjustment {
            if let Some(adjustment) = rounding.adjustment_entry() {
                debug!(
                    "appending rounding adjustment for {} sats of residual",
                    rounding.total()
                );
                entries.push(adjustment);
            }
        }

        entries
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertConfig::default())
    }
}
