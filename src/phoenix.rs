//! Phoenix wallet export parsing.
//!
//! Phoenix exports are positional CSV rows with 14 fields, of which this
//! converter consumes six: timestamp, transaction type, amount, mining fee,
//! service fee, transaction id and description. Field parsing is deliberately
//! lenient: only a bad timestamp invalidates a row, while malformed numeric
//! fields fall back to zero with a warning.

use chrono::{DateTime, NaiveDateTime, Utc};
use csv::StringRecord;
use thiserror::Error;

/// Timestamp format used by Phoenix CSV exports.
///
/// Fractional seconds are optional but the trailing `Z` is required; offsets
/// such as `+00:00` are rejected.
pub const PHOENIX_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// Number of fields in a Phoenix export row.
pub const FIELD_COUNT: usize = 14;

// Consumed column positions (0-indexed).
const COL_TIMESTAMP: usize = 0;
const COL_TYPE: usize = 2;
const COL_AMOUNT_MSAT: usize = 3;
const COL_MINING_FEE_SAT: usize = 6;
const COL_SERVICE_FEE_MSAT: usize = 8;
const COL_TX_ID: usize = 11;
const COL_DESCRIPTION: usize = 13;

/// A single transaction from a Phoenix CSV export.
///
/// The sign of `amount_msat` is authoritative for direction: positive means
/// received, negative means sent. The fee fields are informational only;
/// Phoenix already folds fees into `amount_msat`, so they are never applied
/// to the ledger entry a second time.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoenixRecord {
    /// When the transaction settled (UTC)
    pub timestamp: DateTime<Utc>,

    /// Transaction type tag, e.g. `lightning_received` or `swap_out`.
    /// Kept as an open string: exports may contain types this converter
    /// does not know about.
    pub kind: String,

    /// Signed amount in millisatoshis
    pub amount_msat: i64,

    /// On-chain mining fee in satoshis (informational)
    pub mining_fee_sat: i64,

    /// Phoenix service fee in millisatoshis (informational)
    pub service_fee_msat: i64,

    /// Payment hash / transaction id, copied verbatim
    pub tx_id: String,

    /// Free-form description, copied verbatim
    pub description: String,
}

/// Reasons a row is dropped from the batch.
#[derive(Error, Debug)]
pub enum RowError {
    /// Row is too short to be a Phoenix export row
    #[error("expected at least {FIELD_COUNT} fields, got {0}")]
    FieldCount(usize),

    /// Timestamp field did not match the Phoenix export format
    #[error("failed to parse timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
}

impl PhoenixRecord {
    /// Parses one raw CSV row into a `PhoenixRecord`.
    ///
    /// Returns the record together with any field-level warnings (malformed
    /// numeric fields that were defaulted to zero). Only a short row or an
    /// unparseable timestamp fails the row as a whole.
    pub fn from_row(row: &StringRecord) -> Result<(Self, Vec<String>), RowError> {
        if row.len() < FIELD_COUNT {
            return Err(RowError::FieldCount(row.len()));
        }

        let raw_timestamp = &row[COL_TIMESTAMP];
        let timestamp = NaiveDateTime::parse_from_str(raw_timestamp, PHOENIX_DATE_FORMAT)
            .map_err(|source| RowError::Timestamp {
                value: raw_timestamp.to_string(),
                source,
            })?
            .and_utc();

        let mut warnings = Vec::new();
        let amount_msat = parse_int_field(&row[COL_AMOUNT_MSAT], "amount_msat", &mut warnings);
        let mining_fee_sat =
            parse_int_field(&row[COL_MINING_FEE_SAT], "mining_fee_sat", &mut warnings);
        let service_fee_msat =
            parse_int_field(&row[COL_SERVICE_FEE_MSAT], "service_fee_msat", &mut warnings);

        let record = PhoenixRecord {
            timestamp,
            kind: row[COL_TYPE].to_string(),
            amount_msat,
            mining_fee_sat,
            service_fee_msat,
            tx_id: row[COL_TX_ID].to_string(),
            description: row[COL_DESCRIPTION].to_string(),
        };

        Ok((record, warnings))
    }
}

/// Parses an integer field that may contain comma thousands separators.
///
/// On failure the field defaults to zero and a warning is recorded; Phoenix
/// exports occasionally leave these fields blank or non-numeric.
fn parse_int_field(raw: &str, name: &str, warnings: &mut Vec<String>) -> i64 {
    match raw.replace(',', "").parse::<i64>() {
        Ok(value) => value,
        Err(e) => {
            warnings.push(format!(
                "failed to parse {} '{}': {}; defaulting to 0",
                name, raw, e
            ));
            0
        }
    }
}
