//! Koinly ledger rows and CSV serialization.
//!
//! Koinly consumes a fixed 12-column CSV. All amounts are rendered as BTC
//! strings with exactly 8 decimal places; fields that do not apply to a row
//! are left empty. The `Net Worth` columns are reserved by the Koinly format
//! and never populated by this converter.

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Date format required by Koinly (literal trailing `Z`, space-separated).
pub const KOINLY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S Z";

/// Currency ticker used for all amounts.
pub const BTC: &str = "BTC";

/// Satoshis per BTC.
pub const SATS_PER_BTC: f64 = 100_000_000.0;

/// Column headers, in the exact order Koinly expects.
pub const KOINLY_HEADER: [&str; 12] = [
    "Date",
    "Sent Amount",
    "Sent Currency",
    "Received Amount",
    "Received Currency",
    "Fee Amount",
    "Fee Currency",
    "Net Worth Amount",
    "Net Worth Currency",
    "Label",
    "Description",
    "TxHash",
];

/// One row of the Koinly CSV.
///
/// Field order matches [`KOINLY_HEADER`] and defines the serialized column
/// order. At most one of the sent/received/fee amounts is populated per row;
/// rows for unrecognized transaction types carry metadata only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KoinlyRecord {
    pub date: String,
    pub sent_amount: String,
    pub sent_currency: String,
    pub received_amount: String,
    pub received_currency: String,
    pub fee_amount: String,
    pub fee_currency: String,
    pub net_worth_amount: String,
    pub net_worth_currency: String,
    pub label: String,
    pub description: String,
    pub tx_hash: String,
}

/// Formats a satoshi amount as a BTC string with 8 decimal places.
pub fn format_btc(sats: f64) -> String {
    format!("{:.8}", sats / SATS_PER_BTC)
}

/// Formats a timestamp in the Koinly date format.
pub fn format_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(KOINLY_DATE_FORMAT).to_string()
}

/// Writes the header row followed by one row per record, in order.
///
/// The header is always emitted, even for an empty batch. Any write failure
/// aborts the run and propagates to the caller.
pub fn write_csv<W: Write>(records: &[KoinlyRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(KOINLY_HEADER)?;
    for record in records {
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
