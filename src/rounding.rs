//! Rounding residual accumulation.
//!
//! Formatting satoshi amounts to 8 decimal places loses anything below one
//! satoshi. The residuals from every mapped row are summed here so the run
//! can optionally close the books with a single synthetic cost entry.

use crate::koinly::{format_btc, format_date, KoinlyRecord, BTC};
use crate::mapper::Label;
use chrono::Utc;

/// Description attached to the synthetic correction entry.
pub const ADJUSTMENT_DESCRIPTION: &str = "Adjustment for rounding differences";

/// Running sum of per-row rounding residuals, in satoshis.
#[derive(Debug, Default)]
pub struct RoundingLedger {
    sum: f64,
}

impl RoundingLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        RoundingLedger::default()
    }

    /// Adds one row's residual to the running sum.
    pub fn record(&mut self, residual: f64) {
        self.sum += residual;
    }

    /// Total accumulated residual in satoshis.
    pub fn total(&self) -> f64 {
        self.sum
    }

    /// Builds the correction entry, if one is warranted.
    ///
    /// Returns `None` when the accumulated residual rounds to zero whole
    /// satoshis. Otherwise the rounded magnitude is booked as a fee-only
    /// cost row dated at the moment of the call.
    pub fn adjustment_entry(&self) -> Option<KoinlyRecord> {
        let sats = self.sum.abs().round() as i64;
        if sats == 0 {
            return None;
        }

        Some(KoinlyRecord {
            date: format_date(Utc::now()),
            fee_amount: format_btc(sats as f64),
            fee_currency: BTC.to_string(),
            label: Label::Cost.as_str().to_string(),
            description: ADJUSTMENT_DESCRIPTION.to_string(),
            ..KoinlyRecord::default()
        })
    }
}
