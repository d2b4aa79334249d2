//! Maps Phoenix transactions to Koinly ledger rows.
//!
//! Classification is a closed lookup over the known Phoenix transaction
//! types. Each known type picks one target column (sent, received or fee),
//! a sign convention and a Koinly label. Unknown types produce a
//! metadata-only row so nothing silently disappears from the ledger.

use crate::koinly::{format_btc, format_date, KoinlyRecord, BTC, SATS_PER_BTC};
use crate::phoenix::PhoenixRecord;
use log::warn;

/// Millisatoshis per satoshi.
pub const MSATS_PER_SAT: f64 = 1_000.0;

/// Which Koinly amount column a transaction maps to.
///
/// `Received` formats the signed satoshi value; `Sent` and `Fee` format the
/// absolute value (the export encodes direction in the sign, Koinly in the
/// column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Sent,
    Received,
    Fee,
}

/// Koinly category label attached to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Lightning,
    Transfer,
    Deposit,
    Cost,
}

impl Label {
    /// Label tag as it appears in the Koinly CSV.
    pub fn as_str(self) -> &'static str {
        match self {
            Label::Lightning => "lightning",
            Label::Transfer => "transfer",
            Label::Deposit => "deposit",
            Label::Cost => "cost",
        }
    }
}

/// Looks up the target column and label for a Phoenix transaction type.
///
/// Returns `None` for types this converter does not recognize.
pub fn classify(kind: &str) -> Option<(Target, Label)> {
    match kind {
        "lightning_received" => Some((Target::Received, Label::Lightning)),
        "lightning_sent" => Some((Target::Sent, Label::Lightning)),
        "swap_in" | "legacy_swap_in" => Some((Target::Received, Label::Transfer)),
        "swap_out" => Some((Target::Sent, Label::Transfer)),
        "channel_open" | "legacy_pay_to_open" => Some((Target::Received, Label::Deposit)),
        "channel_close" => Some((Target::Fee, Label::Cost)),
        _ => None,
    }
}

/// Converts one Phoenix transaction into a Koinly row plus its rounding
/// residual in satoshis.
///
/// The residual is the difference between the exact satoshi amount and what
/// re-parsing the formatted 8-decimal BTC string yields. Millisatoshi
/// amounts are usually whole satoshis, so it is near zero in practice, but
/// it is computed unconditionally because formatting may round.
///
/// Date, transaction id and description are populated regardless of
/// classification; an unknown type contributes no amounts and a zero
/// residual.
pub fn map_record(record: &PhoenixRecord) -> (KoinlyRecord, f64) {
    let mut entry = KoinlyRecord {
        date: format_date(record.timestamp),
        description: record.description.clone(),
        tx_hash: record.tx_id.clone(),
        ..KoinlyRecord::default()
    };

    let Some((target, label)) = classify(&record.kind) else {
        warn!(
            "unknown transaction type '{}' (tx {}); emitting a metadata-only row",
            record.kind, record.tx_id
        );
        return (entry, 0.0);
    };

    let sats = record.amount_msat as f64 / MSATS_PER_SAT;
    let (amount, sign) = match target {
        Target::Received => (format_btc(sats), 1.0),
        // Sent amounts are negative in the export; Koinly wants magnitudes.
        Target::Sent | Target::Fee => (format_btc(sats.abs()), -1.0),
    };

    let reparsed: f64 = amount.parse().unwrap_or_default();
    let residual = sats - sign * reparsed * SATS_PER_BTC;

    match target {
        Target::Received => {
            entry.received_amount = amount;
            entry.received_currency = BTC.to_string();
        }
        Target::Sent => {
            entry.sent_amount = amount;
            entry.sent_currency = BTC.to_string();
        }
        Target::Fee => {
            entry.fee_amount = amount;
            entry.fee_currency = BTC.to_string();
        }
    }
    entry.label = label.as_str().to_string();

    (entry, residual)
}
