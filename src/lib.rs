//! # Phoenix → Koinly Converter
//!
//! Converts CSV exports from the Phoenix Lightning wallet into the CSV
//! ledger format accepted by the Koinly tax tool.
//!
//! ## Design Principles
//!
//! - **Skip-and-warn**: a malformed row never fails the batch; it is dropped
//!   with a warning and the run continues
//! - **Exact unit conversion**: millisatoshi → satoshi → BTC, with the
//!   rounding residual of 8-decimal formatting tracked across the run
//! - **No global state**: verbosity and the rounding-adjustment switch are
//!   injected via [`ConvertConfig`]
//! - **Deterministic output**: rows are emitted in input order
//!
//! ## Example
//!
//! ```no_run
//! use phoenix_koinly::{ConvertConfig, Converter};
//! use std::io::Cursor;
//!
//! let csv = "header\n\
//!            2024-05-01T12:00:00.000Z,0,lightning_received,1000000,0,0,0,0,0,0,0,tx1,,memo\n";
//! let converter = Converter::new(ConvertConfig::default());
//! converter.convert(Cursor::new(csv), std::io::stdout()).unwrap();
//! ```

pub mod engine;
pub mod error;
pub mod koinly;
pub mod mapper;
pub mod phoenix;
pub mod rounding;

pub use engine::{ConvertConfig, ConvertReport, Converter};
pub use error::{ConvertError, Result};
pub use koinly::KoinlyRecord;
pub use phoenix::PhoenixRecord;
