//! Transactions consumed by the dashboard derivations.
//!
//! This module contains:
//! - The validated `Transaction` model and `TransactionBuilder`
//! - The unvalidated `TransactionRecord` shape that arrives from JSON or CSV,
//!   and the date parsing used to validate it

mod core;
mod record;

pub use core::{Transaction, TransactionBuilder, TransactionId, TransactionKind};
pub use record::{TransactionRecord, parse_transaction_date};

#[cfg(test)]
pub use core::test_utils;
