//! Transaction status presentation.
//!
//! Pure projection of a [`TransactionRecord`](crate::payments::TransactionRecord)
//! into the [`StatusView`] display code consumes. No I/O and no decisions.

pub mod status;

pub use status::{failure_message, format_amount, present, present_record, StatusPhase, StatusView};
