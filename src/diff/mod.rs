//! Add/sub diff accumulation
//!
//! Handlers write triples to assert into the add set and triples to retract
//! into the sub set; rows that cannot be processed land in the exception log.

mod accumulator;
pub mod scalar;

pub use accumulator::{DiffAccumulator, ExceptionRecord, RejectReason, TripleSet};
pub use scalar::{diff as diff_scalar, ScalarDiff};
