//! Exact integer amounts and their error type

pub mod amount;
pub mod errors;
