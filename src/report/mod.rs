//! Terminal reporting: run summary, trend equations, monthly table.

pub mod format;

pub use format::*;
