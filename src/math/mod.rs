//! Mathematical utilities: closed-form ordinary least squares.

pub mod ols;

pub use ols::*;
