//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - monthly table export (CSV) (`export`)
//! - trend JSON write (`trend`)

pub mod export;
pub mod ingest;
pub mod trend;

pub use export::*;
pub use ingest::*;
pub use trend::*;
