//! Daily-series construction and monthly aggregation.
//!
//! - calendar math shared by aggregation and projection (`calendar`)
//! - cleaning + daily reindex with forward-fill (`resample`)
//! - per-month means with `"%B-%Y"` labels (`aggregate`)

pub mod aggregate;
pub mod calendar;
pub mod resample;

pub use aggregate::*;
pub use calendar::*;
pub use resample::*;
