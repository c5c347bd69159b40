//! cdecount: CDE Tier Classification Library
//!
//! Classifies study variables into Tier 1, Tier 2 and Other common data
//! elements using two reference dictionaries, and reports per-study counts.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
