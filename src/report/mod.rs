//! Report module - count table, terminal summary, JSON export and staged writes

pub mod counts;
pub mod export;
pub mod staged;
pub mod summary;

pub use counts::*;
pub use export::*;
pub use staged::{commit_all, StagedFile};
pub use summary::*;
