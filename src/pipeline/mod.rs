//! Pipeline module - loading, extraction and tier classification

pub mod classify;
pub mod error;
pub mod extract;
pub mod loader;
pub mod reference;

pub use classify::*;
pub use error::CdeError;
pub use extract::*;
pub use loader::*;
pub use reference::*;
