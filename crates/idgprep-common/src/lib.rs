//! idgprep-common — Shared types and errors used across all idgprep crates.

pub mod error;
pub mod entities;

// Re-export commonly used types
pub use error::{IdgPrepError, Result};
pub use entities::{IdgFamily, TargetRecord};
