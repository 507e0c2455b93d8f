//! Field normalisation for target list rows.
//!
//! - `family`: maps raw IDG family text to its canonical spelling

pub mod family;

pub use family::{normalise_family, KNOWN_FAMILIES};
