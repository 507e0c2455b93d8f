//! idgprep-ingestion — IDG target list consolidation pipeline.
//! - Input file discovery
//! - Header validation
//! - IDG family normalisation
//! - Set-based deduplication and gene ordering
//! - TSV output

pub mod dedup;
pub mod discovery;
pub mod loader;
pub mod models;
pub mod normalise;
pub mod pipeline;
pub mod schema;
pub mod writer;

pub use pipeline::{run_consolidation, ConsolidationJob, ConsolidationResult, PipelineEvent};
