//! Ingestion pipeline.

mod run;

pub use run::{run_ingestion, IngestReport};
