pub mod ingest;
pub mod options;
pub mod query;
