// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod aggregate;
pub mod analysis;
pub mod api;
pub mod classify;
pub mod config;
pub mod document;
pub mod ingest;
pub mod intention;
pub mod lexicon;
pub mod metrics;
pub mod report;

// ---- Re-exports for stable public API ----
pub use crate::aggregate::{AggregationMatrix, Dashboard};
pub use crate::analysis::{analyze_document, analyze_text, DocumentAnalysis};
pub use crate::api::{router, AppState};
pub use crate::config::AppConfig;
pub use crate::document::{BatchUpload, Document, DocumentSource, InMemoryDocuments};
pub use crate::lexicon::Lexicon;
pub use crate::report::StrategicReport;
