//! Document store adapters and the report persistence layer on top of them.

mod file_document_store;
mod in_memory_document_store;
mod report_store_adapter;

pub use file_document_store::FileDocumentStore;
pub use in_memory_document_store::InMemoryDocumentStore;
pub use report_store_adapter::{NotSavedReason, ReportStoreAdapter, SaveOutcome};
