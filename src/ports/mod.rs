//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `TableauStore` - Loading and saving performance tableaux
//! - `DigraphStore` - Persisting digraphs with their veto records
//! - `ReportExporter` - Rendering ranking and rating reports

mod digraph_store;
mod report_exporter;
mod store_error;
mod tableau_store;

pub use digraph_store::{DigraphStore, StoredDigraph};
pub use report_exporter::{AnalysisReport, ReportClass, ReportExporter, ReportKind};
pub use store_error::StoreError;
pub use tableau_store::TableauStore;
