//! Adapters - Implementations of port interfaces.
//!
//! - `tableau` - Text format and file storage of performance tableaux
//! - `digraph` - JSON/YAML file storage of digraphs
//! - `report` - JSON rendering of ranking and rating reports

pub mod digraph;
pub mod report;
pub mod tableau;

pub use digraph::{DigraphEncoding, FileDigraphStore};
pub use report::JsonReportExporter;
pub use tableau::{format_tableau, parse_tableau, TextTableauStore};
