//! Tableau adapters - Text format parsing and file storage.

mod text_format;
mod text_store;

pub use text_format::{format_tableau, parse_tableau};
pub use text_store::TextTableauStore;
