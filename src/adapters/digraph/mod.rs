//! Digraph adapters - File persistence of bipolar-valued digraphs.

mod file_digraph_store;

pub use file_digraph_store::{DigraphEncoding, FileDigraphStore};
