/// Primary-table extraction from statement trees.
pub mod table_name;

pub use table_name::{FALLBACK_KEY, bare_name, classify, first_table_reference, insert_target};
