//! Export functionality for filtered datasets.

mod csv;

pub use self::csv::{export_csv, write_dataset};
