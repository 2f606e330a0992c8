pub mod csv;
pub mod table;

pub use table::{read_id_set, read_table, write_records, AppendOutcome, AppendTable, Table};
