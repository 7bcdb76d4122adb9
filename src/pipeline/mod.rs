pub mod csv_out;
pub mod normalize;
pub mod raw_table;
