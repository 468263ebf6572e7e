// Sink writers: each write fully replaces whatever the destination held.

pub mod csv;
pub mod sqlite;

pub use csv::CsvSink;
pub use sqlite::SqliteSink;
