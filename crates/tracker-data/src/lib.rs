//! Price history storage.

mod csv_store;
mod memory;

pub use csv_store::{CsvHistoryStore, HISTORY_HEADER};
pub use memory::MemoryHistoryStore;
