//! In-memory object store for receipt files.

mod memory_file_store;

pub use memory_file_store::MemoryFileStore;
