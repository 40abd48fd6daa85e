//! Object-store boundary for receipt files.

mod files_traits;

pub use files_traits::FileStoreTrait;
