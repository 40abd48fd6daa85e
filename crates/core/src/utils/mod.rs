pub mod date_utils;
pub mod money_utils;
pub mod parse_utils;

pub use date_utils::*;
pub use money_utils::*;
pub use parse_utils::*;
