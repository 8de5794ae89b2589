pub mod error;
pub mod patch;
pub mod timestamp;
pub mod types;
