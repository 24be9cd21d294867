pub mod detail;
pub mod field;
pub mod message;
