pub mod parser;
pub mod spotbugs;
