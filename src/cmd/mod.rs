pub mod analyze;
pub mod words;
