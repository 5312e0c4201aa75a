pub mod cancel;
pub mod config;
pub mod consts;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod types;
// cmd and reports are modules of the binary crate (main.rs).
