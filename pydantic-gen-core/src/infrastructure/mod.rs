// pydantic-gen-core/src/infrastructure/mod.rs

pub mod compiler;
pub mod config;
pub mod error;
pub mod formats;
pub mod fs;
pub mod parsers;

pub use compiler::{ConfigDiscovery, JinjaRenderer};
pub use formats::{ConfigFormat, load_document, save_document};
