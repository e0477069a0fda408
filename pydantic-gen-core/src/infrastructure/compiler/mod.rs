// pydantic-gen-core/src/infrastructure/compiler/mod.rs

pub mod discovery;
pub mod jinja;

pub use discovery::ConfigDiscovery;
pub use jinja::{JinjaRenderer, MODULE_TEMPLATE};
