// pydantic-gen-core/src/infrastructure/config/mod.rs

pub mod generator;

pub use generator::{CONFIG_FILES, GeneratorConfig, load_generator_config};
