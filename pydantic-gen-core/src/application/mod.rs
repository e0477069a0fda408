// pydantic-gen-core/src/application/mod.rs

pub mod convert;
pub mod generate;
pub mod inspect;
pub mod ports;

// --- RE-EXPORTS (FACADE PATTERN) ---
// The CLI only needs `use pydantic_gen_core::application::{ClassGenerator, convert_file, ...}`.

pub use convert::{ConversionSummary, convert_file};
pub use generate::{ClassGenerator, GenerateOptions, GeneratedModule, GenerationReport};
pub use inspect::{ClassSummary, FieldSummary, inspect};
pub use ports::TemplateEngine;
