// pydantic-gen-core/src/lib.rs

// 1. Documentation
#![allow(missing_docs)]
// 2. Memory safety
#![deny(unsafe_code)]
// 3. Robustness
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
// 4. Performance
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// 1. Domain (core model)
// Configuration values, identifier rules, the class tree and how it is built.
// Depends on nothing else in the crate.
pub mod domain;

// 2. Infrastructure (Adapters)
// File formats (INI/JSON/YAML), node parsers, Jinja renderer, generator config.
// Depends on the Domain.
pub mod infrastructure;

// 3. Application (Use Cases)
// Generate, convert, inspect.
// Depends on the Domain and the Infrastructure.
pub mod application;

// --- GLOBAL ERROR HANDLING ---
pub mod error;

// --- RE-EXPORTS (FACADE) ---
// use pydantic_gen_core::GeneratorError;
pub use error::GeneratorError;
