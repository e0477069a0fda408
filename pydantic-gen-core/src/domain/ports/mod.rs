// src/domain/ports/mod.rs

pub mod parser;

pub use parser::NodeParser;
