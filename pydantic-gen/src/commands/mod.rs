// pydantic-gen/src/commands/mod.rs

pub mod convert;
pub mod generate;
pub mod inspect;
