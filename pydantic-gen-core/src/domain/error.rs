// pydantic-gen-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("\"{name}\" is not a valid identifier! Name in file: {}", .original.as_deref().unwrap_or("None"))]
    #[diagnostic(
        code(pydantic_gen::domain::identifier),
        help("Field names must start with a letter or '_' and contain only letters, digits and '_'.")
    )]
    InvalidIdentifier {
        name: String,
        original: Option<String>,
    },

    #[error("\"{0}\" is not a valid class name!")]
    #[diagnostic(code(pydantic_gen::domain::class_name))]
    InvalidClassName(String),

    #[error("Key '{0}' does not contain any usable character for a field name")]
    #[diagnostic(
        code(pydantic_gen::domain::empty_name),
        help("Rename the key so it contains at least one letter or digit.")
    )]
    EmptyName(String),

    #[error("The document root must be a mapping, found {0}")]
    #[diagnostic(
        code(pydantic_gen::domain::root),
        help("Only files whose top level is a set of key/value pairs can be turned into classes.")
    )]
    RootNotMapping(String),

    #[error("Unsupported mapping key: {0}")]
    #[diagnostic(code(pydantic_gen::domain::key))]
    UnsupportedKey(String),
}
