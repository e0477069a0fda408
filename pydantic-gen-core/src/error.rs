// pydantic-gen-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum GeneratorError {
    // --- DOMAIN ERRORS (names, tree shape) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, formats, templates) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- PARSING (wraps whatever failed while reading one file) ---
    #[error("Error while parsing {}", .path.display())]
    #[diagnostic(
        code(pydantic_gen::parsing),
        help("Fix the configuration file or exclude it from the input directory.")
    )]
    Parsing {
        path: PathBuf,
        #[source]
        source: Box<GeneratorError>,
    },
}

impl GeneratorError {
    pub fn parsing(path: PathBuf, source: GeneratorError) -> Self {
        GeneratorError::Parsing {
            path,
            source: Box::new(source),
        }
    }
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for GeneratorError {
    fn from(err: std::io::Error) -> Self {
        GeneratorError::Infrastructure(InfrastructureError::Io(err))
    }
}
