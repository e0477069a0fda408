// pydantic-gen-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum IniError {
    #[error("File contains no section headers (line {line}): {content}")]
    #[diagnostic(
        code(pydantic_gen::infra::ini::missing_section),
        help("Start the file with a [section] header.")
    )]
    MissingSectionHeader { line: usize, content: String },

    #[error("Section '{section}' already exists (line {line})")]
    #[diagnostic(code(pydantic_gen::infra::ini::duplicate_section))]
    DuplicateSection { section: String, line: usize },

    #[error("Option '{option}' in section '{section}' already exists (line {line})")]
    #[diagnostic(code(pydantic_gen::infra::ini::duplicate_option))]
    DuplicateOption {
        section: String,
        option: String,
        line: usize,
    },

    #[error("Line {line} is neither a section, an option nor a comment: {content}")]
    #[diagnostic(
        code(pydantic_gen::infra::ini::invalid_line),
        help("Options are written as 'key = value' or 'key: value'.")
    )]
    InvalidLine { line: usize, content: String },

    #[error("Empty option name (line {line})")]
    #[diagnostic(code(pydantic_gen::infra::ini::empty_option))]
    EmptyOptionName { line: usize },

    #[error("Bad interpolation in option '{option}' of section '{section}': {reason}")]
    #[diagnostic(
        code(pydantic_gen::infra::ini::interpolation),
        help("Write a literal '%' as '%%'; references look like %(name)s.")
    )]
    Interpolation {
        section: String,
        option: String,
        reason: String,
    },

    #[error("Interpolation of option '{option}' in section '{section}' is nested too deeply")]
    #[diagnostic(code(pydantic_gen::infra::ini::interpolation_depth))]
    InterpolationDepth { section: String, option: String },

    #[error("Top-level value '{0}' is not a section and can not be written to an INI file")]
    #[diagnostic(
        code(pydantic_gen::infra::ini::not_a_section),
        help("INI files only hold sections of key/value pairs.")
    )]
    NotASection(String),
}

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(pydantic_gen::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    #[error("{} does not exist.", .0.display())]
    #[diagnostic(code(pydantic_gen::infra::not_found))]
    NotFound(PathBuf),

    #[error("{} is not a directory.", .0.display())]
    #[diagnostic(code(pydantic_gen::infra::not_a_directory))]
    NotADirectory(PathBuf),

    #[error("{} is a directory and not a file.", .0.display())]
    #[diagnostic(code(pydantic_gen::infra::is_a_directory))]
    IsADirectory(PathBuf),

    #[error("The given path {} does not have an extension \".ini\", \".json\" or \".yaml\"", .0.display())]
    #[diagnostic(code(pydantic_gen::infra::format))]
    UnsupportedFormat(PathBuf),

    // --- FORMATS ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(pydantic_gen::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(pydantic_gen::infra::json),
        help("Check your JSON syntax (commas, quotes, brackets).")
    )]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ini(#[from] IniError),

    // --- CONFIG ---
    #[error("Configuration Error: {0}")]
    #[diagnostic(code(pydantic_gen::infra::config))]
    ConfigError(String),

    #[error("Generator configuration not found at '{0}'")]
    #[diagnostic(code(pydantic_gen::infra::config_missing))]
    ConfigNotFound(String),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(pydantic_gen::infra::template),
        help("Check the Jinja syntax ({{ ... }}) of the module template.")
    )]
    TemplateError(#[from] minijinja::Error),
}
