// pydantic-gen-core/src/infrastructure/config/generator.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{info, instrument};
use validator::{Validate, ValidationError};

use crate::infrastructure::error::InfrastructureError;

/// File names looked up in the working directory, in this order.
pub const CONFIG_FILES: [&str; 2] = ["pydantic-gen.yaml", "pydantic-gen.yml"];

fn re_module_path() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
            .unwrap_or_else(|_| unreachable!())
    })
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Module the generated code imports `configuration_file_to_dict` from.
    /// When unset, the helper is written into every generated module.
    #[validate(custom(function = "validate_module_path"))]
    pub runtime_import: Option<String>,

    /// Write an `__init__.py` into output directories we create.
    pub init_files: bool,

    /// Use the values of the file as field defaults.
    pub with_defaults: bool,

    #[validate(length(min = 1, message = "output_dir cannot be empty"))]
    pub output_dir: String,

    /// Directory with a `module.py.j2` replacing the built-in template.
    pub template_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_import: None,
            init_files: true,
            with_defaults: false,
            output_dir: "generated".to_string(),
            template_dir: None,
        }
    }
}

fn validate_module_path(value: &str) -> Result<(), ValidationError> {
    if re_module_path().is_match(value) {
        return Ok(());
    }
    let mut err = ValidationError::new("module_path");
    err.message = Some(format!("'{}' is not a dotted Python module path", value).into());
    Err(err)
}

/// Loads the generator configuration.
///
/// An explicit path must exist. Without one, the first of [`CONFIG_FILES`]
/// found in `project_dir` is used, defaults otherwise. `PYDANTIC_GEN_*`
/// environment variables are applied on top.
#[instrument(level = "debug")]
pub fn load_generator_config(
    project_dir: &Path,
    explicit: Option<&Path>,
) -> Result<GeneratorConfig, InfrastructureError> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(InfrastructureError::ConfigNotFound(path.display().to_string()));
        }
        Some(path) => Some(path.to_path_buf()),
        None => find_config(project_dir),
    };

    let mut config = match path {
        Some(path) => {
            info!(path = ?path, "Loading generator configuration");
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                GeneratorConfig::default()
            } else {
                serde_yaml::from_str(&content)?
            }
        }
        None => GeneratorConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok())?;

    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;
    Ok(config)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.is_file())
}

fn apply_overrides(
    config: &mut GeneratorConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<(), InfrastructureError> {
    if let Some(val) = lookup("PYDANTIC_GEN_RUNTIME_IMPORT") {
        info!(old = ?config.runtime_import, new = ?val, "Overriding runtime import via ENV");
        config.runtime_import = (!val.is_empty()).then_some(val);
    }
    if let Some(val) = lookup("PYDANTIC_GEN_WITH_DEFAULTS") {
        config.with_defaults = parse_flag("PYDANTIC_GEN_WITH_DEFAULTS", &val)?;
    }
    if let Some(val) = lookup("PYDANTIC_GEN_OUTPUT_DIR") {
        info!(old = ?config.output_dir, new = ?val, "Overriding output dir via ENV");
        config.output_dir = val;
    }
    Ok(())
}

fn parse_flag(key: &str, value: &str) -> Result<bool, InfrastructureError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(InfrastructureError::ConfigError(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
