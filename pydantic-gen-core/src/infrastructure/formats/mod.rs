// pydantic-gen-core/src/infrastructure/formats/mod.rs

pub mod ini;

use std::fs;
use std::path::Path;
use tracing::{debug, instrument};

use crate::domain::value::ConfigValue;
use crate::error::GeneratorError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;
use ini::{IniFile, write_ini};

/// Configuration file formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Ini,
    Json,
    Yaml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "ini" => Some(ConfigFormat::Ini),
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Ini => "ini",
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
        }
    }
}

/// Parses `content` into a document. INI files become a mapping of sections,
/// every value a string, DEFAULT merged into each section.
pub fn read_document(format: ConfigFormat, content: &str) -> Result<ConfigValue, GeneratorError> {
    let document = match format {
        ConfigFormat::Ini => {
            let sections = IniFile::parse(content)
                .and_then(|ini| ini.sections())
                .map_err(InfrastructureError::from)?;
            ConfigValue::from(sections)
        }
        ConfigFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(InfrastructureError::from)?;
            ConfigValue::from(value)
        }
        ConfigFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(InfrastructureError::from)?;
            ConfigValue::try_from(value)?
        }
    };
    Ok(document)
}

pub fn render_document(document: &ConfigValue, format: ConfigFormat) -> Result<String, GeneratorError> {
    let text = match format {
        ConfigFormat::Ini => write_ini(document).map_err(InfrastructureError::from)?,
        ConfigFormat::Json => {
            let mut text =
                serde_json::to_string_pretty(document).map_err(InfrastructureError::from)?;
            text.push('\n');
            text
        }
        ConfigFormat::Yaml => serde_yaml::to_string(document).map_err(InfrastructureError::from)?,
    };
    Ok(text)
}

fn format_of(path: &Path) -> Result<ConfigFormat, InfrastructureError> {
    ConfigFormat::from_path(path).ok_or_else(|| InfrastructureError::UnsupportedFormat(path.to_path_buf()))
}

/// Reads a configuration file into a document.
#[instrument(level = "debug")]
pub fn load_document(path: &Path) -> Result<ConfigValue, GeneratorError> {
    if !path.exists() {
        return Err(InfrastructureError::NotFound(path.to_path_buf()).into());
    }
    if path.is_dir() {
        return Err(InfrastructureError::IsADirectory(path.to_path_buf()).into());
    }
    let format = format_of(path)?;
    let content = fs::read_to_string(path)?;
    read_document(format, &content)
}

/// Writes `document` to `path` in the format its extension names. Missing
/// parent directories are created.
#[instrument(level = "debug", skip(document))]
pub fn save_document(document: &ConfigValue, path: &Path) -> Result<ConfigFormat, GeneratorError> {
    let format = format_of(path)?;
    let text = render_document(document, format)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    atomic_write(path, text)?;
    debug!(format = format.name(), "Saved configuration");
    Ok(format)
}
