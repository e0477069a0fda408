// pydantic-gen-core/src/infrastructure/parsers.rs

use std::path::Path;

use crate::domain::builder::TreeBuilder;
use crate::domain::node::Node;
use crate::domain::ports::NodeParser;
use crate::error::GeneratorError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::formats::ini::IniFile;
use crate::infrastructure::formats::{ConfigFormat, read_document};

/// INI files: every section becomes a class, values are typed by inference.
pub struct IniParser;

/// JSON files: the top level must be an object.
pub struct JsonParser;

/// YAML files (`.yaml` and `.yml`): the top level must be a mapping.
pub struct YamlParser;

impl NodeParser for IniParser {
    fn is_parsable(&self, path: &Path) -> bool {
        ConfigFormat::from_path(path) == Some(ConfigFormat::Ini)
    }

    fn parse(&self, name: &str, content: &str, builder: TreeBuilder) -> Result<Node, GeneratorError> {
        let sections = IniFile::parse(content)
            .and_then(|ini| ini.sections())
            .map_err(InfrastructureError::from)?;
        Ok(builder.build_sections(name, &sections)?)
    }
}

impl NodeParser for JsonParser {
    fn is_parsable(&self, path: &Path) -> bool {
        ConfigFormat::from_path(path) == Some(ConfigFormat::Json)
    }

    fn parse(&self, name: &str, content: &str, builder: TreeBuilder) -> Result<Node, GeneratorError> {
        let document = read_document(ConfigFormat::Json, content)?;
        Ok(builder.build_mapping(name, &document)?)
    }
}

impl NodeParser for YamlParser {
    fn is_parsable(&self, path: &Path) -> bool {
        ConfigFormat::from_path(path) == Some(ConfigFormat::Yaml)
    }

    fn parse(&self, name: &str, content: &str, builder: TreeBuilder) -> Result<Node, GeneratorError> {
        let document = read_document(ConfigFormat::Yaml, content)?;
        Ok(builder.build_mapping(name, &document)?)
    }
}

static PARSERS: [&dyn NodeParser; 3] = [&IniParser, &JsonParser, &YamlParser];

/// The parser responsible for `path`, if any.
pub fn parser_for(path: &Path) -> Option<&'static dyn NodeParser> {
    PARSERS.iter().copied().find(|p| p.is_parsable(path))
}
