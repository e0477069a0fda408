// pydantic-gen-core/src/infrastructure/compiler/discovery.rs

use crate::domain::builder::{BuildOptions, TreeBuilder};
use crate::domain::node::Node;
use crate::error::GeneratorError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::parsers::parser_for;

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use walkdir::WalkDir;

pub struct ConfigDiscovery;

impl ConfigDiscovery {
    /// Parses one configuration file into its class tree.
    ///
    /// Returns `Ok(None)` when no parser handles the file. The root is named
    /// after the file name up to its first `.`. Every failure while reading or
    /// building is reported as a parsing error of the absolute path.
    #[instrument(level = "debug", skip(options))]
    pub fn parse_file(path: &Path, options: BuildOptions) -> Result<Option<Node>, GeneratorError> {
        if !path.exists() {
            return Err(InfrastructureError::NotFound(path.to_path_buf()).into());
        }
        if path.is_dir() {
            return Err(InfrastructureError::IsADirectory(path.to_path_buf()).into());
        }
        let Some(parser) = parser_for(path) else {
            debug!("No parser for file, skipping");
            return Ok(None);
        };

        let name = root_name(path);
        fs::read_to_string(path)
            .map_err(GeneratorError::from)
            .and_then(|content| parser.parse(&name, &content, TreeBuilder::new(options)))
            .map(Some)
            .map_err(|e| {
                let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
                GeneratorError::parsing(absolute, e)
            })
    }

    /// Parses every supported file below `dir`, recursively, in file name order.
    #[instrument(level = "debug", skip(options))]
    pub fn parse_dir(dir: &Path, options: BuildOptions) -> Result<Vec<Node>, GeneratorError> {
        let mut nodes = Vec::new();
        for path in Self::config_files(dir)? {
            if let Some(node) = Self::parse_file(&path, options)? {
                nodes.push(node);
            }
        }
        Ok(nodes)
    }

    /// Every regular file below `dir`, sorted by file name within each directory.
    pub fn config_files(dir: &Path) -> Result<Vec<PathBuf>, GeneratorError> {
        if !dir.exists() {
            return Err(InfrastructureError::NotFound(dir.to_path_buf()).into());
        }
        if !dir.is_dir() {
            return Err(InfrastructureError::NotADirectory(dir.to_path_buf()).into());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

fn root_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_name.split('.').next().unwrap_or_default().to_string()
}
