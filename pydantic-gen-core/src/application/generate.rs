// pydantic-gen-core/src/application/generate.rs

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::application::ports::TemplateEngine;
use crate::domain::builder::BuildOptions;
use crate::domain::node::{Node, any_aliases, any_field_args, any_untyped_fields};
use crate::error::GeneratorError;
use crate::infrastructure::compiler::{ConfigDiscovery, MODULE_TEMPLATE};
use crate::infrastructure::config::GeneratorConfig;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, ensure_package_dir};

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    /// Import `configuration_file_to_dict` from this module instead of
    /// writing the helper into the generated file.
    pub runtime_import: Option<String>,
    pub init_files: bool,
    pub with_defaults: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            runtime_import: None,
            init_files: true,
            with_defaults: false,
        }
    }
}

impl From<&GeneratorConfig> for GenerateOptions {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            runtime_import: config.runtime_import.clone(),
            init_files: config.init_files,
            with_defaults: config.with_defaults,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedModule {
    pub input: PathBuf,
    pub output: PathBuf,
    pub root_class: String,
    pub classes: usize,
}

/// Outcome of a directory run: what was written, what had no parser.
#[derive(Debug, Default, Serialize)]
pub struct GenerationReport {
    pub generated: Vec<GeneratedModule>,
    pub skipped: Vec<PathBuf>,
}

#[derive(Serialize)]
struct ModuleContext<'a> {
    root_class: &'a str,
    root_name: &'a str,
    typing_imports: String,
    pydantic_imports: String,
    runtime_import: Option<&'a str>,
    classes: Vec<String>,
}

pub struct ClassGenerator {
    engine: Arc<dyn TemplateEngine>,
    options: GenerateOptions,
}

impl ClassGenerator {
    pub fn new(engine: Arc<dyn TemplateEngine>, options: GenerateOptions) -> Self {
        Self { engine, options }
    }

    fn build_options(&self) -> BuildOptions {
        BuildOptions {
            with_defaults: self.options.with_defaults,
        }
    }

    /// Class tree of one file, `None` when the format is not supported.
    pub fn parse_file(&self, path: &Path) -> Result<Option<Node>, GeneratorError> {
        ConfigDiscovery::parse_file(path, self.build_options())
    }

    /// Source code of the Python module for the tree below `root`.
    pub fn generate_all_classes(&self, root: &Node) -> Result<String, GeneratorError> {
        let mut typing = vec!["Union"];
        if any_untyped_fields(root) {
            typing.push("Any");
        }
        let mut pydantic = vec!["BaseModel"];
        if any_field_args(root) {
            pydantic.push("Field");
        }
        if any_aliases(root) {
            pydantic.push("AliasChoices");
        }

        let context = ModuleContext {
            root_class: &root.class_type,
            root_name: &root.name,
            typing_imports: typing.join(", "),
            pydantic_imports: pydantic.join(", "),
            runtime_import: self.options.runtime_import.as_deref(),
            classes: root
                .classes()
                .into_iter()
                .map(|node| node.generate_code().join("\n"))
                .collect(),
        };
        let context = serde_json::to_value(&context).map_err(InfrastructureError::from)?;
        self.engine.render(MODULE_TEMPLATE, &context)
    }

    /// Generates the module for `input` into `output`.
    ///
    /// Returns `Ok(None)` (and writes nothing) for unsupported files.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_class_code(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<Option<GeneratedModule>, GeneratorError> {
        let Some(root) = self.parse_file(input)? else {
            warn!(path = %input.display(), "Unsupported file type, nothing generated");
            return Ok(None);
        };
        let code = self.generate_all_classes(&root)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_package_dir(parent, self.options.init_files)?;
        }
        atomic_write(output, code)?;

        let module = GeneratedModule {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            root_class: root.class_type.clone(),
            classes: root.classes().len(),
        };
        info!(input = %input.display(), output = %output.display(), classes = module.classes, "Generated module");
        Ok(Some(module))
    }

    /// Generates one module per file found below `input_dir` (recursively)
    /// into `output_dir`. The output is flat: `a/b/app.yaml` becomes
    /// `<output_dir>/app.py`.
    #[instrument(level = "debug", skip(self))]
    pub fn generate_class_code_from_dir(
        &self,
        input_dir: &Path,
        output_dir: &Path,
    ) -> Result<GenerationReport, GeneratorError> {
        let files = ConfigDiscovery::config_files(input_dir)?;
        ensure_package_dir(output_dir, self.options.init_files)?;

        let mut report = GenerationReport::default();
        for file in files {
            let Some(file_name) = file.with_extension("py").file_name().map(|n| n.to_owned()) else {
                continue;
            };
            let output = output_dir.join(file_name);
            match self.generate_class_code(&file, &output)? {
                Some(module) => report.generated.push(module),
                None => report.skipped.push(file),
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeBuilder;
    use crate::domain::value::ConfigValue;
    use crate::infrastructure::compiler::JinjaRenderer;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn generator(options: GenerateOptions) -> ClassGenerator {
        ClassGenerator::new(Arc::new(JinjaRenderer::default()), options)
    }

    fn tree(json: &str, options: BuildOptions) -> Result<Node> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(TreeBuilder::new(options).build_mapping("demo", &ConfigValue::from(value))?)
    }

    #[test]
    fn test_generate_all_classes_with_runtime_import() -> Result<()> {
        let generator = generator(GenerateOptions {
            runtime_import: Some("shared.config".to_string()),
            ..Default::default()
        });
        let root = tree(
            r#"{"server": {"host": "localhost", "port": 8080}, "timeout": null}"#,
            BuildOptions::default(),
        )?;

        let expected = r#""""
A collection of generated BaseModels with Demo as the root.
"""

from __future__ import annotations

from pathlib import Path
from typing import Union, Any

from pydantic import BaseModel

from shared.config import configuration_file_to_dict


class Demo(BaseModel):
    """
    Pydantic class for Demo
    """
    server: Server
    # TODO please specify the type
    timeout: Any


class Server(BaseModel):
    """
    Pydantic class for Server
    """
    host: str
    port: int


def load_demo(input_dict: dict) -> Demo:
    """
    Returns a :class:`.Demo` with the values of the given dictionary.
    """
    return Demo(**input_dict)


def load_demo_from_file(path: Union[str, Path], encoding: str = "utf-8") -> Demo:
    """
    Reads the given file and returns a :class:`.Demo`.
    """
    try:
        data = configuration_file_to_dict(path=path, encoding=encoding)
        return load_demo(data)
    except Exception as exc:
        raise exc from Exception(f"Failed to load data from {path}")
"#;
        assert_eq!(generator.generate_all_classes(&root)?, expected);
        Ok(())
    }

    #[test]
    fn test_imports_follow_the_tree() -> Result<()> {
        let generator = generator(GenerateOptions::default());

        let plain = tree(r#"{"host": "x"}"#, BuildOptions::default())?;
        let code = generator.generate_all_classes(&plain)?;
        assert!(code.contains("from typing import Union\n"));
        assert!(code.contains("from pydantic import BaseModel\n"));
        assert!(code.contains("def configuration_file_to_dict("));

        let aliased = tree(r#"{"Host Name": "x"}"#, BuildOptions::default())?;
        let code = generator.generate_all_classes(&aliased)?;
        assert!(code.contains("from pydantic import BaseModel, Field, AliasChoices\n"));
        assert!(code.contains(
            "    host_name: str = Field(\n        alias='Host Name',\n        validation_alias=AliasChoices('host_name', 'Host Name'))\n"
        ));

        let defaults = tree(r#"{"port": 80}"#, BuildOptions { with_defaults: true })?;
        let code = generator.generate_all_classes(&defaults)?;
        assert!(code.contains("from pydantic import BaseModel, Field\n"));
        assert!(code.contains("    port: int = Field(80)\n"));
        Ok(())
    }

    #[test]
    fn test_path_mapping_keeps_pathlib_usable() -> Result<()> {
        let generator = generator(GenerateOptions::default());
        let root = tree(r#"{"path": {"root": "/srv"}, "field": {"x": 1}}"#, BuildOptions::default())?;

        let code = generator.generate_all_classes(&root)?;
        assert!(code.contains("    path: DemoPath\n    field: DemoField\n"));
        assert!(code.contains("class DemoPath(BaseModel):\n"));
        assert!(code.contains("class DemoField(BaseModel):\n"));
        assert!(!code.contains("class Path("));
        assert!(!code.contains("class Field("));
        assert!(code.contains("def load_demo_from_file(path: Union[str, Path]"));
        Ok(())
    }

    #[test]
    fn test_generate_class_code_writes_package() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("app.yaml");
        fs::write(&input, "name: demo\n")?;
        let output = dir.path().join("models").join("app.py");

        let module = generator(GenerateOptions::default())
            .generate_class_code(&input, &output)?
            .ok_or_else(|| anyhow::anyhow!("nothing generated"))?;

        assert_eq!(module.root_class, "App");
        assert_eq!(module.classes, 1);
        assert!(fs::read_to_string(&output)?.contains("class App(BaseModel):"));
        assert_eq!(fs::read_to_string(dir.path().join("models").join("__init__.py"))?, "\n");
        Ok(())
    }

    #[test]
    fn test_generate_class_code_without_init_file() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("app.json");
        fs::write(&input, r#"{"a": 1}"#)?;
        let output = dir.path().join("out").join("app.py");

        let options = GenerateOptions {
            init_files: false,
            ..Default::default()
        };
        generator(options).generate_class_code(&input, &output)?;

        assert!(output.exists());
        assert!(!dir.path().join("out").join("__init__.py").exists());
        Ok(())
    }

    #[test]
    fn test_generate_class_code_unsupported_input() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("notes.txt");
        fs::write(&input, "hello")?;
        let output = dir.path().join("notes.py");

        assert!(generator(GenerateOptions::default()).generate_class_code(&input, &output)?.is_none());
        assert!(!output.exists());
        Ok(())
    }

    #[test]
    fn test_generate_from_dir_is_flat() -> Result<()> {
        let dir = tempdir()?;
        let input = dir.path().join("configs");
        fs::create_dir_all(input.join("nested"))?;
        fs::write(input.join("db.ini"), "[db]\nhost = x\n")?;
        fs::write(input.join("nested").join("app.settings.yaml"), "debug: true\n")?;
        fs::write(input.join("README.md"), "docs")?;
        let output = dir.path().join("generated");

        let report =
            generator(GenerateOptions::default()).generate_class_code_from_dir(&input, &output)?;

        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.skipped, vec![input.join("README.md")]);
        assert!(output.join("__init__.py").exists());
        assert!(output.join("db.py").exists());
        assert!(output.join("app.settings.py").exists());
        Ok(())
    }

    #[test]
    fn test_generate_from_dir_errors() -> Result<()> {
        let dir = tempdir()?;
        let generator = generator(GenerateOptions::default());

        let missing = generator.generate_class_code_from_dir(&dir.path().join("nope"), dir.path());
        assert!(matches!(
            missing,
            Err(GeneratorError::Infrastructure(InfrastructureError::NotFound(_)))
        ));

        let file = dir.path().join("file.yaml");
        fs::write(&file, "a: 1\n")?;
        let not_dir = generator.generate_class_code_from_dir(dir.path(), &file);
        assert!(matches!(
            not_dir,
            Err(GeneratorError::Infrastructure(InfrastructureError::NotADirectory(_)))
        ));
        Ok(())
    }
}
