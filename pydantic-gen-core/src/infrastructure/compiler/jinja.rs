// pydantic-gen-core/src/infrastructure/compiler/jinja.rs

// Renders the Python module around the generated classes: imports, the file
// loading helper and the `load_<root>` functions.

use crate::application::ports::TemplateEngine;
use crate::error::GeneratorError;
use crate::infrastructure::error::InfrastructureError;
use minijinja::Environment;
use std::path::PathBuf;

pub const MODULE_TEMPLATE: &str = "module.py.j2";

const MODULE_SOURCE: &str = r#""""
A collection of generated BaseModels with {{ root_class }} as the root.
"""

from __future__ import annotations

{% if not runtime_import %}
import json
from configparser import ConfigParser
{% endif %}
from pathlib import Path
from typing import {{ typing_imports }}

{% if not runtime_import %}
import yaml
{% endif %}
from pydantic import {{ pydantic_imports }}
{% if runtime_import %}

from {{ runtime_import }} import configuration_file_to_dict
{% endif %}


{% if not runtime_import %}
def configuration_file_to_dict(path: Union[str, Path], encoding: str = "utf-8") -> dict:
    """
    Reads an INI, JSON or YAML file into a dictionary.
    """
    path = Path(path)
    suffix = path.suffix.lower()
    if suffix == ".ini":
        config = ConfigParser()
        config.optionxform = str
        config.read(path, encoding=encoding)
        return {key: dict(value) for key, value in config.items() if key != config.default_section}
    with open(path, "r", encoding=encoding) as file:
        if suffix in (".yaml", ".yml"):
            return yaml.safe_load(file) or {}
        if suffix == ".json":
            return json.load(file)
    raise ValueError(f"Unsupported configuration file: {path}")


{% endif %}
{% for model in classes %}
{{ model }}


{% endfor %}
def load_{{ root_name }}(input_dict: dict) -> {{ root_class }}:
    """
    Returns a :class:`.{{ root_class }}` with the values of the given dictionary.
    """
    return {{ root_class }}(**input_dict)


def load_{{ root_name }}_from_file(path: Union[str, Path], encoding: str = "utf-8") -> {{ root_class }}:
    """
    Reads the given file and returns a :class:`.{{ root_class }}`.
    """
    try:
        data = configuration_file_to_dict(path=path, encoding=encoding)
        return load_{{ root_name }}(data)
    except Exception as exc:
        raise exc from Exception(f"Failed to load data from {path}")
"#;

fn builtin_template(name: &str) -> Option<&'static str> {
    match name {
        MODULE_TEMPLATE => Some(MODULE_SOURCE),
        _ => None,
    }
}

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    /// Templates found in `template_dir` take precedence over the built-in ones.
    pub fn new(template_dir: Option<PathBuf>) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        let disk = template_dir.map(minijinja::path_loader);
        env.set_loader(move |name| {
            if let Some(loader) = &disk
                && let Some(source) = loader(name)?
            {
                return Ok(Some(source));
            }
            Ok(builtin_template(name).map(str::to_string))
        });

        Self { env }
    }
}

impl Default for JinjaRenderer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl TemplateEngine for JinjaRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, GeneratorError> {
        self.env
            .get_template(template)
            .and_then(|tmpl| tmpl.render(context))
            .map_err(|e| GeneratorError::Infrastructure(InfrastructureError::TemplateError(e)))
    }
}
