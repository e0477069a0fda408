// pydantic-gen-core/src/domain/builder.rs
//
// Builds the class tree of a configuration document and keeps class names
// unique across the generated module.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::naming::{class_name, field_name};
use crate::domain::node::{BUILTIN_TYPES, Node, NodeKind};
use crate::domain::value::{ConfigValue, IniSection};

/// Class-like names the generated module imports or uses itself. A class
/// with one of these names would shadow them.
pub const MODULE_NAMES: [&str; 9] = [
    "Path",
    "Union",
    "Any",
    "BaseModel",
    "Field",
    "AliasChoices",
    "ConfigParser",
    "Exception",
    "ValueError",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Keep the values of the file as field defaults.
    pub with_defaults: bool,
}

/// One builder per generated module: the registry decides which classes
/// are reused and which ones need a new name.
#[derive(Debug)]
pub struct TreeBuilder {
    options: BuildOptions,
    /// Base class type -> every class registered under it.
    registry: HashMap<String, Vec<Node>>,
    /// Every class name already used in the module (root and imports included).
    taken: HashSet<String>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

fn original_if_renamed(raw: &str, derived: &str) -> Option<String> {
    (raw != derived).then(|| raw.to_string())
}

impl TreeBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            registry: HashMap::new(),
            taken: MODULE_NAMES.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Root node of a JSON or YAML document. `name` is the file stem.
    pub fn build_mapping(mut self, name: &str, data: &ConfigValue) -> Result<Node, DomainError> {
        let (root_name, root_type) = self.reserve_root(name)?;
        let children = match data {
            ConfigValue::Mapping(entries) => self.children_from_mapping(entries, &root_type)?,
            ConfigValue::Null => Vec::new(),
            other => return Err(DomainError::RootNotMapping(other.kind().to_string())),
        };
        let original = original_if_renamed(name, &root_name);
        Node::new(root_name, root_type, NodeKind::Model, children, original)
    }

    /// Root node of an INI file: one class per section.
    pub fn build_sections(mut self, name: &str, sections: &[IniSection]) -> Result<Node, DomainError> {
        let (root_name, root_type) = self.reserve_root(name)?;

        let mut children = Vec::with_capacity(sections.len());
        for section in sections {
            let section_name = field_name(&section.name)?;
            let section_type = class_name(&section.name);

            let mut fields = Vec::with_capacity(section.entries.len());
            for (key, value) in &section.entries {
                let (field_type, literal) = infer_ini_type(value);
                let name = field_name(key)?;
                let original = original_if_renamed(key, &name);
                let field = Node::new(name, field_type, NodeKind::Scalar, vec![], original)?;
                fields.push(self.with_default(field, Some(literal)));
            }

            let original = original_if_renamed(&section.name, &section_name);
            let mut child = Node::new(section_name, section_type, NodeKind::Model, fields, original)?;
            self.register(&mut child, "");
            children.push(child);
        }

        let original = original_if_renamed(name, &root_name);
        Node::new(root_name, root_type, NodeKind::Model, children, original)
    }

    fn reserve_root(&mut self, name: &str) -> Result<(String, String), DomainError> {
        let root_name = field_name(name)?;
        let mut root_type = class_name(name);
        if self.taken.contains(&root_type) {
            root_type = format!("{root_type}Model");
            debug!(class = %root_type, "Root class renamed, its name is used by the module");
        }
        self.taken.insert(root_type.clone());
        Ok((root_name, root_type))
    }

    fn with_default(&self, node: Node, literal: Option<String>) -> Node {
        if self.options.with_defaults {
            node.with_default(literal)
        } else {
            node
        }
    }

    fn children_from_mapping(
        &mut self,
        entries: &[(String, ConfigValue)],
        parent_type: &str,
    ) -> Result<Vec<Node>, DomainError> {
        let mut children = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let name = field_name(key)?;
            let original = original_if_renamed(key, &name);

            let child = match value {
                // lists get their type from their elements
                ConfigValue::List(items) => {
                    let elements = self.children_from_list(items, &name)?;
                    Node::list(name, elements, original)?
                }
                ConfigValue::Mapping(inner) => {
                    let child_type = class_name(key);
                    let fields = self.children_from_mapping(inner, &child_type)?;
                    let mut child = Node::new(name, child_type, NodeKind::Model, fields, original)?;
                    self.register(&mut child, parent_type);
                    child
                }
                scalar => {
                    let child =
                        Node::new(name, scalar.python_type(), NodeKind::Scalar, vec![], original)?;
                    self.with_default(child, scalar.python_literal())
                }
            };
            children.push(child);
        }
        Ok(children)
    }

    fn children_from_list(
        &mut self,
        items: &[ConfigValue],
        field: &str,
    ) -> Result<Vec<Node>, DomainError> {
        let element_name = field_name(&format!("{field}_item"))?;

        let mut elements = Vec::with_capacity(items.len());
        for item in items {
            let element = match item {
                ConfigValue::List(inner) => {
                    let nested = self.children_from_list(inner, field)?;
                    Node::list(element_name.clone(), nested, None)?
                }
                ConfigValue::Mapping(inner) => {
                    let element_type = class_name(&format!("{field}ListItem"));
                    let fields = self.children_from_mapping(inner, &element_type)?;
                    let mut element =
                        Node::new(element_name.clone(), element_type, NodeKind::Model, fields, None)?;
                    // list items have no enclosing class to borrow a prefix from
                    self.register(&mut element, "");
                    element
                }
                scalar => Node::new(
                    element_name.clone(),
                    scalar.python_type(),
                    NodeKind::Scalar,
                    vec![],
                    None,
                )?,
            };
            elements.push(element);
        }
        Ok(elements)
    }

    /// Reuses the class of an equivalent node or gives the node a class name
    /// that is not used yet.
    fn register(&mut self, node: &mut Node, parent_type: &str) {
        if BUILTIN_TYPES.contains(&node.class_type.as_str()) {
            return;
        }
        let base_type = node.class_type.clone();

        if let Some(existing) = self
            .registry
            .get(&base_type)
            .and_then(|nodes| nodes.iter().find(|e| node.is_equivalent(e)))
        {
            debug!(class = %existing.class_type, field = %node.name, "Reusing existing class");
            node.class_type = existing.class_type.clone();
            node.is_duplicate = true;
            return;
        }

        if self.taken.contains(&node.class_type) {
            node.class_type = class_name(&format!("{parent_type}{base_type}"));

            if self.taken.contains(&node.class_type) {
                let mut suffix = self.registry.get(&base_type).map_or(1, Vec::len);
                let prefixed = node.class_type.clone();
                while self.taken.contains(&format!("{prefixed}{suffix}")) {
                    suffix += 1;
                }
                node.class_type = format!("{prefixed}{suffix}");
                node.needs_adjustment = true;
            }
            debug!(from = %base_type, to = %node.class_type, "Renamed clashing class");
        }

        self.taken.insert(node.class_type.clone());
        self.registry.entry(base_type).or_default().push(node.clone());
    }
}

/// Type of an INI value (always a string in the file) and its Python literal.
pub fn infer_ini_type(value: &str) -> (&'static str, String) {
    let lower = value.to_lowercase();
    if lower == "true" || lower == "false" {
        let literal = if lower == "true" { "True" } else { "False" };
        return ("bool", literal.to_string());
    }
    if is_digits(value) {
        return ("int", value.to_string());
    }
    // "," and "." are both accepted as decimal separator, only one of them
    let normalized = value.replace(',', ".");
    if is_digits(&normalized.replacen('.', "", 1)) {
        return ("float", normalized);
    }
    ("str", crate::domain::value::python_str_literal(value))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
