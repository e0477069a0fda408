// pydantic-gen-core/src/domain/node.rs

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::naming::is_identifier;
use crate::domain::value::python_str_literal;

/// Types that never get a class of their own.
pub const BUILTIN_TYPES: [&str; 7] = ["int", "float", "str", "bool", "list", "tuple", "Any"];

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A section of the file: becomes a `BaseModel` class.
    Model,
    /// A plain value: `int`, `str`, ...
    Scalar,
    /// A list: its type is derived from the types of its elements.
    List,
}

/// A section, value or list of the configuration file.
///
/// `name` is the attribute name used in the parent class (snake_case),
/// `class_type` the class name (PascalCase) or builtin type.
#[derive(Debug, Serialize, Clone)]
pub struct Node {
    pub name: String,
    pub class_type: String,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    pub is_duplicate: bool,
    pub needs_adjustment: bool,
}

impl Node {
    pub fn new(
        name: impl Into<String>,
        class_type: impl Into<String>,
        kind: NodeKind,
        children: Vec<Node>,
        original_name: Option<String>,
    ) -> Result<Self, DomainError> {
        let node = Node {
            name: name.into(),
            class_type: class_type.into(),
            kind,
            children,
            default: None,
            original_name,
            is_duplicate: false,
            needs_adjustment: false,
        };

        if !is_identifier(&node.name) {
            return Err(DomainError::InvalidIdentifier {
                name: node.name,
                original: node.original_name,
            });
        }
        if node.kind != NodeKind::List && !is_identifier(&node.class_type) {
            return Err(DomainError::InvalidClassName(node.class_type));
        }
        Ok(node)
    }

    pub fn list(
        name: impl Into<String>,
        children: Vec<Node>,
        original_name: Option<String>,
    ) -> Result<Self, DomainError> {
        Self::new(name, "list", NodeKind::List, children, original_name)
    }

    pub fn with_default(mut self, default: Option<String>) -> Self {
        self.default = default;
        self
    }

    /// The annotation used for this node in its parent class.
    ///
    /// Lists are `list`, `list[T]` or `list[Union[T1, T2]]` depending on the
    /// types of their elements.
    pub fn class_type(&self) -> String {
        if self.kind != NodeKind::List {
            return self.class_type.clone();
        }
        if self.children.is_empty() {
            return "list".to_string();
        }
        let mut types: Vec<String> = Vec::new();
        for child in &self.children {
            let t = child.class_type();
            if !types.contains(&t) {
                types.push(t);
            }
        }
        if types.len() == 1 {
            format!("list[{}]", types[0])
        } else {
            format!("list[Union[{}]]", types.join(", "))
        }
    }

    /// Structural comparison used to detect classes that were already generated.
    /// Field order does not matter.
    pub fn is_equivalent(&self, other: &Node) -> bool {
        if self.kind != other.kind
            || self.name != other.name
            || self.children.len() != other.children.len()
        {
            return false;
        }
        if self.kind == NodeKind::Scalar && self.class_type != other.class_type {
            return false;
        }

        let mut mine: Vec<&Node> = self.children.iter().collect();
        let mut theirs: Vec<&Node> = other.children.iter().collect();
        mine.sort_by(|a, b| a.name.cmp(&b.name));
        theirs.sort_by(|a, b| a.name.cmp(&b.name));
        mine.iter().zip(theirs.iter()).all(|(a, b)| a.is_equivalent(b))
    }

    /// Arguments of the `Field(...)` call: the default value and the alias of
    /// the original key.
    pub fn field_args(&self) -> String {
        let mut args = Vec::new();
        if let Some(default) = &self.default {
            args.push(default.clone());
        }
        if let Some(original) = &self.original_name {
            let original = python_str_literal(original);
            args.push(format!(
                "\n        alias={original},\n        validation_alias=AliasChoices('{}', {original})",
                self.name
            ));
        }
        args.join(", ")
    }

    /// Source lines of the `BaseModel` class for this node. Only models
    /// produce code.
    pub fn generate_code(&self) -> Vec<String> {
        if self.kind != NodeKind::Model {
            return Vec::new();
        }

        let mut code = Vec::new();
        if self.needs_adjustment {
            code.push("# TODO please adjust the class name".to_string());
        }
        code.push(format!("class {}(BaseModel):", self.class_type));
        code.push("    \"\"\"".to_string());
        code.push(format!(
            "    Pydantic class for {}",
            self.original_name.as_deref().unwrap_or(&self.class_type)
        ));
        code.push("    \"\"\"".to_string());

        for child in &self.children {
            let child_type = child.class_type();
            if child_type == "Any" {
                code.push("    # TODO please specify the type".to_string());
            }
            let line = format!("    {}: {}", child.name, child_type);
            let args = child.field_args();
            if args.is_empty() {
                code.push(line);
            } else {
                code.push(format!("{line} = Field({args})"));
                code.push(String::new());
            }
        }

        if code.last().is_some_and(|l| l.is_empty()) {
            code.pop();
        }
        code
    }

    /// Models in generation order: this node first, then its children depth
    /// first. Duplicates and everything below them are skipped.
    pub fn classes(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_classes(&mut out);
        out
    }

    fn collect_classes<'a>(&'a self, out: &mut Vec<&'a Node>) {
        if self.kind == NodeKind::Model {
            out.push(self);
        }
        for child in &self.children {
            if !child.is_duplicate {
                child.collect_classes(out);
            }
        }
    }

    fn any(&self, predicate: &dyn Fn(&Node) -> bool) -> bool {
        predicate(self) || self.children.iter().any(|c| c.any(predicate))
    }
}

/// Is any field typed `Any` (a `null` in the file)?
pub fn any_untyped_fields(node: &Node) -> bool {
    node.any(&|n| n.class_type() == "Any")
}

/// Does any field below the root carry an alias?
pub fn any_aliases(node: &Node) -> bool {
    node.children
        .iter()
        .any(|c| c.any(&|n| n.original_name.is_some()))
}

/// Does any field below the root need a `Field(...)` call?
pub fn any_field_args(node: &Node) -> bool {
    node.children.iter().any(|c| {
        c.any(&|n| n.default.is_some() || n.original_name.is_some())
    })
}
