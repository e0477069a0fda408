// pydantic-gen-core/src/application/inspect.rs

use serde::Serialize;

use crate::domain::node::{Node, NodeKind};

// --- DTOs ---
// What `pydantic-gen inspect` displays for every generated class.

#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub name: String,
    pub annotation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub class_type: String,
    pub fields: Vec<FieldSummary>,
    /// The name was made unique with a numeric suffix.
    pub needs_adjustment: bool,
    /// How many other fields reuse this class.
    pub reused: usize,
}

/// One summary per class of the module, in generation order.
pub fn inspect(root: &Node) -> Vec<ClassSummary> {
    root.classes()
        .into_iter()
        .map(|class| ClassSummary {
            class_type: class.class_type.clone(),
            fields: class
                .children
                .iter()
                .map(|field| FieldSummary {
                    name: field.name.clone(),
                    annotation: field.class_type(),
                    alias: field.original_name.clone(),
                    default: field.default.clone(),
                })
                .collect(),
            needs_adjustment: class.needs_adjustment,
            reused: count_duplicates(root, &class.class_type),
        })
        .collect()
}

fn count_duplicates(node: &Node, class_type: &str) -> usize {
    let own = usize::from(
        node.is_duplicate && node.kind == NodeKind::Model && node.class_type == class_type,
    );
    own + node
        .children
        .iter()
        .map(|c| count_duplicates(c, class_type))
        .sum::<usize>()
}
