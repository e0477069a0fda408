use crate::domain::builder::TreeBuilder;
use crate::domain::node::Node;
use crate::error::GeneratorError;
use std::path::Path;

/// Reads one configuration format and turns it into a class tree.
pub trait NodeParser: Send + Sync {
    /// Does this parser handle the file at `path`?
    fn is_parsable(&self, path: &Path) -> bool;

    /// Parses `content` into the root node called `name`.
    fn parse(&self, name: &str, content: &str, builder: TreeBuilder)
    -> Result<Node, GeneratorError>;
}
