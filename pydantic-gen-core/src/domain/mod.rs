pub mod builder;
pub mod error;
pub mod naming;
pub mod node;
pub mod ports;
pub mod value;

// Handy re-exports to keep imports short elsewhere
pub use builder::{BuildOptions, TreeBuilder};
pub use error::DomainError;
pub use node::{Node, NodeKind};
pub use value::{ConfigValue, IniSection};
