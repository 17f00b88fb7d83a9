//! # bindgraph - Resolved binding graphs for compile-time dependency injection
//!
//! For a tree of nested components, records which resolved bindings satisfy each
//! requested key in each component, and exposes that mapping to code generation.
//!
//! bindgraph provides:
//! - Value types for keys, request kinds and binding requests
//! - `BindingGraph` nodes with contribution and members-injection tables
//! - Sibling-uniqueness checks at construction and a tree-wide hierarchy check
//! - A manifest format and depth-first builder standing in for the upstream resolver

pub mod key;
pub mod request;
pub mod binding;
pub mod component;
pub mod graph;
pub mod manifest;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use key::Key;
pub use request::{BindingRequest, BindingTable, RequestKind};
pub use binding::{Binding, BindingKind, ResolvedBindings};
pub use component::{ComponentDescriptor, ComponentKind, ComponentPath, Declaration};
pub use graph::{BindingGraph, DuplicateGroup, DuplicateSubgraphError, GraphStats};
pub use manifest::{BuildContext, GraphBuilder, Manifest};

/// Result type alias for bindgraph operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bindgraph operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    DuplicateSubgraph(#[from] DuplicateSubgraphError),

    #[error("Component {declaration} is repeated in its own hierarchy: {path}")]
    RepeatedInHierarchy {
        declaration: Declaration,
        path: ComponentPath,
    },

    #[error("Duplicate {table} binding for {key} in {component}")]
    DuplicateKey {
        component: ComponentPath,
        table: BindingTable,
        key: Key,
    },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Unknown request kind: {0}")]
    UnknownRequestKind(String),

    #[error("Unknown binding kind: {0}")]
    UnknownBindingKind(String),

    #[error("Unknown component kind: {0}")]
    UnknownComponentKind(String),

    #[error("Invalid component path: {0}")]
    InvalidPath(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
