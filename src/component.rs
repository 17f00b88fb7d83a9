//! Component descriptors - Static identity and declared shape of a component
//!
//! A component is identified by the declaration it originates from. Within one
//! parent, no two child components may originate from the same declaration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Handle to the declaration (the annotated type) a component originates from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Declaration(String);

impl Declaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The simple name (last `.`-separated segment)
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(self.0.as_str())
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Declaration {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Declaration {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The kind of component a declaration defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// A top-level component
    #[default]
    Component,
    /// A component nested inside a parent
    Subcomponent,
    /// A top-level component that may contain asynchronous producers
    ProductionComponent,
    /// A nested production component
    ProductionSubcomponent,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Component => "component",
            ComponentKind::Subcomponent => "subcomponent",
            ComponentKind::ProductionComponent => "production_component",
            ComponentKind::ProductionSubcomponent => "production_subcomponent",
        }
    }

    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::Component,
            ComponentKind::Subcomponent,
            ComponentKind::ProductionComponent,
            ComponentKind::ProductionSubcomponent,
        ]
    }

    /// Whether this kind can only appear at the root of a tree
    pub fn is_root(&self) -> bool {
        matches!(self, ComponentKind::Component | ComponentKind::ProductionComponent)
    }

    pub fn is_production(&self) -> bool {
        matches!(
            self,
            ComponentKind::ProductionComponent | ComponentKind::ProductionSubcomponent
        )
    }
}

impl FromStr for ComponentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "component" | "root" => Ok(ComponentKind::Component),
            "subcomponent" | "child" => Ok(ComponentKind::Subcomponent),
            "production_component" | "production" => Ok(ComponentKind::ProductionComponent),
            "production_subcomponent" => Ok(ComponentKind::ProductionSubcomponent),
            _ => Err(Error::UnknownComponentKind(s.to_string())),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity and declared shape of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDescriptor {
    declaration: Declaration,
    kind: ComponentKind,
    scopes: Vec<String>,
    modules: Vec<String>,
    child_components: Vec<Declaration>,
}

impl ComponentDescriptor {
    pub fn new(declaration: impl Into<Declaration>, kind: ComponentKind) -> Self {
        Self {
            declaration: declaration.into(),
            kind,
            scopes: Vec::new(),
            modules: Vec::new(),
            child_components: Vec::new(),
        }
    }

    /// Add a scope annotation (e.g. `@Singleton`)
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scopes.push(scope.into());
        self
    }

    /// Add an installed module
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Declare a child component
    pub fn with_child(mut self, child: impl Into<Declaration>) -> Self {
        self.child_components.push(child.into());
        self
    }

    /// The declaration this component originates from
    pub fn declaration(&self) -> &Declaration {
        &self.declaration
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// Declarations of the child components, in declaration order
    pub fn child_components(&self) -> &[Declaration] {
        &self.child_components
    }
}

/// The chain of component declarations from the root down to one component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ComponentPath(Vec<Declaration>);

impl ComponentPath {
    /// Path of a root component
    pub fn root(declaration: impl Into<Declaration>) -> Self {
        Self(vec![declaration.into()])
    }

    /// Parse a `/`-separated path, e.g. `com.example.App/com.example.Session`
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<Declaration> = text
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Declaration::from)
            .collect();
        if parts.is_empty() {
            return Err(Error::InvalidPath(format!("empty component path: {:?}", text)));
        }
        Ok(Self(parts))
    }

    /// Path of a child of this component
    pub fn child(&self, declaration: impl Into<Declaration>) -> Self {
        let mut components = self.0.clone();
        components.push(declaration.into());
        Self(components)
    }

    /// The component this path points at
    pub fn current(&self) -> &Declaration {
        // Paths are constructed non-empty
        &self.0[self.0.len() - 1]
    }

    pub fn root_component(&self) -> &Declaration {
        &self.0[0]
    }

    pub fn parent(&self) -> Option<ComponentPath> {
        if self.at_root() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn at_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Nesting depth; the root is at depth 0
    pub fn depth(&self) -> usize {
        self.0.len() - 1
    }

    pub fn components(&self) -> &[Declaration] {
        &self.0
    }

    pub fn contains(&self, declaration: &Declaration) -> bool {
        self.0.contains(declaration)
    }
}

impl fmt::Display for ComponentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Declaration::as_str).collect();
        write!(f, "{}", names.join(" → "))
    }
}
