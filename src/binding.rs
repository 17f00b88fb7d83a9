//! Resolved bindings - The finished answer for one key in one component
//!
//! The graph stores and returns these values; it never looks inside them.
//! Their shape belongs to the resolver that produced them.

use crate::component::ComponentPath;
use crate::key::Key;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of recipe a binding uses to satisfy a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// An `@Inject`-annotated constructor
    Injection,
    /// A `@Provides` module method
    Provision,
    /// A `@Binds` delegation to another key
    Delegate,
    /// An instance handed to the component creator
    BoundInstance,
    /// The component itself
    Component,
    /// A provision method on a component dependency
    ComponentProvision,
    /// The builder or factory of a subcomponent
    SubcomponentCreator,
    /// A set assembled from contributions
    MultiboundSet,
    /// A map assembled from contributions
    MultiboundMap,
    /// An optional binding that may be absent
    Optional,
    /// Field and method injection into an existing instance
    MembersInjection,
    /// A `MembersInjector<T>`
    MembersInjector,
    /// A `@Produces` method
    Production,
}

impl BindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingKind::Injection => "injection",
            BindingKind::Provision => "provision",
            BindingKind::Delegate => "delegate",
            BindingKind::BoundInstance => "bound_instance",
            BindingKind::Component => "component",
            BindingKind::ComponentProvision => "component_provision",
            BindingKind::SubcomponentCreator => "subcomponent_creator",
            BindingKind::MultiboundSet => "multibound_set",
            BindingKind::MultiboundMap => "multibound_map",
            BindingKind::Optional => "optional",
            BindingKind::MembersInjection => "members_injection",
            BindingKind::MembersInjector => "members_injector",
            BindingKind::Production => "production",
        }
    }

    pub fn all() -> &'static [BindingKind] {
        &[
            BindingKind::Injection,
            BindingKind::Provision,
            BindingKind::Delegate,
            BindingKind::BoundInstance,
            BindingKind::Component,
            BindingKind::ComponentProvision,
            BindingKind::SubcomponentCreator,
            BindingKind::MultiboundSet,
            BindingKind::MultiboundMap,
            BindingKind::Optional,
            BindingKind::MembersInjection,
            BindingKind::MembersInjector,
            BindingKind::Production,
        ]
    }

    pub fn is_multibound(&self) -> bool {
        matches!(self, BindingKind::MultiboundSet | BindingKind::MultiboundMap)
    }
}

impl FromStr for BindingKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "injection" | "inject" => Ok(BindingKind::Injection),
            "provision" | "provides" => Ok(BindingKind::Provision),
            "delegate" | "binds" => Ok(BindingKind::Delegate),
            "bound_instance" | "instance" => Ok(BindingKind::BoundInstance),
            "component" => Ok(BindingKind::Component),
            "component_provision" => Ok(BindingKind::ComponentProvision),
            "subcomponent_creator" | "subcomponent_builder" => Ok(BindingKind::SubcomponentCreator),
            "multibound_set" | "set" => Ok(BindingKind::MultiboundSet),
            "multibound_map" | "map" => Ok(BindingKind::MultiboundMap),
            "optional" => Ok(BindingKind::Optional),
            "members_injection" | "members" => Ok(BindingKind::MembersInjection),
            "members_injector" => Ok(BindingKind::MembersInjector),
            "production" | "produces" => Ok(BindingKind::Production),
            _ => Err(Error::UnknownBindingKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for BindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recipe for producing a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Binding {
    pub kind: BindingKind,
    /// Module contributing the binding, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Scope annotation the binding is cached in, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl Binding {
    pub fn new(kind: BindingKind) -> Self {
        Self {
            kind,
            module: None,
            scope: None,
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Get a short description for display
    pub fn short_description(&self) -> String {
        let mut out = self.kind.as_str().to_string();
        if let Some(module) = &self.module {
            out.push_str(&format!(" from {}", module));
        }
        if let Some(scope) = &self.scope {
            out.push_str(&format!(" {}", scope));
        }
        out
    }
}

/// All bindings that satisfy one key, as seen from one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedBindings {
    key: Key,
    owning_component: ComponentPath,
    bindings: Vec<Binding>,
}

impl ResolvedBindings {
    pub fn new(key: Key, owning_component: ComponentPath) -> Self {
        Self {
            key,
            owning_component,
            bindings: Vec::new(),
        }
    }

    pub fn with_binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = Binding>) -> Self {
        self.bindings.extend(bindings);
        self
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// The component these bindings were resolved for
    pub fn owning_component(&self) -> &ComponentPath {
        &self.owning_component
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// No recipe was found for the key at this component
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// The only binding, if exactly one satisfies the key
    pub fn single_binding(&self) -> Option<&Binding> {
        match self.bindings.as_slice() {
            [binding] => Some(binding),
            _ => None,
        }
    }

    pub fn is_multibound(&self) -> bool {
        self.bindings.iter().any(|b| b.kind.is_multibound())
    }
}
