//! Manifests - Serialized resolver output and the depth-first graph builder
//!
//! A manifest describes a component tree with each component's already-resolved
//! binding tables. [`GraphBuilder`] turns it into a [`BindingGraph`], building
//! every child before its parent.
//!
//! ```toml
//! [component]
//! declaration = "com.example.AppComponent"
//! scopes = ["@Singleton"]
//!
//! [[component.contributions]]
//! key = "com.example.Database"
//! bindings = [{ kind = "provision", module = "com.example.DbModule" }]
//!
//! [[component.children]]
//! declaration = "com.example.SessionComponent"
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::binding::{Binding, ResolvedBindings};
use crate::component::{ComponentDescriptor, ComponentKind, ComponentPath, Declaration};
use crate::graph::BindingGraph;
use crate::key::Key;
use crate::request::BindingTable;
use crate::{Error, Result};

/// A serialized component tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub component: ComponentManifest,
}

/// One component and its resolved tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentManifest {
    pub declaration: Declaration,
    /// Defaults to `component` at the root and `subcomponent` below it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ComponentKind>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<BindingEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_injection: Vec<BindingEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentManifest>,
}

/// The resolved bindings for one key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingEntry {
    pub key: Key,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl Manifest {
    /// Load a manifest; `.json` files are read as JSON, anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        tracing::debug!("Loading manifest {} ({})", path.display(), if is_json { "json" } else { "toml" });

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_json_str(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Build the graph with a fresh context
    pub fn build_graph(&self) -> Result<BindingGraph> {
        let mut context = BuildContext::new();
        GraphBuilder::new(&mut context).build(self)
    }
}

/// State carried through one build. Nothing is shared between builds.
#[derive(Debug, Default)]
pub struct BuildContext {
    /// Components in the order their nodes were constructed
    built: Vec<ComponentPath>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths of every node built so far, children before parents
    pub fn built(&self) -> &[ComponentPath] {
        &self.built
    }

    pub fn nodes_built(&self) -> usize {
        self.built.len()
    }

    /// Whether a node for `declaration` was built anywhere in the tree
    pub fn has_built(&self, declaration: &Declaration) -> bool {
        self.built.iter().any(|path| path.current() == declaration)
    }
}

/// Builds binding graphs from manifests, children first.
pub struct GraphBuilder<'a> {
    context: &'a mut BuildContext,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(context: &'a mut BuildContext) -> Self {
        Self { context }
    }

    pub fn build(&mut self, manifest: &Manifest) -> Result<BindingGraph> {
        let root = &manifest.component;
        let path = ComponentPath::root(root.declaration.clone());
        let graph = self.build_component(root, path)?;
        tracing::debug!(nodes = self.context.nodes_built(), "Built binding graph tree");
        Ok(graph)
    }

    fn build_component(&mut self, component: &ComponentManifest, path: ComponentPath) -> Result<BindingGraph> {
        let kind = component_kind(component, &path)?;

        let subgraphs = component
            .children
            .iter()
            .map(|child| self.build_component(child, path.child(child.declaration.clone())))
            .collect::<Result<Vec<_>>>()?;

        let mut descriptor = ComponentDescriptor::new(component.declaration.clone(), kind);
        for scope in &component.scopes {
            descriptor = descriptor.with_scope(scope.clone());
        }
        for module in &component.modules {
            descriptor = descriptor.with_module(module.clone());
        }
        for child in &component.children {
            descriptor = descriptor.with_child(child.declaration.clone());
        }

        let contributions = binding_table(&path, BindingTable::Contribution, &component.contributions)?;
        let members_injection =
            binding_table(&path, BindingTable::MembersInjection, &component.members_injection)?;

        let graph = BindingGraph::new(descriptor, contributions, members_injection, subgraphs)?;
        self.context.built.push(path);
        Ok(graph)
    }
}

fn component_kind(component: &ComponentManifest, path: &ComponentPath) -> Result<ComponentKind> {
    let at_root = path.at_root();
    let kind = component.kind.unwrap_or(if at_root {
        ComponentKind::Component
    } else {
        ComponentKind::Subcomponent
    });

    if kind.is_root() != at_root {
        let placement = if at_root { "at the root" } else { "below the root" };
        return Err(Error::Manifest(format!(
            "{} is a {} and cannot appear {} ({})",
            component.declaration, kind, placement, path
        )));
    }
    Ok(kind)
}

fn binding_table(
    path: &ComponentPath,
    table: BindingTable,
    entries: &[BindingEntry],
) -> Result<HashMap<Key, ResolvedBindings>> {
    let mut bindings = HashMap::with_capacity(entries.len());
    for entry in entries {
        if bindings.contains_key(&entry.key) {
            return Err(Error::DuplicateKey {
                component: path.clone(),
                table,
                key: entry.key.clone(),
            });
        }
        let resolved = ResolvedBindings::new(entry.key.clone(), path.clone())
            .with_bindings(entry.bindings.iter().cloned());
        bindings.insert(entry.key.clone(), resolved);
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingKind;
    use crate::request::{BindingRequest, RequestKind};

    const APP_MANIFEST: &str = r#"
[component]
declaration = "com.example.AppComponent"
scopes = ["@Singleton"]
modules = ["com.example.DbModule"]

[[component.contributions]]
key = "com.example.Database"
bindings = [{ kind = "provision", module = "com.example.DbModule", scope = "@Singleton" }]

[[component.contributions]]
key = '@Named("replica") com.example.Database'
bindings = [{ kind = "delegate", module = "com.example.DbModule" }]

[[component.members_injection]]
key = "com.example.MainActivity"
bindings = [{ kind = "members_injection" }]

[[component.children]]
declaration = "com.example.SessionComponent"

[[component.children.contributions]]
key = "com.example.Session"
bindings = [{ kind = "injection" }]

[[component.children.children]]
declaration = "com.example.ScreenComponent"

[[component.children]]
declaration = "com.example.BackgroundComponent"
"#;

    #[test]
    fn test_build_from_toml() {
        let manifest = Manifest::from_toml_str(APP_MANIFEST).unwrap();
        let mut context = BuildContext::new();
        let graph = GraphBuilder::new(&mut context).build(&manifest).unwrap();

        let descriptor = graph.component_descriptor();
        assert_eq!(descriptor.declaration().as_str(), "com.example.AppComponent");
        assert_eq!(descriptor.kind(), ComponentKind::Component);
        assert_eq!(descriptor.scopes(), ["@Singleton"]);
        assert_eq!(descriptor.child_components().len(), 2);

        let replica = Key::parse(r#"@Named("replica") com.example.Database"#).unwrap();
        let resolved = graph
            .resolved_bindings(&BindingRequest::new(replica, RequestKind::Provider))
            .unwrap();
        assert_eq!(resolved.single_binding().unwrap().kind, BindingKind::Delegate);
        assert!(resolved.owning_component().at_root());

        let activity = Key::new("com.example.MainActivity");
        assert!(graph.resolved_bindings(&BindingRequest::members_injection(activity.clone())).is_some());
        assert!(graph.resolved_bindings(&BindingRequest::instance(activity)).is_none());

        let session = &graph.subgraphs()[0];
        assert_eq!(session.component_descriptor().kind(), ComponentKind::Subcomponent);
        let session_binding = session
            .resolved_bindings(&BindingRequest::instance(Key::new("com.example.Session")))
            .unwrap();
        assert_eq!(
            session_binding.owning_component(),
            &ComponentPath::root("com.example.AppComponent").child("com.example.SessionComponent")
        );
    }

    #[test]
    fn test_children_built_before_parents() {
        let manifest = Manifest::from_toml_str(APP_MANIFEST).unwrap();
        let mut context = BuildContext::new();
        GraphBuilder::new(&mut context).build(&manifest).unwrap();

        let order: Vec<&str> = context.built().iter().map(|p| p.current().as_str()).collect();
        assert_eq!(
            order,
            [
                "com.example.ScreenComponent",
                "com.example.SessionComponent",
                "com.example.BackgroundComponent",
                "com.example.AppComponent",
            ]
        );
        assert_eq!(context.nodes_built(), 4);
        assert!(context.has_built(&Declaration::new("com.example.ScreenComponent")));
        assert!(!context.has_built(&Declaration::new("com.example.Other")));
    }

    #[test]
    fn test_build_from_json() {
        let json = r#"{
            "component": {
                "declaration": "com.example.App",
                "kind": "production_component",
                "contributions": [
                    { "key": "com.example.Feed", "bindings": [{ "kind": "production" }] }
                ],
                "children": [
                    { "declaration": "com.example.Request", "kind": "production_subcomponent" }
                ]
            }
        }"#;
        let graph = Manifest::from_json_str(json).unwrap().build_graph().unwrap();
        assert!(graph.component_descriptor().kind().is_production());
        assert_eq!(graph.subgraphs().len(), 1);
        assert_eq!(graph.stats().contribution_bindings, 1);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let manifest = Manifest::from_toml_str(
            r#"
[component]
declaration = "com.example.App"

[[component.contributions]]
key = "com.example.Database"

[[component.contributions]]
key = "com.example.Database"
"#,
        )
        .unwrap();

        match manifest.build_graph() {
            Err(Error::DuplicateKey { key, table, .. }) => {
                assert_eq!(key, Key::new("com.example.Database"));
                assert_eq!(table, BindingTable::Contribution);
            }
            other => panic!("expected duplicate key, got {:?}", other),
        }
    }

    #[test]
    fn test_same_key_in_both_tables_is_allowed() {
        let manifest = Manifest::from_toml_str(
            r#"
[component]
declaration = "com.example.App"

[[component.contributions]]
key = "com.example.Activity"

[[component.members_injection]]
key = "com.example.Activity"
"#,
        )
        .unwrap();
        let graph = manifest.build_graph().unwrap();
        assert_eq!(graph.all_resolved_bindings().count(), 2);
    }

    #[test]
    fn test_duplicate_children_rejected() {
        let manifest = Manifest::from_toml_str(
            r#"
[component]
declaration = "com.example.App"

[[component.children]]
declaration = "com.example.SubComponent"

[[component.children]]
declaration = "com.example.SubComponent"
"#,
        )
        .unwrap();

        let mut context = BuildContext::new();
        let err = GraphBuilder::new(&mut context).build(&manifest).unwrap_err();
        assert!(matches!(err, Error::DuplicateSubgraph(_)));
        assert!(err.to_string().contains("com.example.SubComponent"));
        // Both children were built, the parent was not
        assert_eq!(context.nodes_built(), 2);
        assert!(!context.has_built(&Declaration::new("com.example.App")));
    }

    #[test]
    fn test_kind_placement_checked() {
        let nested_root = Manifest::from_toml_str(
            r#"
[component]
declaration = "com.example.App"

[[component.children]]
declaration = "com.example.Other"
kind = "component"
"#,
        )
        .unwrap();
        assert!(matches!(nested_root.build_graph(), Err(Error::Manifest(_))));

        let sub_at_root = Manifest::from_toml_str(
            r#"
[component]
declaration = "com.example.Session"
kind = "subcomponent"
"#,
        )
        .unwrap();
        assert!(matches!(sub_at_root.build_graph(), Err(Error::Manifest(_))));
    }

    #[test]
    fn test_invalid_key_rejected_at_parse() {
        let result = Manifest::from_toml_str(
            r#"
[component]
declaration = "com.example.App"

[[component.contributions]]
key = "@Named(\"x\" com.example.Db"
"#,
        );
        assert!(matches!(result, Err(Error::Toml(_))));
    }
}
