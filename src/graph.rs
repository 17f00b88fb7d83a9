//! Binding Graph - Fully resolved bindings for a tree of components
//!
//! Each node owns one component's two binding tables and the already-built
//! nodes of its child components. Nodes are built children-first and are
//! immutable once constructed.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::binding::ResolvedBindings;
use crate::component::{ComponentDescriptor, ComponentPath, Declaration};
use crate::key::Key;
use crate::request::{BindingRequest, BindingTable};
use crate::{Error, Result};

/// The resolved bindings of one component and the graphs of its children.
///
/// Lookups never copy: tables are owned by the node and handed out by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingGraph {
    component_descriptor: ComponentDescriptor,
    /// Bindings answering every request kind except members-injection
    contribution_bindings: HashMap<Key, ResolvedBindings>,
    /// Bindings answering members-injection requests
    members_injection_bindings: HashMap<Key, ResolvedBindings>,
    /// One graph per child component, in declaration order
    subgraphs: Vec<BindingGraph>,
}

impl BindingGraph {
    /// Assemble a node from its tables and its already-built child graphs.
    ///
    /// Fails with [`Error::DuplicateSubgraph`] when two children originate from the
    /// same declaration. Every conflicting declaration is reported, not just the first.
    pub fn new(
        component_descriptor: ComponentDescriptor,
        contribution_bindings: HashMap<Key, ResolvedBindings>,
        members_injection_bindings: HashMap<Key, ResolvedBindings>,
        subgraphs: Vec<BindingGraph>,
    ) -> Result<Self> {
        let subgraphs = check_for_duplicates(component_descriptor.declaration(), subgraphs)?;

        tracing::debug!(
            component = %component_descriptor.declaration(),
            contributions = contribution_bindings.len(),
            members_injection = members_injection_bindings.len(),
            subgraphs = subgraphs.len(),
            "Assembled binding graph"
        );

        Ok(Self {
            component_descriptor,
            contribution_bindings,
            members_injection_bindings,
            subgraphs,
        })
    }

    pub fn component_descriptor(&self) -> &ComponentDescriptor {
        &self.component_descriptor
    }

    /// Look up the bindings answering `request` at this component.
    ///
    /// `None` means the key is not bound here; whether that is an error is up to the caller.
    pub fn resolved_bindings(&self, request: &BindingRequest) -> Option<&ResolvedBindings> {
        self.table(request.table()).get(request.key())
    }

    /// Every resolved binding of this component, from both tables, in no particular order.
    pub fn all_resolved_bindings(&self) -> impl Iterator<Item = &ResolvedBindings> + '_ {
        self.members_injection_bindings
            .values()
            .chain(self.contribution_bindings.values())
    }

    pub fn table(&self, table: BindingTable) -> &HashMap<Key, ResolvedBindings> {
        match table {
            BindingTable::Contribution => &self.contribution_bindings,
            BindingTable::MembersInjection => &self.members_injection_bindings,
        }
    }

    pub fn contribution_bindings(&self) -> &HashMap<Key, ResolvedBindings> {
        &self.contribution_bindings
    }

    pub fn members_injection_bindings(&self) -> &HashMap<Key, ResolvedBindings> {
        &self.members_injection_bindings
    }

    /// Child graphs, in the order they were supplied
    pub fn subgraphs(&self) -> &[BindingGraph] {
        &self.subgraphs
    }

    /// Direct child originating from `declaration`
    pub fn subgraph(&self, declaration: &Declaration) -> Option<&BindingGraph> {
        self.subgraphs
            .iter()
            .find(|g| g.component_descriptor.declaration() == declaration)
    }

    /// Descend to the node at `path`. The path must start at this node.
    pub fn find(&self, path: &ComponentPath) -> Option<&BindingGraph> {
        let (first, rest) = path.components().split_first()?;
        if first != self.component_descriptor.declaration() {
            return None;
        }
        rest.iter()
            .try_fold(self, |graph, declaration| graph.subgraph(declaration))
    }

    /// Depth-first, pre-order traversal of this node and all its descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(
                ComponentPath::root(self.component_descriptor.declaration().clone()),
                self,
            )],
        }
    }

    /// Check that no component appears among its own ancestors.
    ///
    /// Construction only checks direct siblings, so a tree can still nest a
    /// component inside itself further down. The same declaration in two
    /// unrelated branches is fine.
    pub fn validate_hierarchy(&self) -> Result<()> {
        for (path, _) in self.walk() {
            let repeated = match path.components().split_last() {
                Some((current, ancestors)) if ancestors.contains(current) => Some(current.clone()),
                _ => None,
            };
            if let Some(declaration) = repeated {
                tracing::warn!(component = %declaration, path = %path, "Component repeated in its own hierarchy");
                return Err(Error::RepeatedInHierarchy { declaration, path });
            }
        }
        Ok(())
    }

    /// Get statistics about this graph and all its descendants
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats::default();
        for (path, graph) in self.walk() {
            stats.components += 1;
            stats.max_depth = stats.max_depth.max(path.depth());
            stats.contribution_bindings += graph.contribution_bindings.len();
            stats.members_injection_bindings += graph.members_injection_bindings.len();
            stats.unsatisfied_keys += graph
                .all_resolved_bindings()
                .filter(|resolved| resolved.is_empty())
                .count();
        }
        stats
    }
}

/// Depth-first iterator over a graph tree, yielding each node with its path.
pub struct Walk<'a> {
    stack: Vec<(ComponentPath, &'a BindingGraph)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (ComponentPath, &'a BindingGraph);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, graph) = self.stack.pop()?;
        for child in graph.subgraphs.iter().rev() {
            let child_path = path.child(child.component_descriptor.declaration().clone());
            self.stack.push((child_path, child));
        }
        Some((path, graph))
    }
}

/// Children sharing one originating declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub declaration: Declaration,
    /// Positions of the conflicting children in the supplied list
    pub positions: Vec<usize>,
    /// Descriptors of the conflicting children, in the same order as `positions`
    pub components: Vec<ComponentDescriptor>,
}

/// Two or more child graphs of one parent originate from the same declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSubgraphError {
    parent: Declaration,
    groups: Vec<DuplicateGroup>,
}

impl DuplicateSubgraphError {
    /// The component whose children collided
    pub fn parent(&self) -> &Declaration {
        &self.parent
    }

    /// Every colliding declaration, in order of first appearance
    pub fn groups(&self) -> &[DuplicateGroup] {
        &self.groups
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.groups.iter().map(|g| &g.declaration)
    }
}

impl fmt::Display for DuplicateSubgraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expected no duplicate subgraphs in {}:", self.parent)?;
        for group in &self.groups {
            let positions: Vec<String> = group.positions.iter().map(|p| p.to_string()).collect();
            write!(
                f,
                " {} appears {} times (positions {});",
                group.declaration,
                group.positions.len(),
                positions.join(", ")
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for DuplicateSubgraphError {}

fn check_for_duplicates(
    parent: &Declaration,
    graphs: Vec<BindingGraph>,
) -> Result<Vec<BindingGraph>> {
    let groups = {
        let mut positions: HashMap<&Declaration, Vec<usize>> = HashMap::new();
        let mut first_seen: Vec<&Declaration> = Vec::new();

        for (idx, graph) in graphs.iter().enumerate() {
            let declaration = graph.component_descriptor.declaration();
            let entry = positions.entry(declaration).or_default();
            if entry.is_empty() {
                first_seen.push(declaration);
            }
            entry.push(idx);
        }

        first_seen
            .into_iter()
            .filter_map(|declaration| {
                let positions = positions.remove(declaration)?;
                (positions.len() > 1).then(|| DuplicateGroup {
                    declaration: declaration.clone(),
                    components: positions
                        .iter()
                        .map(|&idx| graphs[idx].component_descriptor.clone())
                        .collect(),
                    positions,
                })
            })
            .collect::<Vec<_>>()
    };

    if groups.is_empty() {
        return Ok(graphs);
    }

    let error = DuplicateSubgraphError {
        parent: parent.clone(),
        groups,
    };
    tracing::warn!("{}", error);
    Err(Error::DuplicateSubgraph(error))
}

/// Statistics about a binding graph tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub components: usize,
    pub max_depth: usize,
    pub contribution_bindings: usize,
    pub members_injection_bindings: usize,
    /// Keys present in a table but with no binding
    pub unsatisfied_keys: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Binding Graph Statistics:")?;
        writeln!(f, "  Components: {} (max depth: {})", self.components, self.max_depth)?;
        writeln!(f, "  Contribution bindings: {}", self.contribution_bindings)?;
        writeln!(f, "  Members-injection bindings: {}", self.members_injection_bindings)?;
        writeln!(f, "  Unsatisfied keys: {}", self.unsatisfied_keys)
    }
}
