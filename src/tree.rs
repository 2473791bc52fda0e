//! Dependency-tree introspection.
//!
//! Trees are built read-only from the registry and each service's declared
//! parameter types, whether or not anything was ever instantiated. They are
//! derived on demand and never cached.

use std::collections::{HashMap, HashSet};
use std::fmt;

#[cfg(feature = "graph-export")]
use serde::{Deserialize, Serialize};

use crate::error::{DiError, DiResult};
use crate::injector::Injector;
use crate::key::TypeKey;
use crate::token::Token;

/// One service in a dependency tree.
///
/// `children` mirror the service's declared constructor parameters that are
/// registered services, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "graph-export", derive(Serialize, Deserialize))]
pub struct DependencyNode {
    /// Token of the service
    pub id: Token,
    /// Display name of the service type
    pub name: String,
    /// Where the service was registered, when known
    #[cfg_attr(feature = "graph-export", serde(default, skip_serializing_if = "Option::is_none"))]
    pub source_location: Option<String>,
    /// Dependencies, in declaration order
    #[cfg_attr(feature = "graph-export", serde(default))]
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub fn new(id: impl Into<Token>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            source_location: None,
            children: Vec::new(),
        }
    }

    pub fn with_source_location(mut self, location: impl Into<String>) -> Self {
        self.source_location = Some(location.into());
        self
    }

    pub fn with_child(mut self, child: DependencyNode) -> Self {
        self.children.push(child);
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(DependencyNode::size).sum::<usize>()
    }

    /// Serializes the tree as pretty-printed JSON.
    #[cfg(feature = "graph-export")]
    pub fn to_json(&self) -> DiResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiError::Export(e.to_string()))
    }

    /// Serializes the tree as YAML.
    #[cfg(feature = "graph-export")]
    pub fn to_yaml(&self) -> DiResult<String> {
        serde_yaml::to_string(self).map_err(|e| DiError::Export(e.to_string()))
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&print_tree(self, true).join("\n"))
    }
}

/// Something that renders as ASCII tree lines: a node or a list of roots.
pub trait TreeRender {
    fn render_lines(&self, include_source_location: bool) -> Vec<String>;
}

impl TreeRender for DependencyNode {
    fn render_lines(&self, include_source_location: bool) -> Vec<String> {
        let mut lines = vec![label(self, include_source_location)];

        let last = self.children.len().saturating_sub(1);
        for (index, child) in self.children.iter().enumerate() {
            let (head, tail) = if index == last { ("└ ", "  ") } else { ("├ ", "│ ") };
            for (line_no, line) in child.render_lines(include_source_location).into_iter().enumerate() {
                let prefix = if line_no == 0 { head } else { tail };
                lines.push(format!("{prefix}{line}"));
            }
        }
        lines
    }
}

impl TreeRender for [DependencyNode] {
    fn render_lines(&self, include_source_location: bool) -> Vec<String> {
        self.iter()
            .flat_map(|root| root.render_lines(include_source_location))
            .collect()
    }
}

impl TreeRender for Vec<DependencyNode> {
    fn render_lines(&self, include_source_location: bool) -> Vec<String> {
        self.as_slice().render_lines(include_source_location)
    }
}

/// Renders a tree (or a list of trees) with box-drawing prefixes.
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{print_tree, DependencyNode};
///
/// let tree = DependencyNode::new("a1", "App")
///     .with_source_location("src/app.rs:54")
///     .with_child(
///         DependencyNode::new("b2", "Service1")
///             .with_child(DependencyNode::new("c3", "Service2"))
///             .with_child(DependencyNode::new("d4", "Service3")),
///     );
///
/// assert_eq!(
///     print_tree(&tree, true),
///     vec!["App (src/app.rs:54)", "└ Service1", "  ├ Service2", "  └ Service3"]
/// );
/// assert_eq!(print_tree(&tree, false)[0], "App");
/// ```
pub fn print_tree<T: TreeRender + ?Sized>(tree: &T, include_source_location: bool) -> Vec<String> {
    tree.render_lines(include_source_location)
}

fn label(node: &DependencyNode, include_source_location: bool) -> String {
    match (&node.source_location, include_source_location) {
        (Some(location), true) => format!("{} ({})", node.name, location),
        _ => node.name.clone(),
    }
}

/// Registry snapshot: per token, display data and dependency tokens.
struct GraphSnapshot {
    order: Vec<Token>,
    entries: HashMap<Token, SnapshotEntry>,
}

struct SnapshotEntry {
    name: String,
    source_location: Option<String>,
    children: Vec<Token>,
}

impl GraphSnapshot {
    fn node(&self, token: &Token, depth: usize, max_depth: usize) -> DiResult<DependencyNode> {
        if depth >= max_depth {
            return Err(DiError::DepthExceeded(max_depth));
        }
        let entry = self
            .entries
            .get(token)
            .ok_or_else(|| DiError::UnknownToken(token.clone()))?;

        let children = entry
            .children
            .iter()
            .map(|child| self.node(child, depth + 1, max_depth))
            .collect::<DiResult<Vec<_>>>()?;

        Ok(DependencyNode {
            id: token.clone(),
            name: entry.name.clone(),
            source_location: entry.source_location.clone(),
            children,
        })
    }
}

impl Injector {
    fn snapshot(&self) -> GraphSnapshot {
        let registry = self.registry.read();
        let mut order = Vec::with_capacity(registry.len());
        let mut entries = HashMap::with_capacity(registry.len());

        for registration in registry.iter() {
            let children = registration
                .constructor
                .dependencies()
                .iter()
                .filter_map(|param| param.key())
                .filter_map(|key| registry.token_of(key).cloned())
                .collect();

            order.push(registration.token.clone());
            entries.insert(
                registration.token.clone(),
                SnapshotEntry {
                    name: registration.constructor.key().short_name(),
                    source_location: registration.declared_in.clone(),
                    children,
                },
            );
        }

        GraphSnapshot { order, entries }
    }

    /// Dependency tree rooted at registered `T`.
    ///
    /// Fails with [`DiError::NotAService`] when `T` is not registered and
    /// with [`DiError::DepthExceeded`] when the declared graph is cyclic.
    pub fn tree<T: ?Sized + 'static>(&self) -> DiResult<DependencyNode> {
        let key = TypeKey::of::<T>();
        let token = self
            .token_of_key(&key)
            .ok_or(DiError::NotAService(key.name()))?;
        self.tree_for(&token)
    }

    /// Dependency tree rooted at the service registered under `token`.
    pub fn tree_for(&self, token: &Token) -> DiResult<DependencyNode> {
        self.snapshot().node(token, 0, self.options.max_depth)
    }

    /// One tree per service that no other service depends on, in
    /// registration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ferrous_injector::{print_tree, Args, DiResult, Injectable, Injector, ParamType};
    ///
    /// struct Repo;
    /// impl Injectable for Repo {
    ///     fn construct(_: Args) -> DiResult<Self> { Ok(Repo) }
    /// }
    ///
    /// struct Api;
    /// impl Injectable for Api {
    ///     fn dependencies() -> Vec<ParamType> { vec![ParamType::of::<Repo>()] }
    ///     fn construct(_: Args) -> DiResult<Self> { Ok(Api) }
    /// }
    ///
    /// let injector = Injector::new();
    /// injector.register::<Repo>().unwrap();
    /// injector.register::<Api>().unwrap();
    ///
    /// let roots = injector.roots().unwrap();
    /// assert_eq!(print_tree(&roots, false), vec!["Api", "└ Repo"]);
    /// ```
    pub fn roots(&self) -> DiResult<Vec<DependencyNode>> {
        let snapshot = self.snapshot();
        let referenced: HashSet<&Token> = snapshot
            .entries
            .values()
            .flat_map(|entry| entry.children.iter())
            .collect();

        snapshot
            .order
            .iter()
            .filter(|token| !referenced.contains(token))
            .map(|token| snapshot.node(token, 0, self.options.max_depth))
            .collect()
    }
}
