use std::collections::BTreeMap;

use serde_json::Value;

use crate::analytics::constants::TITLE_DATA_KEY;

/// Static data declared on a route.
pub type RouteData = BTreeMap<String, Value>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(usize);

impl RouteId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One activated route in the router state tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteNode {
    pub path: String,
    pub data: RouteData,
    children: Vec<RouteId>,
}

impl RouteNode {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_data(TITLE_DATA_KEY, title.into())
    }

    pub fn children(&self) -> &[RouteId] {
        &self.children
    }
}

/// Snapshot of the activated route tree after a navigation.
///
/// Nodes live in an arena and refer to each other by [`RouteId`]; the first node is the root.
#[derive(Clone, Debug, PartialEq)]
pub struct RouterState {
    nodes: Vec<RouteNode>,
}

impl Default for RouterState {
    fn default() -> Self {
        Self::new(RouteNode::default())
    }
}

impl RouterState {
    pub fn new(root: RouteNode) -> Self {
        Self { nodes: vec![root] }
    }

    /// Builds a single root-to-leaf chain, the shape of the primary outlet after a navigation.
    pub fn from_chain<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = RouteNode>,
    {
        let mut iter = nodes.into_iter();
        let mut state = Self::new(iter.next().unwrap_or_default());
        let mut parent = state.root();
        for node in iter {
            parent = state.add_child(parent, node);
        }
        state
    }

    pub fn root(&self) -> RouteId {
        RouteId(0)
    }

    pub fn node(&self, id: RouteId) -> Option<&RouteNode> {
        self.nodes.get(id.0)
    }

    pub fn first_child(&self, id: RouteId) -> Option<RouteId> {
        self.node(id).and_then(|node| node.children.first().copied())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends `node` as the last child of `parent` and returns its id.
    pub fn add_child(&mut self, parent: RouteId, node: RouteNode) -> RouteId {
        let id = RouteId(self.nodes.len());
        self.nodes.push(node);
        self.attach(parent, id);
        id
    }

    /// Links an existing node under `parent`. The arena does not forbid links that form cycles.
    pub fn attach(&mut self, parent: RouteId, child: RouteId) {
        if child.0 >= self.nodes.len() {
            return;
        }
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }
}
