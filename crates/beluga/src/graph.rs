//! Graph container for the layout pass.
//!
//! Nodes are stored in insertion order with a hash index for id lookup; every deterministic
//! tiebreak in the pass falls back to that order. Edges are positional entries over node
//! indices, so parallel edges are representable without names.

use rustc_hash::FxHashMap;

/// Flow direction for a layout run. The pass computes top-to-bottom coordinates
/// internally; `LR` swaps axes around it (see `coordinate_system`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankDir {
    #[default]
    TB,
    LR,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub rankdir: RankDir,
    /// Gap between neighbors within one rank.
    pub nodesep: f64,
    /// Gap between consecutive ranks.
    pub ranksep: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            rankdir: RankDir::TB,
            nodesep: 50.0,
            ranksep: 50.0,
        }
    }
}

/// Per-node box fed into the pass. `x`/`y` are unset until `layout` runs and then hold the
/// node's center in the configured coordinate system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeShape {
    pub width: f64,
    pub height: f64,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl NodeShape {
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            x: None,
            y: None,
        }
    }
}

/// Borrowed view of one edge, in its current (possibly reversed) orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRef<'a> {
    pub v: &'a str,
    pub w: &'a str,
    pub reversed: bool,
}

#[derive(Debug, Clone)]
struct NodeEntry {
    id: String,
    shape: NodeShape,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct EdgeEntry {
    pub v: usize,
    pub w: usize,
    pub reversed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    config: LayoutConfig,
    nodes: Vec<NodeEntry>,
    node_index: FxHashMap<String, usize>,
    edges: Vec<EdgeEntry>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    /// Insert a node, or replace the shape of an existing node in place.
    pub fn set_node(&mut self, id: impl Into<String>, shape: NodeShape) {
        let id = id.into();
        match self.node_index.get(&id) {
            Some(&ix) => self.nodes[ix].shape = shape,
            None => {
                let ix = self.nodes.len();
                self.node_index.insert(id.clone(), ix);
                self.nodes.push(NodeEntry { id, shape });
            }
        }
    }

    /// Append a directed edge. Missing endpoints are created with a default shape, matching
    /// the container semantics the rest of the pass assumes.
    pub fn set_edge(&mut self, v: &str, w: &str) {
        let v = self.ensure_node(v);
        let w = self.ensure_node(w);
        self.edges.push(EdgeEntry {
            v,
            w,
            reversed: false,
        });
    }

    fn ensure_node(&mut self, id: &str) -> usize {
        if let Some(&ix) = self.node_index.get(id) {
            return ix;
        }
        let ix = self.nodes.len();
        self.node_index.insert(id.to_string(), ix);
        self.nodes.push(NodeEntry {
            id: id.to_string(),
            shape: NodeShape::default(),
        });
        ix
    }

    pub fn node(&self, id: &str) -> Option<&NodeShape> {
        self.node_index.get(id).map(|&ix| &self.nodes[ix].shape)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut NodeShape> {
        self.node_index
            .get(id)
            .map(|&ix| &mut self.nodes[ix].shape)
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id_by_ix(&self, ix: usize) -> Option<&str> {
        self.nodes.get(ix).map(|n| n.id.as_str())
    }

    /// Edges in insertion order, in their current orientation.
    pub fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        self.edges.iter().map(|e| EdgeRef {
            v: self.nodes[e.v].id.as_str(),
            w: self.nodes[e.w].id.as_str(),
            reversed: e.reversed,
        })
    }

    pub(crate) fn shape_by_ix(&self, ix: usize) -> &NodeShape {
        &self.nodes[ix].shape
    }

    pub(crate) fn shape_mut_by_ix(&mut self, ix: usize) -> &mut NodeShape {
        &mut self.nodes[ix].shape
    }

    pub(crate) fn edge_entries(&self) -> &[EdgeEntry] {
        &self.edges
    }

    /// Outgoing `(edge index, head node index)` pairs in edge insertion order.
    pub(crate) fn out_edges_ix(&self, v: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.v == v)
            .map(|(ix, e)| (ix, e.w))
    }

    pub(crate) fn in_edges_ix(&self, w: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.w == w)
            .map(|(ix, e)| (ix, e.v))
    }

    pub(crate) fn reverse_edge(&mut self, edge_ix: usize) {
        let e = &mut self.edges[edge_ix];
        (e.v, e.w) = (e.w, e.v);
        e.reversed = !e.reversed;
    }

    pub(crate) fn for_each_shape_mut(&mut self, mut f: impl FnMut(&mut NodeShape)) {
        for n in &mut self.nodes {
            f(&mut n.shape);
        }
    }
}
