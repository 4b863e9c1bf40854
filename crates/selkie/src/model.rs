//! Layout output consumed by the rendering surface.
//!
//! Positions are top-left corners: relative to the parent organizer for nested nodes,
//! absolute for top-level ones. Parents always precede their children in `nodes`, so a
//! renderer can resolve absolute coordinates in a single forward pass.

use crate::schema::Entity;
use serde::{Deserialize, Serialize};

/// Handle sentinel used when an edge endpoint does not name a live connection point.
pub const UNASSIGNED_HANDLE: &str = "unassigned";

/// Group id of the synthetic container that gathers ungrouped entities.
pub const UNGROUPED_GROUP_ID: &str = "__ungrouped__";

pub(crate) const UNGROUPED_LABEL: &str = "Ungrouped";

/// Node id of the organizer emitted for `group_id`.
pub fn organizer_id(group_id: &str) -> String {
    format!("group:{group_id}")
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// One emitted node. The `kind` payload is flattened into the node object on the wire,
/// discriminated by a `kind` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: String,
    #[serde(default)]
    pub parent: Option<String>,
    pub position: Point,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeKind {
    /// Container chrome for a group (or the synthetic ungrouped bucket).
    #[serde(rename_all = "camelCase")]
    Organizer {
        group_id: String,
        label: String,
        color: Option<String>,
        collapsed: bool,
        /// Nesting depth, 0 for top-level containers.
        depth: usize,
        /// Recursive count of entities anywhere under this container.
        entity_count: usize,
        /// Display name of the direct parent group, for breadcrumb UI.
        parent_label: Option<String>,
        width: f64,
        height: f64,
    },
    /// A schema node carrying its full entity payload.
    #[serde(rename_all = "camelCase")]
    Entity { entity: Entity, expanded: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Type key of the entity that declared the underlying relationship.
    pub source_entity: String,
    /// Index into that entity's relationship list, for edits routed back to the model.
    pub relationship_index: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutOutput {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<LayoutEdge>,
}
