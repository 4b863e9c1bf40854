//! Input model: construct schemas, the group forest, and per-call expansion state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A typed construct schema. `ty` doubles as the node id in layout output, so it is
/// expected to be unique across the input; duplicate declarations keep the first one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    #[serde(rename = "type")]
    pub ty: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub connection_points: Vec<ConnectionPoint>,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub suggested_relationships: Vec<SuggestedRelationship>,
}

/// One detail row inside an expanded entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A named attachment handle that edges can target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionPoint {
    pub id: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// A relationship declared on the owning entity, pointing at `target` by type key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedRelationship {
    pub target: String,
    #[serde(default)]
    pub from_point: Option<String>,
    #[serde(default)]
    pub to_point: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Primary flow axis for the constraint passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// One layout call's full input snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInput {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub groups: Vec<Group>,
    /// Entities showing field-level detail. `None` collapses every entity.
    #[serde(default)]
    pub expanded_entity_ids: Option<BTreeSet<String>>,
    /// Expanded groups. `None` expands every group; with a set provided, ids absent
    /// from it are collapsed.
    #[serde(default)]
    pub expanded_group_ids: Option<BTreeSet<String>>,
    #[serde(default)]
    pub direction: Direction,
}

impl LayoutInput {
    pub fn entity_expanded(&self, ty: &str) -> bool {
        self.expanded_entity_ids
            .as_ref()
            .is_some_and(|ids| ids.contains(ty))
    }

    pub fn group_collapsed(&self, id: &str) -> bool {
        self.expanded_group_ids
            .as_ref()
            .is_some_and(|ids| !ids.contains(id))
    }
}
