//! Node emission and collapse-aware edge rewriting.
//!
//! Nodes are emitted parent before child: organizers first, then their members, child
//! groups recursively. Edges touching an entity hidden under a collapsed container are
//! rewritten to that container's organizer (the topmost collapsed one on the chain) and
//! deduplicated again, since several rewritten edges can land on the same endpoints.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::engine::{Arrangement, PlacedMember};
use crate::model::{
    LayoutEdge, LayoutOutput, NodeKind, Point, PositionedNode, UNASSIGNED_HANDLE,
    UNGROUPED_GROUP_ID, UNGROUPED_LABEL, organizer_id,
};
use crate::schema::LayoutInput;

pub(crate) fn emit(input: &LayoutInput, arrangement: &Arrangement) -> LayoutOutput {
    let mut nodes = Vec::new();
    for (root, origin) in &arrangement.root_origins {
        emit_group(input, arrangement, root, None, *origin, 0, &mut nodes);
    }
    if let Some(origin) = arrangement.bucket_origin {
        emit_bucket(input, arrangement, origin, &mut nodes);
    }
    let edges = rewrite_edges(input, arrangement);
    LayoutOutput { nodes, edges }
}

fn emit_group(
    input: &LayoutInput,
    arrangement: &Arrangement,
    group_id: &str,
    parent: Option<&str>,
    position: Point,
    depth: usize,
    nodes: &mut Vec<PositionedNode>,
) {
    let Some(layout) = arrangement.layouts.get(group_id) else {
        return;
    };
    let Some(group) = arrangement.tree.group(group_id) else {
        return;
    };
    let parent_label = arrangement
        .tree
        .parent(group_id)
        .and_then(|p| arrangement.tree.group(p))
        .map(|g| g.name.clone());

    let node_id = organizer_id(group_id);
    nodes.push(PositionedNode {
        id: node_id.clone(),
        parent: parent.map(str::to_string),
        position,
        kind: NodeKind::Organizer {
            group_id: group_id.to_string(),
            label: group.name.clone(),
            color: group.color.clone(),
            collapsed: layout.collapsed,
            depth,
            entity_count: layout.entity_count,
            parent_label,
            width: layout.export.width,
            height: layout.export.height,
        },
    });

    for member in &layout.members {
        match member {
            PlacedMember::Entity { ix, position } => {
                nodes.push(entity_node(input, *ix, &node_id, *position));
            }
            PlacedMember::Group { id, position } => {
                emit_group(input, arrangement, id, Some(&node_id), *position, depth + 1, nodes);
            }
        }
    }
}

fn emit_bucket(
    input: &LayoutInput,
    arrangement: &Arrangement,
    origin: Point,
    nodes: &mut Vec<PositionedNode>,
) {
    let Some(layout) = arrangement.layouts.get(UNGROUPED_GROUP_ID) else {
        return;
    };
    let node_id = organizer_id(UNGROUPED_GROUP_ID);
    nodes.push(PositionedNode {
        id: node_id.clone(),
        parent: None,
        position: origin,
        kind: NodeKind::Organizer {
            group_id: UNGROUPED_GROUP_ID.to_string(),
            label: UNGROUPED_LABEL.to_string(),
            color: None,
            collapsed: layout.collapsed,
            depth: 0,
            entity_count: layout.entity_count,
            parent_label: None,
            width: layout.export.width,
            height: layout.export.height,
        },
    });
    for member in &layout.members {
        if let PlacedMember::Entity { ix, position } = member {
            nodes.push(entity_node(input, *ix, &node_id, *position));
        }
    }
}

fn entity_node(input: &LayoutInput, ix: usize, parent: &str, position: Point) -> PositionedNode {
    let entity = &input.entities[ix];
    PositionedNode {
        id: entity.ty.clone(),
        parent: Some(parent.to_string()),
        position,
        kind: NodeKind::Entity {
            entity: entity.clone(),
            expanded: input.entity_expanded(&entity.ty),
        },
    }
}

fn rewrite_edges(input: &LayoutInput, arrangement: &Arrangement) -> Vec<LayoutEdge> {
    let mut group_of: FxHashMap<&str, Option<&str>> = FxHashMap::default();
    for entity in &input.entities {
        group_of.entry(entity.ty.as_str()).or_insert_with(|| {
            entity
                .group_id
                .as_deref()
                .filter(|gid| arrangement.tree.contains(gid))
        });
    }

    let mut seen: FxHashSet<(String, String, String, String)> = FxHashSet::default();
    let mut out = Vec::with_capacity(arrangement.edges.len());
    for edge in &arrangement.edges {
        let (source, source_handle) =
            rewrite_endpoint(input, arrangement, &group_of, &edge.source, &edge.source_handle);
        let (target, target_handle) =
            rewrite_endpoint(input, arrangement, &group_of, &edge.target, &edge.target_handle);
        // Both endpoints under the same collapsed container: nothing left to draw.
        if source == target {
            continue;
        }
        let key = (
            source.clone(),
            source_handle.clone(),
            target.clone(),
            target_handle.clone(),
        );
        if !seen.insert(key) {
            continue;
        }
        out.push(LayoutEdge {
            id: format!("{source}:{source_handle}->{target}:{target_handle}"),
            source,
            target,
            source_handle,
            target_handle,
            label: edge.label.clone(),
            source_entity: edge.source_entity.clone(),
            relationship_index: edge.relationship_index,
        });
    }
    out
}

fn rewrite_endpoint(
    input: &LayoutInput,
    arrangement: &Arrangement,
    group_of: &FxHashMap<&str, Option<&str>>,
    ty: &str,
    handle: &str,
) -> (String, String) {
    match collapsed_container(input, arrangement, group_of, ty) {
        Some(group_id) => (organizer_id(&group_id), UNASSIGNED_HANDLE.to_string()),
        None => (ty.to_string(), handle.to_string()),
    }
}

/// Topmost collapsed container on the entity's ancestor chain, `None` when everything
/// above it is expanded. Ungrouped entities answer for the synthetic bucket.
fn collapsed_container(
    input: &LayoutInput,
    arrangement: &Arrangement,
    group_of: &FxHashMap<&str, Option<&str>>,
    ty: &str,
) -> Option<String> {
    match group_of.get(ty)? {
        None => input
            .group_collapsed(UNGROUPED_GROUP_ID)
            .then(|| UNGROUPED_GROUP_ID.to_string()),
        Some(direct) => {
            let mut topmost: Option<&str> = None;
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            let mut cur = *direct;
            loop {
                if !seen.insert(cur) {
                    break;
                }
                if input.group_collapsed(cur) {
                    topmost = Some(cur);
                }
                match arrangement.tree.parent(cur) {
                    Some(parent) => cur = parent,
                    None => break,
                }
            }
            topmost.map(str::to_string)
        }
    }
}
