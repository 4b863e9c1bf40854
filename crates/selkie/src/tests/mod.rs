use crate::*;

mod engine;

fn entity(ty: &str) -> Entity {
    Entity {
        ty: ty.to_string(),
        name: ty.to_string(),
        color: None,
        fields: Vec::new(),
        connection_points: Vec::new(),
        group_id: None,
        suggested_relationships: Vec::new(),
    }
}

fn grouped(ty: &str, group_id: &str) -> Entity {
    Entity {
        group_id: Some(group_id.to_string()),
        ..entity(ty)
    }
}

fn related(mut entity: Entity, targets: &[&str]) -> Entity {
    for target in targets {
        entity.suggested_relationships.push(SuggestedRelationship {
            target: target.to_string(),
            from_point: None,
            to_point: None,
            label: None,
        });
    }
    entity
}

fn point(id: &str) -> ConnectionPoint {
    ConnectionPoint {
        id: id.to_string(),
        ty: "port".to_string(),
    }
}

fn group(id: &str, parent: Option<&str>) -> Group {
    Group {
        id: id.to_string(),
        name: id.to_string(),
        color: None,
        parent_id: parent.map(str::to_string),
    }
}

fn input(entities: Vec<Entity>, groups: Vec<Group>) -> LayoutInput {
    LayoutInput {
        entities,
        groups,
        ..LayoutInput::default()
    }
}

fn node<'a>(output: &'a LayoutOutput, id: &str) -> &'a PositionedNode {
    output
        .nodes
        .iter()
        .find(|n| n.id == id)
        .unwrap_or_else(|| panic!("no node {id}"))
}

fn organizer<'a>(output: &'a LayoutOutput, group_id: &str) -> &'a PositionedNode {
    node(output, &organizer_id(group_id))
}

fn organizer_depth(node: &PositionedNode) -> usize {
    match &node.kind {
        NodeKind::Organizer { depth, .. } => *depth,
        NodeKind::Entity { .. } => panic!("not an organizer: {}", node.id),
    }
}

fn organizer_size(node: &PositionedNode) -> (f64, f64) {
    match &node.kind {
        NodeKind::Organizer { width, height, .. } => (*width, *height),
        NodeKind::Entity { .. } => panic!("not an organizer: {}", node.id),
    }
}

fn organizer_collapsed(node: &PositionedNode) -> bool {
    match &node.kind {
        NodeKind::Organizer { collapsed, .. } => *collapsed,
        NodeKind::Entity { .. } => panic!("not an organizer: {}", node.id),
    }
}

fn entity_positions(output: &LayoutOutput) -> Vec<(String, Point)> {
    output
        .nodes
        .iter()
        .filter(|n| matches!(n.kind, NodeKind::Entity { .. }))
        .map(|n| (n.id.clone(), n.position))
        .collect()
}

fn expanded_groups(ids: &[&str]) -> Option<std::collections::BTreeSet<String>> {
    Some(ids.iter().map(|id| id.to_string()).collect())
}
