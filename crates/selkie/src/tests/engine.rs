use super::*;

fn distinct(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out.sort_by(|a, b| a.partial_cmp(b).unwrap());
    out
}

#[test]
fn layout_of_empty_input_is_empty() {
    let out = layout(
        &input(Vec::new(), vec![group("g1", None)]),
        &LayoutOptions::default(),
    );
    assert!(out.nodes.is_empty());
    assert!(out.edges.is_empty());
}

#[test]
fn sparse_ungrouped_diagrams_fall_back_to_a_four_column_grid() {
    let entities = (0..8).map(|i| entity(&format!("E{i}"))).collect();
    let out = layout(&input(entities, Vec::new()), &LayoutOptions::default());

    let positions = entity_positions(&out);
    assert_eq!(positions.len(), 8);
    let xs = distinct(positions.iter().map(|(_, p)| p.x));
    let ys = distinct(positions.iter().map(|(_, p)| p.y));
    assert_eq!(xs, vec![24.0, 284.0, 544.0, 804.0]);
    assert_eq!(ys, vec![48.0, 144.0]);

    let bucket = organizer(&out, UNGROUPED_GROUP_ID);
    assert_eq!(bucket.position, Point { x: 0.0, y: 0.0 });
    let bucket_id = organizer_id(UNGROUPED_GROUP_ID);
    for (id, _) in &positions {
        assert_eq!(node(&out, id).parent.as_deref(), Some(bucket_id.as_str()));
    }
}

#[test]
fn grid_fallback_requires_sparse_connectivity() {
    // A ring has as many distinct connections as nodes, so the constraint pass runs
    // and stacks the broken ring into many layers instead of four columns.
    let entities = (0..8)
        .map(|i| related(entity(&format!("E{i}")), &[&format!("E{}", (i + 1) % 8)]))
        .collect();
    let out = layout(&input(entities, Vec::new()), &LayoutOptions::default());

    let ys = distinct(entity_positions(&out).iter().map(|(_, p)| p.y));
    assert!(ys.len() > 2, "expected layered placement, got rows {ys:?}");
}

#[test]
fn small_ungrouped_sets_stay_on_one_constraint_row() {
    let entities = (0..6).map(|i| entity(&format!("E{i}"))).collect();
    let out = layout(&input(entities, Vec::new()), &LayoutOptions::default());

    let positions = entity_positions(&out);
    let xs = distinct(positions.iter().map(|(_, p)| p.x));
    let ys = distinct(positions.iter().map(|(_, p)| p.y));
    assert_eq!(xs.len(), 6);
    assert_eq!(ys.len(), 1);
}

#[test]
fn grid_sits_below_the_lowest_root_group() {
    let mut entities: Vec<Entity> = (0..8).map(|i| entity(&format!("E{i}"))).collect();
    entities.push(grouped("G-member", "g1"));
    let out = layout(
        &input(entities, vec![group("g1", None)]),
        &LayoutOptions::default(),
    );

    let g1 = organizer(&out, "g1");
    let (_, g1_height) = organizer_size(g1);
    let bucket = organizer(&out, UNGROUPED_GROUP_ID);
    assert_eq!(bucket.position.x, 0.0);
    assert_eq!(bucket.position.y, g1.position.y + g1_height + 60.0);
}

#[test]
fn horizontal_direction_arranges_connected_entities_side_by_side() {
    let mut in_ = input(vec![related(entity("A"), &["B"]), entity("B")], Vec::new());
    in_.direction = Direction::Horizontal;
    let out = layout(&in_, &LayoutOptions::default());

    let a = node(&out, "A").position;
    let b = node(&out, "B").position;
    assert_eq!(a.y, b.y);
    assert_eq!(b.x - a.x, 280.0); // entity width plus rank separation
}

#[test]
fn collapsed_group_rewrites_edges_to_its_organizer() {
    let mut in_ = input(
        vec![
            related(grouped("A", "g1"), &["C"]),
            related(grouped("B", "g1"), &["C"]),
            entity("C"),
        ],
        vec![group("g1", None)],
    );
    in_.expanded_group_ids = expanded_groups(&[UNGROUPED_GROUP_ID]);
    let out = layout(&in_, &LayoutOptions::default());

    // Both rewritten edges land on the same endpoints and collapse to one.
    assert_eq!(out.edges.len(), 1);
    let edge = &out.edges[0];
    assert_eq!(edge.source, organizer_id("g1"));
    assert_eq!(edge.source_handle, UNASSIGNED_HANDLE);
    assert_eq!(edge.target, "C");
}

#[test]
fn edges_inside_one_collapsed_group_disappear() {
    let mut in_ = input(
        vec![related(grouped("A", "g1"), &["B"]), grouped("B", "g1")],
        vec![group("g1", None)],
    );
    in_.expanded_group_ids = expanded_groups(&[]);
    let out = layout(&in_, &LayoutOptions::default());
    assert!(out.edges.is_empty());
}

#[test]
fn nested_collapse_rewrites_to_the_topmost_collapsed_ancestor() {
    let mut in_ = input(
        vec![related(grouped("X", "inner"), &["Y"]), entity("Y")],
        vec![group("outer", None), group("inner", Some("outer"))],
    );
    in_.expanded_group_ids = expanded_groups(&[UNGROUPED_GROUP_ID]);
    let out = layout(&in_, &LayoutOptions::default());

    assert_eq!(out.edges.len(), 1);
    assert_eq!(out.edges[0].source, organizer_id("outer"));
    assert_eq!(out.edges[0].target, "Y");
}

#[test]
fn all_edge_endpoints_reference_emitted_nodes() {
    let mut in_ = input(
        vec![
            related(grouped("I1", "inner"), &["I2", "U1"]),
            grouped("I2", "inner"),
            related(grouped("O1", "outer"), &["I1"]),
            related(entity("U1"), &["I1", "Ghost"]),
        ],
        vec![group("outer", None), group("inner", Some("outer"))],
    );
    in_.expanded_group_ids = expanded_groups(&["outer"]);
    let out = layout(&in_, &LayoutOptions::default());

    let ids: std::collections::BTreeSet<&str> =
        out.nodes.iter().map(|n| n.id.as_str()).collect();
    assert!(!out.edges.is_empty());
    for edge in &out.edges {
        assert!(ids.contains(edge.source.as_str()), "missing {}", edge.source);
        assert!(ids.contains(edge.target.as_str()), "missing {}", edge.target);
        assert_ne!(edge.source, edge.target);
    }
}

#[test]
fn identical_inputs_produce_identical_serialized_output() {
    let build = || {
        let mut in_ = input(
            vec![
                related(grouped("X", "B"), &["Y", "Z"]),
                grouped("Y", "C"),
                related(entity("Z"), &["X"]),
                entity("Lone"),
            ],
            vec![
                group("A", None),
                group("B", Some("A")),
                group("C", Some("A")),
            ],
        );
        in_.expanded_entity_ids = Some(["X".to_string()].into_iter().collect());
        in_
    };
    let opts = LayoutOptions::default();
    let first = serde_json::to_string(&layout(&build(), &opts)).unwrap();
    let second = serde_json::to_string(&layout(&build(), &opts)).unwrap();
    assert_eq!(first, second);
}
