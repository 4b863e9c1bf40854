use beluga::{Graph, NodeShape, order, rank};

fn new_graph(ids: &[&str]) -> Graph {
    let mut g = Graph::new();
    for id in ids {
        g.set_node(*id, NodeShape::sized(10.0, 10.0));
    }
    g
}

fn layer_ids(g: &Graph, layer: &[usize]) -> Vec<String> {
    layer
        .iter()
        .map(|&ix| g.node_id_by_ix(ix).unwrap().to_string())
        .collect()
}

#[test]
fn build_layer_matrix_buckets_by_rank_in_insertion_order() {
    let mut g = new_graph(&["a", "b", "c", "d"]);
    g.set_edge("a", "c");
    g.set_edge("b", "d");

    let ranks = rank::assign(&g);
    let layering = order::build_layer_matrix(&g, &ranks);

    assert_eq!(layering.len(), 2);
    assert_eq!(layer_ids(&g, &layering[0]), vec!["a", "b"]);
    assert_eq!(layer_ids(&g, &layering[1]), vec!["c", "d"]);
}

#[test]
fn cross_count_sees_a_single_crossing() {
    let mut g = new_graph(&["a", "b", "x", "y"]);
    g.set_edge("a", "y");
    g.set_edge("b", "x");

    let ranks = rank::assign(&g);
    let layering = order::build_layer_matrix(&g, &ranks);

    assert_eq!(order::cross_count(&g, &layering), 1);
}

#[test]
fn cross_count_is_zero_for_parallel_edges_in_order() {
    let mut g = new_graph(&["a", "b", "x", "y"]);
    g.set_edge("a", "x");
    g.set_edge("b", "y");

    let ranks = rank::assign(&g);
    let layering = order::build_layer_matrix(&g, &ranks);

    assert_eq!(order::cross_count(&g, &layering), 0);
}

#[test]
fn run_unwinds_a_two_layer_crossing() {
    let mut g = new_graph(&["a", "b", "x", "y"]);
    g.set_edge("a", "y");
    g.set_edge("b", "x");

    let ranks = rank::assign(&g);
    let layering = order::run(&g, &ranks);

    assert_eq!(order::cross_count(&g, &layering), 0);
    assert_eq!(layer_ids(&g, &layering[0]), vec!["a", "b"]);
    assert_eq!(layer_ids(&g, &layering[1]), vec!["y", "x"]);
}

#[test]
fn run_keeps_an_already_clean_ordering() {
    let mut g = new_graph(&["a", "b", "x", "y"]);
    g.set_edge("a", "x");
    g.set_edge("b", "y");

    let ranks = rank::assign(&g);
    let layering = order::run(&g, &ranks);

    assert_eq!(layer_ids(&g, &layering[0]), vec!["a", "b"]);
    assert_eq!(layer_ids(&g, &layering[1]), vec!["x", "y"]);
}
