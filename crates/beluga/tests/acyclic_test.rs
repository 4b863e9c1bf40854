use beluga::acyclic;
use beluga::{Graph, NodeShape};

fn new_graph(ids: &[&str]) -> Graph {
    let mut g = Graph::new();
    for id in ids {
        g.set_node(*id, NodeShape::sized(10.0, 10.0));
    }
    g
}

fn set_path(g: &mut Graph, ids: &[&str]) {
    for pair in ids.windows(2) {
        g.set_edge(pair[0], pair[1]);
    }
}

fn strip_edges(g: &Graph) -> Vec<(String, String)> {
    let mut edges: Vec<(String, String)> = g
        .edges()
        .map(|e| (e.v.to_string(), e.w.to_string()))
        .collect();
    edges.sort();
    edges
}

/// Kahn's algorithm over the current edge orientation, ignoring self-loops.
fn is_acyclic(g: &Graph) -> bool {
    let ids: Vec<String> = g.node_ids().map(|s| s.to_string()).collect();
    let mut indegree: std::collections::HashMap<&str, usize> =
        ids.iter().map(|id| (id.as_str(), 0)).collect();
    for e in g.edges() {
        if e.v == e.w {
            continue;
        }
        if let Some(d) = indegree.get_mut(e.w) {
            *d += 1;
        }
    }
    let mut queue: Vec<&str> = ids
        .iter()
        .map(|s| s.as_str())
        .filter(|id| indegree[id] == 0)
        .collect();
    let mut seen = 0usize;
    while let Some(v) = queue.pop() {
        seen += 1;
        for e in g.edges() {
            if e.v != v || e.v == e.w {
                continue;
            }
            if let Some(d) = indegree.get_mut(e.w) {
                *d -= 1;
                if *d == 0 {
                    queue.push(e.w);
                }
            }
        }
    }
    seen == ids.len()
}

#[test]
fn run_does_not_change_an_already_acyclic_graph() {
    let mut g = new_graph(&["a", "b", "c", "d"]);
    set_path(&mut g, &["a", "b", "d"]);
    set_path(&mut g, &["a", "c", "d"]);

    acyclic::run(&mut g);

    assert_eq!(
        strip_edges(&g),
        vec![
            ("a".to_string(), "b".to_string()),
            ("a".to_string(), "c".to_string()),
            ("b".to_string(), "d".to_string()),
            ("c".to_string(), "d".to_string()),
        ]
    );
    assert!(g.edges().all(|e| !e.reversed));
}

#[test]
fn run_breaks_cycles_in_the_input_graph() {
    let mut g = new_graph(&["a", "b", "c", "d"]);
    set_path(&mut g, &["a", "b", "c", "d", "a"]);

    acyclic::run(&mut g);

    assert!(is_acyclic(&g));
    assert_eq!(g.edges().filter(|e| e.reversed).count(), 1);
    assert_eq!(g.edge_count(), 4);
}

#[test]
fn run_keeps_parallel_edges_after_reversing_a_two_node_cycle() {
    let mut g = new_graph(&["a", "b"]);
    g.set_edge("a", "b");
    g.set_edge("b", "a");

    acyclic::run(&mut g);

    assert!(is_acyclic(&g));
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.edges().filter(|e| e.v == "a" && e.w == "b").count(), 2);
}

#[test]
fn undo_restores_previously_reversed_edges() {
    let mut g = new_graph(&["a", "b", "c"]);
    set_path(&mut g, &["a", "b", "c", "a"]);
    let before = strip_edges(&g);

    acyclic::run(&mut g);
    acyclic::undo(&mut g);

    assert_eq!(strip_edges(&g), before);
    assert!(g.edges().all(|e| !e.reversed));
}

#[test]
fn run_leaves_self_loops_in_place() {
    let mut g = new_graph(&["a", "b"]);
    g.set_edge("a", "a");
    g.set_edge("a", "b");

    acyclic::run(&mut g);

    assert!(g.edges().any(|e| e.v == "a" && e.w == "a" && !e.reversed));
    assert!(g.edges().all(|e| !e.reversed));
}
