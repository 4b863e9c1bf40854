//! Break cycles by reversing a feedback arc set.
//!
//! Ranking assumes a DAG, so offending edges are flipped in place before the pass and
//! flipped back afterwards. Self-loops are left alone; they cannot make a graph acyclic
//! by reversal and must not constrain ranks.

use crate::graph::Graph;

pub fn run(g: &mut Graph) {
    for edge_ix in dfs_fas(g) {
        g.reverse_edge(edge_ix);
    }
}

pub fn undo(g: &mut Graph) {
    let reversed: Vec<usize> = g
        .edge_entries()
        .iter()
        .enumerate()
        .filter(|(_, e)| e.reversed)
        .map(|(ix, _)| ix)
        .collect();
    for edge_ix in reversed {
        g.reverse_edge(edge_ix);
    }
}

fn dfs_fas(g: &Graph) -> Vec<usize> {
    let mut fas: Vec<usize> = Vec::new();
    let mut visited = vec![false; g.node_count()];
    let mut stack = vec![false; g.node_count()];

    fn dfs(g: &Graph, v: usize, visited: &mut [bool], stack: &mut [bool], fas: &mut Vec<usize>) {
        if visited[v] {
            return;
        }
        visited[v] = true;
        stack[v] = true;
        for (edge_ix, w) in g.out_edges_ix(v) {
            if w == v {
                continue;
            }
            if stack[w] {
                fas.push(edge_ix);
            } else {
                dfs(g, w, visited, stack, fas);
            }
        }
        stack[v] = false;
    }

    // Insertion order keeps the arc set, and therefore the layout, deterministic.
    for v in 0..g.node_count() {
        dfs(g, v, &mut visited, &mut stack, &mut fas);
    }
    fas
}
