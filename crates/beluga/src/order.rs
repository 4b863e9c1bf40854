//! Crossing reduction.
//!
//! Alternating barycenter sweeps over the layer matrix, keeping the best ordering seen.
//! A node with no neighbors in the fixed layer keeps its current position.

use crate::graph::Graph;

pub fn run(g: &Graph, ranks: &[i32]) -> Vec<Vec<usize>> {
    let mut layering = build_layer_matrix(g, ranks);
    if layering.len() < 2 {
        return layering;
    }

    let mut best = layering.clone();
    let mut best_cc = cross_count(g, &best);

    let mut i: usize = 0;
    let mut last_best: usize = 0;
    while last_best < 4 && best_cc > 0 {
        sweep(g, &mut layering, i % 2 == 0);
        let cc = cross_count(g, &layering);
        if cc < best_cc {
            best = layering.clone();
            best_cc = cc;
            last_best = 0;
        } else {
            last_best += 1;
        }
        i += 1;
    }

    best
}

/// Nodes bucketed by rank, insertion order within each bucket.
pub fn build_layer_matrix(g: &Graph, ranks: &[i32]) -> Vec<Vec<usize>> {
    if g.node_count() == 0 {
        return Vec::new();
    }
    let max_rank = ranks.iter().copied().max().unwrap_or(0).max(0) as usize;
    let mut layering: Vec<Vec<usize>> = vec![Vec::new(); max_rank + 1];
    for v in 0..g.node_count() {
        let r = ranks.get(v).copied().unwrap_or(0).max(0) as usize;
        if let Some(layer) = layering.get_mut(r) {
            layer.push(v);
        }
    }
    layering
}

fn sweep(g: &Graph, layering: &mut [Vec<usize>], downward: bool) {
    if downward {
        for r in 1..layering.len() {
            let pos = layer_positions(g, &layering[r - 1]);
            reorder(g, &mut layering[r], &pos, downward);
        }
    } else {
        for r in (0..layering.len() - 1).rev() {
            let pos = layer_positions(g, &layering[r + 1]);
            reorder(g, &mut layering[r], &pos, downward);
        }
    }
}

fn layer_positions(g: &Graph, fixed: &[usize]) -> Vec<usize> {
    let mut pos = vec![usize::MAX; g.node_count()];
    for (i, &v) in fixed.iter().enumerate() {
        pos[v] = i;
    }
    pos
}

fn reorder(g: &Graph, layer: &mut Vec<usize>, pos: &[usize], downward: bool) {
    let mut entries: Vec<(f64, usize, usize)> = Vec::with_capacity(layer.len());
    for (i, &v) in layer.iter().enumerate() {
        let mut sum: f64 = 0.0;
        let mut count: usize = 0;
        let mut visit = |u: usize| {
            let p = pos[u];
            if p != usize::MAX {
                sum += p as f64;
                count += 1;
            }
        };
        if downward {
            for (_, u) in g.in_edges_ix(v) {
                visit(u);
            }
        } else {
            for (_, u) in g.out_edges_ix(v) {
                visit(u);
            }
        }
        let barycenter = if count == 0 {
            i as f64
        } else {
            sum / count as f64
        };
        entries.push((barycenter, i, v));
    }

    entries.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.cmp(&b.1))
    });

    layer.clear();
    layer.extend(entries.into_iter().map(|(_, _, v)| v));
}

pub fn cross_count(g: &Graph, layering: &[Vec<usize>]) -> usize {
    let mut cc: usize = 0;
    for i in 1..layering.len() {
        cc += two_layer_cross_count(g, &layering[i - 1], &layering[i]);
    }
    cc
}

fn two_layer_cross_count(g: &Graph, north: &[usize], south: &[usize]) -> usize {
    if south.is_empty() {
        return 0;
    }

    let mut south_pos = vec![usize::MAX; g.node_count()];
    for (i, &v) in south.iter().enumerate() {
        south_pos[v] = i;
    }

    let mut south_entries: Vec<usize> = Vec::new();
    for &v in north {
        let mut entries: Vec<usize> = g
            .out_edges_ix(v)
            .filter_map(|(_, w)| {
                let p = south_pos[w];
                (p != usize::MAX).then_some(p)
            })
            .collect();
        entries.sort_unstable();
        south_entries.extend(entries);
    }

    // Accumulator tree: for each edge endpoint, count previously inserted endpoints that sit
    // to its right.
    let mut first_index: usize = 1;
    while first_index < south.len() {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc: usize = 0;
    for entry in south_entries {
        let mut index = entry + first_index;
        tree[index] += 1;
        let mut sum: usize = 0;
        while index > 0 {
            if index % 2 == 1 {
                sum += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
        cc += sum;
    }

    cc
}
