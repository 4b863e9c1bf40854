//! Longest-path ranking.
//!
//! Each node's rank is the minimum over its out-edges of the head's rank minus one; sinks
//! sit at zero and the result is shifted so the smallest rank is zero. Expects a graph
//! that `acyclic::run` has already processed.

use crate::graph::Graph;

/// Ranks indexed by node insertion index, normalized to start at zero.
pub fn assign(g: &Graph) -> Vec<i32> {
    let mut memo: Vec<Option<i32>> = vec![None; g.node_count()];

    fn dfs(g: &Graph, v: usize, memo: &mut Vec<Option<i32>>) -> i32 {
        if let Some(rank) = memo[v] {
            return rank;
        }

        let mut rank: Option<i32> = None;
        for (_, w) in g.out_edges_ix(v) {
            if w == v {
                continue;
            }
            let candidate = dfs(g, w, memo) - 1;
            rank = Some(match rank {
                Some(current) => current.min(candidate),
                None => candidate,
            });
        }

        let rank = rank.unwrap_or(0);
        memo[v] = Some(rank);
        rank
    }

    for v in 0..g.node_count() {
        dfs(g, v, &mut memo);
    }

    let mut ranks: Vec<i32> = memo.into_iter().map(|r| r.unwrap_or(0)).collect();
    normalize(&mut ranks);
    ranks
}

fn normalize(ranks: &mut [i32]) {
    let Some(min) = ranks.iter().copied().min() else {
        return;
    };
    for r in ranks {
        *r -= min;
    }
}
