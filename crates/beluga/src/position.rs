//! Coordinate assignment.
//!
//! Ranks are stacked along the flow axis; within a rank, nodes are laid out left to right
//! and the whole rank is centered against the widest one. Coordinates are node centers in
//! a top-to-bottom frame; `coordinate_system` handles other directions.

use crate::graph::Graph;

pub fn run(g: &mut Graph, layering: &[Vec<usize>]) {
    let node_sep = g.config().nodesep;
    let rank_sep = g.config().ranksep;

    let mut rank_widths: Vec<f64> = Vec::with_capacity(layering.len());
    let mut rank_heights: Vec<f64> = Vec::with_capacity(layering.len());
    for layer in layering {
        let mut w: f64 = 0.0;
        let mut h: f64 = 0.0;
        for (i, &ix) in layer.iter().enumerate() {
            let shape = g.shape_by_ix(ix);
            w += shape.width;
            h = h.max(shape.height);
            if i + 1 < layer.len() {
                w += node_sep;
            }
        }
        rank_widths.push(w);
        rank_heights.push(h);
    }
    let max_rank_width = rank_widths.iter().copied().fold(0.0_f64, f64::max);

    let mut y_cursor: f64 = 0.0;
    for (rank_ix, layer) in layering.iter().enumerate() {
        let rank_h = rank_heights[rank_ix];
        let y = y_cursor + rank_h / 2.0;

        let mut x_cursor = (max_rank_width - rank_widths[rank_ix]) / 2.0;
        for &ix in layer {
            let width = g.shape_by_ix(ix).width;
            let shape = g.shape_mut_by_ix(ix);
            shape.x = Some(x_cursor + width / 2.0);
            shape.y = Some(y);
            x_cursor += width + node_sep;
        }

        y_cursor += rank_h;
        if rank_ix + 1 < layering.len() {
            y_cursor += rank_sep;
        }
    }
}
