//! Coordinate system adjustment.
//!
//! The pass computes a top-to-bottom layout. For left-to-right we swap node width/height
//! before positioning and swap the computed axes back afterwards.

use crate::graph::{Graph, RankDir};

pub fn adjust(g: &mut Graph) {
    if g.config().rankdir == RankDir::LR {
        swap_width_height(g);
    }
}

pub fn undo(g: &mut Graph) {
    if g.config().rankdir == RankDir::LR {
        swap_xy(g);
        swap_width_height(g);
    }
}

fn swap_width_height(g: &mut Graph) {
    g.for_each_shape_mut(|n| {
        (n.width, n.height) = (n.height, n.width);
    });
}

fn swap_xy(g: &mut Graph) {
    g.for_each_shape_mut(|n| {
        if let (Some(x), Some(y)) = (n.x, n.y) {
            n.x = Some(y);
            n.y = Some(x);
        }
    });
}
