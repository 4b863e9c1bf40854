//! Layered graph layout for small constraint graphs.
//!
//! The pipeline is deliberately compact: break cycles, rank by longest path, reduce
//! crossings with barycenter sweeps, stack ranks with configured gaps. It trades the
//! full network-simplex machinery for determinism and predictability on the small
//! graphs container layouts produce.

pub mod acyclic;
pub mod coordinate_system;
mod graph;
pub mod order;
pub mod position;
pub mod rank;

pub use graph::{EdgeRef, Graph, LayoutConfig, NodeShape, RankDir};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assign a center position to every node of `g` according to its `LayoutConfig`.
///
/// Edge directions are restored before returning, so reversed feedback edges are an
/// internal detail. The graph's node set and edge set are left unchanged.
pub fn layout(g: &mut Graph) {
    acyclic::run(g);
    let ranks = rank::assign(g);
    let layering = order::run(g, &ranks);
    coordinate_system::adjust(g);
    position::run(g, &layering);
    coordinate_system::undo(g);
    acyclic::undo(g);
}
