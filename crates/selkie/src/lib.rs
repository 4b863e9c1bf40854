//! Hierarchical auto-layout for construct schema diagrams.
//!
//! Takes a flat list of typed entity schemas plus an arbitrarily nested group forest and
//! produces a deterministic 2D arrangement: entities are solved inside their groups,
//! groups inside their parents, and root containers on the canvas, with a fixed-column
//! grid fallback for sparse, mostly ungrouped diagrams that would otherwise degenerate
//! into one long constraint row.
//!
//! Positions are top-left corners. Nested nodes are relative to their parent organizer,
//! top-level nodes absolute, and parents always precede children in the output so a
//! renderer can resolve absolute coordinates in one forward pass.
//!
//! The engine is pure: the same input yields the same output, byte for byte, with no
//! retained state. [`LayoutCache`] layers memoization with an explicit invalidation
//! counter on top; expansion toggles are excluded from its fingerprint, so collapsing
//! or expanding a node never forces a recompute.
//!
//! Malformed input is normalized, never reported: unknown relationship targets and
//! group references are dropped or reassigned, parent cycles are broken at build time,
//! and dead connection point ids fall back to a shared sentinel handle.

#![forbid(unsafe_code)]

mod assemble;
mod cache;
mod edges;
mod engine;
mod error;
mod group_tree;
mod model;
mod options;
mod schema;
mod sizing;

#[cfg(test)]
mod tests;

pub use cache::LayoutCache;
pub use error::{Error, Result};
pub use model::{
    Bounds, LayoutEdge, LayoutOutput, NodeKind, Point, PositionedNode, Size,
    UNASSIGNED_HANDLE, UNGROUPED_GROUP_ID, organizer_id,
};
pub use options::LayoutOptions;
pub use schema::{
    ConnectionPoint, Direction, Entity, Field, Group, LayoutInput, SuggestedRelationship,
};

/// Lay out `input`. Pure and deterministic; an input without entities short-circuits to
/// an empty output.
pub fn layout(input: &LayoutInput, options: &LayoutOptions) -> LayoutOutput {
    if input.entities.is_empty() {
        return LayoutOutput::default();
    }
    let arrangement = engine::arrange(input, options);
    assemble::emit(input, &arrangement)
}

/// Lay out a JSON document shaped like [`LayoutInput`]. `options` falls back to
/// [`LayoutOptions::default`] when absent.
pub fn layout_from_value(
    input: &serde_json::Value,
    options: Option<&serde_json::Value>,
) -> Result<LayoutOutput> {
    if !input.is_object() {
        return Err(Error::InvalidModel {
            message: "layout input must be a JSON object".to_string(),
        });
    }
    let input: LayoutInput = serde_json::from_value(input.clone())?;
    let options = match options {
        Some(value) => serde_json::from_value(value.clone())?,
        None => LayoutOptions::default(),
    };
    Ok(layout(&input, &options))
}
