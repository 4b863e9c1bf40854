//! Relationship extraction: declared per-entity suggestions become concrete layout edges
//! with validated endpoints.

use crate::model::{LayoutEdge, UNASSIGNED_HANDLE};
use crate::schema::Entity;
use rustc_hash::{FxHashMap, FxHashSet};

/// Walk every entity's declared relationships and keep the well-formed ones. Self
/// references and unknown targets are dropped, dead connection point ids fall back to
/// the sentinel handle, and exact endpoint duplicates collapse to the first occurrence.
/// Output order follows declaration order.
pub(crate) fn extract(entities: &[Entity]) -> Vec<LayoutEdge> {
    let mut by_ty: FxHashMap<&str, usize> = FxHashMap::default();
    for (ix, entity) in entities.iter().enumerate() {
        by_ty.entry(entity.ty.as_str()).or_insert(ix);
    }

    let mut seen: FxHashSet<(String, String, String, String)> = FxHashSet::default();
    let mut out = Vec::new();
    for (ix, entity) in entities.iter().enumerate() {
        if by_ty.get(entity.ty.as_str()) != Some(&ix) {
            // Duplicate type key, first declaration wins.
            continue;
        }
        for (index, rel) in entity.suggested_relationships.iter().enumerate() {
            if rel.target == entity.ty {
                continue;
            }
            let Some(&target_ix) = by_ty.get(rel.target.as_str()) else {
                continue;
            };
            let target = &entities[target_ix];

            let source_handle = resolve_handle(entity, rel.from_point.as_deref());
            let target_handle = resolve_handle(target, rel.to_point.as_deref());

            let key = (
                entity.ty.clone(),
                source_handle.clone(),
                rel.target.clone(),
                target_handle.clone(),
            );
            if !seen.insert(key) {
                continue;
            }
            out.push(LayoutEdge {
                id: format!(
                    "{}:{}->{}:{}",
                    entity.ty, source_handle, rel.target, target_handle
                ),
                source: entity.ty.clone(),
                target: rel.target.clone(),
                source_handle,
                target_handle,
                label: rel.label.clone(),
                source_entity: entity.ty.clone(),
                relationship_index: index,
            });
        }
    }
    out
}

/// The declared point id when it exists on `entity`, otherwise the sentinel.
fn resolve_handle(entity: &Entity, point: Option<&str>) -> String {
    match point {
        Some(id) if entity.connection_points.iter().any(|p| p.id == id) => id.to_string(),
        _ => UNASSIGNED_HANDLE.to_string(),
    }
}
