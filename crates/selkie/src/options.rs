//! Tunable layout geometry. All lengths are canvas units.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    /// Fixed entity node width; detail rows only change height.
    pub entity_width: f64,
    pub entity_collapsed_height: f64,
    pub entity_header_height: f64,
    pub field_row_height: f64,
    pub point_row_height: f64,
    pub entity_detail_padding: f64,
    /// Box a collapsed or empty organizer shrinks to.
    pub chip_width: f64,
    pub chip_height: f64,
    pub group_side_padding: f64,
    pub group_header_height: f64,
    pub group_bottom_padding: f64,
    /// Gap between neighbors within one constraint rank.
    pub node_sep: f64,
    /// Gap between consecutive constraint ranks.
    pub rank_sep: f64,
    pub grid_columns: usize,
    pub grid_gutter_x: f64,
    pub grid_gutter_y: f64,
    /// Ungrouped entity count above which a sparse top level falls back to the grid.
    pub grid_fallback_threshold: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            entity_width: 220.0,
            entity_collapsed_height: 56.0,
            entity_header_height: 40.0,
            field_row_height: 24.0,
            point_row_height: 20.0,
            entity_detail_padding: 16.0,
            chip_width: 180.0,
            chip_height: 48.0,
            group_side_padding: 24.0,
            group_header_height: 48.0,
            group_bottom_padding: 24.0,
            node_sep: 40.0,
            rank_sep: 60.0,
            grid_columns: 4,
            grid_gutter_x: 40.0,
            grid_gutter_y: 40.0,
            grid_fallback_threshold: 6,
        }
    }
}

// Hashed bitwise so options can take part in the cache fingerprint.
impl Hash for LayoutOptions {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in [
            self.entity_width,
            self.entity_collapsed_height,
            self.entity_header_height,
            self.field_row_height,
            self.point_row_height,
            self.entity_detail_padding,
            self.chip_width,
            self.chip_height,
            self.group_side_padding,
            self.group_header_height,
            self.group_bottom_padding,
            self.node_sep,
            self.rank_sep,
            self.grid_gutter_x,
            self.grid_gutter_y,
        ] {
            value.to_bits().hash(state);
        }
        self.grid_columns.hash(state);
        self.grid_fallback_threshold.hash(state);
    }
}
