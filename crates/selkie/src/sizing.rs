//! Count-driven size estimation. No text measurement: geometry depends only on row
//! counts, so identical inputs always get identical boxes.

use crate::model::Size;
use crate::options::LayoutOptions;
use crate::schema::Entity;

/// Box for an entity node. Collapsed entities use the fixed header-only height; expanded
/// ones grow by one row per field and per connection point.
pub(crate) fn entity_size(entity: &Entity, expanded: bool, opts: &LayoutOptions) -> Size {
    if !expanded {
        return Size {
            width: opts.entity_width,
            height: opts.entity_collapsed_height,
        };
    }
    let detail = opts.field_row_height * entity.fields.len() as f64
        + opts.point_row_height * entity.connection_points.len() as f64;
    Size {
        width: opts.entity_width,
        height: (opts.entity_header_height + detail + opts.entity_detail_padding)
            .max(opts.entity_collapsed_height),
    }
}

/// Box a collapsed or empty organizer occupies.
pub(crate) fn chip_size(opts: &LayoutOptions) -> Size {
    Size {
        width: opts.chip_width,
        height: opts.chip_height,
    }
}
