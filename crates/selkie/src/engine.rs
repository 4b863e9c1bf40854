//! Constraint-graph arrangement.
//!
//! Group interiors are solved bottom-up: each group lays out its direct entities and
//! child-group boxes in a private constraint graph, and the resulting content box
//! becomes that group's placeholder size one level up. The top level then places root
//! groups and ungrouped entities the same way, unless the diagram is sparse and mostly
//! ungrouped, in which case the ungrouped set falls back to a fixed-column grid.
//!
//! A collapsed group keeps its computed content box through every parent pass; only the
//! exported organizer box shrinks to the chip. Sibling and descendant positions are
//! therefore identical between a collapsed and an expanded run.

use beluga::{Graph, LayoutConfig, NodeShape, RankDir};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::edges;
use crate::group_tree::GroupTree;
use crate::model::{Bounds, LayoutEdge, Point, Size, UNGROUPED_GROUP_ID};
use crate::options::LayoutOptions;
use crate::schema::{Direction, LayoutInput};
use crate::sizing;

/// One group's solved interior. Member positions are relative to the group's own
/// top-left corner. `content` is the box parent passes see; `export` is the box the
/// emitted organizer reports, chip-sized when the group is collapsed.
#[derive(Debug)]
pub(crate) struct GroupLayout {
    pub content: Size,
    pub export: Size,
    pub collapsed: bool,
    pub entity_count: usize,
    pub members: Vec<PlacedMember>,
}

#[derive(Debug)]
pub(crate) enum PlacedMember {
    Entity { ix: usize, position: Point },
    Group { id: String, position: Point },
}

impl PlacedMember {
    fn position(&self) -> Point {
        match self {
            PlacedMember::Entity { position, .. } | PlacedMember::Group { position, .. } => {
                *position
            }
        }
    }

    fn position_mut(&mut self) -> &mut Point {
        match self {
            PlacedMember::Entity { position, .. } | PlacedMember::Group { position, .. } => {
                position
            }
        }
    }
}

/// Solved arrangement, prior to node emission.
#[derive(Debug)]
pub(crate) struct Arrangement {
    pub tree: GroupTree,
    pub edges: Vec<LayoutEdge>,
    /// Interiors by group id, including the synthetic bucket when it exists.
    pub layouts: FxHashMap<String, GroupLayout>,
    /// Root group ids with absolute top-left positions, in declaration order.
    pub root_origins: Vec<(String, Point)>,
    /// Absolute top-left of the synthetic ungrouped container, when it exists.
    pub bucket_origin: Option<Point>,
}

pub(crate) fn arrange(input: &LayoutInput, opts: &LayoutOptions) -> Arrangement {
    Planner::new(input, opts).run()
}

struct Planner<'a> {
    input: &'a LayoutInput,
    opts: &'a LayoutOptions,
    tree: GroupTree,
    edges: Vec<LayoutEdge>,
    /// Entity type key -> index, first declaration wins.
    entity_ix: FxHashMap<String, usize>,
    /// Validated group per entity index; `None` means ungrouped.
    entity_group: Vec<Option<String>>,
    /// Direct entity members per group id, in declaration order.
    members: FxHashMap<String, Vec<usize>>,
    ungrouped: Vec<usize>,
    layouts: FxHashMap<String, GroupLayout>,
}

impl<'a> Planner<'a> {
    fn new(input: &'a LayoutInput, opts: &'a LayoutOptions) -> Self {
        let tree = GroupTree::build(&input.groups);
        let edges = edges::extract(&input.entities);

        let mut entity_ix: FxHashMap<String, usize> = FxHashMap::default();
        for (ix, entity) in input.entities.iter().enumerate() {
            entity_ix.entry(entity.ty.clone()).or_insert(ix);
        }

        let mut entity_group = Vec::with_capacity(input.entities.len());
        let mut members: FxHashMap<String, Vec<usize>> = FxHashMap::default();
        let mut ungrouped = Vec::new();
        for (ix, entity) in input.entities.iter().enumerate() {
            let group = entity
                .group_id
                .as_deref()
                .filter(|gid| tree.contains(gid))
                .map(str::to_string);
            entity_group.push(group.clone());
            if entity_ix.get(entity.ty.as_str()).copied() != Some(ix) {
                // Duplicate type key, first declaration wins.
                continue;
            }
            match group {
                Some(gid) => members.entry(gid).or_default().push(ix),
                None => ungrouped.push(ix),
            }
        }

        Planner {
            input,
            opts,
            tree,
            edges,
            entity_ix,
            entity_group,
            members,
            ungrouped,
            layouts: FxHashMap::default(),
        }
    }

    fn run(mut self) -> Arrangement {
        let roots = self.tree.roots().to_vec();
        let mut visiting: FxHashSet<String> = FxHashSet::default();
        for root in &roots {
            self.solve_group(root, &mut visiting);
        }
        let (root_origins, bucket_origin) = self.arrange_top(&roots);
        Arrangement {
            tree: self.tree,
            edges: self.edges,
            layouts: self.layouts,
            root_origins,
            bucket_origin,
        }
    }

    /// Solve `id`'s interior, children first. Each group is solved exactly once; the
    /// visited guard keeps a corrupt child list from recursing forever.
    fn solve_group(&mut self, id: &str, visiting: &mut FxHashSet<String>) {
        if self.layouts.contains_key(id) || !visiting.insert(id.to_string()) {
            return;
        }
        let child_ids = self.tree.children(id).to_vec();
        for child in &child_ids {
            self.solve_group(child, visiting);
        }
        let entity_ixs = self.members.get(id).cloned().unwrap_or_default();

        let mut g = self.constraint_graph();
        for &ix in &entity_ixs {
            let size = self.entity_size(ix);
            let ty = &self.input.entities[ix].ty;
            g.set_node(entity_node(ty), NodeShape::sized(size.width, size.height));
        }
        for child in &child_ids {
            if let Some(layout) = self.layouts.get(child) {
                g.set_node(
                    group_node(child),
                    NodeShape::sized(layout.content.width, layout.content.height),
                );
            }
        }

        // Constraints between direct members; endpoints outside this group are ignored,
        // endpoints nested deeper collapse onto the child group that holds them.
        let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
        for edge in &self.edges {
            let Some(a) = self.member_node(id, &edge.source) else {
                continue;
            };
            let Some(b) = self.member_node(id, &edge.target) else {
                continue;
            };
            if a == b {
                continue;
            }
            if seen.insert((a.clone(), b.clone())) {
                g.set_edge(&a, &b);
            }
        }

        beluga::layout(&mut g);

        let mut placed: Vec<(PlacedMember, Size)> = Vec::new();
        for &ix in &entity_ixs {
            let ty = self.input.entities[ix].ty.as_str();
            if let Some(shape) = g.node(&entity_node(ty)) {
                placed.push((
                    PlacedMember::Entity {
                        ix,
                        position: top_left(shape),
                    },
                    Size {
                        width: shape.width,
                        height: shape.height,
                    },
                ));
            }
        }
        for child in &child_ids {
            if let Some(shape) = g.node(&group_node(child)) {
                placed.push((
                    PlacedMember::Group {
                        id: child.clone(),
                        position: top_left(shape),
                    },
                    Size {
                        width: shape.width,
                        height: shape.height,
                    },
                ));
            }
        }

        let bounds = Bounds::from_points(placed.iter().flat_map(|(member, size)| {
            let p = member.position();
            [(p.x, p.y), (p.x + size.width, p.y + size.height)]
        }));

        let (content, members) = match bounds {
            Some(b) => {
                let dx = self.opts.group_side_padding - b.min_x;
                let dy = self.opts.group_header_height - b.min_y;
                let members = placed
                    .into_iter()
                    .map(|(mut member, _)| {
                        let p = member.position_mut();
                        p.x += dx;
                        p.y += dy;
                        member
                    })
                    .collect();
                let content = Size {
                    width: b.width() + 2.0 * self.opts.group_side_padding,
                    height: b.height()
                        + self.opts.group_header_height
                        + self.opts.group_bottom_padding,
                };
                (content, members)
            }
            // An empty group occupies a chip even while expanded.
            None => (sizing::chip_size(self.opts), Vec::new()),
        };

        let entity_count = entity_ixs.len()
            + child_ids
                .iter()
                .filter_map(|child| self.layouts.get(child))
                .map(|layout| layout.entity_count)
                .sum::<usize>();
        let collapsed = self.input.group_collapsed(id);
        let export = if collapsed {
            sizing::chip_size(self.opts)
        } else {
            content
        };
        tracing::trace!(
            group = id,
            width = content.width,
            height = content.height,
            "group interior solved"
        );
        self.layouts.insert(
            id.to_string(),
            GroupLayout {
                content,
                export,
                collapsed,
                entity_count,
                members,
            },
        );
    }

    /// Node inside `group_id`'s constraint graph standing for entity `ty`: the entity
    /// itself when a direct member, the direct child group it nests under when deeper,
    /// `None` when it lives outside this group entirely.
    fn member_node(&self, group_id: &str, ty: &str) -> Option<String> {
        let ix = *self.entity_ix.get(ty)?;
        let mut cur = self.entity_group[ix].as_deref()?;
        if cur == group_id {
            return Some(entity_node(ty));
        }
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        while seen.insert(cur) {
            match self.tree.parent(cur) {
                Some(parent) if parent == group_id => return Some(group_node(cur)),
                Some(parent) => cur = parent,
                None => return None,
            }
        }
        None
    }

    fn arrange_top(&mut self, roots: &[String]) -> (Vec<(String, Point)>, Option<Point>) {
        let pairs = self.top_level_pairs();
        let top_nodes = roots.len() + self.ungrouped.len();
        let grid = self.ungrouped.len() > self.opts.grid_fallback_threshold
            && pairs.len() < top_nodes;
        if grid {
            tracing::debug!(
                ungrouped = self.ungrouped.len(),
                connections = pairs.len(),
                "sparse top level, falling back to grid placement"
            );
            self.arrange_top_grid(roots, &pairs)
        } else {
            self.arrange_top_constrained(roots, &pairs)
        }
    }

    /// Distinct directed cross-container pairs at the top level, in edge order.
    fn top_level_pairs(&self) -> Vec<(String, String)> {
        let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
        let mut pairs = Vec::new();
        for edge in &self.edges {
            let (Some(a), Some(b)) = (self.top_node(&edge.source), self.top_node(&edge.target))
            else {
                continue;
            };
            if a == b {
                continue;
            }
            if seen.insert((a.clone(), b.clone())) {
                pairs.push((a, b));
            }
        }
        pairs
    }

    /// Constraint-graph node id standing for `ty` at the top level.
    fn top_node(&self, ty: &str) -> Option<String> {
        let ix = *self.entity_ix.get(ty)?;
        match self.entity_group[ix].as_deref() {
            Some(gid) => Some(group_node(self.tree.root_of(gid))),
            None => Some(entity_node(ty)),
        }
    }

    fn arrange_top_constrained(
        &mut self,
        roots: &[String],
        pairs: &[(String, String)],
    ) -> (Vec<(String, Point)>, Option<Point>) {
        let mut g = self.constraint_graph();
        for root in roots {
            if let Some(layout) = self.layouts.get(root) {
                g.set_node(
                    group_node(root),
                    NodeShape::sized(layout.content.width, layout.content.height),
                );
            }
        }
        for &ix in &self.ungrouped {
            let size = self.entity_size(ix);
            let ty = &self.input.entities[ix].ty;
            g.set_node(entity_node(ty), NodeShape::sized(size.width, size.height));
        }
        for (a, b) in pairs {
            g.set_edge(a, b);
        }
        beluga::layout(&mut g);

        let mut root_origins: Vec<(String, Point)> = Vec::with_capacity(roots.len());
        for root in roots {
            if let Some(shape) = g.node(&group_node(root)) {
                root_origins.push((root.clone(), top_left(shape)));
            }
        }
        let mut entity_origins: Vec<(usize, Point)> = Vec::with_capacity(self.ungrouped.len());
        for &ix in &self.ungrouped {
            if let Some(shape) = g.node(&entity_node(&self.input.entities[ix].ty)) {
                entity_origins.push((ix, top_left(shape)));
            }
        }

        // Shift the whole canvas so its tight bounding box starts at the origin.
        let corners = root_origins
            .iter()
            .filter_map(|(root, p)| self.layouts.get(root).map(|layout| (*p, layout.content)))
            .chain(
                entity_origins
                    .iter()
                    .map(|&(ix, p)| (p, self.entity_size(ix))),
            )
            .flat_map(|(p, size)| [(p.x, p.y), (p.x + size.width, p.y + size.height)]);
        if let Some(b) = Bounds::from_points(corners) {
            for (_, p) in &mut root_origins {
                p.x -= b.min_x;
                p.y -= b.min_y;
            }
            for (_, p) in &mut entity_origins {
                p.x -= b.min_x;
                p.y -= b.min_y;
            }
        }

        let bucket_origin = self.wrap_ungrouped(&entity_origins).map(|(origin, layout)| {
            self.layouts.insert(UNGROUPED_GROUP_ID.to_string(), layout);
            origin
        });
        (root_origins, bucket_origin)
    }

    /// Wrap the already-placed ungrouped entities in the synthetic container, converting
    /// absolute positions to container-relative ones.
    fn wrap_ungrouped(&self, entity_origins: &[(usize, Point)]) -> Option<(Point, GroupLayout)> {
        let corners = entity_origins.iter().flat_map(|&(ix, p)| {
            let size = self.entity_size(ix);
            [(p.x, p.y), (p.x + size.width, p.y + size.height)]
        });
        let b = Bounds::from_points(corners)?;
        let origin = Point {
            x: b.min_x - self.opts.group_side_padding,
            y: b.min_y - self.opts.group_header_height,
        };
        let members = entity_origins
            .iter()
            .map(|&(ix, p)| PlacedMember::Entity {
                ix,
                position: Point {
                    x: p.x - origin.x,
                    y: p.y - origin.y,
                },
            })
            .collect();
        let content = Size {
            width: b.width() + 2.0 * self.opts.group_side_padding,
            height: b.height() + self.opts.group_header_height + self.opts.group_bottom_padding,
        };
        Some((origin, self.bucket_layout(content, members)))
    }

    fn arrange_top_grid(
        &mut self,
        roots: &[String],
        pairs: &[(String, String)],
    ) -> (Vec<(String, Point)>, Option<Point>) {
        let mut g = self.constraint_graph();
        for root in roots {
            if let Some(layout) = self.layouts.get(root) {
                g.set_node(
                    group_node(root),
                    NodeShape::sized(layout.content.width, layout.content.height),
                );
            }
        }
        // Only group-to-group constraints remain; entity connectivity moves to the grid.
        for (a, b) in pairs {
            if g.has_node(a) && g.has_node(b) {
                g.set_edge(a, b);
            }
        }
        beluga::layout(&mut g);

        let mut root_origins: Vec<(String, Point)> = Vec::with_capacity(roots.len());
        for root in roots {
            if let Some(shape) = g.node(&group_node(root)) {
                root_origins.push((root.clone(), top_left(shape)));
            }
        }
        let corners = root_origins
            .iter()
            .filter_map(|(root, p)| self.layouts.get(root).map(|layout| (*p, layout.content)))
            .flat_map(|(p, size)| [(p.x, p.y), (p.x + size.width, p.y + size.height)]);
        let mut bottom = 0.0;
        if let Some(b) = Bounds::from_points(corners) {
            for (_, p) in &mut root_origins {
                p.x -= b.min_x;
                p.y -= b.min_y;
            }
            bottom = b.height();
        }

        // The grid block sits below the lowest root group, left-aligned with the canvas.
        let y = if root_origins.is_empty() {
            0.0
        } else {
            bottom + self.opts.rank_sep
        };
        let layout = self.grid_bucket();
        self.layouts.insert(UNGROUPED_GROUP_ID.to_string(), layout);
        (root_origins, Some(Point { x: 0.0, y }))
    }

    /// Row-major fixed-column grid of the ungrouped entities, positions relative to the
    /// synthetic container.
    fn grid_bucket(&self) -> GroupLayout {
        let columns = self.opts.grid_columns.max(1);
        let sizes: Vec<Size> = self.ungrouped.iter().map(|&ix| self.entity_size(ix)).collect();

        let mut row_heights: Vec<f64> = Vec::new();
        for (i, size) in sizes.iter().enumerate() {
            let row = i / columns;
            if row == row_heights.len() {
                row_heights.push(0.0);
            }
            row_heights[row] = row_heights[row].max(size.height);
        }
        let mut row_offsets = Vec::with_capacity(row_heights.len());
        let mut acc = 0.0;
        for height in &row_heights {
            row_offsets.push(acc);
            acc += height + self.opts.grid_gutter_y;
        }
        let grid_height = if row_heights.is_empty() {
            0.0
        } else {
            acc - self.opts.grid_gutter_y
        };
        let used_columns = self.ungrouped.len().min(columns);
        let grid_width = if used_columns == 0 {
            0.0
        } else {
            used_columns as f64 * self.opts.entity_width
                + (used_columns - 1) as f64 * self.opts.grid_gutter_x
        };

        let members = self
            .ungrouped
            .iter()
            .enumerate()
            .map(|(i, &ix)| PlacedMember::Entity {
                ix,
                position: Point {
                    x: self.opts.group_side_padding
                        + (i % columns) as f64 * (self.opts.entity_width + self.opts.grid_gutter_x),
                    y: self.opts.group_header_height + row_offsets[i / columns],
                },
            })
            .collect();

        let content = Size {
            width: grid_width + 2.0 * self.opts.group_side_padding,
            height: grid_height + self.opts.group_header_height + self.opts.group_bottom_padding,
        };
        self.bucket_layout(content, members)
    }

    fn bucket_layout(&self, content: Size, members: Vec<PlacedMember>) -> GroupLayout {
        let collapsed = self.input.group_collapsed(UNGROUPED_GROUP_ID);
        let export = if collapsed {
            sizing::chip_size(self.opts)
        } else {
            content
        };
        GroupLayout {
            content,
            export,
            collapsed,
            entity_count: members.len(),
            members,
        }
    }

    fn entity_size(&self, ix: usize) -> Size {
        let entity = &self.input.entities[ix];
        sizing::entity_size(entity, self.input.entity_expanded(&entity.ty), self.opts)
    }

    fn constraint_graph(&self) -> Graph {
        let rankdir = match self.input.direction {
            Direction::Vertical => RankDir::TB,
            Direction::Horizontal => RankDir::LR,
        };
        Graph::with_config(LayoutConfig {
            rankdir,
            nodesep: self.opts.node_sep,
            ranksep: self.opts.rank_sep,
        })
    }
}

fn top_left(shape: &NodeShape) -> Point {
    Point {
        x: shape.x.unwrap_or(0.0) - shape.width / 2.0,
        y: shape.y.unwrap_or(0.0) - shape.height / 2.0,
    }
}

// Constraint-graph ids are namespaced so a group id can never collide with a type key.
fn entity_node(ty: &str) -> String {
    format!("e:{ty}")
}

fn group_node(id: &str) -> String {
    format!("g:{id}")
}
