use crate::core::geometry::{distance, name_seed, pseudo_color};
use crate::core::{ScreenRect, TreeValue};
use crate::error::{DiagramError, DiagramResult};
use crate::render::Color;

/// Deepest tree accepted from input, counted in levels.
///
/// Cloning, comparing and dropping a [`TreeValue`] recurse once per level, so
/// assembly and dataset validation reject anything deeper.
pub const MAX_TREE_DEPTH: usize = 1024;

/// Levels on the longest root-to-leaf path; a leaf has depth 1.
#[must_use]
pub fn tree_depth(node: &TreeValue) -> usize {
    let mut depth = 0;
    let mut stack = vec![(node, 1)];
    while let Some((node, level)) = stack.pop() {
        depth = depth.max(level);
        stack.extend(node.children.iter().map(|child| (child, level + 1)));
    }
    depth
}

/// Number of nodes in the subtree rooted at `node`, including itself.
#[must_use]
pub fn subtree_weight(node: &TreeValue) -> usize {
    let mut weight = 0;
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        weight += 1;
        stack.extend(node.children.iter());
    }
    weight
}

/// A laid-out tree node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint<'a> {
    pub x: f64,
    pub y: f64,
    pub node: &'a TreeValue,
    pub color: Color,
    /// Position of the parent node, `None` for the root.
    pub parent: Option<(f64, f64)>,
}

struct Visit<'a> {
    node: &'a TreeValue,
    parent: Option<usize>,
    level: usize,
}

// Pre-order with parent indices; every parent precedes its children.
fn pre_order(root: &TreeValue) -> Vec<Visit<'_>> {
    let mut visits = Vec::new();
    let mut stack = vec![(root, None, 0)];
    while let Some((node, parent, level)) = stack.pop() {
        let index = visits.len();
        visits.push(Visit {
            node,
            parent,
            level,
        });
        stack.extend(
            node.children
                .iter()
                .rev()
                .map(|child| (child, Some(index), level + 1)),
        );
    }
    visits
}

/// Lays out `root` as a dendrogram inside `rect`, in pre-order.
///
/// Each node sits at the top-center of its slice. Children split the
/// parent's width proportionally to their subtree weight and start one level
/// lower; the level height is `rect.height / (depth - 1)` for the whole tree.
pub fn layout_tree(root: &TreeValue, rect: ScreenRect) -> DiagramResult<Vec<ScreenPoint<'_>>> {
    if !rect.is_valid() {
        return Err(DiagramError::InvalidData(
            "tree rect must be finite with positive size".to_owned(),
        ));
    }

    let visits = pre_order(root);
    let depth = visits.iter().map(|visit| visit.level).max().unwrap_or(0) + 1;
    let level_height = if depth > 1 {
        rect.height() / (depth - 1) as f64
    } else {
        0.0
    };

    let mut weights = vec![1_usize; visits.len()];
    for index in (1..visits.len()).rev() {
        if let Some(parent) = visits[index].parent {
            weights[parent] += weights[index];
        }
    }

    // Left edge of each node's slice and of the next unplaced child's slice.
    let mut slices: Vec<(f64, f64)> = Vec::with_capacity(visits.len());
    let mut next_child_left: Vec<f64> = Vec::with_capacity(visits.len());
    let mut points: Vec<ScreenPoint<'_>> = Vec::with_capacity(visits.len());

    for (index, visit) in visits.iter().enumerate() {
        let (left, right) = match visit.parent {
            None => (rect.left, rect.right),
            Some(parent) => {
                let (parent_left, parent_right) = slices[parent];
                let descendants = (weights[parent] - 1) as f64;
                let width = weights[index] as f64 / descendants * (parent_right - parent_left);
                let left = next_child_left[parent];
                next_child_left[parent] = left + width;
                (left, left + width)
            }
        };
        slices.push((left, right));
        next_child_left.push(left);

        let parent = visit
            .parent
            .map(|parent| (points[parent].x, points[parent].y));
        points.push(ScreenPoint {
            x: (left + right) / 2.0,
            y: rect.top + visit.level as f64 * level_height,
            node: visit.node,
            color: pseudo_color(name_seed(&visit.node.name, weights[index] as f64)),
            parent,
        });
    }
    Ok(points)
}

/// Index of the first node within `radius` pixels of `cursor`.
#[must_use]
pub fn node_at(
    points: &[ScreenPoint<'_>],
    cursor: Option<(f64, f64)>,
    radius: f64,
) -> Option<usize> {
    let (x, y) = cursor?;
    points
        .iter()
        .position(|point| distance(point.x, point.y, x, y) <= radius)
}
