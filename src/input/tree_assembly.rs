use std::collections::HashMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::TreeValue;
use crate::core::tree::MAX_TREE_DEPTH;
use crate::error::{DiagramError, DiagramResult};

/// One `name,detail,child...` input row: a node and the names of its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRow {
    pub name: String,
    pub detail: String,
    pub children: Vec<String>,
}

impl TreeRow {
    #[must_use]
    pub fn new(name: impl Into<String>, detail: impl Into<String>, children: Vec<String>) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
            children,
        }
    }
}

/// Builds trees from parent->children rows.
///
/// Names must be unique, every child must have its own row, and every node
/// has at most one parent edge (a child listed twice counts twice). Nodes
/// that no root reaches lie on a cycle, and no node may sit deeper than
/// [`MAX_TREE_DEPTH`] levels. Roots come back in input order; empty input
/// yields no roots.
pub fn assemble_tree(rows: &[TreeRow]) -> DiagramResult<Vec<TreeValue>> {
    let mut by_name: IndexMap<&str, &TreeRow> = IndexMap::with_capacity(rows.len());
    for row in rows {
        if by_name.insert(row.name.as_str(), row).is_some() {
            return Err(DiagramError::InvalidTree(format!(
                "duplicate node name `{}`",
                row.name
            )));
        }
    }

    let mut parent_of: HashMap<&str, &str> = HashMap::with_capacity(rows.len());
    for row in rows {
        for child in &row.children {
            if !by_name.contains_key(child.as_str()) {
                return Err(DiagramError::InvalidTree(format!(
                    "node `{}` lists unknown child `{child}`",
                    row.name
                )));
            }
            if let Some(previous) = parent_of.insert(child.as_str(), row.name.as_str()) {
                return Err(DiagramError::InvalidTree(format!(
                    "node `{child}` has more than one parent (`{previous}`, `{}`)",
                    row.name
                )));
            }
        }
    }

    let roots: Vec<&TreeRow> = by_name
        .values()
        .copied()
        .filter(|row| !parent_of.contains_key(row.name.as_str()))
        .collect();

    let mut order: Vec<&TreeRow> = Vec::with_capacity(rows.len());
    for root in &roots {
        let mut stack = vec![(*root, 1_usize)];
        while let Some((row, level)) = stack.pop() {
            if level > MAX_TREE_DEPTH {
                return Err(DiagramError::InvalidTree(format!(
                    "node `{}` is deeper than {MAX_TREE_DEPTH} levels",
                    row.name
                )));
            }
            order.push(row);
            stack.extend(
                row.children
                    .iter()
                    .rev()
                    .filter_map(|child| by_name.get(child.as_str()))
                    .map(|child| (*child, level + 1)),
            );
        }
    }

    if order.len() != rows.len() {
        let stranded = by_name
            .keys()
            .find(|name| !is_reachable(name, &parent_of))
            .copied()
            .unwrap_or_default();
        return Err(DiagramError::InvalidTree(format!(
            "cycle through node `{stranded}`"
        )));
    }

    // Children follow their parent in pre-order, so a reverse pass finds them built.
    let mut built: HashMap<&str, TreeValue> = HashMap::with_capacity(rows.len());
    for row in order.iter().rev() {
        let children = row
            .children
            .iter()
            .filter_map(|child| built.remove(child.as_str()))
            .collect();
        built.insert(
            row.name.as_str(),
            TreeValue::with_children(row.name.clone(), row.detail.clone(), children),
        );
    }

    Ok(roots
        .iter()
        .filter_map(|row| built.remove(row.name.as_str()))
        .collect())
}

fn is_reachable(name: &str, parent_of: &HashMap<&str, &str>) -> bool {
    let mut current = name;
    for _ in 0..=parent_of.len() {
        match parent_of.get(current) {
            Some(parent) => current = parent,
            None => return true,
        }
    }
    false
}

/// Rows describing `root`'s subtree in pre-order; the inverse of [`assemble_tree`].
#[must_use]
pub fn flatten_tree(root: &TreeValue) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        rows.push(TreeRow::new(
            node.name.clone(),
            node.detail.clone(),
            node.children.iter().map(|child| child.name.clone()).collect(),
        ));
        stack.extend(node.children.iter().rev());
    }
    rows
}
