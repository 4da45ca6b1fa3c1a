//! Binary-tree figures rebuilt from ID/date data.
//!
//! Tree-construction exercises list records such as `245 01/07/2020` under a
//! "binary search tree" caption. The IDs are inserted in order into a BST
//! keyed on the ID, which is rendered as ASCII for display:
//!
//! ```text
//! 245 (01/07/2020)
//! ├── L: 112 (12/03/2019)
//! └── R: 389 (05/11/2021)
//! ```

use super::tables::id_date_pairs;
use crate::output::{TreeFigure, TreeNode};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use tracing::debug;

static RE_CAPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bbinary\s+(?:search\s+)?tree").unwrap());

const MIN_NODES: usize = 3;

/// The tree figure of the section; needs a caption and at least three
/// ID/date pairs.
pub fn extract_tree(lines: &[&str]) -> Option<TreeFigure> {
    let caption = lines.iter().find(|l| RE_CAPTION.is_match(l))?.trim();
    let pairs = id_date_pairs(lines);
    if pairs.len() < MIN_NODES {
        debug!("Tree caption found with only {} ID/date pairs", pairs.len());
        return None;
    }

    let mut nodes: Vec<TreeNode> = Vec::with_capacity(pairs.len());
    for (id, date) in pairs {
        insert(&mut nodes, id, date);
    }

    let rendered = render(&nodes);
    debug!("Rebuilt binary tree with {} nodes", nodes.len());
    Some(TreeFigure {
        caption: caption.to_string(),
        nodes,
        rendered,
    })
}

/// Numeric order of two digit strings, ignoring leading zeros.
fn numeric_cmp(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// BST insert; a repeated ID is ignored.
fn insert(nodes: &mut Vec<TreeNode>, id: String, date: String) {
    let new_index = nodes.len();
    let node = TreeNode {
        id,
        date,
        left: None,
        right: None,
    };
    if nodes.is_empty() {
        nodes.push(node);
        return;
    }

    let mut at = 0;
    loop {
        let slot = match numeric_cmp(&node.id, &nodes[at].id) {
            Ordering::Equal => return,
            Ordering::Less => &mut nodes[at].left,
            Ordering::Greater => &mut nodes[at].right,
        };
        match *slot {
            Some(next) => at = next,
            None => {
                *slot = Some(new_index);
                break;
            }
        }
    }
    nodes.push(node);
}

fn render(nodes: &[TreeNode]) -> String {
    let Some(root) = nodes.first() else {
        return String::new();
    };
    let mut out = format!("{} ({})\n", root.id, root.date);
    render_children(nodes, 0, "", &mut out);
    out.trim_end().to_string()
}

fn render_children(nodes: &[TreeNode], at: usize, prefix: &str, out: &mut String) {
    let children: Vec<(&str, usize)> = [("L", nodes[at].left), ("R", nodes[at].right)]
        .into_iter()
        .filter_map(|(side, child)| child.map(|c| (side, c)))
        .collect();

    for (i, (side, child)) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "└── " } else { "├── " };
        let node = &nodes[*child];
        out.push_str(&format!("{prefix}{branch}{side}: {} ({})\n", node.id, node.date));
        let next_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        render_children(nodes, *child, &next_prefix, out);
    }
}
