//! Style inheritance resolution.
//!
//! Columns and rows may name both their own style and a default cell style.
//! The own style inherits every property of the default cell style it does
//! not set itself. Inheritance chains are flattened parents-first (Kahn's
//! topological order), so each child is merged onto a fully resolved parent.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::types::{StyleProps, StyleTable};

static EMPTY_STYLE: StyleProps = StyleProps(BTreeMap::new());

/// Flatten `(child, parent)` inheritance pairs over `styles`.
///
/// Returns a new table in which every child holds its parents' properties
/// overlaid with its own. Names missing from `styles` count as empty styles.
/// Pairs caught in a cycle are left unresolved.
pub fn resolve_styles(styles: &StyleTable, relations: &[(&str, &str)]) -> StyleTable {
    let mut seen = BTreeSet::new();
    let mut children_of: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut pending_parents: BTreeMap<&str, usize> = BTreeMap::new();
    // Nodes in first-appearance order, for a deterministic root queue
    let mut nodes: Vec<&str> = Vec::new();

    for &(child, parent) in relations {
        if child == parent || !seen.insert((child, parent)) {
            continue;
        }
        children_of.entry(parent).or_default().push(child);
        *pending_parents.entry(child).or_insert(0) += 1;
        for node in [parent, child] {
            if !nodes.contains(&node) {
                nodes.push(node);
            }
        }
    }

    let mut queue: VecDeque<&str> = nodes
        .iter()
        .copied()
        .filter(|node| pending_parents.get(node).copied().unwrap_or(0) == 0)
        .collect();

    let mut resolved = styles.clone();
    while let Some(parent) = queue.pop_front() {
        let parent_props = lookup(&resolved, parent).clone();
        let Some(children) = children_of.get(parent) else {
            continue;
        };
        for &child in children {
            let merged = parent_props.merged_with(lookup(&resolved, child));
            resolved.insert(child.to_string(), merged);

            if let Some(count) = pending_parents.get_mut(child) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    queue.push_back(child);
                }
            }
        }
    }

    let unresolved: Vec<&str> = pending_parents
        .iter()
        .filter(|(_, &count)| count > 0)
        .map(|(&name, _)| name)
        .collect();
    if !unresolved.is_empty() {
        log::warn!("style inheritance cycle, left unresolved: {unresolved:?}");
    }

    resolved
}

fn lookup<'a>(styles: &'a StyleTable, name: &str) -> &'a StyleProps {
    styles.get(name).unwrap_or_else(|| {
        log::debug!("style {name:?} is not defined, treating it as empty");
        &EMPTY_STYLE
    })
}

/// Read access to resolved styles where a missing or unnamed style is empty.
#[derive(Clone, Copy)]
pub struct StyleLookup<'a> {
    styles: &'a StyleTable,
}

impl<'a> StyleLookup<'a> {
    pub fn new(styles: &'a StyleTable) -> Self {
        Self { styles }
    }

    /// Properties of `name`, or the empty set when unnamed or undefined.
    pub fn get(&self, name: Option<&str>) -> &'a StyleProps {
        match name {
            Some(name) => lookup(self.styles, name),
            None => &EMPTY_STYLE,
        }
    }
}
