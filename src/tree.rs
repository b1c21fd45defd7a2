//! Iterative tree assembly from flat edge lists, and the reverse walk.
//!
//! JAG projects are stored as flat rows that point at their parent.
//! [`build_tree`] re-nests such rows with an index built once in O(n) and an
//! explicit work stack, so deep trees never hit recursion limits.
//! [`flatten_depth_first`] walks a nested tree with a LIFO stack and emits
//! every parent before its children.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Errors raised while re-nesting flat rows.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError<K: Debug> {
    /// No row satisfied the root predicate.
    #[error("no root row found")]
    MissingRoot,

    /// More than one row satisfied the root predicate.
    #[error("multiple root rows found: {0:?}")]
    MultipleRoots(Vec<K>),

    /// Two rows share the same identifier.
    #[error("duplicate row identifier: {0:?}")]
    DuplicateId(K),

    /// Rows that cannot be reached from the root.
    #[error("rows not reachable from the root: {0:?}")]
    Detached(Vec<K>),
}

/// Builds a single tree from rows that reference their parent by id.
///
/// `is_root` selects the root row; exactly one row must match. `parent_of`
/// returns the parent identifier of a row, and a row whose parent is its own
/// id is treated as parentless. `join` assembles an output node from a row
/// and its already-assembled children, which keep their input order.
///
/// # Errors
///
/// Returns [`TreeError`] when the root is missing or ambiguous, an id is
/// duplicated, or some rows are not reachable from the root.
pub fn build_tree<T, K, O>(
    items: Vec<T>,
    is_root: impl Fn(&T) -> bool,
    id_of: impl Fn(&T) -> K,
    parent_of: impl Fn(&T) -> Option<K>,
    mut join: impl FnMut(T, Vec<O>) -> O,
) -> Result<O, TreeError<K>>
where
    K: Clone + Eq + Hash + Debug,
{
    let ids: Vec<K> = items.iter().map(&id_of).collect();
    let mut seen = HashSet::with_capacity(ids.len());
    for id in &ids {
        if !seen.insert(id.clone()) {
            return Err(TreeError::DuplicateId(id.clone()));
        }
    }

    let roots: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| is_root(*item))
        .map(|(index, _)| index)
        .collect();
    let root = match roots.as_slice() {
        [] => return Err(TreeError::MissingRoot),
        [single] => *single,
        _ => {
            let root_ids = roots.iter().filter_map(|i| ids.get(*i).cloned()).collect();
            return Err(TreeError::MultipleRoots(root_ids));
        }
    };

    let children = index_children(&items, &ids, root, &parent_of);

    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut built: Vec<Option<O>> = std::iter::repeat_with(|| None).take(slots.len()).collect();
    let mut visited = vec![false; slots.len()];
    let mut stack = vec![(root, false)];

    while let Some((index, expanded)) = stack.pop() {
        if expanded {
            let child_nodes = children
                .get(&index)
                .map(|positions| {
                    positions
                        .iter()
                        .filter_map(|child| built.get_mut(*child).and_then(Option::take))
                        .collect()
                })
                .unwrap_or_default();
            if let Some(item) = slots.get_mut(index).and_then(Option::take) {
                if let Some(slot) = built.get_mut(index) {
                    *slot = Some(join(item, child_nodes));
                }
            }
            continue;
        }

        if let Some(flag) = visited.get_mut(index) {
            *flag = true;
        }
        stack.push((index, true));
        if let Some(positions) = children.get(&index) {
            stack.extend(positions.iter().rev().map(|child| (*child, false)));
        }
    }

    let detached: Vec<K> = visited
        .iter()
        .zip(&ids)
        .filter(|(reached, _)| !**reached)
        .map(|(_, id)| id.clone())
        .collect();
    if !detached.is_empty() {
        return Err(TreeError::Detached(detached));
    }

    built
        .get_mut(root)
        .and_then(Option::take)
        .ok_or(TreeError::MissingRoot)
}

/// Maps each row position to the positions of its children.
fn index_children<T, K>(
    items: &[T],
    ids: &[K],
    root: usize,
    parent_of: impl Fn(&T) -> Option<K>,
) -> HashMap<usize, Vec<usize>>
where
    K: Clone + Eq + Hash,
{
    let position_of: HashMap<&K, usize> = ids.iter().enumerate().map(|(i, id)| (id, i)).collect();
    let mut children: HashMap<usize, Vec<usize>> = HashMap::new();
    for (index, item) in items.iter().enumerate() {
        if index == root {
            continue;
        }
        let Some(parent) = parent_of(item) else {
            continue;
        };
        if ids.get(index) == Some(&parent) {
            continue;
        }
        if let Some(parent_index) = position_of.get(&parent) {
            children.entry(*parent_index).or_default().push(index);
        }
    }
    children
}

/// Flattens a nested tree into records, parents first.
///
/// `split` receives a node, the record already emitted for its parent (if
/// any) and the node's position among its siblings. It returns the record to
/// emit and the node's children, which are visited in order.
pub fn flatten_depth_first<N, R>(
    root: N,
    mut split: impl FnMut(N, Option<&R>, usize) -> (R, Vec<N>),
) -> Vec<R> {
    let mut records: Vec<R> = Vec::new();
    let mut stack: Vec<(N, Option<usize>, usize)> = vec![(root, None, 0)];

    while let Some((node, parent, position)) = stack.pop() {
        let parent_record = parent.and_then(|index| records.get(index));
        let (record, children) = split(node, parent_record, position);
        let emitted = records.len();
        records.push(record);
        let pending: Vec<_> = children
            .into_iter()
            .enumerate()
            .map(|(ordinal, child)| (child, Some(emitted), ordinal))
            .collect();
        stack.extend(pending.into_iter().rev());
    }

    records
}

#[cfg(test)]
mod tests {
    use super::{TreeError, build_tree, flatten_depth_first};

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        parent: Option<u32>,
    }

    #[derive(Debug, PartialEq)]
    struct Node {
        id: u32,
        children: Vec<Node>,
    }

    const fn row(id: u32, parent: Option<u32>) -> Row {
        Row { id, parent }
    }

    fn assemble(rows: Vec<Row>, root: u32) -> Result<Node, TreeError<u32>> {
        build_tree(
            rows,
            |r| r.id == root,
            |r| r.id,
            |r| r.parent,
            |r, children| Node { id: r.id, children },
        )
    }

    fn leaf(id: u32) -> Node {
        Node {
            id,
            children: Vec::new(),
        }
    }

    #[test]
    fn builds_nested_tree_preserving_input_order() {
        let rows = vec![
            row(4, Some(2)),
            row(1, None),
            row(3, Some(1)),
            row(2, Some(1)),
        ];

        let tree = assemble(rows, 1).expect("tree should assemble");

        assert_eq!(
            tree,
            Node {
                id: 1,
                children: vec![
                    leaf(3),
                    Node {
                        id: 2,
                        children: vec![leaf(4)],
                    },
                ],
            }
        );
    }

    #[test]
    fn self_referential_root_parent_is_ignored() {
        let tree = assemble(vec![row(1, Some(1)), row(2, Some(1))], 1)
            .expect("tree should assemble");
        assert_eq!(tree.children, vec![leaf(2)]);
    }

    #[test]
    fn missing_root_is_reported() {
        let result = assemble(vec![row(2, Some(1))], 1);
        assert_eq!(result, Err(TreeError::MissingRoot));
    }

    #[test]
    fn multiple_roots_are_reported() {
        let result = build_tree(
            vec![row(1, None), row(2, None)],
            |r| r.parent.is_none(),
            |r| r.id,
            |r| r.parent,
            |r, children: Vec<Node>| Node { id: r.id, children },
        );
        assert_eq!(result, Err(TreeError::MultipleRoots(vec![1, 2])));
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let result = assemble(vec![row(1, None), row(2, Some(1)), row(2, Some(1))], 1);
        assert_eq!(result, Err(TreeError::DuplicateId(2)));
    }

    #[test]
    fn orphans_and_cycles_are_detached() {
        let rows = vec![
            row(1, None),
            row(2, Some(9)),
            row(5, Some(6)),
            row(6, Some(5)),
        ];
        let result = assemble(rows, 1);
        assert_eq!(result, Err(TreeError::Detached(vec![2, 5, 6])));
    }

    #[test]
    fn root_pointing_at_descendant_does_not_loop() {
        let tree = assemble(vec![row(1, Some(2)), row(2, Some(1))], 1)
            .expect("tree should assemble");
        assert_eq!(tree.children, vec![leaf(2)]);
    }

    #[test]
    fn flatten_emits_parents_before_children_in_preorder() {
        let tree = Node {
            id: 1,
            children: vec![
                Node {
                    id: 2,
                    children: vec![leaf(4)],
                },
                leaf(3),
            ],
        };

        let records = flatten_depth_first(tree, |node, parent: Option<&(u32, Option<u32>, usize)>, pos| {
            ((node.id, parent.map(|p| p.0), pos), node.children)
        });

        assert_eq!(
            records,
            vec![(1, None, 0), (2, Some(1), 0), (4, Some(2), 0), (3, Some(1), 1)]
        );
    }

    #[test]
    fn flatten_then_build_restores_the_tree() {
        let tree = Node {
            id: 10,
            children: vec![leaf(11), Node {
                id: 12,
                children: vec![leaf(13), leaf(14)],
            }],
        };
        let rows = flatten_depth_first(tree, |node, parent: Option<&Row>, _| {
            (row(node.id, parent.map(|p| p.id)), node.children)
        });

        let rebuilt = assemble(rows, 10).expect("tree should assemble");

        assert_eq!(rebuilt.children.len(), 2);
        assert_eq!(
            rebuilt.children.get(1).map(|n| n.children.len()),
            Some(2)
        );
    }
}
