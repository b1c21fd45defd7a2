//! Full subactivity hierarchy of an activity.
//!
//! Fetching by urn returns only the immediate children. The outline follows
//! subactivity references level by level until every leaf is reached and
//! rejects reference cycles instead of expanding them forever.
//!
//! Each distinct activity is fetched once. An activity referenced from
//! several places shares one expanded subtree, copied into every placement,
//! and the total number of placements is capped at
//! [`MAX_OUTLINE_PLACEMENTS`].

use std::collections::{BTreeSet, HashMap, HashSet};

use super::{ActivityDomainError, ActivityUrn, ChildId, Subactivity, SubactivityEdge};
use serde::{Deserialize, Serialize};

/// Largest number of placements, root included, a single outline may hold.
pub const MAX_OUTLINE_PLACEMENTS: usize = 10_000;

/// One activity placement in an outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityOutline {
    /// Referenced activity.
    pub urn: ActivityUrn,
    /// Placement identifier within the parent; `None` for the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_id: Option<ChildId>,
    /// Activity name, when the referenced activity exists.
    #[serde(default)]
    pub name: Option<String>,
    /// Child placements, in declaration order.
    #[serde(default)]
    pub children: Vec<ActivityOutline>,
}

/// Level-by-level expansion of subactivity references.
///
/// Callers fetch the edges for [`OutlineBuilder::frontier`], feed them to
/// [`OutlineBuilder::expand`], and repeat until
/// [`OutlineBuilder::is_complete`] holds.
#[derive(Debug, Clone)]
pub struct OutlineBuilder {
    root: ActivityUrn,
    children: HashMap<ActivityUrn, Vec<Subactivity>>,
    frontier: BTreeSet<ActivityUrn>,
}

impl OutlineBuilder {
    /// Starts an outline at the given activity.
    #[must_use]
    pub fn new(root: ActivityUrn) -> Self {
        Self {
            frontier: BTreeSet::from([root.clone()]),
            root,
            children: HashMap::new(),
        }
    }

    /// Returns `true` once every reachable activity has been expanded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.frontier.is_empty()
    }

    /// Returns the distinct urns whose children are needed next.
    #[must_use]
    pub fn frontier(&self) -> Vec<ActivityUrn> {
        self.frontier.iter().cloned().collect()
    }

    /// Returns every distinct urn placed so far.
    #[must_use]
    pub fn urns(&self) -> Vec<ActivityUrn> {
        let mut urns: BTreeSet<ActivityUrn> = self.children.keys().cloned().collect();
        urns.extend(self.frontier.iter().cloned());
        urns.extend(
            self.children
                .values()
                .flatten()
                .map(|child| child.urn.clone()),
        );
        urns.into_iter().collect()
    }

    /// Records the children of the current frontier.
    ///
    /// Edges whose parent is not on the frontier are ignored. A frontier urn
    /// without edges is a leaf.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityDomainError::Cycle`] when a child reaches back to
    /// one of its ancestors.
    pub fn expand(&mut self, edges: &[SubactivityEdge]) -> Result<(), ActivityDomainError> {
        let expanded = std::mem::take(&mut self.frontier);
        for urn in &expanded {
            self.children.entry(urn.clone()).or_default();
        }
        for edge in edges.iter().filter(|edge| expanded.contains(&edge.parent)) {
            if let Some(children) = self.children.get_mut(&edge.parent) {
                children.push(edge.child.clone());
            }
        }

        let next: BTreeSet<ActivityUrn> = expanded
            .iter()
            .filter_map(|urn| self.children.get(urn))
            .flatten()
            .map(|child| &child.urn)
            .filter(|urn| !self.children.contains_key(*urn))
            .cloned()
            .collect();
        self.frontier = next;
        self.postorder().map(|_| ())
    }

    /// Nests the expanded references into an outline, attaching known names.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityDomainError::MalformedOutline`] when expansion has
    /// not finished, [`ActivityDomainError::Cycle`] when the references
    /// loop, and [`ActivityDomainError::OutlineTooLarge`] when the outline
    /// would exceed [`MAX_OUTLINE_PLACEMENTS`].
    pub fn finish(
        self,
        names: &HashMap<ActivityUrn, String>,
    ) -> Result<ActivityOutline, ActivityDomainError> {
        if !self.is_complete() {
            return Err(ActivityDomainError::MalformedOutline(
                "subactivity expansion is incomplete".to_owned(),
            ));
        }
        let order = self.postorder()?;

        let mut sizes: HashMap<&ActivityUrn, usize> = HashMap::new();
        for &urn in &order {
            let size = self.edges(urn).iter().fold(1_usize, |total, child| {
                total.saturating_add(sizes.get(&child.urn).copied().unwrap_or(1))
            });
            sizes.insert(urn, size);
        }
        if sizes.get(&self.root).copied().unwrap_or(1) > MAX_OUTLINE_PLACEMENTS {
            return Err(ActivityDomainError::OutlineTooLarge {
                root: self.root.clone(),
                limit: MAX_OUTLINE_PLACEMENTS,
            });
        }

        let mut references: HashMap<&ActivityUrn, usize> = HashMap::new();
        for child in order.iter().flat_map(|urn| self.edges(urn)) {
            *references.entry(&child.urn).or_default() += 1;
        }

        // The last placement of a subtree takes it, earlier ones copy it.
        let mut subtrees: HashMap<&ActivityUrn, Vec<ActivityOutline>> = HashMap::new();
        for &urn in &order {
            let placed = self
                .edges(urn)
                .iter()
                .map(|child| {
                    let remaining = references.get_mut(&child.urn).map_or(0, |count| {
                        *count = count.saturating_sub(1);
                        *count
                    });
                    let children = if remaining == 0 {
                        subtrees.remove(&child.urn)
                    } else {
                        subtrees.get(&child.urn).cloned()
                    };
                    ActivityOutline {
                        urn: child.urn.clone(),
                        child_id: Some(child.id.clone()),
                        name: names.get(&child.urn).cloned(),
                        children: children.unwrap_or_default(),
                    }
                })
                .collect();
            subtrees.insert(urn, placed);
        }

        Ok(ActivityOutline {
            name: names.get(&self.root).cloned(),
            children: subtrees.remove(&self.root).unwrap_or_default(),
            urn: self.root.clone(),
            child_id: None,
        })
    }

    fn edges(&self, urn: &ActivityUrn) -> &[Subactivity] {
        self.children.get(urn).map(Vec::as_slice).unwrap_or_default()
    }

    /// Depth-first walk from the root, children before parents.
    fn postorder(&self) -> Result<Vec<&ActivityUrn>, ActivityDomainError> {
        let mut order = Vec::new();
        let mut done: HashSet<&ActivityUrn> = HashSet::new();
        let mut path: Vec<&ActivityUrn> = vec![&self.root];
        let mut cursors: Vec<usize> = vec![0];

        while let (Some(&urn), Some(cursor)) = (path.last(), cursors.last_mut()) {
            let next = self.edges(urn).get(*cursor);
            *cursor = cursor.saturating_add(1);
            match next {
                Some(child) if path.contains(&&child.urn) => {
                    let mut cycle: Vec<ActivityUrn> = path.iter().map(|&u| u.clone()).collect();
                    cycle.push(child.urn.clone());
                    return Err(ActivityDomainError::Cycle(cycle));
                }
                Some(child) if !done.contains(&child.urn) => {
                    path.push(&child.urn);
                    cursors.push(0);
                }
                Some(_) => {}
                None => {
                    done.insert(urn);
                    order.push(urn);
                    path.pop();
                    cursors.pop();
                }
            }
        }
        Ok(order)
    }
}
