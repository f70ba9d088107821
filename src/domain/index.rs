//! Ordered course index: an unbalanced binary search tree on an arena.
//!
//! Nodes live in a generational arena owned by the index; child links are
//! arena handles, so every node has exactly one owner and there are no
//! back-references. All walks use explicit stacks, which keeps deep
//! (skewed) trees from exhausting the call stack.

use std::cmp::Ordering;
use std::collections::HashMap;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{instrument, trace};

use crate::domain::entities::{canonicalize, Course};

/// Tree node holding one course.
#[derive(Debug)]
struct TreeNode {
    course: Course,
    left: Option<Index>,
    right: Option<Index>,
}

impl TreeNode {
    fn leaf(course: Course) -> Self {
        Self {
            course,
            left: None,
            right: None,
        }
    }
}

/// Binary search tree of courses keyed by canonical course number.
///
/// Invariant: every id in a node's left subtree sorts before the node's id,
/// every id in its right subtree after it. No balancing is done, so depth is
/// O(n) in the worst case (e.g. ids inserted in ascending order).
#[derive(Debug)]
pub struct CourseIndex {
    arena: Arena<TreeNode>,
    root: Option<Index>,
}

impl Default for CourseIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseIndex {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert a course, or replace the course stored under the same id.
    ///
    /// Replacement swaps the whole course (name and prerequisites); the node
    /// count does not change.
    #[instrument(level = "trace", skip(self, course), fields(id = %course.id()))]
    pub fn insert(&mut self, course: Course) {
        let Some(mut current) = self.root else {
            self.root = Some(self.arena.insert(TreeNode::leaf(course)));
            return;
        };

        loop {
            let node = &mut self.arena[current];
            match course.id().cmp(node.course.id()) {
                Ordering::Equal => {
                    trace!("replacing existing course");
                    node.course = course;
                    return;
                }
                Ordering::Less => match node.left {
                    Some(left) => current = left,
                    None => {
                        let idx = self.arena.insert(TreeNode::leaf(course));
                        self.arena[current].left = Some(idx);
                        return;
                    }
                },
                Ordering::Greater => match node.right {
                    Some(right) => current = right,
                    None => {
                        let idx = self.arena.insert(TreeNode::leaf(course));
                        self.arena[current].right = Some(idx);
                        return;
                    }
                },
            }
        }
    }

    /// Find a course by number, ignoring case.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, id: &str) -> Option<&Course> {
        let key = canonicalize(id);
        let mut current = self.root;

        while let Some(idx) = current {
            let node = self.arena.get(idx)?;
            current = match key.as_str().cmp(node.course.id()) {
                Ordering::Equal => return Some(&node.course),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// In-order iterator over all courses, ascending by id.
    ///
    /// Each call starts a fresh walk.
    pub fn iter(&self) -> InOrderIter<'_> {
        InOrderIter::new(self)
    }

    /// Number of courses, counted by walking the whole tree.
    #[instrument(level = "trace", skip(self))]
    pub fn len(&self) -> usize {
        PostOrderIter::new(self).count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree; 0 when empty.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.arena.get(idx) {
                for child in [node.left, node.right].into_iter().flatten() {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Render the tree shape for display.
    ///
    /// Children are tagged `L:`/`R:` so a lone child's side stays visible.
    #[instrument(level = "debug", skip(self))]
    pub fn to_tree_string(&self) -> Tree<String> {
        let Some(root) = self.root else {
            return Tree::new("(empty)".to_string());
        };

        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        let mut stack = vec![(root, "", false)];

        while let Some((idx, tag, visited)) = stack.pop() {
            let Some(node) = self.arena.get(idx) else {
                continue;
            };
            if !visited {
                stack.push((idx, tag, true));
                if let Some(right) = node.right {
                    stack.push((right, "R: ", false));
                }
                if let Some(left) = node.left {
                    stack.push((left, "L: ", false));
                }
            } else {
                let leaves: Vec<_> = [node.left, node.right]
                    .into_iter()
                    .flatten()
                    .filter_map(|child| built.remove(&child))
                    .collect();
                let label = format!("{}{}", tag, node.course.id());
                built.insert(idx, Tree::new(label).with_leaves(leaves));
            }
        }

        built
            .remove(&root)
            .unwrap_or_else(|| Tree::new("(empty)".to_string()))
    }

    /// Release every node exactly once, children before parents.
    fn teardown(&mut self) -> usize {
        let order: Vec<Index> = PostOrderIter::new(self).collect();
        self.root = None;
        let mut released = 0;
        for idx in order {
            if self.arena.remove(idx).is_some() {
                released += 1;
            }
        }
        released
    }
}

impl Drop for CourseIndex {
    fn drop(&mut self) {
        let released = self.teardown();
        trace!(released, "course index released");
    }
}

impl<'a> IntoIterator for &'a CourseIndex {
    type Item = &'a Course;
    type IntoIter = InOrderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending in-order walk over a [`CourseIndex`].
pub struct InOrderIter<'a> {
    index: &'a CourseIndex,
    stack: Vec<Index>,
}

impl<'a> InOrderIter<'a> {
    fn new(index: &'a CourseIndex) -> Self {
        let mut iter = Self {
            index,
            stack: Vec::new(),
        };
        iter.push_left_spine(index.root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<Index>) {
        while let Some(idx) = current {
            self.stack.push(idx);
            current = self.index.arena.get(idx).and_then(|n| n.left);
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(idx) = self.stack.pop() {
            if let Some(node) = self.index.arena.get(idx) {
                self.push_left_spine(node.right);
                return Some(&node.course);
            }
        }
        None
    }
}

/// Post-order walk yielding arena handles; drives counting and teardown.
struct PostOrderIter<'a> {
    index: &'a CourseIndex,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIter<'a> {
    fn new(index: &'a CourseIndex) -> Self {
        Self {
            index,
            stack: index.root.map(|r| (r, false)).into_iter().collect(),
        }
    }
}

impl Iterator for PostOrderIter<'_> {
    type Item = Index;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((idx, visited)) = self.stack.pop() {
            if visited {
                return Some(idx);
            }
            if let Some(node) = self.index.arena.get(idx) {
                self.stack.push((idx, true));
                if let Some(right) = node.right {
                    self.stack.push((right, false));
                }
                if let Some(left) = node.left {
                    self.stack.push((left, false));
                }
            }
        }
        None
    }
}
