use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::tree::{self, BreadthFirst, DepthFirst, PostOrder, TreeNode, TreeNodeRef};

/// Node stored in a [`TreeArena`].
#[derive(Debug)]
pub struct ArenaEntry<T> {
    /// Payload of this node
    pub data: T,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, left to right
    pub children: Vec<Index>,
}

/// Arena-based tree structure.
///
/// Uses generational arena for memory-safe node references and O(1) lookups.
/// Nodes are never removed, so every stored index stays valid.
#[derive(Debug)]
pub struct TreeArena<T> {
    /// Arena storage for all tree nodes
    arena: Arena<ArenaEntry<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl<T> Default for TreeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeArena<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert `data` below `parent`, or as the new root when `parent` is None.
    ///
    /// Returns None when `parent` does not belong to this arena.
    #[instrument(level = "trace", skip(self, data))]
    pub fn insert_node(&mut self, data: T, parent: Option<Index>) -> Option<Index> {
        if parent.is_some_and(|parent_idx| !self.arena.contains(parent_idx)) {
            return None;
        }
        Some(self.attach(data, parent))
    }

    /// Insert below a `parent` previously returned by this arena.
    pub(crate) fn attach(&mut self, data: T, parent: Option<Index>) -> Index {
        let node_idx = self.arena.insert(ArenaEntry {
            data,
            parent,
            children: Vec::new(),
        });

        match parent.and_then(|parent_idx| self.arena.get_mut(parent_idx)) {
            Some(parent) => parent.children.push(node_idx),
            None => self.root = Some(node_idx),
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaEntry<T>> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Handle to the root, usable with the generic traversals.
    pub fn root_node(&self) -> Option<ArenaNode<'_, T>> {
        self.root.and_then(|idx| self.node(idx))
    }

    pub fn node(&self, idx: Index) -> Option<ArenaNode<'_, T>> {
        self.arena
            .contains(idx)
            .then_some(ArenaNode { arena: self, idx })
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn iter_depth_first(&self) -> DepthFirst<ArenaNode<'_, T>> {
        self.root_node()
            .map(DepthFirst::new)
            .unwrap_or_else(DepthFirst::empty)
    }

    pub fn iter_breadth_first(&self) -> BreadthFirst<ArenaNode<'_, T>> {
        self.root_node()
            .map(BreadthFirst::new)
            .unwrap_or_else(BreadthFirst::empty)
    }

    pub fn iter_post_order(&self) -> PostOrder<ArenaNode<'_, T>> {
        self.root_node()
            .map(PostOrder::new)
            .unwrap_or_else(PostOrder::empty)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.root_node().map(tree::max_depth).unwrap_or(0)
    }

    /// Collects all leaf nodes (nodes with no children) in the tree.
    ///
    /// Empty trees return an empty vector.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<&T> {
        self.root_node().map(tree::leaves).unwrap_or_default()
    }

    pub fn to_display_tree(&self) -> Tree<String>
    where
        T: fmt::Display,
    {
        match self.root_node() {
            Some(root) => tree::to_display_tree(root),
            None => Tree::new("Empty tree".to_string()),
        }
    }

    /// Copy the arena into an owned [`TreeNode`] hierarchy.
    pub fn to_tree_node(&self) -> Option<TreeNode<T>>
    where
        T: Clone,
    {
        self.root_node().map(|root| {
            tree::fold_tree(root, |node, children| TreeNode::new(node.data().clone(), children))
        })
    }
}

/// Borrowed handle to one node of a [`TreeArena`].
#[derive(Debug)]
pub struct ArenaNode<'a, T> {
    arena: &'a TreeArena<T>,
    idx: Index,
}

impl<T> Clone for ArenaNode<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaNode<'_, T> {}

impl<'a, T> ArenaNode<'a, T> {
    pub fn index(self) -> Index {
        self.idx
    }

    fn entry(self) -> &'a ArenaEntry<T> {
        // Indices handed out by the arena are never invalidated.
        &self.arena.arena[self.idx]
    }

    pub fn parent(self) -> Option<ArenaNode<'a, T>> {
        self.entry().parent.and_then(|idx| self.arena.node(idx))
    }

    pub fn child_nodes(self) -> ArenaChildren<'a, T> {
        ArenaChildren {
            arena: self.arena,
            indices: self.entry().children.iter(),
        }
    }
}

impl<'a, T> TreeNodeRef for ArenaNode<'a, T> {
    type Data = &'a T;
    type Children = ArenaChildren<'a, T>;

    fn data(self) -> &'a T {
        &self.entry().data
    }

    fn children(self) -> Option<Self::Children> {
        Some(self.child_nodes())
    }
}

/// Iterator over the children of an [`ArenaNode`], left to right.
#[derive(Debug)]
pub struct ArenaChildren<'a, T> {
    arena: &'a TreeArena<T>,
    indices: std::slice::Iter<'a, Index>,
}

impl<'a, T> Iterator for ArenaChildren<'a, T> {
    type Item = ArenaNode<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.indices.next().map(|&idx| ArenaNode { arena, idx })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<T> DoubleEndedIterator for ArenaChildren<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.indices.next_back().map(|&idx| ArenaNode { arena, idx })
    }
}
