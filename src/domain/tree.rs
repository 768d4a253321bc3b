//! Generic tree model and traversal iterators.
//!
//! All traversals run on an explicit stack or queue, so deep trees do not
//! exhaust the call stack. Each call creates a fresh, independent iterator.

use std::collections::VecDeque;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use termtree::Tree;

use crate::domain::error::{DomainError, DomainResult};

/// Visiting order of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Pre-order
    #[default]
    Depth,
    /// Level order
    Breadth,
    /// Post-order
    Post,
}

impl TraversalOrder {
    /// Collect the data below `root` in this order.
    pub fn visit<N: TreeNodeRef>(self, root: N) -> Vec<N::Data> {
        match self {
            TraversalOrder::Depth => DepthFirst::new(root).collect(),
            TraversalOrder::Breadth => BreadthFirst::new(root).collect(),
            TraversalOrder::Post => PostOrder::new(root).collect(),
        }
    }
}

impl Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Depth => "depth",
            TraversalOrder::Breadth => "breadth",
            TraversalOrder::Post => "post",
        };
        write!(f, "{name}")
    }
}

/// Copyable handle to a node of some tree.
///
/// `children` returns `None` when the node has no children collection at all.
/// Traversals treat that exactly like an empty collection.
pub trait TreeNodeRef: Copy {
    type Data;
    type Children: DoubleEndedIterator<Item = Self>;

    fn data(self) -> Self::Data;
    fn children(self) -> Option<Self::Children>;
}

/// Owned tree node: each node exclusively owns its subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    pub data: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn new(data: T, children: Vec<TreeNode<T>>) -> Self {
        Self { data, children }
    }

    pub fn leaf(data: T) -> Self {
        Self::new(data, Vec::new())
    }

    pub fn with_child(mut self, child: TreeNode<T>) -> Self {
        self.children.push(child);
        self
    }

    pub fn iter_depth_first(&self) -> DepthFirst<&TreeNode<T>> {
        DepthFirst::new(self)
    }

    pub fn iter_breadth_first(&self) -> BreadthFirst<&TreeNode<T>> {
        BreadthFirst::new(self)
    }

    pub fn iter_post_order(&self) -> PostOrder<&TreeNode<T>> {
        PostOrder::new(self)
    }

    /// Number of levels, a single node has depth 1.
    pub fn depth(&self) -> usize {
        max_depth(self)
    }

    /// Data of all childless nodes, in pre-order.
    pub fn leaf_nodes(&self) -> Vec<&T> {
        leaves(self)
    }

    pub fn to_display_tree(&self) -> Tree<String>
    where
        T: Display,
    {
        to_display_tree(self)
    }
}

impl<T> Drop for TreeNode<T> {
    fn drop(&mut self) {
        // Flatten descendants first, each node then drops without children
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

impl<'a, T> TreeNodeRef for &'a TreeNode<T> {
    type Data = &'a T;
    type Children = std::slice::Iter<'a, TreeNode<T>>;

    fn data(self) -> &'a T {
        &self.data
    }

    fn children(self) -> Option<Self::Children> {
        Some(self.children.iter())
    }
}

/// Pre-order traversal: a node before its children, children left to right.
#[derive(Debug, Clone)]
pub struct DepthFirst<N> {
    stack: Vec<N>,
}

impl<N> DepthFirst<N> {
    pub fn new(root: N) -> Self {
        Self { stack: vec![root] }
    }

    pub(crate) fn empty() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<N: TreeNodeRef> Iterator for DepthFirst<N> {
    type Item = N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        if let Some(children) = node.children() {
            self.stack.extend(children.rev());
        }
        Some(node.data())
    }
}

/// Level-order traversal: every node at depth d before any node at depth d+1.
#[derive(Debug, Clone)]
pub struct BreadthFirst<N> {
    queue: VecDeque<N>,
}

impl<N> BreadthFirst<N> {
    pub fn new(root: N) -> Self {
        Self {
            queue: VecDeque::from([root]),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<N: TreeNodeRef> Iterator for BreadthFirst<N> {
    type Item = N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if let Some(children) = node.children() {
            self.queue.extend(children);
        }
        Some(node.data())
    }
}

/// Post-order traversal: children left to right, then the node itself.
#[derive(Debug, Clone)]
pub struct PostOrder<N> {
    stack: Vec<(N, bool)>,
}

impl<N> PostOrder<N> {
    pub fn new(root: N) -> Self {
        Self {
            stack: vec![(root, false)],
        }
    }

    pub(crate) fn empty() -> Self {
        Self { stack: Vec::new() }
    }
}

impl<N: TreeNodeRef> Iterator for PostOrder<N> {
    type Item = N::Data;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, visited)) = self.stack.pop() {
            if visited {
                return Some(node.data());
            }
            self.stack.push((node, true));
            if let Some(children) = node.children() {
                self.stack.extend(children.rev().map(|child| (child, false)));
            }
        }
        None
    }
}

fn absent_root() -> DomainError {
    DomainError::invalid_argument("root node is absent")
}

/// Depth-first (pre-order) traversal of the tree below `root`.
///
/// # Errors
/// `InvalidArgument` when `root` is `None`.
pub fn depth_traversal<N: TreeNodeRef>(root: Option<N>) -> DomainResult<DepthFirst<N>> {
    root.map(DepthFirst::new).ok_or_else(absent_root)
}

/// Breadth-first (level-order) traversal of the tree below `root`.
///
/// # Errors
/// `InvalidArgument` when `root` is `None`.
pub fn breadth_traversal<N: TreeNodeRef>(root: Option<N>) -> DomainResult<BreadthFirst<N>> {
    root.map(BreadthFirst::new).ok_or_else(absent_root)
}

/// Post-order traversal of the tree below `root`.
///
/// # Errors
/// `InvalidArgument` when `root` is `None`.
pub fn post_order_traversal<N: TreeNodeRef>(root: Option<N>) -> DomainResult<PostOrder<N>> {
    root.map(PostOrder::new).ok_or_else(absent_root)
}

/// Calculates the depth of the tree using a breadth-first traversal.
/// Each element in the queue is a pair (node, depth).
pub fn max_depth<N: TreeNodeRef>(root: N) -> usize {
    let mut max_depth = 0;
    let mut queue = VecDeque::from([(root, 1)]);

    while let Some((node, depth)) = queue.pop_front() {
        max_depth = max_depth.max(depth);
        if let Some(children) = node.children() {
            queue.extend(children.map(|child| (child, depth + 1)));
        }
    }

    max_depth
}

/// Data of every childless node below `root`, in pre-order.
pub fn leaves<N: TreeNodeRef>(root: N) -> Vec<N::Data> {
    let mut leaves = Vec::new();
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        let children: Vec<N> = node.children().map(|c| c.collect()).unwrap_or_default();
        if children.is_empty() {
            leaves.push(node.data());
        } else {
            stack.extend(children.into_iter().rev());
        }
    }

    leaves
}

/// Node on the path from the root to the node currently being folded.
struct Frame<N: TreeNodeRef, R> {
    node: N,
    pending: Option<N::Children>,
    folded: Vec<R>,
}

impl<N: TreeNodeRef, R> Frame<N, R> {
    fn new(node: N) -> Self {
        Self {
            node,
            pending: node.children(),
            folded: Vec::new(),
        }
    }
}

/// Fold the tree below `root` bottom-up.
///
/// `combine` receives each node together with the already folded values of
/// its children, left to right. Runs on an explicit stack of open frames.
pub fn fold_tree<N, R>(root: N, mut combine: impl FnMut(N, Vec<R>) -> R) -> R
where
    N: TreeNodeRef,
{
    let mut open: Vec<Frame<N, R>> = Vec::new();
    let mut current = Frame::new(root);

    loop {
        if let Some(child) = current.pending.as_mut().and_then(Iterator::next) {
            open.push(std::mem::replace(&mut current, Frame::new(child)));
            continue;
        }

        let value = combine(current.node, current.folded);
        match open.pop() {
            Some(mut parent) => {
                parent.folded.push(value);
                current = parent;
            }
            None => return value,
        }
    }
}

/// Render the tree below `root` for terminal display.
pub fn to_display_tree<N>(root: N) -> Tree<String>
where
    N: TreeNodeRef,
    N::Data: Display,
{
    fold_tree(root, |node, leaves: Vec<Tree<String>>| {
        Tree::new(node.data().to_string()).with_leaves(leaves)
    })
}
