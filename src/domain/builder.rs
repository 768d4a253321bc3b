//! Tree builder for textual tree definitions.
//!
//! A definition lists one parent per line followed by its children:
//!
//! ```text
//! # comment
//! root: left right
//! left: leaf1 leaf2
//! lonely:
//! ```

use std::collections::{HashMap, HashSet};

use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};

const LINE_PATTERN: &str = r"^([^\s:]+)\s*:\s*(.*)$";

/// Constructs arena trees from a tree definition.
pub struct TreeBuilder {
    relationship_cache: HashMap<String, Vec<String>>,
    /// Every name in order of first appearance
    all_nodes: Vec<String>,
    children: HashSet<String>,
    visited: HashSet<String>,
    line_regex: Regex,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            relationship_cache: HashMap::new(),
            all_nodes: Vec::new(),
            children: HashSet::new(),
            visited: HashSet::new(),
            line_regex: Regex::new(LINE_PATTERN).expect("static tree line pattern"),
        }
    }

    /// Build one tree per root found in `content`.
    ///
    /// Roots are names never listed as a child, in order of first appearance.
    ///
    /// # Errors
    /// - `InvalidTreeSpec` for a line that is not `parent: child ...`
    /// - `CycleDetected` when a node is reached twice within one tree, or when
    ///   a node is reachable from no root (the definition has no root at all,
    ///   or a cycle stands apart from every rooted tree)
    #[instrument(level = "debug", skip(self, content))]
    pub fn build_from_str(&mut self, content: &str) -> DomainResult<Vec<TreeArena<String>>> {
        // Reset state for fresh parse
        self.relationship_cache.clear();
        self.all_nodes.clear();
        self.children.clear();

        for (number, line) in content.lines().enumerate() {
            self.process_line(number + 1, line)?;
        }

        let root_nodes = self.find_root_nodes();
        debug!(roots = root_nodes.len(), nodes = self.all_nodes.len(), "parsed tree definition");

        let mut trees = Vec::with_capacity(root_nodes.len());
        let mut reached = HashSet::with_capacity(self.all_nodes.len());
        for root in root_nodes {
            self.visited.clear(); // Reset for each tree
            trees.push(self.build_tree(&root)?);
            reached.extend(self.visited.drain());
        }

        // Whatever no root reaches can only sit on a cycle
        if let Some(lost) = self.all_nodes.iter().find(|name| !reached.contains(*name)) {
            return Err(DomainError::CycleDetected(lost.clone()));
        }

        Ok(trees)
    }

    fn process_line(&mut self, number: usize, line: &str) -> DomainResult<()> {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return Ok(());
        }

        let caps = self
            .line_regex
            .captures(line)
            .ok_or_else(|| DomainError::InvalidTreeSpec {
                line: number,
                reason: format!("expected `parent: child ...`, got `{line}`"),
            })?;
        let parent = caps[1].to_string();
        let children: Vec<String> = caps[2].split_whitespace().map(str::to_string).collect();

        if let Some(bad) = children.iter().find(|child| child.contains(':')) {
            return Err(DomainError::InvalidTreeSpec {
                line: number,
                reason: format!("child name must not contain ':': `{bad}`"),
            });
        }

        self.remember(&parent);
        for child in &children {
            self.remember(child);
            self.children.insert(child.clone());
        }
        self.relationship_cache
            .entry(parent)
            .or_default()
            .extend(children);
        Ok(())
    }

    fn remember(&mut self, name: &str) {
        if !self.all_nodes.iter().any(|known| known == name) {
            self.all_nodes.push(name.to_string());
        }
    }

    fn find_root_nodes(&self) -> Vec<String> {
        self.all_nodes
            .iter()
            .filter(|name| !self.children.contains(*name))
            .cloned()
            .collect()
    }

    fn build_tree(&mut self, root: &str) -> DomainResult<TreeArena<String>> {
        let mut tree = TreeArena::new();
        let mut stack = vec![(root.to_string(), None)];

        while let Some((current, parent_idx)) = stack.pop() {
            if !self.visited.insert(current.clone()) {
                return Err(DomainError::CycleDetected(current));
            }

            let current_idx = tree.attach(current.clone(), parent_idx);

            // Reverse so that children are inserted left to right
            if let Some(children) = self.relationship_cache.get(&current) {
                for child in children.iter().rev() {
                    stack.push((child.clone(), Some(current_idx)));
                }
            }
        }

        Ok(tree)
    }
}
