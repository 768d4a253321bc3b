//! Tree definition service
//!
//! Loads tree definition files and traverses or renders the trees they describe.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{TraversalOrder, TreeArena, TreeBuilder};
use crate::infrastructure::traits::FileSystem;

/// Service for working with tree definition files.
pub struct TreeService {
    fs: Arc<dyn FileSystem>,
}

impl TreeService {
    /// Create a new tree service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Parse the tree definition at `path`, one tree per root.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<TreeArena<String>>> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::NotFound(path.to_path_buf()));
        }

        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read tree definition", path)?;
        let trees = TreeBuilder::new().build_from_str(&content)?;
        debug!("load: found {} trees", trees.len());
        Ok(trees)
    }

    /// Node names of every tree in `path`, visited in `order`.
    pub fn traverse(&self, path: &Path, order: TraversalOrder) -> ApplicationResult<Vec<Vec<String>>> {
        let trees = self.load(path)?;
        Ok(trees
            .iter()
            .filter_map(|tree| tree.root_node())
            .map(|root| order.visit(root).into_iter().cloned().collect())
            .collect())
    }

    /// Terminal rendering of every tree in `path`.
    pub fn render(&self, path: &Path) -> ApplicationResult<Vec<String>> {
        let trees = self.load(path)?;
        Ok(trees
            .iter()
            .map(|tree| tree.to_display_tree().to_string())
            .collect())
    }
}
