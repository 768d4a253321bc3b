//! Path context for I/O failures of the services

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

pub trait IoResultExt<T> {
    /// Turn an I/O error into `OperationFailed` naming `action` and `path`.
    ///
    /// ```ignore
    /// let content = self.fs.read_to_string(path)
    ///     .with_path_context("read tree definition", path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|source| ApplicationError::OperationFailed {
            context: format!("{action} {}", path.display()),
            source: Box::new(source),
        })
    }
}
