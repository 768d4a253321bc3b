//! Tokenization service

use std::io::{self, BufRead};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::Tokenizer;
use crate::infrastructure::traits::FileSystem;

/// Splits text sources into words with the configured delimiters.
pub struct TextService {
    fs: Arc<dyn FileSystem>,
    tokenizer: Tokenizer,
}

impl TextService {
    pub fn new(fs: Arc<dyn FileSystem>, tokenizer: Tokenizer) -> Self {
        Self { fs, tokenizer }
    }

    /// Words of the file at `path`, streamed line by line.
    #[instrument(level = "debug", skip(self))]
    pub fn tokenize_file(&self, path: &Path) -> ApplicationResult<Vec<String>> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::NotFound(path.to_path_buf()));
        }
        let reader = self
            .fs
            .open_buffered(path)
            .with_path_context("open text", path)?;
        let tokens = self.tokenize_reader(reader)?;
        debug!("tokenize_file: {} tokens", tokens.len());
        Ok(tokens)
    }

    pub fn tokenize_reader<R: BufRead>(&self, reader: R) -> ApplicationResult<Vec<String>> {
        self.tokenizer
            .tokens(Some(reader))?
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| ApplicationError::OperationFailed {
                context: "read tokens".to_string(),
                source: Box::new(e),
            })
    }
}
