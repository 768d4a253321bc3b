//! Wiring of settings and I/O boundaries into services

use std::sync::Arc;

use crate::application::services::{CommandService, TextService, TreeService};
use crate::config::Settings;
use crate::domain::RetryInvoker;
use crate::infrastructure::traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};

/// Owns the effective settings and the shared boundaries; hands out services on demand.
pub struct ServiceContainer {
    pub settings: Arc<Settings>,
    pub fs: Arc<dyn FileSystem>,
    pub cmd: Arc<dyn CommandRunner>,
}

impl ServiceContainer {
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(RealCommandRunner))
    }

    /// Container over caller-supplied boundaries, e.g. scripted runners in tests.
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            cmd,
        }
    }

    pub fn tree_service(&self) -> TreeService {
        TreeService::new(Arc::clone(&self.fs))
    }

    /// Text service splitting on the configured delimiters.
    pub fn text_service(&self) -> TextService {
        TextService::new(Arc::clone(&self.fs), self.settings.tokenizer())
    }

    /// Command service with an explicit budget; see [`Settings::retry_invoker`]
    /// for the configured one.
    pub fn command_service(&self, invoker: RetryInvoker) -> CommandService {
        CommandService::new(Arc::clone(&self.cmd), invoker)
    }
}
