//! Boundaries to the outside world
//!
//! Services only see these traits; tests swap in scripted implementations.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::process::{Command, Output};

/// Read access to tree definitions and text sources.
pub trait FileSystem: Send + Sync {
    /// Whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Buffered reader for line-by-line consumption.
    fn open_buffered(&self, path: &Path) -> io::Result<Box<dyn BufRead>>;

    fn is_file(&self, path: &Path) -> bool;
}

/// Spawns one attempt of an external command and waits for it.
pub trait CommandRunner: Send + Sync {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Output>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn open_buffered(&self, path: &Path) -> io::Result<Box<dyn BufRead>> {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// [`CommandRunner`] capturing stdout and stderr of a child process.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> io::Result<Output> {
        Command::new(program).args(args).output()
    }
}
