//! Environment variable overrides for Settings.
//!
//! Kept in its own test binary: these tests mutate process environment,
//! so they run serially inside a single test function.

use std::env;
use std::fs;

use tempfile::TempDir;

use seqtree::config::{local_config_path, Settings};
use seqtree::domain::TraversalOrder;
use seqtree::util::testing;

#[test]
fn given_env_vars_when_load_then_override_local_config() {
    testing::init_test_setup();
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "[retry]\nmax_attempts = 5\n\n[traversal]\norder = \"breadth\"\n",
    )
    .unwrap();

    // Env wins over the local file
    env::set_var("SEQTREE_RETRY__MAX_ATTEMPTS", "9");
    env::set_var("SEQTREE_TRAVERSAL__ORDER", "post");
    let settings = Settings::load(Some(dir.path()));
    env::remove_var("SEQTREE_RETRY__MAX_ATTEMPTS");
    env::remove_var("SEQTREE_TRAVERSAL__ORDER");

    let settings = settings.expect("load settings");
    assert_eq!(settings.retry.max_attempts, 9);
    assert_eq!(settings.traversal.order, TraversalOrder::Post);

    // Without env the local file applies again
    let settings = Settings::load(Some(dir.path())).expect("load settings");
    assert_eq!(settings.retry.max_attempts, 5);
    assert_eq!(settings.traversal.order, TraversalOrder::Breadth);

    // Invalid env values are reported, not ignored
    env::set_var("SEQTREE_RETRY__MAX_ATTEMPTS", "many");
    let result = Settings::load(Some(dir.path()));
    env::remove_var("SEQTREE_RETRY__MAX_ATTEMPTS");
    assert!(result.is_err());

    // Env validation applies after merging
    env::set_var("SEQTREE_RETRY__MAX_ATTEMPTS", "0");
    let result = Settings::load(Some(dir.path()));
    env::remove_var("SEQTREE_RETRY__MAX_ATTEMPTS");
    assert!(result.is_err());
}
