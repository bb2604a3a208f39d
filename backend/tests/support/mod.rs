//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so helpers live here and are
//! pulled in with `mod support;`.

pub mod cluster_skip;
pub mod pg_embed;

pub use cluster_skip::handle_cluster_setup_failure;
pub use pg_embed::provision_database;
