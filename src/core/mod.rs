//! Core engine for gui-release operations
//!
//! - **changelog**: merge-commit changelog between two version markers
//! - **config**: gui-release.toml parsing and built-in production defaults
//! - **error**: unified error types with contextual help messages
//! - **publish**: container image republishing through a docker-compatible CLI
//! - **release**: per-service release orchestration
//! - **store**: local working-copy store (clone on first use, re-sync per run)
//! - **version**: version-marker extraction and config rewriting
//! - **vcs**: git operations abstraction (SystemGit)

pub mod changelog;
pub mod config;
pub mod error;
pub mod publish;
pub mod release;
pub mod store;
pub mod version;
pub mod vcs;
