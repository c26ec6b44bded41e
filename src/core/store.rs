//! Local working-copy store
//!
//! Working copies live under a fixed root directory, one per repository id,
//! cloned on first use and re-synced (fetch, checkout, pull, hard reset) on
//! every run. The reset is destructive to uncommitted local changes; that is
//! what makes the starting state deterministic.
//!
//! No locking is attempted: one concurrent invocation per root is assumed.

use crate::core::config::GitConfig;
use crate::core::error::ReleaseResult;
use crate::core::vcs::SystemGit;
use std::path::PathBuf;

pub struct RepoStore {
  root: PathBuf,
  git: GitConfig,
}

impl RepoStore {
  pub fn new(root: impl Into<PathBuf>, git: GitConfig) -> Self {
    Self { root: root.into(), git }
  }

  /// Local working-copy path for a repository id
  pub fn path(&self, repo: &str) -> PathBuf {
    self.root.join(repo)
  }

  /// Remote URL for a repository id
  pub fn remote_url(&self, repo: &str) -> String {
    self.git.remote_url(repo)
  }

  /// Ensure a local working copy exists, cloning it when absent
  pub fn ensure_local(&self, repo: &str) -> ReleaseResult<SystemGit> {
    let path = self.path(repo);
    if path.exists() {
      SystemGit::open(&path)
    } else {
      let url = self.remote_url(repo);
      println!("   Cloning {} into {}...", url, path.display());
      SystemGit::clone(&url, &path)
    }
  }

  /// Bring a repository to a deterministic state on `branch`
  ///
  /// Clone if needed, fetch, checkout the branch (creating a tracking branch
  /// when absent locally), pull origin/<branch>, then hard-reset to drop any
  /// leftover local modifications.
  pub fn sync(&self, repo: &str, branch: &str) -> ReleaseResult<SystemGit> {
    let git = self.ensure_local(repo)?;
    git.fetch()?;
    git.checkout(branch)?;
    git.pull("origin", branch)?;
    git.reset_hard()?;
    Ok(git)
  }
}
