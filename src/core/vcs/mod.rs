pub mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;

/// Information about a commit
#[derive(Debug, Clone)]
pub struct CommitInfo {
  pub sha: String,
  pub parent_shas: Vec<String>,
  pub message: String,
}

impl CommitInfo {
  /// True when the commit has more than one parent
  pub fn is_merge(&self) -> bool {
    self.parent_shas.len() > 1
  }
}
