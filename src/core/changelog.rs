//! Changelog extraction from GUI repository history
//!
//! A tracked merge is a commit with more than one parent whose message matches
//! the merge pattern. The changelog between two version markers is the ordered
//! list of tracked merges in `used..latest` (standard revision-range semantics:
//! the used boundary is excluded, the latest boundary included), oldest first.
//!
//! Everything here is best-effort from the orchestrator's point of view: any
//! failure (missing boundary merge after a squash, rewritten history) is
//! reported to the caller, which degrades to a minimal commit message instead
//! of aborting the release.

use crate::core::error::{GitError, ReleaseError, ReleaseResult};
use crate::core::vcs::{CommitInfo, SystemGit};
use crate::core::version::Patterns;

pub struct ChangelogBuilder<'a> {
  patterns: &'a Patterns,
}

impl<'a> ChangelogBuilder<'a> {
  pub fn new(patterns: &'a Patterns) -> Self {
    Self { patterns }
  }

  fn is_tracked_merge(&self, commit: &CommitInfo) -> bool {
    commit.is_merge() && self.patterns.merge_version(&commit.message).is_some()
  }

  /// Find the first tracked merge carrying exactly `version`
  ///
  /// The marker is compared literally (not as a pattern), so issue keys with
  /// regex metacharacters cannot match unrelated history.
  pub fn find_merge(&self, git: &SystemGit, version: &str) -> ReleaseResult<CommitInfo> {
    git
      .log_merges()?
      .into_iter()
      .find(|c| c.is_merge() && self.patterns.merge_version(&c.message) == Some(version))
      .ok_or_else(|| {
        ReleaseError::Git(GitError::MergeNotFound {
          version: version.to_string(),
        })
      })
  }

  /// Tracked merges between two version markers, oldest first
  pub fn diff(&self, git: &SystemGit, used: &str, latest: &str) -> ReleaseResult<Vec<CommitInfo>> {
    let latest_merge = self.find_merge(git, latest)?;
    let used_merge = self.find_merge(git, used)?;

    let commits = git.log_merges_between(&used_merge.sha, &latest_merge.sha)?;
    Ok(commits.into_iter().filter(|c| self.is_tracked_merge(c)).collect())
  }

  /// Version markers for a sequence of tracked merges
  ///
  /// Errors on a non-matching message; the upstream filter makes that
  /// unexpected, and silently skipping would hide a broken changelog.
  pub fn issues(&self, commits: &[CommitInfo]) -> ReleaseResult<Vec<String>> {
    commits
      .iter()
      .map(|c| {
        self
          .patterns
          .merge_version(&c.message)
          .map(|v| v.to_string())
          .ok_or_else(|| {
            ReleaseError::message(format!("Commit {} does not match the merge pattern", c.sha))
          })
      })
      .collect()
  }
}
