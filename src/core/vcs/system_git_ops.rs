//! Additional operations for SystemGit (sync primitives, log walking, commit/push)

use super::CommitInfo;
use super::system_git::SystemGit;
use crate::core::error::{GitError, ReleaseError, ReleaseResult, ResultExt};
use std::path::Path;

// ASCII unit/record separators keep multi-line commit messages parseable
const FIELD_SEP: char = '\u{1f}';
const RECORD_SEP: char = '\u{1e}';

impl SystemGit {
  /// Fetch all refs from origin
  pub fn fetch(&self) -> ReleaseResult<()> {
    self.run("git fetch", &["fetch", "origin"])
  }

  /// Checkout a branch
  ///
  /// Relies on git's branch guessing to create a local tracking branch from
  /// origin when no local branch exists yet.
  pub fn checkout(&self, branch: &str) -> ReleaseResult<()> {
    self.run("git checkout", &["checkout", branch])
  }

  /// Create and checkout a new branch at the current HEAD
  pub fn checkout_new_branch(&self, branch: &str) -> ReleaseResult<()> {
    self.run("git checkout -b", &["checkout", "-b", branch])
  }

  /// Pull a specific remote/branch pair
  pub fn pull(&self, remote: &str, branch: &str) -> ReleaseResult<()> {
    self.run("git pull", &["pull", remote, branch])
  }

  /// Discard any local modifications
  pub fn reset_hard(&self) -> ReleaseResult<()> {
    self.run("git reset --hard", &["reset", "--hard"])
  }

  /// Stage a single file
  pub fn add(&self, path: &Path) -> ReleaseResult<()> {
    let path_str = path.to_string_lossy();
    self.run("git add", &["add", &path_str])
  }

  /// Commit staged changes with a message
  pub fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.run("git commit", &["commit", "-m", message])
  }

  /// Push a branch to a remote with upstream tracking
  pub fn push(&self, remote: &str, branch: &str) -> ReleaseResult<()> {
    let output = self
      .git_cmd()
      .args(["push", "-u", remote, branch])
      .output()
      .context("Failed to push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::PushFailed {
        remote: remote.to_string(),
        branch: branch.to_string(),
        reason: stderr.to_string(),
      }));
    }

    Ok(())
  }

  /// Walk merge commits reachable from HEAD (newest first)
  pub fn log_merges(&self) -> ReleaseResult<Vec<CommitInfo>> {
    self.log_merges_args(&[])
  }

  /// Walk merge commits in `from..to`, oldest first
  ///
  /// Standard revision-range semantics: excludes `from`, includes `to`.
  pub fn log_merges_between(&self, from: &str, to: &str) -> ReleaseResult<Vec<CommitInfo>> {
    let range = format!("{}..{}", from, to);
    self.log_merges_args(&["--reverse", &range])
  }

  fn log_merges_args(&self, extra: &[&str]) -> ReleaseResult<Vec<CommitInfo>> {
    let format = format!("--format=%H{}%P{}%B{}", FIELD_SEP, FIELD_SEP, RECORD_SEP);

    let mut cmd = self.git_cmd();
    cmd.args(["log", "--merges", &format]);
    cmd.args(extra);

    let output = cmd.output().context("Failed to run git log")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: "git log --merges".to_string(),
        stderr: stderr.to_string(),
      }));
    }

    parse_log_records(&output.stdout)
  }

  fn run(&self, name: &str, args: &[&str]) -> ReleaseResult<()> {
    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", name))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Git(GitError::CommandFailed {
        command: name.to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }
}

/// Parse `git log` output delimited by unit/record separators
///
/// Each record is `<sha>\x1f<parents>\x1f<body>`; records end with `\x1e`.
fn parse_log_records(data: &[u8]) -> ReleaseResult<Vec<CommitInfo>> {
  let output = String::from_utf8_lossy(data);
  let mut commits = Vec::new();

  for record in output.split(RECORD_SEP) {
    let record = record.trim_matches(|c| c == '\n' || c == '\r');
    if record.is_empty() {
      continue;
    }

    let mut fields = record.splitn(3, FIELD_SEP);
    let sha = fields
      .next()
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
      .ok_or_else(|| ReleaseError::message("Malformed git log record: missing SHA"))?;
    let parents_field = fields
      .next()
      .ok_or_else(|| ReleaseError::message("Malformed git log record: missing parents"))?;
    let message = fields.next().unwrap_or("").trim().to_string();

    let parent_shas = parents_field.split_whitespace().map(|s| s.to_string()).collect();

    commits.push(CommitInfo {
      sha,
      parent_shas,
      message,
    });
  }

  Ok(commits)
}
