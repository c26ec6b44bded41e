//! Version marker extraction from merge messages and gui-config.sh
//!
//! Two patterns, both derived from the configured issue-key regex:
//!
//! - merge messages: `Merge pull request ... from <namespace>/<issue>`
//! - config files:   `PRIMARY_IMAGE=...<issue>'` (trailing key on the line)
//!
//! Matching is case-sensitive and first-match-in-text. History and config are
//! assumed to contain at most one relevant match; when they contain more, the
//! first one in iteration order wins.

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use regex::Regex;

/// Compiled version-marker patterns
#[derive(Debug, Clone)]
pub struct Patterns {
  merge: Regex,
  config: Regex,
}

impl Patterns {
  /// Compile patterns from an issue-key regex (e.g. `VFS-\d+`)
  pub fn new(issue_pattern: &str) -> ReleaseResult<Self> {
    let compile = |re: String| {
      Regex::new(&re).map_err(|e| {
        ReleaseError::Config(ConfigError::InvalidPattern {
          pattern: issue_pattern.to_string(),
          reason: e.to_string(),
        })
      })
    };

    Ok(Self {
      merge: compile(format!(r"Merge pull request.*from .*/({})", issue_pattern))?,
      config: compile(format!(r"(?m)^PRIMARY_IMAGE=.*({})", issue_pattern))?,
    })
  }

  /// Extract the version marker from a merge-commit message
  pub fn merge_version<'a>(&self, message: &'a str) -> Option<&'a str> {
    self.merge.captures(message).map(|c| c.get(1).unwrap().as_str())
  }

  /// Extract the currently-used version marker from gui-config.sh content
  pub fn config_version<'a>(&self, content: &'a str) -> Option<&'a str> {
    self.config.captures(content).map(|c| c.get(1).unwrap().as_str())
  }

  /// Rewrite the version token in gui-config.sh content
  ///
  /// Only the byte span of the token in the first matching PRIMARY_IMAGE line
  /// is replaced; every other byte is preserved. Returns None when no line
  /// matches.
  pub fn rewrite_config(&self, content: &str, version: &str) -> Option<String> {
    let caps = self.config.captures(content)?;
    let token = caps.get(1).unwrap();

    let mut out = String::with_capacity(content.len() + version.len());
    out.push_str(&content[..token.start()]);
    out.push_str(version);
    out.push_str(&content[token.end()..]);
    Some(out)
  }
}
