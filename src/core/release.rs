//! Per-service release orchestration
//!
//! For each service pair the flow is strictly sequential:
//! sync both repos, compare version markers, and when they differ: republish
//! the image, build a changelog commit message (degrading to a minimal one if
//! the changelog cannot be reconstructed), let the operator edit it, rewrite
//! the backend config on a fresh feature branch, commit and push.
//!
//! Error policy is deliberately asymmetric and must stay that way:
//! - sync, comparison, publish, commit and push failures are fatal and stop
//!   the run (services are processed in order, no continue-on-error),
//! - changelog failures are recovered locally with a fallback message.

use crate::core::changelog::ChangelogBuilder;
use crate::core::config::{ServiceConfig, TrackerConfig};
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::publish::Publisher;
use crate::core::store::RepoStore;
use crate::core::vcs::SystemGit;
use crate::core::version::Patterns;
use crate::ui::prompt::EditorPrompt;
use std::fs;
use std::path::Path;

/// Backend file referencing the bundled GUI image
pub const GUI_CONFIG_FILE: &str = "gui-config.sh";

pub struct Orchestrator<'a> {
  store: &'a RepoStore,
  patterns: &'a Patterns,
  tracker: &'a TrackerConfig,
  publisher: &'a dyn Publisher,
  prompt: &'a dyn EditorPrompt,
}

impl<'a> Orchestrator<'a> {
  pub fn new(
    store: &'a RepoStore,
    patterns: &'a Patterns,
    tracker: &'a TrackerConfig,
    publisher: &'a dyn Publisher,
    prompt: &'a dyn EditorPrompt,
  ) -> Self {
    Self {
      store,
      patterns,
      tracker,
      publisher,
      prompt,
    }
  }

  /// Process services in order; the first unrecovered failure stops the run
  pub fn run(&self, services: &[&ServiceConfig], target_branch: &str, source_branch: &str) -> ReleaseResult<()> {
    for service in services {
      self.release_service(service, target_branch, source_branch)?;
    }
    Ok(())
  }

  fn release_service(&self, service: &ServiceConfig, target_branch: &str, source_branch: &str) -> ReleaseResult<()> {
    println!("📦 {}: syncing {} and {}...", service.name, service.gui, service.backend);
    let gui_repo = self.store.sync(&service.gui, source_branch)?;
    let backend_repo = self.store.sync(&service.backend, target_branch)?;

    let latest_gui = self.latest_gui(&gui_repo, &service.gui)?;
    let used_gui = self.used_gui(&backend_repo, &service.backend)?;
    println!("{}: latest GUI {}, GUI used {}", service.name, latest_gui, used_gui);

    if latest_gui == used_gui {
      println!("   GUI versions the same - update not needed");
      return Ok(());
    }

    // Fatal for the whole run: a half-published image must stop everything
    self.publisher.publish(&service.gui, &latest_gui)?;

    let message = self.build_message(&gui_repo, &used_gui, &latest_gui);
    println!("{}", message);

    let message = self.prompt.present(&message)?;

    let branch = format!("feature/{}-update-gui", latest_gui);
    backend_repo.checkout_new_branch(&branch)?;
    self.change_gui(&backend_repo, &latest_gui)?;
    backend_repo.add(Path::new(GUI_CONFIG_FILE))?;
    backend_repo.commit(&message)?;
    backend_repo.push("origin", &branch)?;

    println!("✅ {}: pushed {} to origin", service.name, branch);
    Ok(())
  }

  /// Latest GUI version: marker of the newest tracked merge in GUI history
  fn latest_gui(&self, git: &SystemGit, repo: &str) -> ReleaseResult<String> {
    let merges = git.log_merges()?;
    merges
      .iter()
      .filter(|c| c.is_merge())
      .find_map(|c| self.patterns.merge_version(&c.message))
      .map(|v| v.to_string())
      .ok_or_else(|| ReleaseError::VersionNotFound {
        subject: format!("no tracked merge commit in {} history", repo),
      })
  }

  /// Currently-used GUI version: marker from the backend's gui-config.sh
  fn used_gui(&self, git: &SystemGit, repo: &str) -> ReleaseResult<String> {
    let path = git.work_tree().join(GUI_CONFIG_FILE);
    let content = fs::read_to_string(&path)?;
    self
      .patterns
      .config_version(&content)
      .map(|v| v.to_string())
      .ok_or_else(|| ReleaseError::VersionNotFound {
        subject: format!("no PRIMARY_IMAGE version in {}/{}", repo, GUI_CONFIG_FILE),
      })
  }

  /// Build the commit message, degrading when the changelog is unavailable
  fn build_message(&self, gui_repo: &SystemGit, used_gui: &str, latest_gui: &str) -> String {
    let builder = ChangelogBuilder::new(self.patterns);

    let issues = builder
      .diff(gui_repo, used_gui, latest_gui)
      .and_then(|commits| builder.issues(&commits));

    match issues {
      Ok(issues) => {
        for issue in &issues {
          println!("{}", self.tracker.issue_link(issue));
        }
        let bullets: String = issues.iter().map(|i| format!("* {}\n", i)).collect();
        format!("Updating GUI, including: {}\n{}", issues.join(", "), bullets)
      }
      Err(err) => {
        // Recovered: visible to the operator, but the release proceeds
        eprintln!("⚠️  Changelog unavailable ({} -> {}): {}", used_gui, latest_gui, err);
        format!("Updating GUI to: {}\n", latest_gui)
      }
    }
  }

  /// Rewrite the backend's gui-config.sh version token in place
  fn change_gui(&self, git: &SystemGit, version: &str) -> ReleaseResult<()> {
    let path = git.work_tree().join(GUI_CONFIG_FILE);
    let content = fs::read_to_string(&path)?;

    let rewritten = self
      .patterns
      .rewrite_config(&content, version)
      .ok_or_else(|| ReleaseError::VersionNotFound {
        subject: format!("no PRIMARY_IMAGE version in {}", path.display()),
      })?;

    fs::write(&path, rewritten)?;
    Ok(())
  }
}
