//! Release command: wire configuration and collaborators, then orchestrate

use crate::core::config::ReleaseConfig;
use crate::core::error::ReleaseResult;
use crate::core::publish::DockerPublisher;
use crate::core::release::Orchestrator;
use crate::core::store::RepoStore;
use crate::core::version::Patterns;
use crate::ui::prompt::OsEditorPrompt;
use std::path::PathBuf;

pub struct ReleaseArgs {
  /// Backend branch the update lands on
  pub target_branch: String,
  /// GUI branch versions are read from
  pub source_branch: String,
  /// Requested service names (empty = all configured)
  pub services: Vec<String>,
  pub config: Option<PathBuf>,
  pub root: Option<PathBuf>,
  pub remote: Option<String>,
}

/// Run the release flow for the requested services
pub fn run_release(args: ReleaseArgs) -> ReleaseResult<()> {
  let mut config = ReleaseConfig::load(args.config.as_deref())?;
  if let Some(root) = args.root {
    config.root = root;
  }
  if let Some(remote) = args.remote {
    config.git.url_template = Some(remote);
  }

  let patterns = Patterns::new(&config.issue_pattern)?;
  let store = RepoStore::new(&config.root, config.git.clone());
  let publisher = DockerPublisher::new(&config.registry);
  let prompt = OsEditorPrompt;

  let chosen = config.select_services(&args.services);
  let names: Vec<_> = chosen.iter().map(|s| s.name.as_str()).collect();
  println!(
    "Chosen services: [{}] ({} -> {})",
    names.join(", "),
    args.source_branch,
    args.target_branch
  );

  let orchestrator = Orchestrator::new(&store, &patterns, &config.tracker, &publisher, &prompt);
  orchestrator.run(&chosen, &args.target_branch, &args.source_branch)
}
