//! Container image republishing
//!
//! CI publishes GUI images to an internal registry; releasing a version means
//! re-tagging it under the public namespace. Three gated steps: pull the source
//! image, tag it under the destination, push. The first non-zero exit aborts
//! with that step's stderr, and the orchestrator treats any publish failure as
//! fatal to the whole run.

use crate::core::config::RegistryConfig;
use crate::core::error::{PublishError, ReleaseError, ReleaseResult, ResultExt};
use std::process::Command;

/// Injected publishing collaborator (stubbed in tests)
pub trait Publisher {
  fn publish(&self, image: &str, version: &str) -> ReleaseResult<()>;
}

/// Publishes through a docker-compatible CLI
pub struct DockerPublisher {
  command: String,
  source: String,
  destination: String,
}

impl DockerPublisher {
  pub fn new(registry: &RegistryConfig) -> Self {
    Self {
      command: registry.command.clone(),
      source: registry.source.clone(),
      destination: registry.destination.clone(),
    }
  }

  fn run_step(&self, step: &str, image: &str, args: &[&str]) -> ReleaseResult<()> {
    println!("   {} {}", self.command, args.join(" "));

    let output = Command::new(&self.command)
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", self.command))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::Publish(PublishError::StepFailed {
        step: step.to_string(),
        image: image.to_string(),
        stderr: stderr.to_string(),
      }));
    }

    Ok(())
  }
}

impl Publisher for DockerPublisher {
  fn publish(&self, image: &str, version: &str) -> ReleaseResult<()> {
    let short_name = format!("{}:{}", image, version);
    let source = format!("{}/{}", self.source, short_name);
    let destination = format!("{}/{}", self.destination, short_name);

    println!("🐳 Publishing {}", destination);
    self.run_step("pull", &short_name, &["pull", &source])?;
    self.run_step("tag", &short_name, &["tag", &source, &destination])?;
    self.run_step("push", &short_name, &["push", &destination])?;

    Ok(())
  }
}
