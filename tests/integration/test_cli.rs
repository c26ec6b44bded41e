//! CLI surface tests: argument handling, service selection, config errors

use crate::helpers::*;
use anyhow::Result;
use std::process::Command;

#[test]
fn test_help_describes_positional_branches() -> Result<()> {
  let bin = env!("CARGO_BIN_EXE_gui-release");
  let output = Command::new(bin).arg("--help").output()?;
  assert!(output.status.success());

  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("TARGET_BRANCH"), "stdout: {}", stdout);
  assert!(stdout.contains("SOURCE_BRANCH"), "stdout: {}", stdout);
  assert!(stdout.contains("SERVICES"), "stdout: {}", stdout);
  Ok(())
}

#[test]
fn test_unknown_services_are_silently_dropped() -> Result<()> {
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-100"])?;
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-100")?;
  site.write_config("panel-gui", "panel-backend", "true")?;

  let output = run_gui_release(&site, &["develop", "develop", "bogus"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("Chosen services: []"), "stdout: {}", stdout);
  assert!(!stdout.contains("syncing"), "nothing may be processed: {}", stdout);
  Ok(())
}

#[test]
fn test_no_service_args_selects_all_configured() -> Result<()> {
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-100"])?;
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-100")?;
  site.write_config("panel-gui", "panel-backend", "true")?;

  let output = run_gui_release(&site, &["develop", "develop"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Chosen services: [panel]"), "stdout: {}", stdout);
  Ok(())
}

#[test]
fn test_missing_explicit_config_is_a_user_error() -> Result<()> {
  let bin = env!("CARGO_BIN_EXE_gui-release");
  let output = Command::new(bin)
    .args(["--config", "/nonexistent/gui-release.toml"])
    .output()?;

  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Configuration file not found"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_sync_failure_on_missing_branch_is_fatal() -> Result<()> {
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-100"])?;
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-100")?;
  site.write_config("panel-gui", "panel-backend", "true")?;

  // The GUI origin has no such source branch
  let output = spawn_gui_release(&site, &["develop", "release-candidate", "panel"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2), "sync failures are system errors");
  Ok(())
}
