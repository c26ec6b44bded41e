//! End-to-end release workflow tests against local bare origins

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_up_to_date_service_has_no_side_effects() -> Result<()> {
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-100"])?;
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-100")?;
  // A failing registry command proves publish is never attempted
  site.write_config("panel-gui", "panel-backend", "false")?;

  let output = run_gui_release(&site, &["develop", "develop", "panel"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("latest GUI VFS-100, GUI used VFS-100"), "stdout: {}", stdout);
  assert!(stdout.contains("update not needed"), "stdout: {}", stdout);

  let branches = site.remote_branches("panel-backend")?;
  assert_eq!(branches, ["develop"], "no feature branch may be pushed");
  Ok(())
}

#[test]
fn test_update_pushes_feature_branch_with_changelog() -> Result<()> {
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-100", "VFS-101", "VFS-102"])?;
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-100")?;
  site.write_config("panel-gui", "panel-backend", "true")?;

  let output = run_gui_release(&site, &["develop", "develop", "panel"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);

  assert!(stdout.contains("latest GUI VFS-102, GUI used VFS-100"), "stdout: {}", stdout);
  // Tracker links are printed for operator visibility, one per included issue
  assert!(stdout.contains("https://jira.plgrid.pl/jira/browse/VFS-101"));
  assert!(stdout.contains("https://jira.plgrid.pl/jira/browse/VFS-102"));
  assert!(!stdout.contains("browse/VFS-100"), "boundary issue must be excluded");

  let branches = site.remote_branches("panel-backend")?;
  assert!(
    branches.contains(&"feature/VFS-102-update-gui".to_string()),
    "branches: {:?}",
    branches
  );

  // Commit message: inline list plus bulleted block, oldest first
  let message = site.remote_commit_message("panel-backend", "feature/VFS-102-update-gui")?;
  assert!(message.starts_with("Updating GUI, including: VFS-101, VFS-102"), "message: {}", message);
  assert!(message.contains("* VFS-101\n* VFS-102"), "message: {}", message);

  // Config rewrite touches only the version token
  let config = site.remote_file("panel-backend", "feature/VFS-102-update-gui", "gui-config.sh")?;
  assert_eq!(config, backend_config("panel-gui", "VFS-102"));

  // develop itself is untouched
  let develop_config = site.remote_file("panel-backend", "develop", "gui-config.sh")?;
  assert_eq!(develop_config, backend_config("panel-gui", "VFS-100"));
  Ok(())
}

#[test]
fn test_changelog_fallback_still_releases() -> Result<()> {
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-101", "VFS-102"])?;
  // The referenced version never appears as a merge (squashed history)
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-999")?;
  site.write_config("panel-gui", "panel-backend", "true")?;

  let output = run_gui_release(&site, &["develop", "develop", "panel"])?;
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Changelog unavailable"), "stderr: {}", stderr);
  assert!(stderr.contains("VFS-999"), "stderr: {}", stderr);

  let branches = site.remote_branches("panel-backend")?;
  assert!(branches.contains(&"feature/VFS-102-update-gui".to_string()));

  let message = site.remote_commit_message("panel-backend", "feature/VFS-102-update-gui")?;
  assert!(message.starts_with("Updating GUI to: VFS-102"), "message: {}", message);
  assert!(!message.contains("including"), "fallback must carry no issue list");

  let config = site.remote_file("panel-backend", "feature/VFS-102-update-gui", "gui-config.sh")?;
  assert_eq!(config, backend_config("panel-gui", "VFS-102"));
  Ok(())
}

#[test]
fn test_publish_failure_aborts_before_config_mutation() -> Result<()> {
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-100", "VFS-102"])?;
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-100")?;
  site.write_config("panel-gui", "panel-backend", "false")?;

  let output = spawn_gui_release(&site, &["develop", "develop", "panel"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(2), "publish failures are system errors");

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("pull"), "stderr: {}", stderr);

  // The backend working copy stays on its synced branch, unmodified
  let work_config = site.work_file("panel-backend", "gui-config.sh")?;
  assert_eq!(work_config, backend_config("panel-gui", "VFS-100"));

  let branches = site.remote_branches("panel-backend")?;
  assert_eq!(branches, ["develop"]);
  Ok(())
}

#[test]
fn test_commit_message_survives_stdin_eof() -> Result<()> {
  // With stdin closed the editor checkpoint resolves immediately and the
  // unedited candidate message is used verbatim
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-100", "VFS-101"])?;
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-100")?;
  site.write_config("panel-gui", "panel-backend", "true")?;

  let output = run_gui_release(&site, &["develop", "develop", "panel"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("press ENTER when done"), "stdout: {}", stdout);

  let message = site.remote_commit_message("panel-backend", "feature/VFS-101-update-gui")?;
  assert!(message.starts_with("Updating GUI, including: VFS-101"));
  Ok(())
}

#[test]
fn test_resync_reuses_existing_working_copies() -> Result<()> {
  let site = TestSite::new()?;
  site.seed_gui_remote("panel-gui", &["VFS-100"])?;
  site.seed_backend_remote("panel-backend", "panel-gui", "VFS-100")?;
  site.write_config("panel-gui", "panel-backend", "true")?;

  run_gui_release(&site, &["develop", "develop", "panel"])?;

  // Dirty the working copy; the second run must reset it and still conclude no-op
  std::fs::write(
    site.work_root.join("panel-backend").join("gui-config.sh"),
    "PRIMARY_IMAGE='local-hack:VFS-555'\n",
  )?;

  let output = run_gui_release(&site, &["develop", "develop", "panel"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("update not needed"), "stdout: {}", stdout);

  let work_config = site.work_file("panel-backend", "gui-config.sh")?;
  assert_eq!(work_config, backend_config("panel-gui", "VFS-100"));
  Ok(())
}
