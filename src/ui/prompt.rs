//! Interactive commit-message editing
//!
//! The candidate message is written to a temporary file, opened with the
//! platform's default file opener, and the process blocks on one line of
//! standard input before re-reading the (possibly edited) file. This is a
//! deliberate synchronous human checkpoint, not a concurrency primitive.
//!
//! The prompt is a trait so tests can substitute a non-blocking stub.

use crate::core::error::{ReleaseResult, ResultExt};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

/// Injected editing collaborator
pub trait EditorPrompt {
  /// Present a candidate message for editing; returns the final message
  fn present(&self, message: &str) -> ReleaseResult<String>;
}

/// Opens the message in the OS default viewer and waits on stdin
pub struct OsEditorPrompt;

impl EditorPrompt for OsEditorPrompt {
  fn present(&self, message: &str) -> ReleaseResult<String> {
    let mut file = tempfile::Builder::new()
      .prefix("onedata-gui-commit-")
      .suffix(".txt")
      .tempfile()
      .context("Failed to create commit message file")?;

    file.write_all(message.as_bytes())?;
    file.flush()?;

    open_file(file.path());

    println!("Commit message editor opened, press ENTER when done");
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    // The temp file is unlinked on drop even when this read fails
    let edited = fs::read_to_string(file.path()).context("Failed to re-read commit message file")?;
    Ok(edited)
  }
}

/// Open a file with the platform-default mechanism, best-effort
///
/// A missing opener must not kill the release; the operator can still edit the
/// file by hand at the printed path.
fn open_file(path: &Path) {
  #[cfg(target_os = "windows")]
  let mut cmd = {
    let mut c = Command::new("cmd");
    c.args(["/C", "start", ""]).arg(path);
    c
  };

  #[cfg(target_os = "macos")]
  let mut cmd = {
    let mut c = Command::new("open");
    c.arg(path);
    c
  };

  #[cfg(not(any(target_os = "windows", target_os = "macos")))]
  let mut cmd = {
    let mut c = Command::new("xdg-open");
    c.arg(path);
    c
  };

  if let Err(e) = cmd.spawn() {
    eprintln!("⚠️  Could not open {}: {}", path.display(), e);
    eprintln!("   Edit the file manually, then press ENTER.");
  }
}
