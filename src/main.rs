mod commands;
mod core;
mod ui;

use crate::commands::release::ReleaseArgs;
use crate::core::error::{ReleaseError, print_error};
use clap::Parser;
use std::path::PathBuf;

/// Coordinate GUI releases: republish images and roll backend configs forward
#[derive(Parser)]
#[command(name = "gui-release")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Backend branch to update
  #[arg(default_value = "develop")]
  target_branch: String,

  /// GUI branch to read versions from
  #[arg(default_value = "develop")]
  source_branch: String,

  /// Services to process (default: all configured; unknown names are ignored)
  services: Vec<String>,

  /// Configuration file (default: ./gui-release.toml, falling back to built-in defaults)
  #[arg(long)]
  config: Option<PathBuf>,

  /// Override the working-copy root directory
  #[arg(long)]
  root: Option<PathBuf>,

  /// Override the remote URL template, `{repo}` placeholder (useful for testing)
  #[arg(long)]
  remote: Option<String>,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let result = commands::run_release(ReleaseArgs {
    target_branch: cli.target_branch,
    source_branch: cli.source_branch,
    services: cli.services,
    config: cli.config,
    root: cli.root,
    remote: cli.remote,
  });

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
