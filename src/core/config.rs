//! Release configuration (gui-release.toml) parsing and defaults
//!
//! Every knob the release flow depends on lives here: the working-copy root,
//! remote addressing, registry names, the issue-tracker link base, the issue-key
//! pattern and the service pairs. A missing config file is not an error; the
//! built-in defaults describe the production setup.

use crate::core::error::{ConfigError, ReleaseError, ReleaseResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the current directory
pub const CONFIG_FILE: &str = "gui-release.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Root directory for local working copies
  #[serde(default = "default_root")]
  pub root: PathBuf,

  #[serde(default)]
  pub git: GitConfig,

  #[serde(default)]
  pub registry: RegistryConfig,

  #[serde(default)]
  pub tracker: TrackerConfig,

  /// Regex capturing one issue-tracker key, e.g. "VFS-\d+"
  #[serde(default = "default_issue_pattern")]
  pub issue_pattern: String,

  #[serde(default = "default_services")]
  pub services: Vec<ServiceConfig>,
}

/// Remote repository addressing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
  #[serde(default = "default_git_host")]
  pub host: String,

  #[serde(default = "default_git_port")]
  pub port: u16,

  #[serde(default = "default_git_user")]
  pub user: String,

  #[serde(default = "default_git_namespace")]
  pub namespace: String,

  /// Override template with a `{repo}` placeholder (useful for testing
  /// against local bare repositories, e.g. "file:///tmp/remotes/{repo}")
  #[serde(default)]
  pub url_template: Option<String>,
}

impl GitConfig {
  /// Remote URL for a repository id
  pub fn remote_url(&self, repo: &str) -> String {
    match &self.url_template {
      Some(template) => template.replace("{repo}", repo),
      None => format!(
        "ssh://{}@{}:{}/{}/{}.git",
        self.user, self.host, self.port, self.namespace, repo
      ),
    }
  }
}

impl Default for GitConfig {
  fn default() -> Self {
    Self {
      host: default_git_host(),
      port: default_git_port(),
      user: default_git_user(),
      namespace: default_git_namespace(),
      url_template: None,
    }
  }
}

/// Container registry addressing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
  /// Container runtime binary (any docker-compatible CLI)
  #[serde(default = "default_registry_command")]
  pub command: String,

  /// Registry images are pulled from (CI publishes here)
  #[serde(default = "default_registry_source")]
  pub source: String,

  /// Registry/namespace images are republished under
  #[serde(default = "default_registry_destination")]
  pub destination: String,
}

impl Default for RegistryConfig {
  fn default() -> Self {
    Self {
      command: default_registry_command(),
      source: default_registry_source(),
      destination: default_registry_destination(),
    }
  }
}

/// Issue-tracker link formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
  #[serde(default = "default_tracker_browse_url")]
  pub browse_url: String,
}

impl TrackerConfig {
  /// Browse link for an issue key
  pub fn issue_link(&self, issue: &str) -> String {
    format!("{}/{}", self.browse_url.trim_end_matches('/'), issue)
  }
}

impl Default for TrackerConfig {
  fn default() -> Self {
    Self {
      browse_url: default_tracker_browse_url(),
    }
  }
}

/// A (GUI repo, backend repo) service pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
  pub name: String,
  pub gui: String,
  pub backend: String,
}

impl ReleaseConfig {
  /// Load configuration
  ///
  /// An explicit path must exist. Without one, `gui-release.toml` in the
  /// current directory is used when present, otherwise built-in defaults.
  pub fn load(path: Option<&Path>) -> ReleaseResult<Self> {
    let config = match path {
      Some(path) => {
        if !path.exists() {
          return Err(ReleaseError::Config(ConfigError::NotFound {
            path: path.to_path_buf(),
          }));
        }
        Self::parse(&fs::read_to_string(path)?)?
      }
      None => {
        let default_path = Path::new(CONFIG_FILE);
        if default_path.exists() {
          Self::parse(&fs::read_to_string(default_path)?)?
        } else {
          Self::default()
        }
      }
    };

    if config.services.is_empty() {
      return Err(ReleaseError::Config(ConfigError::NoServices));
    }

    Ok(config)
  }

  fn parse(content: &str) -> ReleaseResult<Self> {
    Ok(toml_edit::de::from_str(content)?)
  }

  /// Resolve requested service names against the configuration
  ///
  /// Requested order is preserved; unknown names are silently dropped.
  /// An empty request selects all configured services.
  pub fn select_services(&self, names: &[String]) -> Vec<&ServiceConfig> {
    if names.is_empty() {
      return self.services.iter().collect();
    }
    names
      .iter()
      .filter_map(|name| self.services.iter().find(|s| &s.name == name))
      .collect()
  }
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      root: default_root(),
      git: GitConfig::default(),
      registry: RegistryConfig::default(),
      tracker: TrackerConfig::default(),
      issue_pattern: default_issue_pattern(),
      services: default_services(),
    }
  }
}

fn default_root() -> PathBuf {
  PathBuf::from("/tmp")
}

fn default_git_host() -> String {
  "git.plgrid.pl".to_string()
}

fn default_git_port() -> u16 {
  7999
}

fn default_git_user() -> String {
  "git".to_string()
}

fn default_git_namespace() -> String {
  "vfs".to_string()
}

fn default_registry_command() -> String {
  "docker".to_string()
}

fn default_registry_source() -> String {
  "docker.onedata.org".to_string()
}

fn default_registry_destination() -> String {
  "onedata".to_string()
}

fn default_tracker_browse_url() -> String {
  "https://jira.plgrid.pl/jira/browse".to_string()
}

fn default_issue_pattern() -> String {
  r"VFS-\d+".to_string()
}

fn default_services() -> Vec<ServiceConfig> {
  vec![
    ServiceConfig {
      name: "panel".to_string(),
      gui: "onepanel-gui".to_string(),
      backend: "onepanel".to_string(),
    },
    ServiceConfig {
      name: "zone".to_string(),
      gui: "oz-gui-default".to_string(),
      backend: "oz-worker".to_string(),
    },
    ServiceConfig {
      name: "provider".to_string(),
      gui: "op-gui-default".to_string(),
      backend: "op-worker".to_string(),
    },
  ]
}
