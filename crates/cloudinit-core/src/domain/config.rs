//! The `cloud-init` configuration dictionary.
//!
//! The configuration system hands the handler a flat mapping of the
//! `cloud-init` subtree.  Every key is optional; a node that is not configured
//! is simply absent.  An entirely empty dictionary means the operator removed
//! (or never set) the subtree, i.e. cloud-init is disabled.
//!
//! ```toml
//! environment = "ec2"
//! ```
//!
//! or, for a user-defined source:
//!
//! ```toml
//! ssh-user = "admin"
//! ssh-key = "https://example.com/keys/admin.pub"
//! user-data = "ftp://example.com/user-data"
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Key name of the cloud environment node.
pub const KEY_ENVIRONMENT: &str = "environment";
/// Key name of the SSH user node.
pub const KEY_SSH_USER: &str = "ssh-user";
/// Key name of the SSH public key URL node.
pub const KEY_SSH_KEY: &str = "ssh-key";
/// Key name of the user-data URL node.
pub const KEY_USER_DATA: &str = "user-data";

/// Configuration dictionary for the cloud-init handler.
///
/// Field values are kept as raw strings: the verifier, not the parser, is
/// responsible for deciding whether `environment` or a URL is acceptable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CloudInitConfig {
    /// Cloud environment name, expected to be `"ec2"` or `"openstack"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// User to provision the SSH key for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_user: Option<String>,
    /// URL of the SSH public key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssh_key: Option<String>,
    /// URL of the cloud-init user-data document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<String>,
}

impl CloudInitConfig {
    /// Creates an empty (disabled) configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from `(key, value)` pairs as yielded by a
    /// configuration-tree reader.
    ///
    /// Unrecognised keys are skipped.  When a key repeats, the last value wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut config = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                KEY_ENVIRONMENT => &mut config.environment,
                KEY_SSH_USER => &mut config.ssh_user,
                KEY_SSH_KEY => &mut config.ssh_key,
                KEY_USER_DATA => &mut config.user_data,
                other => {
                    debug!(key = other, "ignoring unrecognised cloud-init key");
                    continue;
                }
            };
            *slot = Some(value.into());
        }
        config
    }

    /// Builder-style setter for `environment`.
    pub fn with_environment(mut self, value: impl Into<String>) -> Self {
        self.environment = Some(value.into());
        self
    }

    /// Builder-style setter for `ssh-user`.
    pub fn with_ssh_user(mut self, value: impl Into<String>) -> Self {
        self.ssh_user = Some(value.into());
        self
    }

    /// Builder-style setter for `ssh-key`.
    pub fn with_ssh_key(mut self, value: impl Into<String>) -> Self {
        self.ssh_key = Some(value.into());
        self
    }

    /// Builder-style setter for `user-data`.
    pub fn with_user_data(mut self, value: impl Into<String>) -> Self {
        self.user_data = Some(value.into());
        self
    }

    /// Overlays every key set in `other` on top of `self`.
    pub fn merge(mut self, other: CloudInitConfig) -> Self {
        if other.environment.is_some() {
            self.environment = other.environment;
        }
        if other.ssh_user.is_some() {
            self.ssh_user = other.ssh_user;
        }
        if other.ssh_key.is_some() {
            self.ssh_key = other.ssh_key;
        }
        if other.user_data.is_some() {
            self.user_data = other.user_data;
        }
        self
    }

    /// `true` when no recognised key is present (cloud-init disabled).
    pub fn is_empty(&self) -> bool {
        self.environment.is_none() && !self.is_user_defined()
    }

    /// `true` when any of `ssh-user`, `ssh-key`, or `user-data` is present.
    pub fn is_user_defined(&self) -> bool {
        self.ssh_user.is_some() || self.ssh_key.is_some() || self.user_data.is_some()
    }
}
