//! Derivation of the four rendered env-file fields.

use tracing::debug;

use super::config::CloudInitConfig;
use super::environment::Environment;

/// SSH user provisioned when a cloud environment is selected.
pub const DEFAULT_SSH_USER: &str = "vyos";
/// Public key URL on the link-local metadata service.
pub const METADATA_SSH_KEY_URL: &str =
    "http://169.254.169.254/latest/meta-data/public-keys/0/openssh-key";
/// User-data URL on the link-local metadata service.
pub const METADATA_USER_DATA_URL: &str = "http://169.254.169.254/latest/user-data";

/// The values written to the env file.
///
/// Always exactly four fields; absent values render as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSettings {
    pub environment: String,
    pub ssh_user: String,
    pub ssh_key: String,
    pub user_data: String,
}

impl RenderedSettings {
    /// Derives the settings for `config`.
    ///
    /// A supported `environment` selects the metadata-service defaults and
    /// ignores the user-defined keys.  Anything else renders an empty
    /// `ENVIRONMENT` and copies the user-defined keys verbatim.
    ///
    /// Callers are expected to have run [`verify`](super::verify::verify)
    /// first; an unsupported `environment` is not reported here.
    pub fn from_config(config: &CloudInitConfig) -> Self {
        let environment = config
            .environment
            .as_deref()
            .and_then(|s| s.parse::<Environment>().ok());

        match environment {
            Some(env) => {
                debug!(%env, "using metadata service defaults");
                Self {
                    environment: env.as_str().to_string(),
                    ssh_user: DEFAULT_SSH_USER.to_string(),
                    ssh_key: METADATA_SSH_KEY_URL.to_string(),
                    user_data: METADATA_USER_DATA_URL.to_string(),
                }
            }
            None => Self {
                environment: String::new(),
                ssh_user: config.ssh_user.clone().unwrap_or_default(),
                ssh_key: config.ssh_key.clone().unwrap_or_default(),
                user_data: config.user_data.clone().unwrap_or_default(),
            },
        }
    }

    /// `(NAME, value)` pairs in env-file order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("ENVIRONMENT", self.environment.as_str()),
            ("SSH_USER", self.ssh_user.as_str()),
            ("SSH_KEY", self.ssh_key.as_str()),
            ("USER_DATA", self.user_data.as_str()),
        ]
    }
}
