//! Configuration verification.
//!
//! Verification runs before anything is written or executed.  The rules are
//! checked in order and the first failure is returned:
//!
//! 1. If `environment` is set it must name a supported [`Environment`].  When
//!    it does not, the user-defined keys are not examined at all.
//! 2. Otherwise, if any user-defined key is set, `ssh-key` and then
//!    `user-data` (when present) must start with an accepted URL scheme.
//! 3. Otherwise the configuration is empty, which is valid (disabled).
//!
//! URLs are only checked syntactically; nothing is fetched.

use thiserror::Error;

use super::config::CloudInitConfig;
use super::environment::Environment;

/// URL prefixes accepted for `ssh-key` and `user-data`.
pub const ACCEPTED_URL_SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Why a configuration was rejected.
///
/// Each variant carries the offending value for the commit error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// `environment` is not one of the supported environments.
    #[error("unsupported environment {0:?}; expected \"ec2\" or \"openstack\"")]
    UnsupportedEnvironment(String),

    /// `ssh-key` does not start with `http://`, `https://`, or `ftp://`.
    #[error("unsupported URL scheme in ssh-key {0:?}; expected http://, https:// or ftp://")]
    UnsupportedSshKeyUrlScheme(String),

    /// `user-data` does not start with `http://`, `https://`, or `ftp://`.
    #[error("unsupported URL scheme in user-data {0:?}; expected http://, https:// or ftp://")]
    UnsupportedUserDataUrlScheme(String),
}

/// Checks `config` and returns the first rule it breaks.
///
/// # Errors
///
/// Returns the matching [`VerifyError`] variant; see the module docs for the
/// evaluation order.
pub fn verify(config: &CloudInitConfig) -> Result<(), VerifyError> {
    if let Some(environment) = &config.environment {
        environment
            .parse::<Environment>()
            .map_err(|_| VerifyError::UnsupportedEnvironment(environment.clone()))?;
        return Ok(());
    }

    if config.is_user_defined() {
        if let Some(key) = &config.ssh_key {
            if !has_accepted_scheme(key) {
                return Err(VerifyError::UnsupportedSshKeyUrlScheme(key.clone()));
            }
        }
        if let Some(data) = &config.user_data {
            if !has_accepted_scheme(data) {
                return Err(VerifyError::UnsupportedUserDataUrlScheme(data.clone()));
            }
        }
    }

    Ok(())
}

fn has_accepted_scheme(url: &str) -> bool {
    ACCEPTED_URL_SCHEMES
        .iter()
        .any(|scheme| url.starts_with(scheme))
}
