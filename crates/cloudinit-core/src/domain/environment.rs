//! Supported cloud environments.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A cloud environment whose metadata service the handler knows how to use.
///
/// Both variants serve instance metadata from the same link-local endpoint,
/// so they currently render identical SSH and user-data URLs.  They are kept
/// distinct because `ENVIRONMENT` is passed through to the boot script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Amazon EC2.
    Ec2,
    /// OpenStack (EC2-compatible metadata API).
    OpenStack,
}

/// Returned when a string does not name a supported [`Environment`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported cloud environment {0:?}")]
pub struct UnsupportedEnvironment(pub String);

impl Environment {
    /// Every supported environment, in declaration order.
    pub const ALL: [Environment; 2] = [Environment::Ec2, Environment::OpenStack];

    /// The configuration string for this environment.
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Ec2 => "ec2",
            Environment::OpenStack => "openstack",
        }
    }
}

impl FromStr for Environment {
    type Err = UnsupportedEnvironment;

    /// Exact, case-sensitive match against [`Environment::as_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == s)
            .ok_or_else(|| UnsupportedEnvironment(s.to_string()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
