//! Env-file rendering.
//!
//! The boot script sources the output as shell, so the format is fixed:
//!
//! ```text
//! ### Autogenerated by vyos-cloudinit ###
//! ENVIRONMENT="ec2"
//! SSH_USER="vyos"
//! SSH_KEY="http://169.254.169.254/latest/meta-data/public-keys/0/openssh-key"
//! USER_DATA="http://169.254.169.254/latest/user-data"
//! ```
//!
//! Values are wrapped in double quotes without escaping; they come from the
//! configuration system, which restricts what can be entered.

use std::fmt::Write as _;

use crate::domain::settings::RenderedSettings;

/// First line of every generated env file.
pub const ENV_FILE_HEADER: &str = "### Autogenerated by vyos-cloudinit ###";

/// Renders `settings` as the five-line env file, each line newline-terminated.
pub fn render_env_file(settings: &RenderedSettings) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(ENV_FILE_HEADER);
    out.push('\n');
    for (name, value) in settings.fields() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{name}=\"{value}\"");
    }
    out
}
