//! `vyos-cloudinit` conf-mode handler entry point.
//!
//! The configuration system runs this binary when the `cloud-init` subtree
//! changes.  It verifies the subtree, writes the env file sourced by the
//! cloud-init boot script, and enables or disables the service.
//!
//! # Usage
//!
//! ```text
//! vyos-cloudinit [OPTIONS] <COMMAND>
//!
//! Commands:
//!   verify   Check the configuration only
//!   render   Print the env file that commit would write
//!   commit   Verify, write the env file, and toggle the service
//!
//! Options:
//!   --settings  <PATH>   Handler settings TOML [env: VYOS_CLOUDINIT_SETTINGS]
//!   --env-file  <PATH>   Override the env-file location [env: VYOS_CLOUDINIT_ENV_FILE]
//!   --log-level <LEVEL>  Log level when RUST_LOG is unset
//! ```
//!
//! Each command takes the `cloud-init` subtree as `--config <TOML>` and/or the
//! individual `--environment`, `--ssh-user`, `--ssh-key`, `--user-data`
//! values.  Giving none of them means the subtree is empty (disabled).

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cloudinit_conf::application::apply::CommandRunner;
use cloudinit_conf::application::commit::ConfModeHandler;
use cloudinit_conf::infrastructure::service::mock::RecordingCommandRunner;
use cloudinit_conf::infrastructure::service::SystemCommandRunner;
use cloudinit_conf::infrastructure::source::resolve_config;
use cloudinit_conf::infrastructure::storage::env_file::FsEnvFileStore;
use cloudinit_conf::infrastructure::storage::settings::{load_settings, HandlerSettings};
use cloudinit_core::{render_env_file, verify, CloudInitConfig, RenderedSettings};

const DEFAULT_SETTINGS_PATH: &str = "/etc/vyos-cloudinit/settings.toml";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// VyOS cloud-init conf-mode handler.
#[derive(Debug, Parser)]
#[command(name = "vyos-cloudinit", version)]
struct Cli {
    /// Handler settings file; defaults apply when it does not exist.
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH, env = "VYOS_CLOUDINIT_SETTINGS")]
    settings: PathBuf,

    /// Env-file location, overriding the settings file.
    #[arg(long, env = "VYOS_CLOUDINIT_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is not set.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// `--env-file` when given, otherwise the settings file's location.
    fn effective_env_file(&self, settings: &HandlerSettings) -> PathBuf {
        self.env_file
            .clone()
            .unwrap_or_else(|| settings.env_file.clone())
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check the configuration without side effects.
    Verify(ConfigArgs),
    /// Verify, then print the env file to stdout.
    Render(ConfigArgs),
    /// Verify, write the env file, and enable or disable the service.
    Commit {
        #[command(flatten)]
        config: ConfigArgs,
        /// Write the env file but only log the service command.
        #[arg(long)]
        dry_run: bool,
    },
}

/// The `cloud-init` subtree.
#[derive(Debug, Args)]
struct ConfigArgs {
    /// TOML file holding the subtree (kebab-case keys).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Cloud environment: `ec2` or `openstack`.
    #[arg(long)]
    environment: Option<String>,
    /// SSH user for a user-defined source.
    #[arg(long)]
    ssh_user: Option<String>,
    /// SSH public key URL for a user-defined source.
    #[arg(long)]
    ssh_key: Option<String>,
    /// User-data URL for a user-defined source.
    #[arg(long)]
    user_data: Option<String>,
}

impl ConfigArgs {
    fn resolve(self) -> anyhow::Result<CloudInitConfig> {
        let overrides = CloudInitConfig {
            environment: self.environment,
            ssh_user: self.ssh_user,
            ssh_key: self.ssh_key,
            user_data: self.user_data,
        };
        resolve_config(self.config.as_deref(), overrides)
            .context("failed to read cloud-init configuration")
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli.settings)
        .with_context(|| format!("failed to load settings from {}", cli.settings.display()))?;

    // RUST_LOG wins, then --log-level, then the settings file.
    let level = cli.log_level.as_deref().unwrap_or(&settings.log_level);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let env_file = cli.effective_env_file(&settings);
    run(
        cli.command,
        &env_file,
        &settings.service_unit,
        &mut std::io::stdout(),
    )
}

/// Executes one subcommand.  Rendered output goes to `out`.
fn run(
    command: Command,
    env_file: &Path,
    service_unit: &str,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match command {
        Command::Verify(args) => {
            let config = args.resolve()?;
            verify(&config).context("configuration error")?;
            info!("cloud-init configuration is valid");
        }
        Command::Render(args) => {
            let config = args.resolve()?;
            verify(&config).context("configuration error")?;
            let rendered = render_env_file(&RenderedSettings::from_config(&config));
            out.write_all(rendered.as_bytes())
                .context("failed to write rendered env file")?;
        }
        Command::Commit { config, dry_run } => {
            let config = config.resolve()?;
            let runner: Arc<dyn CommandRunner> = if dry_run {
                Arc::new(RecordingCommandRunner::new())
            } else {
                Arc::new(SystemCommandRunner::new())
            };
            let handler = ConfModeHandler::new(
                env_file,
                service_unit,
                Arc::new(FsEnvFileStore::new()),
                runner,
            );
            let outcome = handler.commit(&config)?;
            info!(
                env_file = %outcome.env_file.display(),
                action = ?outcome.action,
                dry_run,
                "commit finished"
            );
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use cloudinit_conf::application::apply::DEFAULT_SERVICE_UNIT;
    use cloudinit_core::ENV_FILE_HEADER;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cloudinit_cli_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn config_args(command: Command) -> ConfigArgs {
        match command {
            Command::Verify(args) | Command::Render(args) => args,
            Command::Commit { config, .. } => config,
        }
    }

    #[test]
    fn test_cli_default_settings_path() {
        let cli = Cli::try_parse_from(["vyos-cloudinit", "verify"]).expect("parse");
        // VYOS_CLOUDINIT_SETTINGS may be set in the environment.
        if std::env::var_os("VYOS_CLOUDINIT_SETTINGS").is_none() {
            assert_eq!(cli.settings, PathBuf::from(DEFAULT_SETTINGS_PATH));
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["vyos-cloudinit"]).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["vyos-cloudinit", "apply"]).is_err());
    }

    #[test]
    fn test_cli_log_level_override() {
        let cli = Cli::try_parse_from(["vyos-cloudinit", "--log-level", "debug", "verify"])
            .expect("parse");
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_flags_land_in_resolved_config() {
        // Arrange
        let cli = Cli::try_parse_from([
            "vyos-cloudinit",
            "verify",
            "--environment",
            "ec2",
            "--ssh-user",
            "user",
            "--ssh-key",
            "http://key",
            "--user-data",
            "http://data",
        ])
        .expect("parse");

        // Act
        let cfg = config_args(cli.command).resolve().expect("resolve");

        // Assert
        assert_eq!(cfg.environment.as_deref(), Some("ec2"));
        assert_eq!(cfg.ssh_user.as_deref(), Some("user"));
        assert_eq!(cfg.ssh_key.as_deref(), Some("http://key"));
        assert_eq!(cfg.user_data.as_deref(), Some("http://data"));
    }

    #[test]
    fn test_no_flags_resolve_to_empty_config() {
        let cli = Cli::try_parse_from(["vyos-cloudinit", "commit"]).expect("parse");
        let cfg = config_args(cli.command).resolve().expect("resolve");
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_flag_overrides_config_file_key() {
        // Arrange
        let dir = scratch_dir();
        let file = dir.join("cloud-init.toml");
        std::fs::write(&file, "ssh-user = \"file-user\"\nssh-key = \"http://file-key\"\n").unwrap();
        let file_arg = file.to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "vyos-cloudinit",
            "render",
            "--config",
            file_arg.as_str(),
            "--ssh-user",
            "flag-user",
        ])
        .expect("parse");

        // Act
        let cfg = config_args(cli.command).resolve().expect("resolve");

        // Assert
        assert_eq!(cfg.ssh_user.as_deref(), Some("flag-user"));
        assert_eq!(cfg.ssh_key.as_deref(), Some("http://file-key"));

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_config_file_fails_to_resolve() {
        let cli = Cli::try_parse_from([
            "vyos-cloudinit",
            "verify",
            "--config",
            "/nonexistent/path/that/cannot/exist/cloud-init.toml",
        ])
        .expect("parse");
        assert!(config_args(cli.command).resolve().is_err());
    }

    #[test]
    fn test_env_file_flag_wins_over_settings() {
        let cli = Cli::try_parse_from(["vyos-cloudinit", "--env-file", "/tmp/x.conf", "verify"])
            .expect("parse");
        let settings = HandlerSettings::default();
        assert_eq!(cli.effective_env_file(&settings), PathBuf::from("/tmp/x.conf"));
    }

    #[test]
    fn test_settings_env_file_used_without_flag() {
        let cli = Cli::try_parse_from(["vyos-cloudinit", "verify"]).expect("parse");
        // VYOS_CLOUDINIT_ENV_FILE feeds the same option.
        if std::env::var_os("VYOS_CLOUDINIT_ENV_FILE").is_none() {
            let settings = HandlerSettings {
                env_file: PathBuf::from("/run/cloudinit.conf"),
                ..HandlerSettings::default()
            };
            assert_eq!(
                cli.effective_env_file(&settings),
                PathBuf::from("/run/cloudinit.conf")
            );
        }
    }

    #[test]
    fn test_commit_dry_run_parses() {
        let cli = Cli::try_parse_from([
            "vyos-cloudinit",
            "--env-file",
            "/tmp/x.conf",
            "commit",
            "--environment",
            "ec2",
            "--dry-run",
        ])
        .expect("parse");

        assert!(matches!(cli.command, Command::Commit { dry_run: true, .. }));
        assert_eq!(cli.env_file, Some(PathBuf::from("/tmp/x.conf")));
    }

    #[test]
    fn test_verify_does_not_write_env_file() {
        let dir = scratch_dir();
        let env_file = dir.join("vyos-cloudinit.conf");
        let cli = Cli::try_parse_from(["vyos-cloudinit", "verify", "--environment", "ec2"])
            .expect("parse");
        let mut out = Vec::new();

        run(cli.command, &env_file, DEFAULT_SERVICE_UNIT, &mut out).expect("verify");

        assert!(!env_file.exists());
        assert!(out.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_verify_reports_configuration_error() {
        let cli = Cli::try_parse_from(["vyos-cloudinit", "verify", "--environment", "azure"])
            .expect("parse");

        let err = run(
            cli.command,
            Path::new("/nonexistent/vyos-cloudinit.conf"),
            DEFAULT_SERVICE_UNIT,
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("configuration error"));
    }

    #[test]
    fn test_render_prints_env_file_without_writing() {
        // Arrange
        let dir = scratch_dir();
        let env_file = dir.join("vyos-cloudinit.conf");
        let cli = Cli::try_parse_from(["vyos-cloudinit", "render", "--environment", "openstack"])
            .expect("parse");
        let mut out = Vec::new();

        // Act
        run(cli.command, &env_file, DEFAULT_SERVICE_UNIT, &mut out).expect("render");

        // Assert
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.lines().next(), Some(ENV_FILE_HEADER));
        assert!(printed.contains("ENVIRONMENT=\"openstack\"\n"));
        assert!(!env_file.exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_render_invalid_config_prints_nothing() {
        let cli = Cli::try_parse_from(["vyos-cloudinit", "render", "--user-data", "data"])
            .expect("parse");
        let mut out = Vec::new();

        let result = run(
            cli.command,
            Path::new("/nonexistent/vyos-cloudinit.conf"),
            DEFAULT_SERVICE_UNIT,
            &mut out,
        );

        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_commit_dry_run_writes_env_file() {
        let dir = scratch_dir();
        let env_file = dir.join("vyos-cloudinit.conf");
        let cli = Cli::try_parse_from([
            "vyos-cloudinit",
            "commit",
            "--environment",
            "ec2",
            "--dry-run",
        ])
        .expect("parse");

        run(cli.command, &env_file, DEFAULT_SERVICE_UNIT, &mut Vec::new()).expect("commit");

        let written = std::fs::read_to_string(&env_file).expect("env file written");
        assert_eq!(written.lines().nth(1), Some("ENVIRONMENT=\"ec2\""));
        std::fs::remove_dir_all(&dir).ok();
    }
}
