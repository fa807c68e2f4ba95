//! Execution target for task commands: local machine or an SSH host.

use std::path::Path;
use std::process::Command;

use crate::error::{CommandFailedDetails, CommandSpawnFailedDetails, Error, Result};
use crate::io::expand_home;
use crate::runner::{CommandRunner, CommandSpec, RunMode};

const DEFAULT_SSH_PORT: u16 = 22;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshTarget {
    pub host: String,
    pub user: Option<String>,
    pub port: u16,
    pub identity_file: Option<String>,
}

impl SshTarget {
    /// Parse `[user@]host[:port]`.
    pub fn parse(spec: &str, identity_file: Option<&str>) -> Result<Self> {
        let invalid = |problem: &str| {
            Error::validation_invalid_argument("host", problem, Some(spec.to_string()))
        };

        let (user, rest) = match spec.split_once('@') {
            Some((user, rest)) if !user.is_empty() => (Some(user.to_string()), rest),
            Some(_) => return Err(invalid("Empty user before '@'")),
            None => (None, spec),
        };

        let parse_port = |port: &str| {
            port.parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or_else(|| invalid("Port must be a number between 1 and 65535"))
        };

        // `[v6addr]:port` carries a port; a bare IPv6 address never does.
        let (host, port) = if let Some(bracketed) = rest.strip_prefix('[') {
            let (host, after) = bracketed
                .split_once(']')
                .ok_or_else(|| invalid("Unclosed '[' in host"))?;
            match after.strip_prefix(':') {
                Some(port) => (host, parse_port(port)?),
                None if after.is_empty() => (host, DEFAULT_SSH_PORT),
                None => return Err(invalid("Expected ':port' after ']'")),
            }
        } else if rest.matches(':').count() == 1 {
            match rest.rsplit_once(':') {
                Some((host, port)) => (host, parse_port(port)?),
                None => (rest, DEFAULT_SSH_PORT),
            }
        } else {
            (rest, DEFAULT_SSH_PORT)
        };

        if host.trim().is_empty() {
            return Err(invalid("Missing host name"));
        }

        let identity_file = match identity_file {
            Some(path) if !path.is_empty() => {
                let expanded = expand_home(path);
                if !Path::new(&expanded).exists() {
                    return Err(Error::config_invalid_value(
                        "identityFile",
                        Some(expanded.display().to_string()),
                        "SSH identity file not found",
                    ));
                }
                Some(expanded.display().to_string())
            }
            _ => None,
        };

        Ok(Self {
            host: host.to_string(),
            user,
            port,
            identity_file,
        })
    }

    fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{}@{}", user, self.host),
            None => self.host.clone(),
        }
    }

    fn build_ssh_args(&self, spec: &CommandSpec, mode: RunMode) -> Vec<String> {
        let mut args = Vec::new();

        if let Some(identity_file) = &self.identity_file {
            args.push("-i".to_string());
            args.push(identity_file.clone());
        }

        if self.port != DEFAULT_SSH_PORT {
            args.push("-p".to_string());
            args.push(self.port.to_string());
        }

        match mode {
            // Batch commands must not hang on a password prompt or dead link.
            RunMode::Batch => args.extend([
                "-o".to_string(),
                "BatchMode=yes".to_string(),
                "-o".to_string(),
                "ConnectTimeout=10".to_string(),
                "-o".to_string(),
                "ServerAliveInterval=15".to_string(),
            ]),
            RunMode::Interactive => args.push("-t".to_string()),
        }

        args.push(self.destination());
        args.push(spec.to_command_line());
        args
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Local,
    Ssh(SshTarget),
}

impl Target {
    /// Local unless a host is given; loopback hosts also run locally.
    pub fn from_host(host: Option<&str>, identity_file: Option<&str>) -> Result<Self> {
        match host.map(str::trim).filter(|h| !h.is_empty()) {
            None => Ok(Target::Local),
            Some(spec) => {
                let ssh = SshTarget::parse(spec, identity_file)?;
                if is_local_host(&ssh.host) {
                    log_status!("ssh", "Host '{}' is localhost, using local execution", ssh.host);
                    Ok(Target::Local)
                } else {
                    Ok(Target::Ssh(ssh))
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Target::Local => "local".to_string(),
            Target::Ssh(ssh) if ssh.host.contains(':') => {
                let user = ssh.user.as_ref().map(|u| format!("{}@", u)).unwrap_or_default();
                format!("ssh://{}[{}]:{}", user, ssh.host, ssh.port)
            }
            Target::Ssh(ssh) => format!("ssh://{}:{}", ssh.destination(), ssh.port),
        }
    }

    fn command_for(&self, spec: &CommandSpec, mode: RunMode) -> Command {
        match self {
            Target::Local => {
                let mut cmd = Command::new(&spec.program);
                cmd.args(&spec.args);
                cmd
            }
            Target::Ssh(ssh) => {
                let mut cmd = Command::new("ssh");
                cmd.args(ssh.build_ssh_args(spec, mode));
                cmd
            }
        }
    }
}

/// Check if a host address refers to the local machine.
pub fn is_local_host(host: &str) -> bool {
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

/// The runner handed to every task: a target, a dry-run switch, and the
/// commands issued so far.
#[derive(Debug)]
pub struct Context {
    target: Target,
    dry_run: bool,
    issued: Vec<CommandSpec>,
}

impl Context {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            dry_run: false,
            issued: Vec::new(),
        }
    }

    pub fn local() -> Self {
        Self::new(Target::Local)
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Command lines in the order they were issued (or would have been).
    pub fn issued(&self) -> Vec<String> {
        self.issued.iter().map(CommandSpec::to_command_line).collect()
    }
}

impl CommandRunner for Context {
    fn run(&mut self, spec: &CommandSpec, mode: RunMode) -> Result<()> {
        self.issued.push(spec.clone());

        if self.dry_run {
            eprintln!("(dry run) {}", spec);
            return Ok(());
        }

        let status = self
            .target
            .command_for(spec, mode)
            .status()
            .map_err(|e| {
                Error::command_spawn_failed(CommandSpawnFailedDetails {
                    command: spec.to_command_line(),
                    error: e.to_string(),
                    target: self.target.describe(),
                })
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::command_failed(CommandFailedDetails {
                command: spec.to_command_line(),
                exit_code: status.code().unwrap_or(-1),
                target: self.target.describe(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn parse_host_only() {
        let ssh = SshTarget::parse("build.example.org", None).unwrap();
        assert_eq!(ssh.host, "build.example.org");
        assert_eq!(ssh.user, None);
        assert_eq!(ssh.port, 22);
    }

    #[test]
    fn parse_user_host_port() {
        let ssh = SshTarget::parse("deploy@build.example.org:2222", None).unwrap();
        assert_eq!(ssh.user.as_deref(), Some("deploy"));
        assert_eq!(ssh.host, "build.example.org");
        assert_eq!(ssh.port, 2222);
    }

    #[test]
    fn parse_rejects_bad_port() {
        let err = SshTarget::parse("host:ssh", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationInvalidArgument);
    }

    #[test]
    fn parse_bracketed_ipv6_with_port() {
        let ssh = SshTarget::parse("deploy@[fe80::1]:2222", None).unwrap();
        assert_eq!(ssh.host, "fe80::1");
        assert_eq!(ssh.port, 2222);

        let ssh = SshTarget::parse("[fe80::1]", None).unwrap();
        assert_eq!(ssh.host, "fe80::1");
        assert_eq!(ssh.port, 22);

        let ssh = SshTarget::parse("fe80::1", None).unwrap();
        assert_eq!(ssh.host, "fe80::1");
        assert_eq!(ssh.port, 22);

        let target = Target::Ssh(SshTarget::parse("deploy@[fe80::1]:2222", None).unwrap());
        assert_eq!(target.describe(), "ssh://deploy@[fe80::1]:2222");
    }

    #[test]
    fn parse_rejects_malformed_brackets() {
        for spec in ["[fe80::1", "[fe80::1]2222", "[fe80::1]:", "box:0"] {
            let err = SshTarget::parse(spec, None).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationInvalidArgument, "{}", spec);
        }
    }

    #[test]
    fn parse_rejects_missing_identity_file() {
        let err = SshTarget::parse("host", Some("/nonexistent/id_ed25519")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    }

    #[test]
    fn loopback_host_is_local() {
        assert_eq!(Target::from_host(Some("localhost"), None).unwrap(), Target::Local);
        assert_eq!(Target::from_host(Some("::1"), None).unwrap(), Target::Local);
        assert_eq!(Target::from_host(Some("[::1]:2222"), None).unwrap(), Target::Local);
        assert_eq!(Target::from_host(None, None).unwrap(), Target::Local);
        assert_eq!(Target::from_host(Some("  "), None).unwrap(), Target::Local);
    }

    #[test]
    fn batch_ssh_args_quote_remote_command() {
        let ssh = SshTarget::parse("deploy@box:2222", None).unwrap();
        let spec = CommandSpec::new("git").args(["checkout", "it's"]);
        let args = ssh.build_ssh_args(&spec, RunMode::Batch);

        assert_eq!(&args[0..2], &["-p", "2222"]);
        assert!(args.contains(&"BatchMode=yes".to_string()));
        assert_eq!(args[args.len() - 2], "deploy@box");
        assert_eq!(args[args.len() - 1], "git checkout 'it'\\''s'");
    }

    #[test]
    fn interactive_ssh_args_request_tty() {
        let ssh = SshTarget::parse("box", None).unwrap();
        let spec = CommandSpec::new("docker").args(["exec", "-ti", "web_1", "/bin/bash"]);
        let args = ssh.build_ssh_args(&spec, RunMode::Interactive);

        assert_eq!(args, vec!["-t", "box", "docker exec -ti web_1 /bin/bash"]);
    }

    #[test]
    fn dry_run_records_without_spawning() {
        let mut ctx = Context::local().with_dry_run(true);
        let spec = CommandSpec::new("definitely-not-a-real-program-xyz");
        ctx.run(&spec, RunMode::Batch).unwrap();
        assert_eq!(ctx.issued(), vec!["definitely-not-a-real-program-xyz"]);
    }

    #[cfg(unix)]
    #[test]
    fn local_success_and_failure() {
        let mut ctx = Context::local();
        ctx.run(&CommandSpec::new("true"), RunMode::Batch).unwrap();

        let err = ctx
            .run(&CommandSpec::new("sh").args(["-c", "exit 3"]), RunMode::Batch)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CommandFailed);
        assert_eq!(err.details["exitCode"], 3);
        assert_eq!(err.details["target"], "local");
    }

    #[test]
    fn missing_program_is_spawn_failure() {
        let mut ctx = Context::local();
        let err = ctx
            .run(&CommandSpec::new("definitely-not-a-real-program-xyz"), RunMode::Batch)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CommandSpawnFailed);
    }
}
