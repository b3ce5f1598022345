use std::{fmt, path::PathBuf};

use jobrun_model::Props;
use tracing::trace;

use crate::ExecError;

pub const COMMAND_KEY: &str = "command";
pub const ARGS_KEY: &str = "command.args";
pub const CWD_KEY: &str = "command.cwd";
pub const FAIL_ON_NON_ZERO_KEY: &str = "command.fail_on_non_zero";
pub const ENV_PREFIX: &str = "env.";

/// Resolved command line for a [`CommandJob`](super::CommandJob).
#[derive(Debug, Clone)]
pub struct CommandConfig {
    /// Log identifier, the job name.
    pub(crate) run_id: String,
    pub(crate) command: String,
    pub(crate) args: Vec<String>,
    /// Variables added on top of the inherited environment.
    pub(crate) env: Props,
    /// If `None`, the child inherits the launcher working directory.
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) fail_on_non_zero: bool,
}

impl CommandConfig {
    pub fn from_props(job_name: &str, props: &Props) -> Result<Self, ExecError> {
        let command = props
            .get(COMMAND_KEY)
            .ok_or_else(|| ExecError::InvalidConfig(format!("missing '{COMMAND_KEY}'")))?
            .to_string();

        let args = props
            .get(ARGS_KEY)
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let env = props
            .iter()
            .filter_map(|kv| {
                kv.key()
                    .strip_prefix(ENV_PREFIX)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name, kv.value()))
            })
            .collect();

        let fail_on_non_zero = match props.get(FAIL_ON_NON_ZERO_KEY).map(str::trim) {
            None => true,
            Some(v) if v.eq_ignore_ascii_case("true") => true,
            Some(v) if v.eq_ignore_ascii_case("false") => false,
            Some(other) => {
                return Err(ExecError::InvalidConfig(format!(
                    "'{FAIL_ON_NON_ZERO_KEY}' must be true or false, got '{other}'"
                )));
            }
        };

        let cfg = Self {
            run_id: job_name.to_string(),
            command,
            args,
            env,
            cwd: props.get(CWD_KEY).map(PathBuf::from),
            fail_on_non_zero,
        };
        cfg.validate()?;
        cfg.trace_state();
        Ok(cfg)
    }

    /// Rules:
    /// - `command` is not empty or whitespace-only.
    pub fn validate(&self) -> Result<(), ExecError> {
        if self.command.trim().is_empty() {
            return Err(ExecError::InvalidConfig("command is empty".into()));
        }
        Ok(())
    }

    pub fn trace_state(&self) {
        trace!(
            job = %self.run_id,
            command = %self.command,
            args = ?self.args,
            cwd = ?self.cwd,
            env_len = self.env.len(),
            fail_on_non_zero = self.fail_on_non_zero,
            "command config resolved"
        );
    }
}

impl fmt::Display for CommandConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CommandConfig(cmd='{}', args={}, env={}, cwd={:?}, fail_on_non_zero={})",
            self.command,
            self.args.len(),
            self.env.len(),
            self.cwd,
            self.fail_on_non_zero,
        )
    }
}
