//! Job that runs an external command.
//!
//! The command line comes from the job configuration:
//! - `command`: program to execute (required);
//! - `command.args`: whitespace-separated arguments;
//! - `command.cwd`: working directory;
//! - `command.fail_on_non_zero`: `true` (default) or `false`;
//! - `env.<NAME>`: extra environment variables for the child.
mod config;
mod job;
mod output;

pub use config::{
    ARGS_KEY, COMMAND_KEY, CWD_KEY, CommandConfig, ENV_PREFIX, FAIL_ON_NON_ZERO_KEY,
};
pub use job::{CommandJob, EXIT_CODE_KEY};
pub use output::LogConfig;

use jobrun_core::{JobRegistry, JobType, ResolveError};
use jobrun_model::Props;

/// Registry name of [`CommandJob`].
pub const COMMAND_JOB: &str = "CommandJob";

pub(crate) fn register_command_job(registry: &mut JobRegistry) -> Result<(), ResolveError> {
    registry.register(
        JobType::new(COMMAND_JOB)
            .with_props(|name: &str, props: &Props| Ok(CommandJob::from_props(name, props)?)),
    )
}
