mod error;
pub use error::ExecError;

mod echo;
pub use echo::{ECHO_JOB, EchoJob};

#[cfg(feature = "command")]
pub mod command;

use jobrun_core::{JobRegistry, ResolveError};

/// Register every job type shipped with the launcher.
///
/// - [`ECHO_JOB`]: `(name)` constructor;
/// - [`command::COMMAND_JOB`]: `(name, Props)` constructor (feature `command`).
pub fn register_builtin_jobs(registry: &mut JobRegistry) -> Result<(), ResolveError> {
    echo::register_echo_job(registry)?;
    #[cfg(feature = "command")]
    command::register_command_job(registry)?;
    Ok(())
}
