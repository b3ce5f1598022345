//! Process shell around a single job: read the environment, resolve the job,
//! run it once, hand generated properties back, and turn the result into an
//! exit code.
mod env;
pub use env::LaunchEnv;

mod shell;
pub use shell::{ExitStatus, Launcher};

#[cfg(unix)]
mod signal;
#[cfg(unix)]
pub use signal::{CANCEL_GRACE, SignalWatcher};
