use std::{io, sync::Arc, thread, time::Duration};

use jobrun_core::LifecycleRunner;
use tokio::{
    runtime::{Builder, Runtime},
    signal::unix::{Signal, SignalKind, signal},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::ExitStatus;

/// How long the primary path gets to wind down after a cancel was invoked.
pub const CANCEL_GRACE: Duration = Duration::from_secs(10);

/// Background thread that turns SIGINT / SIGTERM into one job cancellation
/// followed by process exit with `128 + signal`.
///
/// After the cancel entry point returns, the process exits only once the
/// primary path called [`SignalWatcher::finish`] or [`CANCEL_GRACE`] elapsed,
/// so the job can release what it started (e.g. kill its child process).
pub struct SignalWatcher {
    done: CancellationToken,
    thread: Option<thread::JoinHandle<()>>,
}

impl SignalWatcher {
    /// Install the handlers and start the watcher thread.
    ///
    /// Handlers are registered before this returns, so a signal delivered
    /// afterwards always reaches `runner`.
    pub fn spawn(runner: Arc<LifecycleRunner>) -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let (sigint, sigterm) = {
            let _guard = runtime.enter();
            (signal(SignalKind::interrupt())?, signal(SignalKind::terminate())?)
        };

        let done = CancellationToken::new();
        let thread = thread::Builder::new().name("jobrun-signal".into()).spawn({
            let done = done.clone();
            move || watch(runtime, sigint, sigterm, done, runner)
        })?;

        Ok(Self {
            done,
            thread: Some(thread),
        })
    }

    /// Stop watching once the primary path is over.
    ///
    /// If a signal is already being handled this blocks until that thread
    /// exits the process.
    pub fn finish(mut self) {
        self.done.cancel();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for SignalWatcher {
    fn drop(&mut self) {
        self.done.cancel();
    }
}

fn watch(
    runtime: Runtime,
    mut sigint: Signal,
    mut sigterm: Signal,
    done: CancellationToken,
    runner: Arc<LifecycleRunner>,
) {
    let signo = runtime.block_on({
        let done = done.clone();
        async move {
            tokio::select! {
                _ = done.cancelled() => None,
                _ = sigint.recv() => Some(libc::SIGINT),
                _ = sigterm.recv() => Some(libc::SIGTERM),
            }
        }
    });
    let Some(signo) = signo else {
        debug!("primary path finished; signal watcher stopped");
        return;
    };

    let job = runner.job_name();
    warn!(job = %job, signal = signo, "termination signal received, cancelling job");
    let invoked = match runner.cancel() {
        Ok(outcome) if outcome.was_invoked() => {
            info!(job = %job, outcome = ?outcome, "cancel invoked");
            true
        }
        Ok(outcome) => {
            info!(job = %job, outcome = ?outcome, "nothing to cancel");
            false
        }
        Err(e) => {
            error!(job = %job, error = %e, "job cancellation failed");
            false
        }
    };

    if invoked {
        let settled = runtime.block_on(async {
            tokio::time::timeout(CANCEL_GRACE, done.cancelled())
                .await
                .is_ok()
        });
        if settled {
            debug!(job = %job, "primary path finished after cancel");
        } else {
            warn!(job = %job, grace = ?CANCEL_GRACE, "job still running after cancel; exiting");
        }
    }

    std::process::exit(ExitStatus::Signaled(signo).code());
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;

    #[test]
    fn finish_stops_the_watcher_promptly() {
        let runner = Arc::new(LifecycleRunner::new("nightly"));
        let watcher = SignalWatcher::spawn(runner).unwrap();

        let started = Instant::now();
        watcher.finish();
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
