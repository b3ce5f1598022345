use std::sync::OnceLock;

use jobrun_core::{GeneratedProperties, Job, JobRegistry, JobResult, JobType, ResolveError, ToProperties};
use jobrun_model::Props;
use tracing::info;

/// Registry name of [`EchoJob`].
pub const ECHO_JOB: &str = "EchoJob";

/// Minimal job: logs its name and reports `status=ok`.
///
/// Useful to check the launcher wiring without running anything real.
#[derive(Debug)]
pub struct EchoJob {
    name: String,
    generated: OnceLock<Props>,
}

impl EchoJob {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            generated: OnceLock::new(),
        }
    }
}

impl Job for EchoJob {
    fn run(&self) -> JobResult {
        info!(job = %self.name, "echo");
        let props: Props = [("status", "ok"), ("job.name", self.name.as_str())]
            .into_iter()
            .collect();
        let _ = self.generated.set(props);
        Ok(())
    }

    fn generated_properties_capability(&self) -> Option<&dyn GeneratedProperties> {
        Some(self)
    }
}

impl GeneratedProperties for EchoJob {
    fn generated_properties(&self) -> Option<Box<dyn ToProperties>> {
        self.generated
            .get()
            .map(|p| Box::new(p.clone()) as Box<dyn ToProperties>)
    }
}

pub(crate) fn register_echo_job(registry: &mut JobRegistry) -> Result<(), ResolveError> {
    registry.register(JobType::new(ECHO_JOB).with_named(|name| Ok(EchoJob::new(name))))
}
