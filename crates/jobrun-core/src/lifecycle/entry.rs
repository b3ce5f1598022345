use std::fmt;

use jobrun_model::{
    CANCEL_METHOD_KEY, DEFAULT_CANCEL_METHOD, DEFAULT_RUN_METHOD, Props, RUN_METHOD_KEY,
};

use crate::job::{Job, JobError, JobResult};

/// Entry point names configured for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Methods {
    pub run: String,
    pub cancel: String,
}

impl Methods {
    /// Read `method.run` / `method.cancel`, falling back to the conventional names.
    pub fn from_props(props: &Props) -> Self {
        Self {
            run: props.get_or(RUN_METHOD_KEY, DEFAULT_RUN_METHOD).to_string(),
            cancel: props
                .get_or(CANCEL_METHOD_KEY, DEFAULT_CANCEL_METHOD)
                .to_string(),
        }
    }
}

impl Default for Methods {
    fn default() -> Self {
        Self {
            run: DEFAULT_RUN_METHOD.to_string(),
            cancel: DEFAULT_CANCEL_METHOD.to_string(),
        }
    }
}

/// Resolved zero-argument entry point on a job handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryPoint {
    /// [`Job::run`].
    Run,
    /// [`crate::Cancel::cancel`] through the cancel capability.
    Cancel,
    /// Additional method reached through [`Job::call_method`].
    Named(String),
}

impl EntryPoint {
    /// Look up the run entry point called `name`.
    pub fn for_run(job: &dyn Job, name: &str) -> Option<Self> {
        if name == DEFAULT_RUN_METHOD {
            Some(Self::Run)
        } else if job.has_method(name) {
            Some(Self::Named(name.to_string()))
        } else {
            None
        }
    }

    /// Look up the cancel entry point called `name`.
    pub fn for_cancel(job: &dyn Job, name: &str) -> Option<Self> {
        if name == DEFAULT_CANCEL_METHOD && job.cancel_capability().is_some() {
            Some(Self::Cancel)
        } else if job.has_method(name) {
            Some(Self::Named(name.to_string()))
        } else {
            None
        }
    }

    pub fn invoke(&self, job: &dyn Job) -> JobResult {
        match self {
            EntryPoint::Run => job.run(),
            EntryPoint::Cancel => match job.cancel_capability() {
                Some(cancel) => cancel.cancel(),
                None => Err(JobError::msg("cancel capability is not available")),
            },
            EntryPoint::Named(name) => job.call_method(name),
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryPoint::Run => f.write_str(DEFAULT_RUN_METHOD),
            EntryPoint::Cancel => f.write_str(DEFAULT_CANCEL_METHOD),
            EntryPoint::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Cancel;

    struct Custom;

    impl Job for Custom {
        fn run(&self) -> JobResult {
            Err(JobError::msg("run is not the entry point"))
        }

        fn has_method(&self, name: &str) -> bool {
            matches!(name, "execute" | "abort")
        }

        fn call_method(&self, name: &str) -> JobResult {
            match name {
                "execute" | "abort" => Ok(()),
                other => Err(JobError::msg(format!("unknown {other}"))),
            }
        }
    }

    struct Stoppable;

    impl Job for Stoppable {
        fn run(&self) -> JobResult {
            Ok(())
        }

        fn cancel_capability(&self) -> Option<&dyn Cancel> {
            Some(self)
        }
    }

    impl Cancel for Stoppable {
        fn cancel(&self) -> JobResult {
            Ok(())
        }
    }

    #[test]
    fn methods_default_and_override() {
        assert_eq!(Methods::from_props(&Props::new()), Methods::default());

        let props: Props = [("method.run", "execute"), ("method.cancel", "abort")]
            .into_iter()
            .collect();
        let methods = Methods::from_props(&props);
        assert_eq!(methods.run, "execute");
        assert_eq!(methods.cancel, "abort");
    }

    #[test]
    fn run_lookup_uses_conventional_or_named_method() {
        assert_eq!(EntryPoint::for_run(&Custom, "run"), Some(EntryPoint::Run));
        assert_eq!(
            EntryPoint::for_run(&Custom, "execute"),
            Some(EntryPoint::Named("execute".into()))
        );
        assert_eq!(EntryPoint::for_run(&Custom, "missing"), None);
    }

    #[test]
    fn cancel_lookup_requires_capability_or_named_method() {
        assert_eq!(EntryPoint::for_cancel(&Custom, "cancel"), None);
        assert_eq!(
            EntryPoint::for_cancel(&Custom, "abort"),
            Some(EntryPoint::Named("abort".into()))
        );
        assert_eq!(
            EntryPoint::for_cancel(&Stoppable, "cancel"),
            Some(EntryPoint::Cancel)
        );
        assert!(EntryPoint::Cancel.invoke(&Stoppable).is_ok());
        assert!(EntryPoint::Cancel.invoke(&Custom).is_err());
    }

    #[test]
    fn display_names_the_method() {
        assert_eq!(EntryPoint::Run.to_string(), "run");
        assert_eq!(EntryPoint::Named("execute".into()).to_string(), "execute");
    }
}
