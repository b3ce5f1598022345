//! Capability surface a job implementation exposes to the launcher.
//!
//! Every job supports [`Job::run`]. Cancellation and generated properties are
//! optional capabilities: an implementation opts in by returning `Some` from
//! [`Job::cancel_capability`] / [`Job::generated_properties_capability`].
mod error;
pub use error::{JobError, JobResult};

use std::{collections::BTreeMap, sync::Arc};

use jobrun_model::{LegacyProps, Props};

/// Shared handle to a constructed job.
///
/// The main path runs the job while the signal path may cancel it, so all
/// entry points take `&self`.
pub type JobHandle = Arc<dyn Job>;

/// User-supplied job implementation.
pub trait Job: Send + Sync {
    /// Conventional run entry point.
    fn run(&self) -> JobResult;

    /// Returns `true` if `name` is an additional zero-argument entry point.
    ///
    /// Used when `method.run` / `method.cancel` name something other than the
    /// conventional entry points.
    fn has_method(&self, _name: &str) -> bool {
        false
    }

    /// Invoke an additional entry point previously reported by [`Job::has_method`].
    fn call_method(&self, name: &str) -> JobResult {
        Err(JobError::Failed(format!("method '{name}' is not implemented")))
    }

    /// Cancellation capability, if supported.
    fn cancel_capability(&self) -> Option<&dyn Cancel> {
        None
    }

    /// Generated-properties capability, if supported.
    fn generated_properties_capability(&self) -> Option<&dyn GeneratedProperties> {
        None
    }
}

/// Conventional cancel entry point.
///
/// Called from the signal path while `run` may still be executing.
pub trait Cancel: Send + Sync {
    fn cancel(&self) -> JobResult;
}

/// Properties a job hands back to the scheduler after it finished.
pub trait GeneratedProperties: Send + Sync {
    /// `None` means the job produced nothing; it is treated as an empty set.
    fn generated_properties(&self) -> Option<Box<dyn ToProperties>>;
}

/// Conversion into the flat ordered representation written to the output file.
pub trait ToProperties {
    fn to_properties(&self) -> Result<Props, JobError>;
}

impl ToProperties for Props {
    fn to_properties(&self) -> Result<Props, JobError> {
        Ok(self.clone())
    }
}

impl ToProperties for LegacyProps {
    fn to_properties(&self) -> Result<Props, JobError> {
        Ok(LegacyProps::to_properties(self))
    }
}

impl ToProperties for BTreeMap<String, String> {
    fn to_properties(&self) -> Result<Props, JobError> {
        Ok(self.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobrun_model::LEGACY_WRAPPER_TYPES;

    struct Plain;

    impl Job for Plain {
        fn run(&self) -> JobResult {
            Ok(())
        }
    }

    #[test]
    fn optional_capabilities_default_to_absent() {
        let job = Plain;
        assert!(job.cancel_capability().is_none());
        assert!(job.generated_properties_capability().is_none());
        assert!(!job.has_method("execute"));
        assert!(job.call_method("execute").is_err());
    }

    #[test]
    fn legacy_props_flatten_through_to_properties() {
        let layer: Props = [("a", "1")].into_iter().collect();
        let legacy = LegacyProps::wrap(LEGACY_WRAPPER_TYPES[0], None, &[layer.clone()]);

        let boxed: Box<dyn ToProperties> = Box::new(legacy);
        assert_eq!(boxed.to_properties().unwrap(), layer);
    }

    #[test]
    fn btreemap_converts_in_key_order() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), "2".to_string());
        map.insert("a".to_string(), "1".to_string());

        let props = map.to_properties().unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
