//! Job registry that maps type names to the constructors a job implementation exposes.
//!
//! Resolution walks [`Strategy::PRIORITY`] and instantiates the job with the first
//! convention the type supports. Implementations never declare which convention
//! they use, so the order decides which configuration representation they receive.
mod constructor;
pub use constructor::{Constructor, JobType, Strategy};

mod error;
pub use error::ResolveError;

use std::{collections::BTreeMap, fmt};

use jobrun_model::{LEGACY_WRAPPER_TYPES, Props};
use tracing::{debug, error, info, instrument};

use crate::job::JobHandle;
use constructor::legacy_signature;

/// Successfully constructed job plus the convention that built it.
pub struct Resolved {
    pub handle: JobHandle,
    pub strategy: Strategy,
    pub signature: String,
}

impl fmt::Debug for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("strategy", &self.strategy)
            .field("signature", &self.signature)
            .finish()
    }
}

/// Registry of job types known to this launcher.
pub struct JobRegistry {
    types: BTreeMap<String, JobType>,
    /// Legacy wrapper types that can wrap raw configuration.
    wrappers: Vec<&'static str>,
}

impl Default for JobRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl JobRegistry {
    /// Create an empty registry with every legacy wrapper type loaded.
    pub fn new() -> Self {
        Self {
            types: BTreeMap::new(),
            wrappers: LEGACY_WRAPPER_TYPES.to_vec(),
        }
    }

    /// Create an empty registry without any legacy wrapper type.
    pub fn bare() -> Self {
        Self {
            types: BTreeMap::new(),
            wrappers: Vec::new(),
        }
    }

    /// Make a legacy wrapper type available for resolution.
    ///
    /// `wrapper` must be one of [`LEGACY_WRAPPER_TYPES`]; they are consulted in
    /// that order regardless of load order.
    pub fn load_legacy_wrapper(&mut self, wrapper: &str) -> Result<(), ResolveError> {
        let known = LEGACY_WRAPPER_TYPES
            .iter()
            .copied()
            .find(|w| *w == wrapper)
            .ok_or_else(|| ResolveError::UnknownWrapper(wrapper.to_string()))?;
        if !self.wrappers.contains(&known) {
            self.wrappers.push(known);
        }
        Ok(())
    }

    pub fn is_wrapper_loaded(&self, wrapper: &str) -> bool {
        self.wrappers.iter().any(|w| *w == wrapper)
    }

    /// Register a job type.
    pub fn register(&mut self, job_type: JobType) -> Result<(), ResolveError> {
        let name = job_type.name().to_string();
        if self.types.contains_key(&name) {
            return Err(ResolveError::DuplicateType(name));
        }
        debug!(class = %name, constructors = ?job_type.signatures(), "job type registered");
        self.types.insert(name, job_type);
        Ok(())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Instantiate `type_name` for `job_name` using the highest-priority matching constructor.
    ///
    /// Order:
    /// 1. `(name, legacy wrapper)` for the first entry of [`LEGACY_WRAPPER_TYPES`]
    ///    that is loaded and accepted by the type;
    /// 2. `(name, Props)`;
    /// 3. `(name, map)` with the config copied into a `HashMap`;
    /// 4. `(name)`;
    /// 5. `()`.
    #[instrument(level = "debug", skip(self, config), fields(job = %job_name, class = %type_name))]
    pub fn resolve(
        &self,
        job_name: &str,
        type_name: &str,
        config: &Props,
    ) -> Result<Resolved, ResolveError> {
        let job_type = self
            .types
            .get(type_name)
            .ok_or_else(|| ResolveError::TypeNotFound(type_name.to_string()))?;

        let mut attempted = Vec::new();
        for strategy in Strategy::PRIORITY {
            if strategy == Strategy::Legacy {
                for wrapper in LEGACY_WRAPPER_TYPES.iter().copied() {
                    attempted.push(legacy_signature(wrapper));
                    if !self.is_wrapper_loaded(wrapper) {
                        continue;
                    }
                    if let Some(ctor) = job_type.legacy(wrapper) {
                        return instantiate(job_name, job_type, ctor, config);
                    }
                }
                continue;
            }

            match job_type.find(strategy) {
                Some(ctor) => return instantiate(job_name, job_type, ctor, config),
                None => attempted.push(signature_of(strategy)),
            }
        }

        let available = job_type.signatures();
        error!(
            class = %type_name,
            attempted = ?attempted,
            available = ?available,
            "constructor not found"
        );
        Err(ResolveError::NoMatchingConstructor {
            class: type_name.to_string(),
            attempted,
            available,
        })
    }
}

fn signature_of(strategy: Strategy) -> String {
    match strategy {
        Strategy::Legacy => "(String, <legacy props>)".to_string(),
        Strategy::Props => "(String, Props)".to_string(),
        Strategy::Map => "(String, Map<String, String>)".to_string(),
        Strategy::Named => "(String)".to_string(),
        Strategy::Default => "()".to_string(),
    }
}

fn instantiate(
    job_name: &str,
    job_type: &JobType,
    ctor: &Constructor,
    config: &Props,
) -> Result<Resolved, ResolveError> {
    let signature = ctor.signature();
    info!(job = %job_name, class = %job_type.name(), constructor = %signature, "constructor found");

    match ctor.build(job_name, config) {
        Ok(handle) => Ok(Resolved {
            handle,
            strategy: ctor.strategy(),
            signature,
        }),
        Err(source) => Err(ResolveError::Instantiation {
            class: job_type.name().to_string(),
            signature,
            source,
        }),
    }
}
