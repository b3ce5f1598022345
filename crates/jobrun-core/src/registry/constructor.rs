use std::{collections::HashMap, fmt, sync::Arc};

use jobrun_model::{LegacyProps, Props};

use crate::job::{Job, JobError, JobHandle};

type Built = Result<JobHandle, JobError>;

type LegacyFn = Box<dyn Fn(&str, LegacyProps) -> Built + Send + Sync>;
type PropsFn = Box<dyn Fn(&str, &Props) -> Built + Send + Sync>;
type MapFn = Box<dyn Fn(&str, HashMap<String, String>) -> Built + Send + Sync>;
type NamedFn = Box<dyn Fn(&str) -> Built + Send + Sync>;
type DefaultFn = Box<dyn Fn() -> Built + Send + Sync>;

/// Construction convention, listed in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `(name, <legacy wrapper>)`.
    Legacy,
    /// `(name, Props)`.
    Props,
    /// `(name, map)`.
    Map,
    /// `(name)`.
    Named,
    /// `()`.
    Default,
}

impl Strategy {
    /// Every strategy, highest priority first.
    pub const PRIORITY: [Strategy; 5] = [
        Strategy::Legacy,
        Strategy::Props,
        Strategy::Map,
        Strategy::Named,
        Strategy::Default,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Legacy => "legacy",
            Strategy::Props => "props",
            Strategy::Map => "map",
            Strategy::Named => "named",
            Strategy::Default => "default",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One constructor a job type exposes.
pub enum Constructor {
    Legacy { wrapper: &'static str, build: LegacyFn },
    Props(PropsFn),
    Map(MapFn),
    Named(NamedFn),
    Default(DefaultFn),
}

impl Constructor {
    pub fn strategy(&self) -> Strategy {
        match self {
            Constructor::Legacy { .. } => Strategy::Legacy,
            Constructor::Props(_) => Strategy::Props,
            Constructor::Map(_) => Strategy::Map,
            Constructor::Named(_) => Strategy::Named,
            Constructor::Default(_) => Strategy::Default,
        }
    }

    /// Human-readable parameter list, e.g. `(String, Props)`.
    pub fn signature(&self) -> String {
        match self {
            Constructor::Legacy { wrapper, .. } => legacy_signature(wrapper),
            Constructor::Props(_) => "(String, Props)".to_string(),
            Constructor::Map(_) => "(String, Map<String, String>)".to_string(),
            Constructor::Named(_) => "(String)".to_string(),
            Constructor::Default(_) => "()".to_string(),
        }
    }
}

impl Constructor {
    /// Call the constructor, shaping `config` the way it expects.
    pub(crate) fn build(&self, job_name: &str, config: &Props) -> Built {
        match self {
            Constructor::Legacy { wrapper, build } => {
                let wrapped = LegacyProps::wrap(*wrapper, None, std::slice::from_ref(config));
                build(job_name, wrapped)
            }
            Constructor::Props(build) => build(job_name, config),
            Constructor::Map(build) => build(job_name, config.to_map()),
            Constructor::Named(build) => build(job_name),
            Constructor::Default(build) => build(),
        }
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Constructor").field(&self.signature()).finish()
    }
}

pub(crate) fn legacy_signature(wrapper: &str) -> String {
    format!("(String, {wrapper})")
}

/// Registration entry: a type name and the constructors it exposes.
///
/// Constructors are stored in registration order; resolution ignores that
/// order and applies [`Strategy::PRIORITY`] instead.
pub struct JobType {
    name: String,
    constructors: Vec<Constructor>,
}

impl JobType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn constructors(&self) -> impl Iterator<Item = &Constructor> {
        self.constructors.iter()
    }

    /// Expose a `(name, <legacy wrapper>)` constructor.
    pub fn with_legacy<J, F>(mut self, wrapper: &'static str, ctor: F) -> Self
    where
        J: Job + 'static,
        F: Fn(&str, LegacyProps) -> Result<J, JobError> + Send + Sync + 'static,
    {
        self.constructors.push(Constructor::Legacy {
            wrapper,
            build: Box::new(move |name: &str, props: LegacyProps| {
                Ok(Arc::new(ctor(name, props)?) as JobHandle)
            }),
        });
        self
    }

    /// Expose a `(name, Props)` constructor.
    pub fn with_props<J, F>(mut self, ctor: F) -> Self
    where
        J: Job + 'static,
        F: Fn(&str, &Props) -> Result<J, JobError> + Send + Sync + 'static,
    {
        self.constructors.push(Constructor::Props(Box::new(move |name: &str, props: &Props| {
            Ok(Arc::new(ctor(name, props)?) as JobHandle)
        })));
        self
    }

    /// Expose a `(name, map)` constructor.
    pub fn with_map<J, F>(mut self, ctor: F) -> Self
    where
        J: Job + 'static,
        F: Fn(&str, HashMap<String, String>) -> Result<J, JobError> + Send + Sync + 'static,
    {
        self.constructors.push(Constructor::Map(Box::new(
            move |name: &str, map: HashMap<String, String>| {
                Ok(Arc::new(ctor(name, map)?) as JobHandle)
            },
        )));
        self
    }

    /// Expose a `(name)` constructor.
    pub fn with_named<J, F>(mut self, ctor: F) -> Self
    where
        J: Job + 'static,
        F: Fn(&str) -> Result<J, JobError> + Send + Sync + 'static,
    {
        self.constructors.push(Constructor::Named(Box::new(move |name: &str| {
            Ok(Arc::new(ctor(name)?) as JobHandle)
        })));
        self
    }

    /// Expose a no-argument constructor.
    pub fn with_default<J, F>(mut self, ctor: F) -> Self
    where
        J: Job + 'static,
        F: Fn() -> Result<J, JobError> + Send + Sync + 'static,
    {
        self.constructors
            .push(Constructor::Default(Box::new(move || Ok(Arc::new(ctor()?) as JobHandle))));
        self
    }

    pub(crate) fn legacy(&self, wrapper: &str) -> Option<&Constructor> {
        self.constructors
            .iter()
            .find(|c| matches!(c, Constructor::Legacy { wrapper: w, .. } if *w == wrapper))
    }

    pub(crate) fn find(&self, strategy: Strategy) -> Option<&Constructor> {
        self.constructors.iter().find(|c| c.strategy() == strategy)
    }

    /// Signatures of every exposed constructor, for diagnostics.
    pub fn signatures(&self) -> Vec<String> {
        self.constructors.iter().map(Constructor::signature).collect()
    }
}

impl fmt::Debug for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobType")
            .field("name", &self.name)
            .field("constructors", &self.signatures())
            .finish()
    }
}
