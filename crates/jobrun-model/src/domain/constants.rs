//! Well-known keys and environment variable names.
//!
//! The scheduler that starts the launcher and the job implementations both
//! depend on these exact strings, so they live in one place.

/// Property naming the job type to resolve in the registry.
pub const JOB_CLASS_KEY: &str = "job.class";

/// Property overriding the run entry point name.
pub const RUN_METHOD_KEY: &str = "method.run";

/// Property overriding the cancel entry point name.
pub const CANCEL_METHOD_KEY: &str = "method.cancel";

/// Conventional run entry point.
pub const DEFAULT_RUN_METHOD: &str = "run";

/// Conventional cancel entry point.
pub const DEFAULT_CANCEL_METHOD: &str = "cancel";

/// Environment variable carrying the job name.
pub const JOB_NAME_ENV: &str = "JOB_NAME";

/// Environment variable carrying the input property file path.
pub const JOB_PROP_FILE_ENV: &str = "JOB_PROP_FILE";

/// Environment variable carrying the output property file path (optional).
pub const JOB_OUTPUT_PROP_FILE_ENV: &str = "JOB_OUTPUT_PROP_FILE";

/// Legacy configuration wrapper type names, in resolution priority order.
///
/// Older job implementations take one of these instead of plain [`crate::Props`].
pub const LEGACY_WRAPPER_TYPES: &[&str] = &["jobrun.utils.Props", "jobrun.common.utils.Props"];
