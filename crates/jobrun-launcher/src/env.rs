use std::path::PathBuf;

use jobrun_model::{JOB_NAME_ENV, JOB_OUTPUT_PROP_FILE_ENV, JOB_PROP_FILE_ENV};

/// Job name used when the scheduler did not provide one.
pub const UNNAMED_JOB: &str = "unnamed";

/// Launch inputs captured from the environment once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchEnv {
    pub job_name: String,
    /// Input property file; a missing value is a config error at load time.
    pub prop_file: Option<PathBuf>,
    /// Output destination; `None` skips writing generated properties.
    pub output_file: Option<PathBuf>,
}

impl LaunchEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            job_name: get(JOB_NAME_ENV).unwrap_or_else(|| UNNAMED_JOB.to_string()),
            prop_file: get(JOB_PROP_FILE_ENV).map(PathBuf::from),
            output_file: get(JOB_OUTPUT_PROP_FILE_ENV).map(PathBuf::from),
        }
    }
}
