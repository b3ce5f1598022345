//! Hand-off of generated properties to the scheduler.
//!
//! A job without the generated-properties capability produces an empty set;
//! that is expected for older implementations and is not an error. A capability
//! whose result can not be converted is malformed and fails the export.
use std::path::{Path, PathBuf};

use jobrun_model::{Props, format::write_output};
use thiserror::Error;
use tracing::{info, instrument};

use crate::job::{Job, JobError};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("generated properties of job '{job}' could not be converted: {source}")]
    Malformed {
        job: String,
        #[source]
        source: JobError,
    },

    #[error("unable to store output properties to {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// What the exporter did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Properties were written to the destination.
    Written { path: PathBuf, entries: usize },
    /// No destination was configured; nothing was written.
    Skipped { entries: usize },
}

/// Writes generated properties to the optional output destination.
#[derive(Debug, Clone, Default)]
pub struct OutputExporter {
    destination: Option<PathBuf>,
}

impl OutputExporter {
    pub fn new(destination: Option<PathBuf>) -> Self {
        Self { destination }
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    /// Collect generated properties from `job`.
    pub fn collect(job_name: &str, job: &dyn Job) -> Result<Props, ExportError> {
        let Some(capability) = job.generated_properties_capability() else {
            info!(
                job = %job_name,
                "job does not expose generated properties, using empty props"
            );
            return Ok(Props::new());
        };

        match capability.generated_properties() {
            Some(generated) => {
                generated
                    .to_properties()
                    .map_err(|source| ExportError::Malformed {
                        job: job_name.to_string(),
                        source,
                    })
            }
            None => Ok(Props::new()),
        }
    }

    /// Collect generated properties and write them if a destination is set.
    #[instrument(level = "debug", skip(self, job), fields(job = %job_name))]
    pub fn export(&self, job_name: &str, job: &dyn Job) -> Result<ExportOutcome, ExportError> {
        let props = Self::collect(job_name, job)?;

        if props.is_empty() {
            info!(job = %job_name, "no generated properties");
        }
        for kv in props.iter() {
            info!(job = %job_name, key = %kv.key(), value = %kv.value(), "generated property");
        }

        let Some(path) = &self.destination else {
            return Ok(ExportOutcome::Skipped {
                entries: props.len(),
            });
        };

        info!(job = %job_name, path = %path.display(), "writing generated properties");
        write_output(path, &props).map_err(|e| ExportError::Write {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        Ok(ExportOutcome::Written {
            path: path.clone(),
            entries: props.len(),
        })
    }
}
