//! Job tracking for one analysis run.
//!
//! A job walks `pending -> processing -> completed | failed`. While
//! processing, progress only moves forward through the [`Stage`] marks.
//! Terminal states accept no further transitions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::JobError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress marks reported while a job is processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Started,
    Gathering,
    Analyzing,
    Persisting,
}

impl Stage {
    pub fn progress(&self) -> u8 {
        match self {
            Stage::Started => 0,
            Stage::Gathering => 20,
            Stage::Analyzing => 40,
            Stage::Persisting => 80,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Started => "Starting",
            Stage::Gathering => "Gathering sources",
            Stage::Analyzing => "Analyzing components",
            Stage::Persisting => "Writing graph",
        }
    }
}

/// The persisted record of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub repository_url: String,
    pub status: JobStatus,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(repository_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            repository_url: repository_url.into(),
            status: JobStatus::Pending,
            progress: 0,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Move to `stage`, entering `processing` from `pending` if needed.
    pub fn advance(&mut self, stage: Stage) -> Result<(), JobError> {
        self.ensure_open(JobStatus::Processing)?;

        let progress = stage.progress();
        if self.status == JobStatus::Processing && progress < self.progress {
            return Err(JobError::ProgressRegression {
                id: self.id,
                from: self.progress,
                to: progress,
            });
        }

        self.status = JobStatus::Processing;
        self.progress = progress;
        self.touch();
        debug!(job = %self.id, progress, stage = stage.label(), "job advanced");
        Ok(())
    }

    pub fn complete(&mut self) -> Result<(), JobError> {
        self.ensure_open(JobStatus::Completed)?;
        if self.status == JobStatus::Pending {
            return Err(JobError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: JobStatus::Completed,
            });
        }

        self.status = JobStatus::Completed;
        self.progress = 100;
        self.touch();
        info!(job = %self.id, "job completed");
        Ok(())
    }

    /// Record a failure. Progress stays where the job stopped.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), JobError> {
        self.ensure_open(JobStatus::Failed)?;

        let message = message.into();
        warn!(job = %self.id, error = %message, "job failed");
        self.status = JobStatus::Failed;
        self.error = Some(message);
        self.touch();
        Ok(())
    }

    fn ensure_open(&self, to: JobStatus) -> Result<(), JobError> {
        if self.status.is_terminal() {
            return Err(JobError::InvalidTransition {
                id: self.id,
                from: self.status,
                to,
            });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_is_pending() {
        let job = Job::new("https://github.com/acme/shop");
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.progress, 0);
        assert!(job.error.is_none());
    }

    #[test]
    fn test_full_lifecycle() {
        let mut job = Job::new("");
        for stage in [
            Stage::Started,
            Stage::Gathering,
            Stage::Analyzing,
            Stage::Persisting,
        ] {
            job.advance(stage).unwrap();
            assert_eq!(job.status, JobStatus::Processing);
            assert_eq!(job.progress, stage.progress());
        }
        job.complete().unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.progress, 100);
    }

    #[test]
    fn test_progress_cannot_regress() {
        let mut job = Job::new("");
        job.advance(Stage::Analyzing).unwrap();
        let err = job.advance(Stage::Gathering).unwrap_err();
        assert!(matches!(err, JobError::ProgressRegression { from: 40, to: 20, .. }));
    }

    #[test]
    fn test_pending_job_cannot_complete() {
        let mut job = Job::new("");
        assert!(job.complete().is_err());
        assert_eq!(job.status, JobStatus::Pending);
    }

    #[test]
    fn test_terminal_states_are_final() {
        let mut job = Job::new("");
        job.advance(Stage::Started).unwrap();
        job.fail("timed out").unwrap();
        assert_eq!(job.error.as_deref(), Some("timed out"));

        assert!(job.advance(Stage::Persisting).is_err());
        assert!(job.complete().is_err());
        assert!(job.fail("again").is_err());
        assert_eq!(job.status, JobStatus::Failed);
    }

    #[test]
    fn test_job_serializes_camel_case() {
        let mut job = Job::new("https://github.com/acme/shop");
        job.advance(Stage::Gathering).unwrap();
        let json = serde_json::to_value(&job).unwrap();
        assert_eq!(json["status"], "processing");
        assert_eq!(json["progress"], 20);
        assert_eq!(json["repositoryUrl"], "https://github.com/acme/shop");
        assert!(json.get("error").is_none());
    }
}
