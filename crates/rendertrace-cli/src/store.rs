//! Filesystem persistence for graphs and job records.
//!
//! Layout under the output directory:
//!
//! ```text
//! <out_dir>/<job_id>.json       GraphData
//! <out_dir>/<job_id>.job.json   final Job record
//! ```

use std::path::{Path, PathBuf};

use rendertrace_graph::GraphData;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::job::Job;

#[derive(Debug, Clone)]
pub struct GraphStore {
    root: PathBuf,
}

impl GraphStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn graph_path(&self, job_id: Uuid) -> PathBuf {
        self.root.join(format!("{job_id}.json"))
    }

    pub fn job_path(&self, job_id: Uuid) -> PathBuf {
        self.root.join(format!("{job_id}.job.json"))
    }

    /// Write the graph for `job_id`, creating the output directory.
    pub async fn save_graph(&self, job_id: Uuid, graph: &GraphData, pretty: bool) -> Result<PathBuf> {
        let json = if pretty {
            graph.to_pretty_json()?
        } else {
            graph.to_json()?
        };
        let path = self.graph_path(job_id);
        self.write(&path, json).await?;
        Ok(path)
    }

    pub async fn save_job(&self, job: &Job) -> Result<PathBuf> {
        let json = serde_json::to_string_pretty(job)?;
        let path = self.job_path(job.id);
        self.write(&path, json).await?;
        Ok(path)
    }

    async fn write(&self, path: &Path, contents: String) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        fs::write(path, contents.into_bytes()).await?;
        debug!(path = %path.display(), "wrote output");
        Ok(())
    }
}
