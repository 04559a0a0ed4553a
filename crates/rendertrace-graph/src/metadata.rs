//! Run-level facts supplied by the orchestration layer.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// Revision recorded when the caller does not know which commit was analyzed.
pub const UNKNOWN_REVISION: &str = "unknown";

static GITHUB_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:https?://|git@)?(?:www\.)?github\.com[/:]([^/\s]+)/([^/\s#?]+?)(?:\.git)?(?:[/?#].*)?$")
        .expect("valid GitHub URL regex")
});

/// `owner/repo` of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub owner: String,
    pub repo: String,
}

impl RepositoryRef {
    pub fn parse(url: &str) -> Result<Self, MetadataError> {
        let captures = GITHUB_URL
            .captures(url.trim())
            .ok_or_else(|| MetadataError::InvalidRepositoryUrl(url.to_string()))?;
        Ok(Self {
            owner: captures[1].to_string(),
            repo: captures[2].to_string(),
        })
    }
}

/// Project identity and revision stamped onto an assembled graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    pub project_name: String,
    pub repository_url: String,
    pub commit_hash: String,
}

impl RunMetadata {
    pub fn new(
        project_name: impl Into<String>,
        repository_url: impl Into<String>,
        commit_hash: impl Into<String>,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            repository_url: repository_url.into(),
            commit_hash: commit_hash.into(),
        }
    }

    /// Metadata for a GitHub repository; the project is named after the repo.
    pub fn from_repository_url(url: &str, revision: Option<&str>) -> Result<Self, MetadataError> {
        let repository = RepositoryRef::parse(url)?;
        Ok(Self::new(
            repository.repo,
            url.trim(),
            revision.unwrap_or(UNKNOWN_REVISION),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_github_urls() {
        for url in [
            "https://github.com/acme/storefront",
            "https://github.com/acme/storefront.git",
            "https://github.com/acme/storefront/",
            "github.com/acme/storefront",
            "git@github.com:acme/storefront.git",
            "https://github.com/acme/storefront/tree/main",
            "https://github.com/acme/storefront?tab=readme",
            "https://github.com/acme/storefront.git#main",
        ] {
            let repo = RepositoryRef::parse(url).unwrap();
            assert_eq!(repo.owner, "acme", "{url}");
            assert_eq!(repo.repo, "storefront", "{url}");
        }
    }

    #[test]
    fn rejects_other_hosts() {
        assert_eq!(
            RepositoryRef::parse("https://gitlab.com/acme/storefront"),
            Err(MetadataError::InvalidRepositoryUrl(
                "https://gitlab.com/acme/storefront".into()
            ))
        );
        assert!(RepositoryRef::parse("https://github.com/acme").is_err());
    }

    #[test]
    fn revision_defaults_to_unknown() {
        let run = RunMetadata::from_repository_url("https://github.com/acme/shop.git", None).unwrap();
        assert_eq!(run.project_name, "shop");
        assert_eq!(run.commit_hash, UNKNOWN_REVISION);
        assert_eq!(run.repository_url, "https://github.com/acme/shop.git");

        let run = RunMetadata::from_repository_url("https://github.com/acme/shop", Some("abc123")).unwrap();
        assert_eq!(run.commit_hash, "abc123");
    }
}
