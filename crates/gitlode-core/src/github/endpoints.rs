//! URL builders for the three GitHub endpoints the pipeline uses.

use url::Url;

use crate::error::{Error, Result};

/// Endpoints for one repository under an API base URL.
///
/// Every dynamic piece (owner, repo, branch candidate, path segment, sha) is
/// pushed as its own path segment, so `/` and `%` inside a branch name are
/// percent-encoded rather than splitting the path.
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    base: Url,
    owner: String,
    repo: String,
}

impl ApiEndpoints {
    pub fn new(api_base_url: &str, owner: &str, repo: &str) -> Result<Self> {
        let base = Url::parse(api_base_url)
            .map_err(|e| Error::Parse(format!("API base URL {:?}: {}", api_base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::Parse(format!(
                "API base URL {:?} cannot carry a path",
                api_base_url
            )));
        }
        Ok(Self {
            base,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    fn repo_url<'a>(&self, tail: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", self.owner.as_str(), self.repo.as_str()])
                .extend(tail);
        }
        url
    }

    /// `GET /repos/{owner}/{repo}/branches/{candidate}`.
    pub fn branch(&self, candidate: &str) -> String {
        self.repo_url(["branches", candidate]).into()
    }

    /// `GET /repos/{owner}/{repo}/contents/{path}?ref={branch}`. An empty `path` lists the root.
    pub fn contents(&self, path: &str, branch: &str) -> String {
        let tail = std::iter::once("contents").chain(path.split('/').filter(|s| !s.is_empty()));
        let mut url = self.repo_url(tail);
        url.query_pairs_mut().append_pair("ref", branch);
        url.into()
    }

    /// `GET /repos/{owner}/{repo}/git/blobs/{sha}`.
    pub fn blob(&self, sha: &str) -> String {
        self.repo_url(["git", "blobs", sha]).into()
    }
}
