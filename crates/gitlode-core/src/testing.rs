//! In-memory GitHub fakes shared by the unit tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::json;

use crate::github::{ApiEndpoints, GitHubClient, HttpResponse, Transport, TransportError};
use crate::retry::RetryPolicy;

/// Answers from a URL → response table; unknown URLs get 404. Records every call in order.
#[derive(Default)]
pub(crate) struct FakeTransport {
    routes: Mutex<HashMap<String, HttpResponse>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub(crate) fn respond(&self, url: impl Into<String>, status: u32, body: impl Into<Vec<u8>>) {
        self.routes.lock().unwrap().insert(
            url.into(),
            HttpResponse {
                status,
                body: body.into(),
            },
        );
    }

    pub(crate) fn respond_json(&self, url: impl Into<String>, status: u32, value: serde_json::Value) {
        self.respond(url, status, value.to_string());
    }

    pub(crate) fn delay(&self, url: impl Into<String>, d: Duration) {
        self.delays.lock().unwrap().insert(url.into(), d);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_containing(&self, needle: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|u| u.contains(needle))
            .collect()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str, _headers: &[(String, String)]) -> Result<HttpResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        let delay = self.delays.lock().unwrap().get(url).copied();
        if let Some(d) = delay {
            std::thread::sleep(d);
        }
        Ok(self
            .routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or(HttpResponse {
                status: 404,
                body: br#"{"message":"Not Found"}"#.to_vec(),
            }))
    }
}

pub(crate) fn endpoints() -> ApiEndpoints {
    ApiEndpoints::new("https://api.github.com", "octo", "repo").unwrap()
}

pub(crate) fn client(transport: Arc<FakeTransport>) -> GitHubClient {
    GitHubClient::new(transport, endpoints()).with_retry_policy(RetryPolicy::none())
}

pub(crate) fn sha_for(path: &str) -> String {
    format!("sha-{}", path.replace('/', "-"))
}

/// Base64 wrapped at 60 columns, the way the blob endpoint returns it.
pub(crate) fn wrapped_base64(bytes: &[u8]) -> String {
    let flat = BASE64.encode(bytes);
    let mut out = String::with_capacity(flat.len() + flat.len() / 60 + 1);
    for (i, c) in flat.chars().enumerate() {
        if i > 0 && i % 60 == 0 {
            out.push('\n');
        }
        out.push(c);
    }
    out.push('\n');
    out
}

/// Installs branch probes, contents listings for every directory, and blobs
/// for `files` (paths from the repository root) on `branch`.
pub(crate) fn install_repo(
    t: &FakeTransport,
    branches: &[&str],
    branch: &str,
    files: &[(&str, &[u8])],
) {
    let e = endpoints();
    for b in branches {
        t.respond_json(e.branch(b), 200, json!({ "name": b }));
    }

    let mut listings: BTreeMap<String, Vec<serde_json::Value>> = BTreeMap::new();
    let mut dirs: BTreeSet<String> = BTreeSet::new();
    listings.insert(String::new(), Vec::new());

    for (path, content) in files {
        let parts: Vec<&str> = path.split('/').collect();
        for depth in 1..parts.len() {
            let dir = parts[..depth].join("/");
            let parent = parts[..depth - 1].join("/");
            listings.entry(dir.clone()).or_default();
            if dirs.insert(dir.clone()) {
                listings.entry(parent).or_default().push(json!({
                    "type": "dir",
                    "path": dir,
                    "sha": sha_for(&dir),
                    "size": 0,
                    "url": e.contents(&dir, branch),
                }));
            }
        }
        let parent = parts[..parts.len() - 1].join("/");
        listings.entry(parent).or_default().push(json!({
            "type": "file",
            "path": path,
            "sha": sha_for(path),
            "size": content.len(),
            "url": e.contents(path, branch),
        }));
        t.respond_json(
            e.blob(&sha_for(path)),
            200,
            json!({
                "sha": sha_for(path),
                "size": content.len(),
                "content": wrapped_base64(content),
                "encoding": "base64",
            }),
        );
    }

    for (dir, entries) in listings {
        t.respond_json(e.contents(&dir, branch), 200, serde_json::Value::Array(entries));
    }
}
