//! Minimal HTTP/1.1 server imitating the three GitHub REST endpoints the
//! exporter calls: branch lookup, contents listing, and git blobs.
//!
//! Serves one in-memory repository on a fixed set of branches. Every branch
//! sees the same files. Request lines and `Authorization` headers are
//! recorded so tests can assert on what the client sent.

use std::collections::BTreeSet;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::json;

#[derive(Debug, Clone, Default)]
pub struct ApiServerOptions {
    /// If set, every request is answered with this status and an error body.
    pub force_status: Option<u16>,
}

/// One received request: the raw target and the `Authorization` header, if any.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub target: String,
    pub authorization: Option<String>,
}

pub struct ApiServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl ApiServer {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

struct Repo {
    base_url: String,
    owner: String,
    name: String,
    branches: Vec<String>,
    files: Vec<(String, Vec<u8>)>,
    opts: ApiServerOptions,
}

pub fn sha_for(path: &str) -> String {
    format!("sha-{}", path.replace('/', "-"))
}

/// Starts a server in a background thread for `owner/name` with `files`
/// (paths from the repository root). Runs until the process exits.
pub fn start(
    owner: &str,
    name: &str,
    branches: &[&str],
    files: &[(&str, &[u8])],
    opts: ApiServerOptions,
) -> ApiServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}", port);
    let repo = Arc::new(Repo {
        base_url: base_url.clone(),
        owner: owner.to_string(),
        name: name.to_string(),
        branches: branches.iter().map(|b| b.to_string()).collect(),
        files: files
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_vec()))
            .collect(),
        opts,
    });
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let repo = Arc::clone(&repo);
            let recorded = Arc::clone(&recorded);
            thread::spawn(move || handle(stream, &repo, &recorded));
        }
    });
    ApiServer { base_url, requests }
}

fn handle(mut stream: TcpStream, repo: &Repo, recorded: &Mutex<Vec<RecordedRequest>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, target, authorization) = parse_request(request);
    recorded.lock().unwrap().push(RecordedRequest {
        target: target.to_string(),
        authorization,
    });

    let (status, body) = if !method.eq_ignore_ascii_case("GET") {
        (405, json!({ "message": "Method Not Allowed" }))
    } else if let Some(forced) = repo.opts.force_status {
        (forced, json!({ "message": "API rate limit exceeded" }))
    } else {
        route(repo, target)
    };
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}

fn route(repo: &Repo, target: &str) -> (u16, serde_json::Value) {
    let not_found = (404, json!({ "message": "Not Found" }));
    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(percent_decode)
        .collect();
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    let rest = match segments.as_slice() {
        ["repos", owner, name, rest @ ..] if *owner == repo.owner && *name == repo.name => rest,
        _ => return not_found,
    };
    match rest {
        ["branches", branch] => {
            if repo.branches.iter().any(|b| b == branch) {
                (200, json!({ "name": branch }))
            } else {
                not_found
            }
        }
        ["contents", dir @ ..] => {
            let branch = query
                .split('&')
                .find_map(|kv| kv.strip_prefix("ref="))
                .map(percent_decode);
            match branch {
                Some(b) if repo.branches.contains(&b) => listing(repo, &dir.join("/"), &b),
                _ => not_found,
            }
        }
        ["git", "blobs", sha] => match repo.files.iter().find(|(p, _)| sha_for(p) == *sha) {
            Some((_, content)) => (
                200,
                json!({
                    "sha": sha,
                    "size": content.len(),
                    "content": BASE64.encode(content),
                    "encoding": "base64",
                }),
            ),
            None => not_found,
        },
        _ => not_found,
    }
}

/// Immediate children of `dir`, or 404 if no file lives under it.
fn listing(repo: &Repo, dir: &str, branch: &str) -> (u16, serde_json::Value) {
    let prefix = if dir.is_empty() {
        String::new()
    } else {
        format!("{}/", dir)
    };
    let mut entries = Vec::new();
    let mut subdirs = BTreeSet::new();
    for (path, content) in &repo.files {
        let Some(rest) = path.strip_prefix(&prefix) else {
            continue;
        };
        match rest.split_once('/') {
            Some((child, _)) => {
                subdirs.insert(format!("{}{}", prefix, child));
            }
            None => entries.push(json!({
                "type": "file",
                "path": path,
                "sha": sha_for(path),
                "size": content.len(),
            })),
        }
    }
    if entries.is_empty() && subdirs.is_empty() {
        return (404, json!({ "message": "Not Found" }));
    }
    for sub in subdirs {
        entries.push(json!({
            "type": "dir",
            "path": sub,
            "sha": sha_for(&sub),
            "size": 0,
            "url": format!(
                "{}/repos/{}/{}/contents/{}?ref={}",
                repo.base_url,
                repo.owner,
                repo.name,
                sub,
                branch.replace('/', "%2F")
            ),
        }));
    }
    (200, serde_json::Value::Array(entries))
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        429 => "Too Many Requests",
        _ => "Error",
    }
}

/// Returns (method, request target, Authorization header value).
fn parse_request(request: &str) -> (&str, &str, Option<String>) {
    let mut lines = request.lines();
    let mut first = lines.next().unwrap_or("").split_whitespace();
    let method = first.next().unwrap_or("");
    let target = first.next().unwrap_or("/");
    let mut authorization = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("authorization") {
                authorization = Some(value.trim().to_string());
            }
        }
    }
    (method, target, authorization)
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(b) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(b);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[test]
fn percent_decode_handles_trailing_and_truncated_escapes() {
    assert_eq!(percent_decode("feature%2F"), "feature/");
    assert_eq!(percent_decode("feature%2Flogin"), "feature/login");
    assert_eq!(percent_decode("half%2"), "half%2");
    assert_eq!(percent_decode("%"), "%");
}
