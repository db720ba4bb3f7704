//! In-memory GitHub used by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use repo_duplicator::{Config, Headers, Method, Pass, Response, Transport, TransportError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// API root served by [`FakeGitHub`].
pub const API: &str = "https://api.test";

pub const SOURCE: &str = "octo/old";
pub const DESTINATION: &str = "octo/new";

/// Configuration pointing at the fake API, copying `octo/old` to `octo/new`.
pub fn config(pass: Pass) -> Config {
    Config::new(
        "user".to_string(),
        "secret".to_string(),
        SOURCE.parse().unwrap(),
        DESTINATION.parse().unwrap(),
        pass,
    )
    .with_api_url(API)
    .unwrap()
}

/// REST root of a fake repository.
pub fn repo_url(repo: &str) -> String {
    format!("{API}/repos/{repo}")
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct FakeMilestone {
    pub number: u64,
    pub title: String,
    pub state: String,
    pub description: Option<String>,
    pub due_on: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FakeLabel {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone)]
pub struct FakeIssue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub state: String,
    pub assignee: Option<String>,
    pub labels: Vec<String>,
    pub milestone: Option<u64>,
    pub comments: Vec<String>,
}

/// Builder for seeding issues.
#[derive(Debug, Clone)]
pub struct IssueSeed {
    title: String,
    body: Option<String>,
    state: String,
    assignee: Option<String>,
    labels: Vec<String>,
    milestone: Option<String>,
    comments: Vec<String>,
}

impl IssueSeed {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: None,
            state: "open".to_string(),
            assignee: None,
            labels: Vec::new(),
            milestone: None,
            comments: Vec::new(),
        }
    }

    pub fn body(mut self, body: &str) -> Self {
        self.body = Some(body.to_string());
        self
    }

    pub fn closed(mut self) -> Self {
        self.state = "closed".to_string();
        self
    }

    pub fn assignee(mut self, login: &str) -> Self {
        self.assignee = Some(login.to_string());
        self
    }

    pub fn label(mut self, name: &str) -> Self {
        self.labels.push(name.to_string());
        self
    }

    /// Milestone by title; it must already be seeded in the same repository.
    pub fn milestone(mut self, title: &str) -> Self {
        self.milestone = Some(title.to_string());
        self
    }

    pub fn comment(mut self, body: &str) -> Self {
        self.comments.push(body.to_string());
        self
    }
}

#[derive(Debug, Default)]
struct FakeRepo {
    milestones: Vec<FakeMilestone>,
    labels: Vec<FakeLabel>,
    issues: Vec<FakeIssue>,
    next_number: u64,
}

impl FakeRepo {
    fn next_number(&mut self) -> u64 {
        self.next_number += 1;
        self.next_number
    }

    fn issue_mut(&mut self, number: &str) -> Option<&mut FakeIssue> {
        let number: u64 = number.parse().ok()?;
        self.issues.iter_mut().find(|issue| issue.number == number)
    }

    fn milestone_json(milestone: &FakeMilestone) -> Value {
        json!({
            "number": milestone.number,
            "title": milestone.title,
            "state": milestone.state,
            "description": milestone.description,
            "due_on": milestone.due_on,
            "open_issues": 0
        })
    }

    fn issue_json(&self, repo: &str, issue: &FakeIssue) -> Value {
        let milestone = issue.milestone.and_then(|number| {
            self.milestones
                .iter()
                .find(|m| m.number == number)
                .map(Self::milestone_json)
        });
        let labels: Vec<Value> = issue
            .labels
            .iter()
            .map(|name| json!({ "name": name, "color": "ededed" }))
            .collect();

        json!({
            "number": issue.number,
            "url": format!("{}/issues/{}", repo_url(repo), issue.number),
            "title": issue.title,
            "body": issue.body,
            "state": issue.state,
            "assignee": issue.assignee.as_ref().map(|login| json!({ "login": login })),
            "labels": labels,
            "milestone": milestone,
            "comments": issue.comments.len(),
            "locked": false
        })
    }
}

struct FailureRule {
    method: Method,
    url_fragment: String,
    status: u16,
}

#[derive(Default)]
struct State {
    repos: HashMap<String, FakeRepo>,
    requests: Vec<RecordedRequest>,
    failures: Vec<FailureRule>,
}

/// A stateful stand-in for the GitHub REST API.
///
/// Lists are paginated with `Link` headers; `page_size` entries per page.
pub struct FakeGitHub {
    state: Mutex<State>,
    page_size: usize,
}

impl Default for FakeGitHub {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::with_page_size(30)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size,
        }
    }

    fn with_repo<R>(&self, repo: &str, f: impl FnOnce(&mut FakeRepo) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(state.repos.entry(repo.to_string()).or_default())
    }

    pub fn add_milestone(&self, repo: &str, title: &str, state: &str) -> u64 {
        self.with_repo(repo, |r| {
            let number = r.next_number();
            r.milestones.push(FakeMilestone {
                number,
                title: title.to_string(),
                state: state.to_string(),
                description: Some(format!("{title} description")),
                due_on: None,
            });
            number
        })
    }

    pub fn add_label(&self, repo: &str, name: &str, color: &str) {
        self.with_repo(repo, |r| {
            r.labels.push(FakeLabel {
                name: name.to_string(),
                color: color.to_string(),
            });
        });
    }

    pub fn add_issue(&self, repo: &str, seed: IssueSeed) -> u64 {
        self.with_repo(repo, |r| {
            let milestone = seed.milestone.as_ref().map(|title| {
                r.milestones
                    .iter()
                    .find(|m| &m.title == title)
                    .map(|m| m.number)
                    .expect("seed milestone before referencing it")
            });
            let number = r.next_number();
            r.issues.push(FakeIssue {
                number,
                title: seed.title,
                body: seed.body,
                state: seed.state,
                assignee: seed.assignee,
                labels: seed.labels,
                milestone,
                comments: seed.comments,
            });
            number
        })
    }

    /// Makes requests with `method` whose URL contains `url_fragment` fail.
    pub fn fail(&self, method: Method, url_fragment: &str, status: u16) {
        self.state.lock().unwrap().failures.push(FailureRule {
            method,
            url_fragment: url_fragment.to_string(),
            status,
        });
    }

    pub fn milestones(&self, repo: &str) -> Vec<FakeMilestone> {
        self.with_repo(repo, |r| r.milestones.clone())
    }

    pub fn labels(&self, repo: &str) -> Vec<FakeLabel> {
        self.with_repo(repo, |r| r.labels.clone())
    }

    pub fn issues(&self, repo: &str) -> Vec<FakeIssue> {
        self.with_repo(repo, |r| r.issues.clone())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    /// Counts recorded requests with `method` whose URL contains `url_fragment`.
    pub fn count(&self, method: Method, url_fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url.contains(url_fragment))
            .count()
    }

    /// Counts recorded writes (POST and PATCH).
    pub fn writes(&self) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method != Method::Get)
            .count()
    }
}

#[async_trait]
impl Transport for FakeGitHub {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Response, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method,
            url: url.to_string(),
            body: body.cloned(),
        });

        if let Some(rule) = state
            .failures
            .iter()
            .find(|rule| rule.method == method && url.contains(&rule.url_fragment))
        {
            return Err(status_error(method, url, rule.status));
        }

        route(&mut state, method, url, body, self.page_size)
    }
}

fn status_error(method: Method, url: &str, status: u16) -> TransportError {
    TransportError::Status {
        method: method.as_str(),
        url: url.to_string(),
        status,
        body: json!({ "message": "fake failure" }).to_string(),
    }
}

fn ok(body: Value) -> Result<Response, TransportError> {
    Ok(Response {
        body,
        headers: Headers::new(),
    })
}

fn route(
    state: &mut State,
    method: Method,
    url: &str,
    body: Option<&Value>,
    page_size: usize,
) -> Result<Response, TransportError> {
    let not_found = || status_error(method, url, 404);
    let rest = url.strip_prefix(API).ok_or_else(not_found)?;
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    let params: HashMap<&str, &str> = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .collect();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let ["repos", owner, name, tail @ ..] = segments.as_slice() else {
        return Err(not_found());
    };
    let repo_name = format!("{owner}/{name}");
    let repo = state.repos.entry(repo_name.clone()).or_default();
    let field = |key: &str| body.and_then(|b| b.get(key)).cloned().unwrap_or(Value::Null);
    let text = |key: &str| field(key).as_str().map(str::to_string);

    match (method, tail) {
        (Method::Get, ["milestones"]) => {
            let wanted = params.get("state").copied().unwrap_or("open");
            let items = repo
                .milestones
                .iter()
                .filter(|m| m.state == wanted)
                .map(FakeRepo::milestone_json)
                .collect();
            Ok(paginate(url, items, &params, page_size))
        }
        (Method::Post, ["milestones"]) => {
            let title = text("title").ok_or_else(|| status_error(method, url, 422))?;
            if repo.milestones.iter().any(|m| m.title == title) {
                return Err(status_error(method, url, 422));
            }
            let number = repo.next_number();
            let milestone = FakeMilestone {
                number,
                title,
                state: text("state").unwrap_or_else(|| "open".to_string()),
                description: text("description"),
                due_on: text("due_on"),
            };
            let created = FakeRepo::milestone_json(&milestone);
            repo.milestones.push(milestone);
            ok(created)
        }
        (Method::Get, ["labels"]) => {
            let items = repo
                .labels
                .iter()
                .map(|l| json!({ "name": l.name, "color": l.color, "default": false }))
                .collect();
            Ok(paginate(url, items, &params, page_size))
        }
        (Method::Post, ["labels"]) => {
            let name = text("name").ok_or_else(|| status_error(method, url, 422))?;
            if repo.labels.iter().any(|l| l.name == name) {
                return Err(status_error(method, url, 422));
            }
            let color = text("color").unwrap_or_else(|| "ededed".to_string());
            repo.labels.push(FakeLabel {
                name: name.clone(),
                color: color.clone(),
            });
            ok(json!({ "name": name, "color": color }))
        }
        (Method::Get, ["issues"]) => {
            let wanted = params.get("state").copied().unwrap_or("open");
            let mut issues: Vec<&FakeIssue> = repo
                .issues
                .iter()
                .filter(|issue| wanted == "all" || issue.state == wanted)
                .collect();
            issues.sort_by_key(|issue| issue.number);
            let items = issues
                .into_iter()
                .map(|issue| repo.issue_json(&repo_name, issue))
                .collect();
            Ok(paginate(url, items, &params, page_size))
        }
        (Method::Post, ["issues"]) => {
            let title = text("title").ok_or_else(|| status_error(method, url, 422))?;
            let milestone = field("milestone").as_u64();
            let labels = field("labels")
                .as_array()
                .map(|names| {
                    names
                        .iter()
                        .filter_map(|n| n.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();
            let number = repo.next_number();
            let issue = FakeIssue {
                number,
                title,
                body: text("body"),
                state: "open".to_string(),
                assignee: text("assignee"),
                labels,
                milestone,
                comments: Vec::new(),
            };
            let created = repo.issue_json(&repo_name, &issue);
            repo.issues.push(issue);
            ok(created)
        }
        (Method::Patch, ["issues", number]) => {
            let new_state = text("state");
            let issue = repo.issue_mut(number).ok_or_else(not_found)?;
            if let Some(new_state) = new_state {
                issue.state = new_state;
            }
            let issue = issue.clone();
            ok(repo.issue_json(&repo_name, &issue))
        }
        (Method::Get, ["issues", number, "comments"]) => {
            let issue = repo.issue_mut(number).ok_or_else(not_found)?;
            let items = issue
                .comments
                .iter()
                .map(|body| json!({ "body": body }))
                .collect();
            Ok(paginate(url, items, &params, page_size))
        }
        (Method::Post, ["issues", number, "comments"]) => {
            let comment = text("body").ok_or_else(|| status_error(method, url, 422))?;
            let issue = repo.issue_mut(number).ok_or_else(not_found)?;
            issue.comments.push(comment.clone());
            ok(json!({ "body": comment }))
        }
        _ => Err(not_found()),
    }
}

fn paginate(
    url: &str,
    items: Vec<Value>,
    params: &HashMap<&str, &str>,
    page_size: usize,
) -> Response {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .clamp(1, total_pages);

    let body: Vec<Value> = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    let mut links = Vec::new();
    if page < total_pages {
        links.push(format!("<{}>; rel=\"next\"", page_url(url, page + 1)));
        links.push(format!("<{}>; rel=\"last\"", page_url(url, total_pages)));
    }
    if page > 1 {
        links.push(format!("<{}>; rel=\"first\"", page_url(url, 1)));
        links.push(format!("<{}>; rel=\"prev\"", page_url(url, page - 1)));
    }

    let mut headers = Headers::new();
    if !links.is_empty() {
        headers.insert("Link", links.join(", "));
    }

    Response {
        body: Value::Array(body),
        headers,
    }
}

fn page_url(url: &str, page: usize) -> String {
    let (base, query) = url.split_once('?').unwrap_or((url, ""));
    let mut params: Vec<String> = query
        .split('&')
        .filter(|p| !p.is_empty() && !p.starts_with("page="))
        .map(str::to_string)
        .collect();
    params.push(format!("page={page}"));
    format!("{base}?{}", params.join("&"))
}

/// A transport that serves canned pages by exact URL.
pub struct ScriptedTransport {
    pages: HashMap<String, (Value, Option<String>)>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serves `body` at `url` with an optional `Link` header.
    pub fn page(mut self, url: &str, body: Value, link: Option<&str>) -> Self {
        self.pages
            .insert(url.to_string(), (body, link.map(str::to_string)));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        _body: Option<&Value>,
    ) -> Result<Response, TransportError> {
        self.requests.lock().unwrap().push(url.to_string());
        let (body, link) = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| status_error(method, url, 404))?;

        let mut headers = Headers::new();
        if let Some(link) = link {
            headers.insert("Link", link);
        }
        Ok(Response { body, headers })
    }
}
