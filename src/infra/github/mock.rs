//! wiremock-based GitHub mock server for testing.
//!
//! Provides `GitHubMockServer` for HTTP-level mocking of the repository
//! endpoints. The repository mocks share an in-memory store, so a create
//! followed by a list (or a delete followed by a list) behaves like the real
//! API instead of returning canned pages.
//!
//! # Usage
//!
//! ```ignore
//! let mock = GitHubMockServer::start().await;
//!
//! // Stateful repository endpoints for user "octocat"
//! mock.repositories("octocat").with(&["existing"]).page_size(2).mount().await;
//!
//! // Standalone endpoints
//! mock.current_user("octocat").await;
//! mock.repositories_page_linking_to("octocat", &["a"], &next_url).await;
//! mock.unauthorized().await;
//!
//! let mut client = mock.authenticated_client();
//! ```

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use super::client::{ClientConfig, RepositoryClient};

pub const TEST_TOKEN: &str = "test-token";

/// Create a mock user JSON object in the shape of `GET /user`.
fn mock_user(login: &str) -> serde_json::Value {
    json!({
        "login": login,
        "id": 1,
        "node_id": "U_test",
        "avatar_url": "https://avatars.githubusercontent.com/u/1",
        "url": format!("https://api.github.com/users/{}", login),
        "html_url": format!("https://github.com/{}", login),
        "repos_url": format!("https://api.github.com/users/{}/repos", login),
        "type": "User",
        "site_admin": false
    })
}

/// Create a mock repository JSON object in the shape of the REST API.
fn mock_repository(owner: &str, repo: &str, is_private: bool) -> serde_json::Value {
    json!({
        "id": 1,
        "node_id": "R_test",
        "name": repo,
        "full_name": format!("{}/{}", owner, repo),
        "private": is_private,
        "owner": mock_user(owner),
        "html_url": format!("https://github.com/{}/{}", owner, repo),
        "description": "Test repository",
        "fork": false,
        "url": format!("https://api.github.com/repos/{}/{}", owner, repo),
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z",
        "pushed_at": "2024-01-01T00:00:00Z",
        "default_branch": "main"
    })
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    }))
}

/// wiremock-based GitHub mock server for testing.
pub struct GitHubMockServer {
    server: MockServer,
}

impl GitHubMockServer {
    /// Start a new mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Transport settings pointing at this mock server.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.server.uri(),
            timeout: Duration::from_secs(5),
        }
    }

    /// Get an unauthenticated client configured to use this mock server.
    pub fn client(&self) -> RepositoryClient {
        RepositoryClient::new(&self.client_config()).unwrap()
    }

    /// Get a client already authenticated with [`TEST_TOKEN`].
    pub fn authenticated_client(&self) -> RepositoryClient {
        let mut client = self.client();
        client.authenticate(TEST_TOKEN).unwrap();
        client
    }

    /// All requests received so far, in arrival order.
    pub async fn received_requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Create a builder for the stateful repository endpoints.
    pub fn repositories<'a>(&'a self, owner: &'a str) -> MockRepositoriesBuilder<'a> {
        MockRepositoriesBuilder {
            server: &self.server,
            owner,
            existing: Vec::new(),
            page_size: 30,
        }
    }

    /// Mock GET /user for current user.
    pub async fn current_user(&self, login: &str) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_user(login)))
            .mount(&self.server)
            .await;
    }

    /// Mock GET /user answering only after `delay`.
    pub async fn slow_current_user(&self, login: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_user(login))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock GET /user/repos answering every request with one page of `names`
    /// whose `Link` header points `rel="next"` at `next`.
    pub async fn repositories_page_linking_to(&self, owner: &str, names: &[&str], next: &str) {
        let items: Vec<serde_json::Value> = names
            .iter()
            .map(|name| mock_repository(owner, name, true))
            .collect();

        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(items)
                    .insert_header("link", format!(r#"<{next}>; rel="next""#)),
            )
            .mount(&self.server)
            .await;
    }

    /// Reject every request the way GitHub rejects a bad token.
    pub async fn unauthorized(&self) {
        Mock::given(path_regex(".*"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Bad credentials",
                "documentation_url": "https://docs.github.com/rest"
            })))
            .mount(&self.server)
            .await;
    }
}

// ============ Stateful repository endpoints ============

/// Builder for the repository endpoints of one owner.
///
/// Created via `GitHubMockServer::repositories()`.
pub struct MockRepositoriesBuilder<'a> {
    server: &'a MockServer,
    owner: &'a str,
    existing: Vec<String>,
    page_size: usize,
}

impl<'a> MockRepositoriesBuilder<'a> {
    /// Repositories that exist before the test starts, in listing order.
    pub fn with(mut self, names: &[&str]) -> Self {
        self.existing = names.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Number of repositories per listed page (default: 30).
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    /// Mount GET /user, POST /user/repos, GET /user/repos and
    /// DELETE /repos/{owner}/{repo} backed by one shared store.
    pub async fn mount(self) {
        let store = RepositoryStore {
            owner: self.owner.to_string(),
            names: Arc::new(Mutex::new(self.existing)),
            page_size: self.page_size,
            base_uri: self.server.uri(),
        };

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(mock_user(self.owner)))
            .mount(self.server)
            .await;

        Mock::given(method("POST"))
            .and(path("/user/repos"))
            .respond_with(CreateResponder(store.clone()))
            .mount(self.server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user/repos"))
            .respond_with(ListResponder(store.clone()))
            .mount(self.server)
            .await;

        Mock::given(method("DELETE"))
            .and(path_regex(r"^/repos/[^/]+/[^/]+$"))
            .respond_with(DeleteResponder(store))
            .mount(self.server)
            .await;
    }
}

#[derive(Clone)]
struct RepositoryStore {
    owner: String,
    names: Arc<Mutex<Vec<String>>>,
    page_size: usize,
    base_uri: String,
}

impl RepositoryStore {
    fn names(&self) -> MutexGuard<'_, Vec<String>> {
        self.names.lock().unwrap()
    }
}

struct CreateResponder(RepositoryStore);

impl Respond for CreateResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Ok(body) = request.body_json::<serde_json::Value>() else {
            return ResponseTemplate::new(400).set_body_json(json!({"message": "Problems parsing JSON"}));
        };
        let name = body["name"].as_str().unwrap_or_default().to_string();
        let is_private = body["private"].as_bool().unwrap_or(false);

        let mut names = self.0.names();
        if names.contains(&name) {
            return ResponseTemplate::new(422).set_body_json(json!({
                "message": "Repository creation failed.",
                "errors": [{
                    "resource": "Repository",
                    "code": "custom",
                    "field": "name",
                    "message": "name already exists on this account"
                }]
            }));
        }
        names.push(name.clone());

        ResponseTemplate::new(201).set_body_json(mock_repository(&self.0.owner, &name, is_private))
    }
}

struct ListResponder(RepositoryStore);

impl Respond for ListResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let page: usize = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(1)
            .max(1);

        let names = self.0.names();
        let start = (page - 1) * self.0.page_size;
        let items: Vec<serde_json::Value> = names
            .iter()
            .skip(start)
            .take(self.0.page_size)
            .map(|name| mock_repository(&self.0.owner, name, true))
            .collect();

        let mut response = ResponseTemplate::new(200).set_body_json(items);
        if start + self.0.page_size < names.len() {
            let last = names.len().div_ceil(self.0.page_size);
            let link = |p: usize| {
                format!(
                    "{}/user/repos?affiliation=owner&per_page=100&page={}",
                    self.0.base_uri, p
                )
            };
            response = response.insert_header(
                "link",
                format!(
                    r#"<{}>; rel="next", <{}>; rel="last""#,
                    link(page + 1),
                    link(last)
                ),
            );
        }
        response
    }
}

struct DeleteResponder(RepositoryStore);

impl Respond for DeleteResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut segments = request.url.path().trim_start_matches("/repos/").split('/');
        let (Some(owner), Some(name)) = (segments.next(), segments.next()) else {
            return not_found();
        };
        if owner != self.0.owner {
            return not_found();
        }

        let mut names = self.0.names();
        match names.iter().position(|n| n == name) {
            Some(index) => {
                names.remove(index);
                ResponseTemplate::new(204)
            }
            None => not_found(),
        }
    }
}
