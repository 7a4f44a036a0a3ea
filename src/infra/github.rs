use async_trait::async_trait;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Deserialize;

use crate::domain::pull_request::PrMetadata;
use crate::error::{AppError, AppResult};
use crate::services::CodeReviewService;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";

pub struct GitHubClient {
    http: Client,
    api_base_url: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_base_url: String, owner: String, repo: String, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_base_url,
            owner,
            repo,
            token,
        }
    }

    fn pull_endpoint(&self, number: u64) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{number}",
            self.api_base_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }
}

#[async_trait]
impl CodeReviewService for GitHubClient {
    async fn fetch_pull_request(&self, number: u64) -> AppResult<PrMetadata> {
        let mut request = self
            .http
            .get(self.pull_endpoint(number))
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(USER_AGENT, concat!("prlog/", env!("CARGO_PKG_VERSION")));
        if let Some(token) = self.token.as_deref() {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|err| AppError::CodeReview(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::PullRequestNotFound(number));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::CodeReview(format!(
                "GitHub responded with {status}: {body}"
            )));
        }

        let payload: GitHubPullRequest = response.json().await.map_err(|err| {
            AppError::CodeReview(format!("failed to parse GitHub response: {err}"))
        })?;

        Ok(PrMetadata {
            author_handle: payload.user.login,
            title: payload.title,
            labels: payload.labels.into_iter().map(|label| label.name).collect(),
        })
    }
}

#[derive(Deserialize)]
struct GitHubPullRequest {
    title: String,
    user: GitHubUser,
    #[serde(default)]
    labels: Vec<GitHubLabel>,
}

#[derive(Deserialize)]
struct GitHubUser {
    login: String,
}

#[derive(Deserialize)]
struct GitHubLabel {
    name: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer, token: Option<&str>) -> GitHubClient {
        GitHubClient::new(
            server.uri(),
            "abey79".to_string(),
            "vsvg".to_string(),
            token.map(str::to_string),
        )
    }

    #[tokio::test]
    async fn fetches_pull_request_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/abey79/vsvg/pulls/42"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "number": 42,
                "title": "Fix crash on empty input",
                "user": { "login": "alice", "id": 1 },
                "labels": [{ "name": "vsvg" }, { "name": "bug" }]
            })))
            .mount(&server)
            .await;

        let metadata = client(&server, Some("secret"))
            .fetch_pull_request(42)
            .await
            .unwrap();
        assert_eq!(metadata.author_handle, "alice");
        assert_eq!(metadata.title, "Fix crash on empty input");
        assert!(metadata.has_label("vsvg"));
        assert!(metadata.has_label("bug"));
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/abey79/vsvg/pulls/7"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = client(&server, None).fetch_pull_request(7).await;
        assert!(matches!(result, Err(AppError::PullRequestNotFound(7))));
    }

    #[tokio::test]
    async fn reports_other_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let result = client(&server, None).fetch_pull_request(1).await;
        match result {
            Err(AppError::CodeReview(message)) => assert!(message.contains("bad gateway")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
