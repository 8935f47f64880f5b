//! Canvas LMS REST client.
//!
//! Implements [`CourseDirectory`] against the instructor-enrollment course list
//! and [`ActionExecutor`] for announcements, quizzes, assignments and pages.
//!
//! # Configuration
//!
//! ```ignore
//! let config = CanvasConfig::new("https://school.instructure.com", token);
//! let canvas = Arc::new(CanvasClient::new(config));
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::adapters::remote::{client_with_timeout, ensure_success, transport_error};
use crate::domain::action::{ActionBody, ActionKind};
use crate::domain::foundation::CourseId;
use crate::domain::listing::CourseSummary;
use crate::ports::{
    ActionExecutor, CollaboratorError, CourseDirectory, ExecutionOutcome, ExecutionRequest,
};

/// Course states included when listing.
const COURSE_STATES: [&str; 3] = ["available", "completed", "created"];

/// Canvas API configuration.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl CanvasConfig {
    /// Creates a configuration; a trailing slash on `base_url` is dropped.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Canvas adapter.
pub struct CanvasClient {
    config: CanvasConfig,
    http_client: Client,
}

impl CanvasClient {
    pub fn new(config: CanvasConfig) -> Self {
        let http_client = client_with_timeout(config.timeout);
        Self {
            config,
            http_client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.config.base_url, path)
    }

    async fn fetch_courses(&self) -> Result<Vec<CanvasCourse>, CollaboratorError> {
        let mut query: Vec<(&str, &str)> = vec![
            ("enrollment_type", "teacher"),
            ("include[]", "total_students"),
            ("per_page", "100"),
        ];
        query.extend(COURSE_STATES.iter().map(|s| ("state[]", *s)));

        let response = self
            .http_client
            .get(self.url("courses"))
            .bearer_auth(self.config.api_key.expose_secret())
            .query(&query)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout))?;

        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| CollaboratorError::InvalidResponse(format!("Failed to parse courses: {e}")))
    }

    /// Returns the method, path and JSON payload for a confirmed action.
    fn action_call(request: &ExecutionRequest) -> (reqwest::Method, String, Value) {
        let course = request.course_id.as_str();
        let html = body_html(&request.body, request.attachment_url.as_deref());

        match request.kind {
            ActionKind::Announcement => (
                reqwest::Method::POST,
                format!("courses/{course}/discussion_topics"),
                json!({
                    "title": request.title,
                    "message": html,
                    "is_announcement": true,
                    "published": true,
                }),
            ),
            ActionKind::Quiz => (
                reqwest::Method::POST,
                format!("courses/{course}/quizzes"),
                json!({
                    "quiz": {
                        "title": request.title,
                        "description": html,
                        "quiz_type": "assignment",
                    }
                }),
            ),
            ActionKind::Assignment => {
                let mut assignment = json!({
                    "name": request.title,
                    "description": html,
                    "published": true,
                });
                if let Some(params) = &request.assignment {
                    assignment["points_possible"] = json!(params.points);
                    assignment["submission_types"] = json!(params
                        .submission_types
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>());
                    if let Some(due) = params.due_at {
                        assignment["due_at"] = json!(due.to_rfc3339());
                    }
                }
                (
                    reqwest::Method::POST,
                    format!("courses/{course}/assignments"),
                    json!({ "assignment": assignment }),
                )
            }
            ActionKind::Page => (
                reqwest::Method::PUT,
                format!("courses/{course}/pages/{}", page_slug(&request.title)),
                json!({
                    "wiki_page": {
                        "title": request.title,
                        "body": html,
                        "published": true,
                        "editing_roles": "teachers",
                    }
                }),
            ),
        }
    }
}

#[async_trait]
impl CourseDirectory for CanvasClient {
    async fn resolve(&self, name: &str) -> Result<Option<CourseId>, CollaboratorError> {
        let needle = name.trim().to_lowercase();
        let courses = self.fetch_courses().await?;

        let found = courses
            .into_iter()
            .find(|c| c.name.to_lowercase().contains(&needle));

        match found {
            Some(course) => CourseId::new(course.id_string())
                .map(Some)
                .map_err(|e| CollaboratorError::InvalidResponse(e.to_string())),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<CourseSummary>, CollaboratorError> {
        Ok(self
            .fetch_courses()
            .await?
            .into_iter()
            .map(CanvasCourse::into_summary)
            .collect())
    }
}

#[async_trait]
impl ActionExecutor for CanvasClient {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionOutcome, CollaboratorError> {
        let (method, path, payload) = Self::action_call(&request);

        let response = self
            .http_client
            .request(method, self.url(&path))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout))?;

        match ensure_success(response).await {
            Ok(_) => Ok(ExecutionOutcome::succeeded(format!(
                "{} '{}' created",
                request.kind.display_name(),
                request.title
            ))),
            // The platform rejected the payload; report it as a failed outcome.
            Err(CollaboratorError::Api { status, message }) if (400..500).contains(&status) => {
                tracing::warn!(status, kind = %request.kind, "Canvas rejected action");
                Ok(ExecutionOutcome::failed(format!("Canvas returned {status}: {message}")))
            }
            Err(e) => Err(e),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire types and formatting
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct CanvasCourse {
    id: Value,
    name: String,
    #[serde(default)]
    course_code: Option<String>,
    #[serde(default)]
    total_students: Option<u32>,
}

impl CanvasCourse {
    fn id_string(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn into_summary(self) -> CourseSummary {
        CourseSummary {
            name: self.name,
            code: self.course_code,
            member_count: self.total_students,
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn link_html(url: &str, label: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\">{}</a>",
        escape_html(url),
        escape_html(label)
    )
}

/// Renders a body as minimal HTML; paragraphs are split on blank lines.
fn body_html(body: &ActionBody, attachment_url: Option<&str>) -> String {
    let mut html = match body {
        ActionBody::Link(url) => format!("<p>{}</p>", link_html(url, url)),
        ActionBody::Text(text) => text
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
            .collect::<Vec<_>>()
            .join("\n"),
    };

    if let Some(url) = attachment_url {
        let name = url.rsplit('/').next().unwrap_or(url);
        html.push_str(&format!("\n<p>Attachment: {}</p>", link_html(url, name)));
    }
    html
}

/// URL slug Canvas uses for a page title.
fn page_slug(title: &str) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let parts: Vec<&str> = slug.split('-').filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        "page".to_string()
    } else {
        parts.join("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::extraction::SubmissionType;
    use crate::ports::AssignmentParams;

    fn request(kind: ActionKind, body: ActionBody) -> ExecutionRequest {
        ExecutionRequest {
            kind,
            course_id: CourseId::new("42").unwrap(),
            course_name: "Intro CS".into(),
            title: "Week 1: Loops".into(),
            body,
            attachment_url: None,
            assignment: None,
        }
    }

    mod config {
        use super::*;

        #[test]
        fn trailing_slash_is_trimmed() {
            let config = CanvasConfig::new("https://canvas.test/", "token");
            assert_eq!(config.base_url, "https://canvas.test");
            assert!(!format!("{config:?}").contains("token"));
        }

        #[test]
        fn urls_are_versioned() {
            let client = CanvasClient::new(CanvasConfig::new("https://canvas.test", "t"));
            assert_eq!(client.url("courses"), "https://canvas.test/api/v1/courses");
        }
    }

    mod formatting {
        use super::*;

        #[test]
        fn text_paragraphs_are_escaped() {
            let html = body_html(&ActionBody::Text("a < b\n\nsecond".into()), None);
            assert_eq!(html, "<p>a &lt; b</p>\n<p>second</p>");
        }

        #[test]
        fn links_become_anchors() {
            let html = body_html(&ActionBody::Link("https://x.io/a".into()), None);
            assert!(html.contains("<a href=\"https://x.io/a\" target=\"_blank\">https://x.io/a</a>"));
        }

        #[test]
        fn attachment_link_is_appended() {
            let html = body_html(
                &ActionBody::Text("See file".into()),
                Some("https://files.test/notes.pdf"),
            );
            assert!(html.ends_with("<p>Attachment: <a href=\"https://files.test/notes.pdf\" target=\"_blank\">notes.pdf</a></p>"));
        }

        #[test]
        fn page_slug_is_hyphenated() {
            assert_eq!(page_slug("Week 1: Loops!"), "week-1-loops");
            assert_eq!(page_slug("???"), "page");
        }
    }

    mod action_calls {
        use super::*;

        #[test]
        fn announcement_posts_discussion_topic() {
            let (method, path, payload) =
                CanvasClient::action_call(&request(ActionKind::Announcement, ActionBody::Text("Hi".into())));
            assert_eq!(method, reqwest::Method::POST);
            assert_eq!(path, "courses/42/discussion_topics");
            assert_eq!(payload["is_announcement"], true);
            assert_eq!(payload["message"], "<p>Hi</p>");
        }

        #[test]
        fn page_is_put_by_slug() {
            let (method, path, payload) =
                CanvasClient::action_call(&request(ActionKind::Page, ActionBody::Text("x".into())));
            assert_eq!(method, reqwest::Method::PUT);
            assert_eq!(path, "courses/42/pages/week-1-loops");
            assert_eq!(payload["wiki_page"]["title"], "Week 1: Loops");
        }

        #[test]
        fn assignment_carries_parameters() {
            let mut req = request(ActionKind::Assignment, ActionBody::Text("Do it".into()));
            req.assignment = Some(AssignmentParams {
                points: 25,
                due_at: None,
                submission_types: vec![SubmissionType::OnlineUpload, SubmissionType::OnlineUrl],
            });

            let (_, path, payload) = CanvasClient::action_call(&req);

            assert_eq!(path, "courses/42/assignments");
            assert_eq!(payload["assignment"]["points_possible"], 25);
            assert_eq!(
                payload["assignment"]["submission_types"],
                json!(["online_upload", "online_url"])
            );
            assert!(payload["assignment"].get("due_at").is_none());
        }

        #[test]
        fn quiz_uses_graded_quiz_type() {
            let (_, path, payload) =
                CanvasClient::action_call(&request(ActionKind::Quiz, ActionBody::Text("Q1".into())));
            assert_eq!(path, "courses/42/quizzes");
            assert_eq!(payload["quiz"]["quiz_type"], "assignment");
        }
    }

    #[test]
    fn numeric_course_ids_are_stringified() {
        let course: CanvasCourse =
            serde_json::from_str(r#"{"id": 1234, "name": "Intro CS", "course_code": "CS101"}"#).unwrap();
        assert_eq!(course.id_string(), "1234");
        let summary = course.into_summary();
        assert_eq!(summary.code.as_deref(), Some("CS101"));
        assert_eq!(summary.member_count, None);
    }
}
