//! Runway: text/image-to-video jobs.
//!
//! Generation is asynchronous on Runway's side. A submission returns a task
//! ID; the task is polled until it reaches a terminal status or the attempt
//! ceiling is hit.

use std::{path::Path, time::Duration};

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::config::RunwayConfig;
use crate::model::truncate_chars;

use super::{Result, VideoError, check};

const API_VERSION: &str = "2024-11-06";
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(60);
const STATUS_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Runway caps prompt text at this many characters.
pub const MAX_PROMPT_CHARS: usize = 1000;

/// Clip lengths, in seconds, that Runway will render.
pub const CLIP_DURATIONS: [u32; 2] = [5, 10];

/// Task lifecycle as reported by Runway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Throttled,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

/// `GET /v1/tasks/{id}` response, trimmed to what we use.
#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub status: TaskStatus,
    /// Output URLs, present once the task has succeeded.
    pub output: Option<Vec<String>>,
    pub failure: Option<String>,
    pub progress: Option<f64>,
}

#[derive(Deserialize)]
struct Submitted {
    id: String,
}

/// How a polled task ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    Succeeded { output: Vec<String> },
    Failed { reason: String },
    /// Status never became terminal within the attempt ceiling.
    TimedOut { attempts: u32 },
}

/// Anything that can report a task's status. Runway in production, a script in tests.
pub trait TaskStatusSource {
    async fn task_status(&self, task_id: &str) -> Result<Task>;
}

/// A text/image-to-video service: submit a job, poll it, fetch the output.
pub trait VideoVendor: TaskStatusSource {
    /// Submit a text-to-video job. Returns the task ID.
    async fn text_to_video(&self, prompt: &str, duration: u32) -> Result<String>;

    /// Submit an image-to-video job seeded with `image` (a URL or data URI).
    async fn image_to_video(&self, image: &str, prompt: &str, duration: u32) -> Result<String>;

    /// Download a finished output to `dest`.
    async fn download(&self, url: &str, dest: &Path) -> Result<()>;
}

/// Check a task every `interval` until it succeeds, fails, or `max_attempts` checks pass.
///
/// A failed status request counts as an attempt and polling continues.
pub async fn poll_task<S: TaskStatusSource>(
    source: &S,
    task_id: &str,
    interval: Duration,
    max_attempts: u32,
) -> PollOutcome {
    for attempt in 1..=max_attempts {
        match source.task_status(task_id).await {
            Ok(task) => {
                tracing::debug!(
                    task_id,
                    attempt,
                    status = ?task.status,
                    progress = ?task.progress,
                    "polled task"
                );
                match task.status {
                    TaskStatus::Succeeded => {
                        return PollOutcome::Succeeded {
                            output: task.output.unwrap_or_default(),
                        };
                    }
                    TaskStatus::Failed | TaskStatus::Cancelled => {
                        return PollOutcome::Failed {
                            reason: task
                                .failure
                                .unwrap_or_else(|| format!("{:?}", task.status).to_lowercase()),
                        };
                    }
                    TaskStatus::Pending
                    | TaskStatus::Throttled
                    | TaskStatus::Running
                    | TaskStatus::Unknown => {}
                }
            }
            Err(e) => tracing::warn!(task_id, attempt, "status check failed: {e}"),
        }

        if attempt < max_attempts {
            tokio::time::sleep(interval).await;
        }
    }

    PollOutcome::TimedOut {
        attempts: max_attempts,
    }
}

/// Client for the Runway developer API.
pub struct RunwayClient {
    http: Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    ratio: String,
}

impl RunwayClient {
    pub fn new(http: Client, api_key: SecretString, config: &RunwayConfig) -> Self {
        Self {
            http,
            api_key,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            ratio: config.ratio.clone(),
        }
    }

    async fn submit(&self, endpoint: &str, body: &serde_json::Value) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/v1/{endpoint}", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .header("X-Runway-Version", API_VERSION)
            .timeout(SUBMIT_TIMEOUT)
            .json(body)
            .send()
            .await?;

        let response = check("runway", response).await?;
        let submitted: Submitted = response.json().await?;
        tracing::info!(task_id = %submitted.id, endpoint, "runway task started");
        Ok(submitted.id)
    }
}

impl VideoVendor for RunwayClient {
    async fn text_to_video(&self, prompt: &str, duration: u32) -> Result<String> {
        let body = json!({
            "model": self.model,
            "promptText": truncate_chars(prompt, MAX_PROMPT_CHARS),
            "ratio": self.ratio,
            "duration": duration,
        });
        self.submit("text_to_video", &body).await
    }

    async fn image_to_video(&self, image: &str, prompt: &str, duration: u32) -> Result<String> {
        let body = json!({
            "model": self.model,
            "promptImage": image,
            "promptText": truncate_chars(prompt, MAX_PROMPT_CHARS),
            "ratio": self.ratio,
            "duration": duration,
        });
        self.submit("image_to_video", &body).await
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let response = self.http.get(url).timeout(DOWNLOAD_TIMEOUT).send().await?;
        let bytes = check("runway", response).await?.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        tracing::info!(path = %dest.display(), bytes = bytes.len(), "video downloaded");
        Ok(())
    }
}

impl TaskStatusSource for RunwayClient {
    async fn task_status(&self, task_id: &str) -> Result<Task> {
        let response = self
            .http
            .get(format!("{}/v1/tasks/{task_id}", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .header("X-Runway-Version", API_VERSION)
            .timeout(STATUS_TIMEOUT)
            .send()
            .await?;

        Ok(check("runway", response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// Replays a fixed sequence of statuses; repeats the last one forever.
    struct Scripted {
        statuses: RefCell<VecDeque<Result<Task>>>,
        calls: Cell<u32>,
    }

    impl Scripted {
        fn new(statuses: Vec<Result<Task>>) -> Self {
            Self {
                statuses: RefCell::new(statuses.into()),
                calls: Cell::new(0),
            }
        }
    }

    fn task(status: TaskStatus) -> Result<Task> {
        Ok(Task {
            status,
            output: (status == TaskStatus::Succeeded)
                .then(|| vec!["https://cdn.example/clip.mp4".to_string()]),
            failure: (status == TaskStatus::Failed).then(|| "content moderation".to_string()),
            progress: None,
        })
    }

    impl TaskStatusSource for Scripted {
        async fn task_status(&self, _task_id: &str) -> Result<Task> {
            self.calls.set(self.calls.get() + 1);
            let mut statuses = self.statuses.borrow_mut();
            if statuses.len() > 1 {
                statuses.pop_front().unwrap()
            } else {
                match statuses.front().unwrap() {
                    Ok(t) => Ok(t.clone()),
                    Err(_) => Err(VideoError::NoOutput("task-1".into())),
                }
            }
        }
    }

    #[tokio::test]
    async fn never_terminal_stops_at_attempt_ceiling() {
        let source = Scripted::new(vec![task(TaskStatus::Pending), task(TaskStatus::Running)]);

        let outcome = poll_task(&source, "task-1", Duration::ZERO, 5).await;

        assert_eq!(outcome, PollOutcome::TimedOut { attempts: 5 });
        assert_eq!(source.calls.get(), 5);
    }

    #[tokio::test]
    async fn success_returns_output_early() {
        let source = Scripted::new(vec![
            task(TaskStatus::Throttled),
            task(TaskStatus::Running),
            task(TaskStatus::Succeeded),
        ]);

        let outcome = poll_task(&source, "task-1", Duration::ZERO, 60).await;

        assert_eq!(
            outcome,
            PollOutcome::Succeeded {
                output: vec!["https://cdn.example/clip.mp4".to_string()]
            }
        );
        assert_eq!(source.calls.get(), 3);
    }

    #[tokio::test]
    async fn failure_carries_vendor_reason() {
        let source = Scripted::new(vec![task(TaskStatus::Failed)]);

        let outcome = poll_task(&source, "task-1", Duration::ZERO, 60).await;

        assert_eq!(
            outcome,
            PollOutcome::Failed {
                reason: "content moderation".into()
            }
        );
        assert_eq!(source.calls.get(), 1);
    }

    #[tokio::test]
    async fn cancelled_without_reason_is_named() {
        let source = Scripted::new(vec![task(TaskStatus::Cancelled)]);

        let outcome = poll_task(&source, "task-1", Duration::ZERO, 60).await;

        assert_eq!(
            outcome,
            PollOutcome::Failed {
                reason: "cancelled".into()
            }
        );
    }

    #[tokio::test]
    async fn status_errors_count_as_attempts() {
        let source = Scripted::new(vec![Err(VideoError::NoOutput("task-1".into()))]);

        let outcome = poll_task(&source, "task-1", Duration::ZERO, 3).await;

        assert_eq!(outcome, PollOutcome::TimedOut { attempts: 3 });
        assert_eq!(source.calls.get(), 3);
    }

    #[tokio::test]
    async fn zero_attempts_times_out_immediately() {
        let source = Scripted::new(vec![task(TaskStatus::Succeeded)]);

        let outcome = poll_task(&source, "task-1", Duration::ZERO, 0).await;

        assert_eq!(outcome, PollOutcome::TimedOut { attempts: 0 });
        assert_eq!(source.calls.get(), 0);
    }

    #[test]
    fn task_response_parses() {
        let task: Task = serde_json::from_str(
            r#"{"id":"abc","status":"SUCCEEDED","output":["https://x/y.mp4"],"createdAt":"2025-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(task.status, TaskStatus::Succeeded);
        assert_eq!(task.output.unwrap(), vec!["https://x/y.mp4".to_string()]);

        let task: Task = serde_json::from_str(r#"{"id":"abc","status":"ARCHIVED"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Unknown);
        assert!(task.output.is_none());
    }

    #[tokio::test]
    async fn unreachable_api_is_an_http_error() {
        let client = RunwayClient::new(
            Client::new(),
            SecretString::from("test-key".to_string()),
            &RunwayConfig {
                api_url: "http://127.0.0.1:1".into(),
                ..RunwayConfig::default()
            },
        );

        let err = client.text_to_video("prompt", 5).await.unwrap_err();
        assert!(matches!(err, VideoError::Http(_)));
    }
}
