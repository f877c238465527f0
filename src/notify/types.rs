use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    Begin,
    Success,
    Failure,
}

impl NotificationEvent {
    pub fn title(&self) -> &'static str {
        match self {
            NotificationEvent::Begin => "Scapegoat hunter, deploy!",
            NotificationEvent::Success => "Ding-a-ling~ Tests passed!",
            NotificationEvent::Failure => "Clang clang clang! Tests failed!",
        }
    }

    fn log_heading(&self) -> &'static str {
        match self {
            NotificationEvent::Begin | NotificationEvent::Success => "Latest commit:",
            NotificationEvent::Failure => "Suspects:",
        }
    }
}

/// Webhook body: `{"title": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub title: String,
    pub content: String,
}

impl Payload {
    pub fn new(event: NotificationEvent, branch: &str, commit_log: &str) -> Self {
        Self {
            title: event.title().to_string(),
            content: format!(
                "Branch: {}\n{}\n{}",
                branch,
                event.log_heading(),
                commit_log
            ),
        }
    }
}
