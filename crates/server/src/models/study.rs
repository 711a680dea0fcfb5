//! Study-processing request and response types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

use stud_core::validation::{self, ValidationErrors};

/// Which study material to generate for a source URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyAction {
    Playlists,
    Quizzes,
    Roadmap,
}

impl StudyAction {
    /// Every action, in the order they are documented to clients.
    pub const ALL: [Self; 3] = [Self::Playlists, Self::Quizzes, Self::Roadmap];

    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playlists => "playlists",
            Self::Quizzes => "quizzes",
            Self::Roadmap => "roadmap",
        }
    }
}

impl fmt::Display for StudyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid action. Expected 'playlists' | 'quizzes' | 'roadmap', received '{s}'"
                )
            })
    }
}

/// A validated study-processing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyRequest {
    /// Source URL exactly as the client sent it. Guaranteed to parse as an
    /// absolute URL with a host.
    pub url: String,
    /// Requested material.
    pub action: StudyAction,
}

impl StudyRequest {
    /// Validate a raw request body.
    ///
    /// The URL check is purely syntactic; nothing is fetched.
    ///
    /// # Errors
    ///
    /// Returns every failing field: `url` when missing or not an absolute
    /// URL with scheme and host, `action` when missing or unknown.
    pub fn from_body(body: &[u8]) -> Result<Self, ValidationErrors> {
        let body = validation::parse_object(body)?;
        let mut errors = ValidationErrors::new();

        let url = validation::required_string(&body, "url", &mut errors).and_then(|raw| {
            if is_absolute_url(raw) {
                Some(raw.to_owned())
            } else {
                errors.add_field("url", "Invalid url");
                None
            }
        });

        let action = validation::required_string(&body, "action", &mut errors)
            .and_then(|raw| {
                raw.parse::<StudyAction>()
                    .map_err(|e| errors.add_field("action", e))
                    .ok()
            });

        match (url, action) {
            (Some(url), Some(action)) => errors.into_result(Self { url, action }),
            _ => Err(errors),
        }
    }
}

/// Returns `true` if `raw` is an absolute URL with both scheme and host.
fn is_absolute_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

/// Outcome marker of a study response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// A curated playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Playlist {
    pub title: &'static str,
    pub items: u32,
}

/// A generated quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    pub topic: &'static str,
    pub questions: u32,
}

/// One phase of a learning roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapPhase {
    pub phase: &'static str,
    pub duration_weeks: u32,
}

/// Payload of a successful study response.
///
/// Serializes as an object with exactly one key named after the action,
/// e.g. `{"quizzes": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyData {
    Playlists(&'static [Playlist]),
    Quizzes(&'static [Quiz]),
    Roadmap(&'static [RoadmapPhase]),
}

/// Response of `POST /study/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<StudyData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationErrors>,
}

impl StudyResponse {
    /// Successful response carrying `data`.
    #[must_use]
    pub const fn ok(message: String, data: StudyData) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message,
            data: Some(data),
            error: None,
        }
    }

    /// Rejection of an invalid request body.
    #[must_use]
    pub fn invalid(errors: ValidationErrors) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: "Invalid request".to_string(),
            data: None,
            error: Some(errors),
        }
    }

    /// Rejection of a request made with the wrong HTTP method.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self {
            status: ResponseStatus::Error,
            message: "Method Not Allowed".to_string(),
            data: None,
            error: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trips_through_str() {
        for action in StudyAction::ALL {
            assert_eq!(action.as_str().parse::<StudyAction>().unwrap(), action);
        }
        assert!("Quizzes".parse::<StudyAction>().is_err());
    }

    #[test]
    fn test_valid_request() {
        let request =
            StudyRequest::from_body(br#"{"url": "https://youtu.be/abc", "action": "quizzes"}"#)
                .unwrap();
        assert_eq!(request.url, "https://youtu.be/abc");
        assert_eq!(request.action, StudyAction::Quizzes);
    }

    #[test]
    fn test_missing_fields() {
        let errors = StudyRequest::from_body(b"{}").unwrap_err();
        assert_eq!(errors.field("url").unwrap(), [validation::REQUIRED]);
        assert_eq!(errors.field("action").unwrap(), [validation::REQUIRED]);
    }

    #[test]
    fn test_malformed_url() {
        for url in ["not a url", "youtu.be/abc", "mailto:someone@example.com", "/relative/path", ""] {
            let body = serde_json::json!({ "url": url, "action": "roadmap" }).to_string();
            let errors = StudyRequest::from_body(body.as_bytes()).unwrap_err();
            assert_eq!(errors.field("url").unwrap(), ["Invalid url"], "{url}");
            assert!(errors.field("action").is_none());
        }
    }

    #[test]
    fn test_unknown_action() {
        let errors =
            StudyRequest::from_body(br#"{"url": "https://example.com", "action": "summaries"}"#)
                .unwrap_err();
        let messages = errors.field("action").unwrap();
        assert!(messages[0].contains("received 'summaries'"));
        assert!(errors.field("url").is_none());
    }

    #[test]
    fn test_data_serializes_under_action_key() {
        const QUIZZES: &[Quiz] = &[Quiz {
            topic: "T",
            questions: 1,
        }];
        let json = serde_json::to_value(StudyData::Quizzes(QUIZZES)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "quizzes": [{ "topic": "T", "questions": 1 }] })
        );
    }

    #[test]
    fn test_invalid_response_shape() {
        let json = serde_json::to_value(StudyResponse::invalid(ValidationErrors::form("bad"))).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Invalid request");
        assert_eq!(json["error"]["formErrors"][0], "bad");
        assert!(json.get("data").is_none());
    }
}
