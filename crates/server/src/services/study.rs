//! Mock study-material generator.
//!
//! Every action maps to one fixed dataset. The source URL is only echoed in
//! the response message; nothing is fetched or ranked.

use crate::models::study::{Playlist, Quiz, RoadmapPhase, StudyAction, StudyData, StudyRequest, StudyResponse};

const PLAYLISTS: &[Playlist] = &[
    Playlist { title: "Foundations", items: 8 },
    Playlist { title: "Intermediate", items: 12 },
    Playlist { title: "Advanced", items: 6 },
];

const QUIZZES: &[Quiz] = &[
    Quiz { topic: "Core Concepts", questions: 10 },
    Quiz { topic: "Applied Practice", questions: 12 },
];

const ROADMAP: &[RoadmapPhase] = &[
    RoadmapPhase { phase: "Orientation", duration_weeks: 1 },
    RoadmapPhase { phase: "Skill Building", duration_weeks: 4 },
    RoadmapPhase { phase: "Projects", duration_weeks: 3 },
];

/// Dataset served for `action`.
#[must_use]
pub const fn dataset(action: StudyAction) -> StudyData {
    match action {
        StudyAction::Playlists => StudyData::Playlists(PLAYLISTS),
        StudyAction::Quizzes => StudyData::Quizzes(QUIZZES),
        StudyAction::Roadmap => StudyData::Roadmap(ROADMAP),
    }
}

/// Build the response for a validated request.
#[must_use]
pub fn process(request: &StudyRequest) -> StudyResponse {
    StudyResponse::ok(
        format!("Processed {} for {}", request.action, request.url),
        dataset(request.action),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::study::ResponseStatus;

    fn request(url: &str, action: StudyAction) -> StudyRequest {
        StudyRequest {
            url: url.to_string(),
            action,
        }
    }

    #[test]
    fn test_quizzes_dataset() {
        let response = process(&request("https://youtu.be/abc", StudyAction::Quizzes));
        assert_eq!(response.status, ResponseStatus::Ok);
        assert_eq!(response.message, "Processed quizzes for https://youtu.be/abc");

        let Some(StudyData::Quizzes(quizzes)) = response.data else {
            panic!("expected quizzes payload");
        };
        assert_eq!(
            quizzes,
            [
                Quiz { topic: "Core Concepts", questions: 10 },
                Quiz { topic: "Applied Practice", questions: 12 },
            ]
        );
    }

    #[test]
    fn test_each_action_selects_its_dataset() {
        for action in StudyAction::ALL {
            let data = process(&request("https://example.com/course", action)).data;
            let data = data.unwrap_or_else(|| panic!("{action} has no data"));
            assert_eq!(data, dataset(action));
        }
        assert!(matches!(dataset(StudyAction::Playlists), StudyData::Playlists(items) if items.len() == 3));
        assert!(matches!(dataset(StudyAction::Quizzes), StudyData::Quizzes(items) if items.len() == 2));
        assert!(matches!(dataset(StudyAction::Roadmap), StudyData::Roadmap(items) if items.len() == 3));
    }

    #[test]
    fn test_deterministic_regardless_of_url() {
        for action in StudyAction::ALL {
            let a = process(&request("https://a.example/1", action));
            let b = process(&request("https://b.example/2?x=y", action));
            let c = process(&request("https://a.example/1", action));
            assert_eq!(a.data, b.data);
            assert_eq!(a, c);
        }
    }

    #[test]
    fn test_url_echoed_verbatim() {
        let response = process(&request("https://Example.com", StudyAction::Roadmap));
        assert_eq!(response.message, "Processed roadmap for https://Example.com");
    }

    #[test]
    fn test_roadmap_wire_shape() {
        let json = serde_json::to_value(process(&request("https://x.io", StudyAction::Roadmap)))
            .unwrap_or_default();
        assert_eq!(json["data"]["roadmap"][1]["phase"], "Skill Building");
        assert_eq!(json["data"]["roadmap"][1]["durationWeeks"], 4);
        assert!(json.get("error").is_none());
    }
}
