use chrono::Local;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use super::mapping::{course_from_work, event_from_doc};
use super::types::{SearchResponse, SubjectResponse};
use super::ContentSource;
use crate::catalog::{CourseRecord, EventRecord};
use crate::config::Config;
use crate::error::{Result, UniscoutError};

const USER_AGENT: &str = concat!("uniscout/", env!("CARGO_PKG_VERSION"));

/// Subjects reinterpreted as course categories
pub const COURSE_SUBJECTS: [&str; 6] = [
    "computer_science",
    "mathematics",
    "engineering",
    "business",
    "design",
    "science",
];

/// Topics reinterpreted as events
pub const EVENT_TOPICS: [&str; 8] = [
    "artificial intelligence",
    "web development",
    "data science",
    "mobile programming",
    "cybersecurity",
    "machine learning",
    "software engineering",
    "cloud computing",
];

const MAX_COURSES: usize = 8;
const WORKS_PER_SUBJECT: usize = 2;

/// Open Library API client
pub struct OpenLibraryClient {
    client: Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Create a new client from configuration
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.remote.base_url, config.remote_timeout())
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request against the API
    fn get<T: serde::de::DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(query)
            .finish();
        let url = format!("{}{path}?{query}", self.base_url);

        let response = self.client.get(&url).send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(UniscoutError::api(status.as_u16(), message));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(UniscoutError::Json)
    }
}

impl ContentSource for OpenLibraryClient {
    fn fetch_courses(&self) -> Result<Vec<CourseRecord>> {
        let today = Local::now().date_naive();
        let mut rng = rand::thread_rng();
        let limit = WORKS_PER_SUBJECT.to_string();
        let mut courses = Vec::new();

        for (i, subject) in COURSE_SUBJECTS.iter().enumerate() {
            if courses.len() >= MAX_COURSES {
                break;
            }

            let response: SubjectResponse =
                match self.get(&format!("/subjects/{subject}.json"), &[("limit", limit.as_str())]) {
                    Ok(r) => r,
                    Err(UniscoutError::Api { status, .. }) => {
                        debug!(subject, status, "skipping subject");
                        continue;
                    }
                    Err(e) => return Err(e),
                };

            courses.extend(
                response
                    .works
                    .iter()
                    .take(WORKS_PER_SUBJECT)
                    .enumerate()
                    .map(|(j, work)| course_from_work(i, j, subject, work, today, &mut rng)),
            );
        }

        courses.truncate(MAX_COURSES);
        Ok(courses)
    }

    fn fetch_events(&self) -> Result<Vec<EventRecord>> {
        let today = Local::now().date_naive();
        let mut rng = rand::thread_rng();
        let mut events = Vec::new();

        for (i, topic) in EVENT_TOPICS.iter().enumerate() {
            let response: SearchResponse =
                match self.get("/search.json", &[("q", *topic), ("limit", "1")]) {
                    Ok(r) => r,
                    Err(UniscoutError::Api { status, .. }) => {
                        debug!(topic, status, "skipping topic");
                        continue;
                    }
                    Err(e) => return Err(e),
                };

            if let Some(doc) = response.docs.first() {
                events.push(event_from_doc(i, topic, doc, today, &mut rng));
            }
        }

        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> OpenLibraryClient {
        OpenLibraryClient::with_base_url(&server.url(), Duration::from_secs(5)).unwrap()
    }

    fn subject_body(title: &str) -> String {
        serde_json::json!({
            "works": [
                {"title": format!("{title} I"), "authors": [{"name": "A. Author"}], "cover_id": 1, "subject": ["One", "Two"]},
                {"title": format!("{title} II"), "authors": [], "subject": []},
                {"title": format!("{title} III")}
            ]
        })
        .to_string()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Course Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_fetch_courses_caps_at_eight() {
        let mut server = Server::new();
        let _m = server
            .mock("GET", Matcher::Regex(r"^/subjects/\w+\.json".to_string()))
            .match_query(Matcher::UrlEncoded("limit".into(), "2".into()))
            .with_status(200)
            .with_body(subject_body("Book"))
            .expect(4)
            .create();

        let courses = client_for(&server).fetch_courses().unwrap();

        assert_eq!(courses.len(), 8);
        assert_eq!(courses[0].id, "0_0");
        assert_eq!(courses[0].category, "computer science");
        assert_eq!(courses[1].id, "0_1");
        assert_eq!(courses[7].id, "3_1");
        assert_eq!(courses[7].category, "business");
        _m.assert();
    }

    #[test]
    fn test_fetch_courses_skips_failing_subjects() {
        let mut server = Server::new();
        let _ok = server
            .mock("GET", "/subjects/design.json")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(subject_body("Design"))
            .create();
        let _err = server
            .mock("GET", Matcher::Regex(r"^/subjects/(computer_science|mathematics|engineering|business|science)\.json".to_string()))
            .match_query(Matcher::Any)
            .with_status(503)
            .create();

        let courses = client_for(&server).fetch_courses().unwrap();

        assert_eq!(courses.len(), 2);
        assert!(courses.iter().all(|c| c.category == "design"));
        assert_eq!(courses[0].id, "4_0");
    }

    #[test]
    fn test_fetch_courses_invalid_json_is_error() {
        let mut server = Server::new();
        let _m = server
            .mock("GET", Matcher::Any)
            .with_status(200)
            .with_body("<html>")
            .create();

        assert!(client_for(&server).fetch_courses().is_err());
    }

    #[test]
    fn test_fetch_courses_connection_refused_is_error() {
        let client =
            OpenLibraryClient::with_base_url("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        assert!(client.fetch_courses().is_err());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Event Tests
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_fetch_events_one_per_topic() {
        let mut server = Server::new();
        let _m = server
            .mock("GET", "/search.json")
            .match_query(Matcher::UrlEncoded("limit".into(), "1".into()))
            .with_status(200)
            .with_body(r#"{"docs": [{"title": "Some Book", "cover_i": 12}]}"#)
            .expect(8)
            .create();

        let events = client_for(&server).fetch_events().unwrap();

        assert_eq!(events.len(), 8);
        assert_eq!(events[0].id, "event_0");
        assert_eq!(events[0].title, "Artificial Intelligence Workshop");
        assert_eq!(events[7].title, "Cloud Computing Tech Talk");
        _m.assert();
    }

    #[test]
    fn test_fetch_events_encodes_topic() {
        let mut server = Server::new();
        let _hit = server
            .mock("GET", "/search.json")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "data science".into()),
                Matcher::UrlEncoded("limit".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"docs": [{"title": "Data"}]}"#)
            .create();
        let _empty = server
            .mock("GET", "/search.json")
            .match_query(Matcher::Regex(
                "q=(artificial|web|mobile|cybersecurity|machine|software|cloud)".to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"docs": []}"#)
            .create();

        let events = client_for(&server).fetch_events().unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "event_2");
        assert_eq!(events[0].title, "Data Science Conference");
    }
}
