use std::fmt;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Kind of catalog entry
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Course,
    Event,
}

impl ContentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Course difficulty
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A course in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub instructor: String,
    /// Free-form label such as "6 weeks"
    pub duration: String,
    pub level: Level,
    pub rating: f64,
    pub enrolled_count: u32,
    pub thumbnail: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub location: String,
    /// Zero means free
    pub price: f64,
    pub tags: Vec<String>,
}

impl CourseRecord {
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

/// An event in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    /// Free-form label such as "10:00 AM"
    pub time: String,
    pub location: String,
    pub organizer: String,
    pub capacity: u32,
    /// Not guaranteed to be <= capacity
    pub registered: u32,
    pub thumbnail: String,
    pub tags: Vec<String>,
    pub is_online: bool,
}

impl EventRecord {
    pub fn spots_left(&self) -> u32 {
        self.capacity.saturating_sub(self.registered)
    }

    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }
}

/// Common view over courses and events used by the repository and queries
pub trait CatalogItem: Clone + Serialize + DeserializeOwned + Send + 'static {
    const KIND: ContentKind;

    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;
    fn tags(&self) -> &[String];

    /// Case-insensitive substring match against title, description,
    /// category and tags. `needle` must already be lowercased.
    fn matches_lowercase(&self, needle: &str) -> bool {
        self.title().to_lowercase().contains(needle)
            || self.description().to_lowercase().contains(needle)
            || self.category().to_lowercase().contains(needle)
            || self.tags().iter().any(|t| t.to_lowercase().contains(needle))
    }
}

impl CatalogItem for CourseRecord {
    const KIND: ContentKind = ContentKind::Course;

    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl CatalogItem for EventRecord {
    const KIND: ContentKind = ContentKind::Event;

    fn id(&self) -> &str {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
}

/// Courses and events returned together by search and category queries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentResults {
    pub courses: Vec<CourseRecord>,
    pub events: Vec<EventRecord>,
}

impl ContentResults {
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.courses.len() + self.events.len()
    }
}

/// A category and how many entries of each kind use it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub courses: usize,
    pub events: usize,
}
