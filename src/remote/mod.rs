//! Remote content source

mod client;
pub mod mapping;
pub mod types;

pub use client::{OpenLibraryClient, COURSE_SUBJECTS, EVENT_TOPICS};

use crate::catalog::{CourseRecord, EventRecord};
use crate::error::Result;

/// Somewhere live course and event listings can be fetched from
pub trait ContentSource: Send + Sync {
    fn fetch_courses(&self) -> Result<Vec<CourseRecord>>;
    fn fetch_events(&self) -> Result<Vec<EventRecord>>;
}
