pub mod json;
pub mod pretty;

use crate::catalog::{CategoryCount, ContentResults, CourseRecord, EventRecord};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::repository::CacheStatus;
use crate::session::UserRecord;

/// Format a list of courses based on output format
pub fn format_courses(courses: &[CourseRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_courses(courses)),
        OutputFormat::Json => json::format_json(courses),
    }
}

/// Format a single course based on output format
pub fn format_course(course: &CourseRecord, saved: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_course(course, saved)),
        OutputFormat::Json => json::format_with_saved(course, saved),
    }
}

/// Format a list of events based on output format
pub fn format_events(events: &[EventRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_events(events)),
        OutputFormat::Json => json::format_json(events),
    }
}

/// Format a single event based on output format
pub fn format_event(event: &EventRecord, saved: bool, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_event(event, saved)),
        OutputFormat::Json => json::format_with_saved(event, saved),
    }
}

/// Format combined search/category results
pub fn format_results(
    heading: &str,
    results: &ContentResults,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_results(heading, results)),
        OutputFormat::Json => json::format_json(results),
    }
}

/// Format the category list
pub fn format_categories(categories: &[CategoryCount], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_categories(categories)),
        OutputFormat::Json => json::format_json(categories),
    }
}

/// Format a user profile
pub fn format_user(user: &UserRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_user(user)),
        OutputFormat::Json => json::format_json(user),
    }
}

/// Format durable cache status
pub fn format_cache_status(
    status: &CacheStatus,
    location: &str,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(pretty::format_cache_status(status, location)),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "store_dir": location,
                "ttl_secs": status.ttl_secs,
                "courses": status.courses,
                "events": status.events,
            });
            json::format_json(&json)
        }
    }
}
