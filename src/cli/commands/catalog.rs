//! Catalog browsing commands

use crate::bookmarks::BookmarkLedger;
use crate::catalog::ContentKind;
use crate::cli::args::{CategoryArgs, CoursesArgs, EventsArgs, OutputFormat, SearchArgs, ShowArgs};
use crate::error::{Result, UniscoutError};
use crate::output;
use crate::repository::ContentRepository;

/// Handle the courses command
pub fn courses(repo: &ContentRepository, args: &CoursesArgs, format: OutputFormat) -> Result<String> {
    let courses: Vec<_> = repo
        .get_courses()
        .into_iter()
        .filter(|c| args.category.as_ref().map_or(true, |cat| &c.category == cat))
        .filter(|c| args.level.map_or(true, |level| c.level == level))
        .filter(|c| !args.free || c.is_free())
        .take(args.limit)
        .collect();

    output::format_courses(&courses, format)
}

/// Handle the events command
pub fn events(repo: &ContentRepository, args: &EventsArgs, format: OutputFormat) -> Result<String> {
    let events: Vec<_> = repo
        .get_events()
        .into_iter()
        .filter(|e| args.category.as_ref().map_or(true, |cat| &e.category == cat))
        .filter(|e| !args.online || e.is_online)
        .take(args.limit)
        .collect();

    output::format_events(&events, format)
}

/// Handle the course command
pub fn course(
    repo: &ContentRepository,
    ledger: &BookmarkLedger,
    args: &ShowArgs,
    format: OutputFormat,
) -> Result<String> {
    let course = repo
        .get_course_by_id(&args.id)
        .ok_or_else(|| UniscoutError::CourseNotFound(args.id.clone()))?;
    let saved = ledger.is_saved(&course.id, ContentKind::Course);

    output::format_course(&course, saved, format)
}

/// Handle the event command
pub fn event(
    repo: &ContentRepository,
    ledger: &BookmarkLedger,
    args: &ShowArgs,
    format: OutputFormat,
) -> Result<String> {
    let event = repo
        .get_event_by_id(&args.id)
        .ok_or_else(|| UniscoutError::EventNotFound(args.id.clone()))?;
    let saved = ledger.is_saved(&event.id, ContentKind::Event);

    output::format_event(&event, saved, format)
}

/// Handle the search command
pub fn search(repo: &ContentRepository, args: &SearchArgs, format: OutputFormat) -> Result<String> {
    let results = repo.search_content(&args.query);
    let heading = if args.query.trim().is_empty() {
        "All content".to_string()
    } else {
        format!("Results for \"{}\"", args.query)
    };

    output::format_results(&heading, &results, format)
}

/// Handle the category command
pub fn category(
    repo: &ContentRepository,
    args: &CategoryArgs,
    format: OutputFormat,
) -> Result<String> {
    match &args.name {
        Some(name) => {
            let results = repo.filter_by_category(name);
            output::format_results(&format!("Category \"{name}\""), &results, format)
        }
        None => output::format_categories(&repo.categories(), format),
    }
}
