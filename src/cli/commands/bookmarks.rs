//! Bookmark commands

use colored::Colorize;

use crate::bookmarks::BookmarkLedger;
use crate::catalog::{ContentKind, ContentResults};
use crate::cli::args::{BookmarkArgs, OutputFormat, SavedArgs};
use crate::error::{Result, UniscoutError};
use crate::output;
use crate::repository::ContentRepository;

/// Look up the title of a record, failing when the id does not resolve
fn require_title(repo: &ContentRepository, kind: ContentKind, id: &str) -> Result<String> {
    match kind {
        ContentKind::Course => repo
            .get_course_by_id(id)
            .map(|c| c.title)
            .ok_or_else(|| UniscoutError::CourseNotFound(id.to_string())),
        ContentKind::Event => repo
            .get_event_by_id(id)
            .map(|e| e.title)
            .ok_or_else(|| UniscoutError::EventNotFound(id.to_string())),
    }
}

fn report(args: &BookmarkArgs, saved: bool, title: Option<&str>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => {
            let label = title.unwrap_or(&args.id);
            if saved {
                Ok(format!("{} Saved {} {}", "✓".green(), args.kind, label.bold()))
            } else {
                Ok(format!("{} Removed {} {}", "✓".green(), args.kind, label.bold()))
            }
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "id": args.id,
                "type": args.kind,
                "saved": saved
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Handle the save command
pub fn save(
    repo: &ContentRepository,
    ledger: &BookmarkLedger,
    args: &BookmarkArgs,
    format: OutputFormat,
) -> Result<String> {
    let title = require_title(repo, args.kind, &args.id)?;
    ledger.save(&args.id, args.kind)?;
    report(args, true, Some(&title), format)
}

/// Handle the unsave command
///
/// Works for ids that no longer resolve so stale bookmarks can be dropped.
pub fn unsave(ledger: &BookmarkLedger, args: &BookmarkArgs, format: OutputFormat) -> Result<String> {
    ledger.unsave(&args.id, args.kind)?;
    report(args, false, None, format)
}

/// Handle the toggle command
pub fn toggle(
    repo: &ContentRepository,
    ledger: &BookmarkLedger,
    args: &BookmarkArgs,
    format: OutputFormat,
) -> Result<String> {
    let title = require_title(repo, args.kind, &args.id)?;
    let saved = ledger.toggle(&args.id, args.kind)?;
    report(args, saved, Some(&title), format)
}

/// Handle the saved command
pub fn saved(
    repo: &ContentRepository,
    ledger: &BookmarkLedger,
    args: &SavedArgs,
    format: OutputFormat,
) -> Result<String> {
    match args.kind {
        Some(ContentKind::Course) => output::format_courses(&ledger.saved_courses(repo), format),
        Some(ContentKind::Event) => output::format_events(&ledger.saved_events(repo), format),
        None => {
            let results = ContentResults {
                courses: ledger.saved_courses(repo),
                events: ledger.saved_events(repo),
            };
            if results.is_empty() && format == OutputFormat::Pretty {
                return Ok("No saved items.".to_string());
            }
            output::format_results("Saved items", &results, format)
        }
    }
}
