use colored::Colorize;
use terminal_size::{terminal_size, Width};

use crate::catalog::{CategoryCount, ContentResults, CourseRecord, EventRecord, Level};
use crate::repository::{CacheEntryStatus, CacheStatus};
use crate::session::UserRecord;

const DEFAULT_WIDTH: usize = 80;

/// Terminal width, capped so lines stay readable
fn line_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| usize::from(w))
        .unwrap_or(DEFAULT_WIDTH)
        .min(DEFAULT_WIDTH)
}

fn rule(width: usize) -> String {
    "─".repeat(width)
}

/// Safely truncate a string to n characters, appending "..." if truncated.
/// Works correctly with multi-byte UTF-8 characters.
fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

fn price_display(course: &CourseRecord) -> String {
    if course.is_free() {
        "Free".green().to_string()
    } else {
        format!("${:.0}", course.price)
    }
}

fn level_display(level: Level) -> String {
    match level {
        Level::Beginner => level.as_str().green().to_string(),
        Level::Intermediate => level.as_str().yellow().to_string(),
        Level::Advanced => level.as_str().red().to_string(),
    }
}

fn saved_marker(saved: bool) -> String {
    if saved {
        format!(" {}", "[saved]".magenta())
    } else {
        String::new()
    }
}

/// Format age in human-readable form
pub fn format_age(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Courses
// ─────────────────────────────────────────────────────────────────────────────

fn push_course_lines(output: &mut String, courses: &[CourseRecord], width: usize) {
    for course in courses {
        output.push_str(&format!(
            "{} [{}]\n",
            truncate_str(&course.title, width.saturating_sub(16)).bold(),
            level_display(course.level)
        ));
        output.push_str(&format!("  {} {}\n", "Id:".cyan(), course.id));
        output.push_str(&format!(
            "  {} {}  {} {}\n",
            "Category:".cyan(),
            course.category,
            "Instructor:".cyan(),
            course.instructor
        ));
        output.push_str(&format!(
            "  {} {}  {} {:.1}  {} {}\n",
            "Duration:".cyan(),
            course.duration,
            "Rating:".cyan(),
            course.rating,
            "Price:".cyan(),
            price_display(course)
        ));
        output.push('\n');
    }
}

/// Format a list of courses for pretty output
pub fn format_courses(courses: &[CourseRecord]) -> String {
    if courses.is_empty() {
        return "No courses found.".to_string();
    }

    let width = line_width();
    let mut output = String::new();
    output.push_str(&format!("{} ({})\n", "Courses".bold(), courses.len()));
    output.push_str(&rule(width));
    output.push('\n');
    push_course_lines(&mut output, courses, width);

    output.trim_end().to_string()
}

/// Format a single course for pretty output
pub fn format_course(course: &CourseRecord, saved: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} [{}]{}\n",
        course.title.bold(),
        level_display(course.level),
        saved_marker(saved)
    ));
    output.push_str(&rule(50));
    output.push('\n');

    output.push_str(&format!("{} {}\n", "Id:".cyan(), course.id));
    output.push_str(&format!("{} {}\n", "Category:".cyan(), course.category));
    output.push_str(&format!("{} {}\n", "Instructor:".cyan(), course.instructor));
    output.push_str(&format!("{} {}\n", "Duration:".cyan(), course.duration));
    output.push_str(&format!(
        "{} {} → {}\n",
        "Dates:".cyan(),
        course.start_date.format("%Y-%m-%d"),
        course.end_date.format("%Y-%m-%d")
    ));
    output.push_str(&format!("{} {}\n", "Location:".cyan(), course.location));
    output.push_str(&format!(
        "{} {:.1} ({} enrolled)\n",
        "Rating:".cyan(),
        course.rating,
        course.enrolled_count
    ));
    output.push_str(&format!("{} {}\n", "Price:".cyan(), price_display(course)));

    if !course.tags.is_empty() {
        output.push_str(&format!("{} {}\n", "Tags:".cyan(), course.tags.join(", ")));
    }

    output.push_str(&format!("\n{}\n", course.description));
    output
}

// ─────────────────────────────────────────────────────────────────────────────
// Events
// ─────────────────────────────────────────────────────────────────────────────

fn capacity_display(event: &EventRecord) -> String {
    let text = format!("{}/{}", event.registered, event.capacity);
    if event.is_full() {
        format!("{} {}", text.red(), "(full)".red())
    } else {
        format!("{} ({} spots left)", text, event.spots_left())
    }
}

fn push_event_lines(output: &mut String, events: &[EventRecord], width: usize) {
    for event in events {
        let mode = if event.is_online {
            "online".green()
        } else {
            "in person".blue()
        };

        output.push_str(&format!(
            "{} [{}]\n",
            truncate_str(&event.title, width.saturating_sub(14)).bold(),
            mode
        ));
        output.push_str(&format!("  {} {}\n", "Id:".cyan(), event.id));
        output.push_str(&format!(
            "  {} {} {}  {} {}\n",
            "When:".cyan(),
            event.date.format("%Y-%m-%d"),
            event.time,
            "Where:".cyan(),
            event.location
        ));
        output.push_str(&format!(
            "  {} {}  {} {}\n",
            "Category:".cyan(),
            event.category,
            "Seats:".cyan(),
            capacity_display(event)
        ));
        output.push('\n');
    }
}

/// Format a list of events for pretty output
pub fn format_events(events: &[EventRecord]) -> String {
    if events.is_empty() {
        return "No events found.".to_string();
    }

    let width = line_width();
    let mut output = String::new();
    output.push_str(&format!("{} ({})\n", "Events".bold(), events.len()));
    output.push_str(&rule(width));
    output.push('\n');
    push_event_lines(&mut output, events, width);

    output.trim_end().to_string()
}

/// Format a single event for pretty output
pub fn format_event(event: &EventRecord, saved: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}{}\n", event.title.bold(), saved_marker(saved)));
    output.push_str(&rule(50));
    output.push('\n');

    output.push_str(&format!("{} {}\n", "Id:".cyan(), event.id));
    output.push_str(&format!("{} {}\n", "Category:".cyan(), event.category));
    output.push_str(&format!(
        "{} {} at {}\n",
        "When:".cyan(),
        event.date.format("%A, %d %B %Y"),
        event.time
    ));
    output.push_str(&format!(
        "{} {}{}\n",
        "Where:".cyan(),
        event.location,
        if event.is_online { " (online)" } else { "" }
    ));
    output.push_str(&format!("{} {}\n", "Organizer:".cyan(), event.organizer));
    output.push_str(&format!("{} {}\n", "Seats:".cyan(), capacity_display(event)));

    if !event.tags.is_empty() {
        output.push_str(&format!("{} {}\n", "Tags:".cyan(), event.tags.join(", ")));
    }

    output.push_str(&format!("\n{}\n", event.description));
    output
}

// ─────────────────────────────────────────────────────────────────────────────
// Mixed Results
// ─────────────────────────────────────────────────────────────────────────────

/// Format courses and events under one heading
pub fn format_results(heading: &str, results: &ContentResults) -> String {
    if results.is_empty() {
        return "No results found.".to_string();
    }

    let width = line_width();
    let mut output = String::new();
    output.push_str(&format!(
        "{} ({} courses, {} events)\n",
        heading.bold(),
        results.courses.len(),
        results.events.len()
    ));
    output.push_str(&rule(width));
    output.push('\n');

    if !results.courses.is_empty() {
        output.push_str(&format!("{}\n\n", "Courses".underline()));
        push_course_lines(&mut output, &results.courses, width);
    }
    if !results.events.is_empty() {
        output.push_str(&format!("{}\n\n", "Events".underline()));
        push_event_lines(&mut output, &results.events, width);
    }

    output.trim_end().to_string()
}

/// Format the category list
pub fn format_categories(categories: &[CategoryCount]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{}\n", "Categories".bold()));
    output.push_str(&rule(40));
    output.push('\n');

    for category in categories {
        let mut counts = Vec::new();
        if category.courses > 0 {
            counts.push(format!("{} courses", category.courses));
        }
        if category.events > 0 {
            counts.push(format!("{} events", category.events));
        }
        output.push_str(&format!(
            "{:24} {}\n",
            category.name,
            counts.join(", ").dimmed()
        ));
    }

    output.trim_end().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

/// Format a user profile
pub fn format_user(user: &UserRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", user.name.bold()));
    output.push_str(&rule(40));
    output.push('\n');
    output.push_str(&format!("{} {}\n", "Email:".cyan(), user.email));
    output.push_str(&format!("{} {}\n", "Student ID:".cyan(), user.student_id));
    output.push_str(&format!("{} {}\n", "Faculty:".cyan(), user.faculty));
    output.push_str(&format!("{} {}\n", "Year:".cyan(), user.year));
    output.push_str(&format!(
        "{} {}\n",
        "Member since:".cyan(),
        user.created_at.format("%Y-%m-%d")
    ));

    output.trim_end().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

fn push_entry_status(output: &mut String, label: &str, entry: &CacheEntryStatus) {
    output.push_str(&format!("{}\n", format!("{label} Cache:").dimmed()));

    if !entry.exists {
        output.push_str(&format!("  {}\n", "Not cached".dimmed()));
        return;
    }

    match entry.count {
        Some(count) => output.push_str(&format!("  Entries: {}\n", count)),
        None => output.push_str(&format!("  {}\n", "Unreadable".red())),
    }

    if let Some(age) = entry.age_secs {
        let freshness = if entry.fresh {
            "(fresh)".green()
        } else {
            "(stale)".yellow()
        };
        output.push_str(&format!("  Age: {} {}\n", format_age(age), freshness));
    }
}

/// Format durable cache status
pub fn format_cache_status(status: &CacheStatus, location: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "Cache Status".bold()));
    output.push_str(&format!("Location: {}\n", location));
    output.push_str(&format!("Freshness window: {}\n\n", format_age(status.ttl_secs)));

    push_entry_status(&mut output, "Courses", &status.courses);
    output.push('\n');
    push_entry_status(&mut output, "Events", &status.events);

    output.trim_end().to_string()
}
