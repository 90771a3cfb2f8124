//! Reinterpret Open Library works and search hits as catalog records
//!
//! The API has no notion of ratings, prices, schedules or capacity, so those
//! fields are filled with random but plausible values.

use chrono::{Days, NaiveDate};
use rand::Rng;

use super::types::{SearchDoc, Work};
use crate::catalog::{CourseRecord, EventRecord, Level};

const EVENT_TYPES: [&str; 6] = ["Workshop", "Seminar", "Conference", "Webinar", "Hackathon", "Tech Talk"];
const EVENT_LOCATIONS: [&str; 6] = [
    "Main Auditorium",
    "Computer Lab 1",
    "Engineering Building",
    "Online",
    "Lecture Hall A",
    "Innovation Center",
];
const ORGANIZER: &str = "UoM Tech Club";

fn cover_url(cover: Option<u64>, placeholder: &str) -> String {
    match cover {
        Some(id) => format!("https://covers.openlibrary.org/b/id/{id}-L.jpg"),
        None => format!("https://via.placeholder.com/300x200?text={placeholder}"),
    }
}

fn add_days(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

/// "machine learning" -> "Machine Learning"
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Build a course from the `work_index`-th work of the `subject_index`-th subject
pub fn course_from_work(
    subject_index: usize,
    work_index: usize,
    subject: &str,
    work: &Work,
    today: NaiveDate,
    rng: &mut impl Rng,
) -> CourseRecord {
    let category = subject.replacen('_', " ", 1);
    let subjects: Vec<String> = work.subject.iter().take(3).cloned().collect();

    let weeks: u64 = rng.gen_range(4..12);
    let start_date = add_days(today, rng.gen_range(0..30));
    let end_date = add_days(start_date, rng.gen_range(4..12u64) * 7);

    // One decimal place, 4.0..=5.0
    let rating = ((4.0 + rng.gen::<f64>()) * 10.0).round() / 10.0;
    let price = if rng.gen_bool(0.5) {
        0.0
    } else {
        f64::from(rng.gen_range(20..120u32))
    };

    let (description, tags) = if subjects.is_empty() {
        (
            "Comprehensive course content covering essential topics and practical applications."
                .to_string(),
            vec!["Education".to_string(), "Learning".to_string(), category.clone()],
        )
    } else {
        (subjects.join(", "), subjects)
    };

    CourseRecord {
        id: format!("{subject_index}_{work_index}"),
        title: work
            .title
            .clone()
            .unwrap_or_else(|| "Educational Course".to_string()),
        description,
        instructor: work
            .authors
            .first()
            .and_then(|a| a.name.clone())
            .unwrap_or_else(|| "Expert Instructor".to_string()),
        duration: format!("{weeks} weeks"),
        level: Level::ALL[rng.gen_range(0..Level::ALL.len())],
        rating,
        enrolled_count: rng.gen_range(1000..6000),
        thumbnail: cover_url(work.cover_id, "Course"),
        start_date,
        end_date,
        location: if rng.gen_bool(0.5) {
            "Online"
        } else {
            "Campus - Main Building"
        }
        .to_string(),
        price,
        tags,
        category,
    }
}

/// Build the `index`-th event from the top search hit for `topic`
pub fn event_from_doc(
    index: usize,
    topic: &str,
    doc: &SearchDoc,
    today: NaiveDate,
    rng: &mut impl Rng,
) -> EventRecord {
    let event_type = EVENT_TYPES[index % EVENT_TYPES.len()];
    let location = EVENT_LOCATIONS[index % EVENT_LOCATIONS.len()];

    let capacity: u32 = rng.gen_range(50..150);
    let fill: f64 = 0.5 + rng.gen::<f64>() * 0.4;
    let registered = (f64::from(capacity) * fill).floor() as u32;

    let meridiem = if index % 2 == 0 { "AM" } else { "PM" };
    let first_word = topic.split(' ').next().unwrap_or(topic);

    EventRecord {
        id: format!("event_{index}"),
        title: format!("{} {}", title_case(topic), event_type),
        description: format!(
            "Join us for an exciting {} on {}. Learn from industry experts and enhance your skills in this cutting-edge field.",
            event_type.to_lowercase(),
            topic
        ),
        category: event_type.to_string(),
        date: add_days(today, rng.gen_range(1..=60)),
        time: format!("{}:00 {}", 9 + index % 6, meridiem),
        location: location.to_string(),
        organizer: ORGANIZER.to_string(),
        capacity,
        registered,
        thumbnail: cover_url(doc.cover_i, "Event"),
        tags: vec![
            first_word.to_string(),
            "Education".to_string(),
            "Technology".to_string(),
        ],
        is_online: location == "Online",
    }
}
