//! Bundled catalog served when neither the network nor the cache can help
//!
//! Dates are relative to today so the catalog never looks expired.

use chrono::{Days, Local, NaiveDate};

use super::types::{CourseRecord, EventRecord, Level};

const ORGANIZER: &str = "UoM Tech Club";
const EVENT_THUMBNAIL: &str = "https://via.placeholder.com/300x200?text=Tech+Event";
const COURSE_THUMBNAIL: &str = "https://via.placeholder.com/300x200?text=Course";

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn days_from(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|t| t.to_string()).collect()
}

/// Bundled courses; never empty
pub fn courses() -> Vec<CourseRecord> {
    // (title, category, instructor, weeks, level, rating, enrolled, price, location, tags)
    let rows: [(&str, &str, &str, u64, Level, f64, u32, f64, &str, &[&str]); 8] = [
        (
            "Introduction to Programming",
            "computer science",
            "Dr. Nimal Perera",
            8,
            Level::Beginner,
            4.7,
            3420,
            0.0,
            "Campus - Main Building",
            &["Programming", "Python", "Fundamentals"],
        ),
        (
            "Data Structures and Algorithms",
            "computer science",
            "Prof. Kumari Silva",
            10,
            Level::Intermediate,
            4.8,
            2875,
            49.0,
            "Online",
            &["Algorithms", "Data Structures", "Problem Solving"],
        ),
        (
            "Linear Algebra for Engineers",
            "mathematics",
            "Dr. Ruwan Jayasinghe",
            6,
            Level::Intermediate,
            4.5,
            1960,
            0.0,
            "Campus - Main Building",
            &["Mathematics", "Matrices", "Engineering"],
        ),
        (
            "Thermodynamics Fundamentals",
            "engineering",
            "Prof. Anura Fernando",
            9,
            Level::Advanced,
            4.4,
            1210,
            79.0,
            "Campus - Main Building",
            &["Engineering", "Physics", "Energy"],
        ),
        (
            "Entrepreneurship Essentials",
            "business",
            "Ms. Dilini Wickramasinghe",
            5,
            Level::Beginner,
            4.6,
            2240,
            0.0,
            "Online",
            &["Business", "Startups", "Innovation"],
        ),
        (
            "User Interface Design",
            "design",
            "Mr. Kasun Bandara",
            7,
            Level::Beginner,
            4.9,
            3015,
            35.0,
            "Online",
            &["Design", "UI", "UX"],
        ),
        (
            "Machine Learning Foundations",
            "computer science",
            "Dr. Shanika Ratnayake",
            12,
            Level::Advanced,
            4.8,
            4580,
            99.0,
            "Online",
            &["Machine Learning", "AI", "Statistics"],
        ),
        (
            "Environmental Science",
            "science",
            "Dr. Chaminda Gunawardena",
            6,
            Level::Beginner,
            4.3,
            1045,
            0.0,
            "Campus - Main Building",
            &["Science", "Sustainability", "Climate"],
        ),
    ];

    let today = today();

    rows.iter()
        .enumerate()
        .map(
            |(i, (title, category, instructor, weeks, level, rating, enrolled, price, location, t))| {
                let start_date = days_from(today, 7 + i as u64 * 4);
                CourseRecord {
                    id: format!("course_{}", i + 1),
                    title: title.to_string(),
                    description: format!(
                        "A structured {} course covering the essential concepts of {} with hands-on practice.",
                        level.as_str().to_lowercase(),
                        category
                    ),
                    category: category.to_string(),
                    instructor: instructor.to_string(),
                    duration: format!("{weeks} weeks"),
                    level: *level,
                    rating: *rating,
                    enrolled_count: *enrolled,
                    thumbnail: COURSE_THUMBNAIL.to_string(),
                    start_date,
                    end_date: days_from(start_date, weeks * 7),
                    location: location.to_string(),
                    price: *price,
                    tags: tags(t),
                }
            },
        )
        .collect()
}

/// Bundled events; never empty
pub fn events() -> Vec<EventRecord> {
    const EVENT_TYPES: [&str; 4] = ["Workshop", "Seminar", "Conference", "Webinar"];
    const TOPICS: [&str; 8] = [
        "AI & Machine Learning",
        "Web Development",
        "Mobile App Development",
        "Cybersecurity",
        "Data Science",
        "Cloud Computing",
        "DevOps",
        "Blockchain",
    ];

    let today = today();

    TOPICS
        .iter()
        .enumerate()
        .map(|(i, topic)| {
            let event_type = EVENT_TYPES[i % EVENT_TYPES.len()];
            let online = i % 2 == 0;
            let first_word = topic.split(' ').next().unwrap_or(topic);

            EventRecord {
                id: format!("fallback_{i}"),
                title: format!("{topic} {event_type}"),
                description: format!(
                    "An intensive {} focusing on {}. Perfect for students looking to enhance their technical skills.",
                    event_type.to_lowercase(),
                    topic.to_lowercase()
                ),
                category: event_type.to_string(),
                date: days_from(today, 3 + i as u64 * 5),
                time: format!("{}:00 AM", 10 + i),
                location: if online { "Online" } else { "Main Auditorium" }.to_string(),
                organizer: ORGANIZER.to_string(),
                capacity: 100,
                registered: 65 + i as u32 * 5,
                thumbnail: EVENT_THUMBNAIL.to_string(),
                tags: tags(&[first_word, "Education", "Technology"]),
                is_online: online,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_fallback_is_non_empty() {
        assert!(!courses().is_empty());
        assert!(!events().is_empty());
    }

    #[test]
    fn test_fallback_ids_are_unique() {
        let course_ids: HashSet<_> = courses().into_iter().map(|c| c.id).collect();
        assert_eq!(course_ids.len(), courses().len());

        let event_ids: HashSet<_> = events().into_iter().map(|e| e.id).collect();
        assert_eq!(event_ids.len(), events().len());
    }

    #[test]
    fn test_fallback_dates_are_in_the_future() {
        let today = today();
        assert!(courses().iter().all(|c| c.start_date > today && c.end_date > c.start_date));
        assert!(events().iter().all(|e| e.date > today));
    }

    #[test]
    fn test_fallback_events_do_not_exceed_capacity() {
        assert!(events().iter().all(|e| e.registered <= e.capacity));
    }

    #[test]
    fn test_online_flag_matches_location() {
        for event in events() {
            assert_eq!(event.is_online, event.location == "Online");
        }
    }
}
