//! Weekly class timetable, independent from the score ledger.

use std::fmt;

use indexmap::IndexMap;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

/// Card colors offered for courses.
pub const COURSE_COLORS: [&str; 12] = [
    "#FFCDD2", "#BBDEFB", "#C8E6C9", "#FFF9C4", "#E1BEE7", "#F8BBD0", "#D7CCC8", "#F0F4C3",
    "#B2DFDB", "#B3E5FC", "#DCEDC8", "#FFE0B2",
];

/// Day a course takes place on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DayOfWeek {
    /// Monday.
    Mon,
    /// Tuesday.
    Tue,
    /// Wednesday.
    Wed,
    /// Thursday.
    Thu,
    /// Friday.
    Fri,
    /// Saturday.
    Sat,
    /// Sunday.
    Sun,
}

impl DayOfWeek {
    /// Every day, Monday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Mon,
        DayOfWeek::Tue,
        DayOfWeek::Wed,
        DayOfWeek::Thu,
        DayOfWeek::Fri,
        DayOfWeek::Sat,
        DayOfWeek::Sun,
    ];
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A timetable entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Stable identifier.
    pub id: String,
    /// Course title, required.
    pub name: String,
    /// Room or building.
    #[serde(default)]
    pub location: String,
    /// Lecturer.
    #[serde(default, rename = "teacher")]
    pub instructor: String,
    /// Weekday.
    pub day: DayOfWeek,
    /// Start time, `HH:MM`.
    pub start_time: String,
    /// End time, `HH:MM`.
    pub end_time: String,
    /// Card color.
    #[serde(default = "default_course_color")]
    pub color: String,
}

impl Course {
    /// Blank Monday 08:00-09:00 entry with a fresh id and a random palette color.
    pub fn draft() -> Self {
        let color = COURSE_COLORS
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(COURSE_COLORS[0]);
        Self {
            id: Uuid::new_v4().simple().to_string(),
            name: String::new(),
            location: String::new(),
            instructor: String::new(),
            day: DayOfWeek::Mon,
            start_time: "08:00".into(),
            end_time: "09:00".into(),
            color: color.into(),
        }
    }
}

impl Validate for Course {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.name.trim().is_empty() {
            let mut err = ValidationError::new("course_name_required");
            err.message = Some("Course name must not be empty".into());
            errors.add("name", err);
        }

        let start = parse_clock_time(&self.start_time);
        let end = parse_clock_time(&self.end_time);
        if let Err(err) = &start {
            errors.add("start_time", err.clone());
        }
        if let Err(err) = &end {
            errors.add("end_time", err.clone());
        }
        if let (Ok(start), Ok(end)) = (start, end) {
            if end <= start {
                let mut err = ValidationError::new("course_time_range");
                err.message = Some("End time must be after start time".into());
                errors.add("end_time", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Parse `HH:MM` into minutes after midnight.
pub fn parse_clock_time(value: &str) -> Result<u16, ValidationError> {
    let invalid = || {
        let mut err = ValidationError::new("clock_time_format");
        err.message = Some(format!("Time must be HH:MM (got `{value}`)").into());
        err
    };

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if hours.len() != 2 || minutes.len() != 2 {
        return Err(invalid());
    }
    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

fn default_course_color() -> String {
    COURSE_COLORS[0].into()
}

/// Courses keyed by id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    courses: IndexMap<String, Course>,
}

impl Schedule {
    /// Build a schedule from stored courses; later duplicates replace earlier ones.
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        Self {
            courses: courses
                .into_iter()
                .map(|course| (course.id.clone(), course))
                .collect(),
        }
    }

    /// All courses in insertion order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Look up a course.
    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Number of stored courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether no course is stored.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Insert or replace by id. Returns the previous entry, if any.
    pub fn upsert(&mut self, course: Course) -> Option<Course> {
        self.courses.insert(course.id.clone(), course)
    }

    /// Remove by id; an unknown id changes nothing.
    pub fn remove(&mut self, id: &str) -> Option<Course> {
        self.courses.shift_remove(id)
    }

    /// Courses on `day`, earliest start first.
    pub fn by_day(&self, day: DayOfWeek) -> Vec<&Course> {
        let mut courses: Vec<&Course> = self.courses().filter(|course| course.day == day).collect();
        courses.sort_by_key(|course| parse_clock_time(&course.start_time).unwrap_or(u16::MAX));
        courses
    }
}
