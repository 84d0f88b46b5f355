use crate::{
    dao::{
        kv::{SharedStore, read_json, write_json},
        storage::StorageResult,
    },
    state::schedule::{Course, Schedule},
};

/// Key holding the serialized timetable.
pub const COURSES_KEY: &str = "schedule_courses";

/// Persists the timetable as a single blob.
#[derive(Clone)]
pub struct ScheduleRepository {
    store: SharedStore,
}

impl ScheduleRepository {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Stored timetable, or an empty one.
    pub fn load(&self) -> Schedule {
        read_json::<Vec<Course>>(self.store.as_ref(), COURSES_KEY)
            .map(Schedule::from_courses)
            .unwrap_or_default()
    }

    pub fn save(&self, schedule: &Schedule) -> StorageResult<()> {
        let courses: Vec<&Course> = schedule.courses().collect();
        write_json(self.store.as_ref(), COURSES_KEY, &courses)
    }
}
