//! Timetable editing, persisted after each change.

use tracing::warn;
use validator::Validate;

use crate::{
    dao::{kv::SharedStore, schedule_store::ScheduleRepository},
    error::ScheduleError,
    state::schedule::{Course, DayOfWeek, Schedule},
};

/// Owns the timetable and its repository.
pub struct Timetable {
    schedule: Schedule,
    repository: ScheduleRepository,
}

impl Timetable {
    /// Restore the timetable from `store`.
    pub fn open(store: SharedStore) -> Self {
        let repository = ScheduleRepository::new(store);
        let schedule = repository.load();
        Self {
            schedule,
            repository,
        }
    }

    /// Current timetable.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Courses on a given day, earliest first.
    pub fn day(&self, day: DayOfWeek) -> Vec<&Course> {
        self.schedule.by_day(day)
    }

    /// Validate and store a course, creating or replacing by id.
    pub fn save_course(&mut self, course: Course) -> Result<(), ScheduleError> {
        course.validate()?;
        self.schedule.upsert(course);
        self.persist();
        Ok(())
    }

    /// Remove a course. Returns `false` when the id is unknown.
    pub fn delete_course(&mut self, id: &str) -> bool {
        let removed = self.schedule.remove(id).is_some();
        if removed {
            self.persist();
        }
        removed
    }

    fn persist(&self) {
        if let Err(err) = self.repository.save(&self.schedule) {
            warn!(error = %err, "failed to persist timetable; keeping in-memory state");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dao::kv::MemoryStore;

    fn named(name: &str) -> Course {
        Course {
            name: name.into(),
            ..Course::draft()
        }
    }

    #[test]
    fn saved_courses_survive_reopen() {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let mut timetable = Timetable::open(store.clone());

        let calculus = named("Calculus I");
        let id = calculus.id.clone();
        timetable.save_course(calculus).unwrap();
        timetable.save_course(named("Physics")).unwrap();
        assert!(timetable.delete_course(&id));
        assert!(!timetable.delete_course(&id));

        let reopened = Timetable::open(store);
        assert_eq!(reopened.schedule(), timetable.schedule());
        assert_eq!(reopened.day(DayOfWeek::Mon).len(), 1);
    }

    #[test]
    fn invalid_course_is_rejected() {
        let mut timetable = Timetable::open(Arc::new(MemoryStore::new()));
        let err = timetable.save_course(Course::draft()).unwrap_err();
        assert!(matches!(err, ScheduleError::Validation(_)));
        assert!(timetable.schedule().is_empty());
    }
}
