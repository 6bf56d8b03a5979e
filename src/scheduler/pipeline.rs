//! End-to-end timetabling run.
//!
//! # Algorithm
//!
//! 1. Fill interested pools from the allocation-time students (popularity).
//! 2. Mark core courses and order courses by priority weight.
//! 3. Build a fresh [`ResourceRegistry`] and place every course with the
//!    [`SlotAllocator`].
//! 4. Refill pools from the enrollment-time registrations.
//! 5. Enroll students with the [`EnrollmentSelector`].
//!
//! Steps 1 and 4 use different preference sources on purpose: which
//! courses get good slots is decided by early interest, who sits in them
//! by final registration.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use super::{EnrollmentSelector, EnrollmentSummary, SlotAllocator};
use crate::config::SchedulerConfig;
use crate::dispatching::{prioritize, PriorityEngine};
use crate::error::{Result, TimetableError};
use crate::models::{Catalog, MissingReference, Schedule};
use crate::registry::ResourceRegistry;
use crate::validation::{partition_fatal, validate_input, ValidationError};

/// Result of one run.
#[derive(Debug, Clone)]
pub struct TimetableOutcome {
    /// Placed sections with rosters, plus unplaced sections.
    pub schedule: Schedule,
    /// Enrollment counts.
    pub enrollment: EnrollmentSummary,
    /// Number of courses marked core.
    pub core_courses: usize,
}

/// Runs priority, allocation, and enrollment over a catalog.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Catalog, ClassRoom, Course, DaySet, Student, TimeSlot};
/// use u_timetable::scheduler::Timetabler;
/// use u_timetable::config::SchedulerConfig;
///
/// let mut catalog = Catalog::new(
///     vec![TimeSlot::new("S1", 540, 600, DaySet::WEEKDAYS)],
///     vec![ClassRoom::new("R1", 30)],
///     vec![],
///     vec![Course::new("C1", "T1")],
///     vec![Student::new("s1", ["C1"])],
/// );
/// let timetabler = Timetabler::new(SchedulerConfig::default().with_seed(7));
/// let outcome = timetabler.run_seeded(&mut catalog);
/// assert!(outcome.schedule.is_complete());
/// assert_eq!(outcome.schedule.total_enrollment(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timetabler {
    config: SchedulerConfig,
    engine: PriorityEngine,
}

impl Timetabler {
    /// Creates a timetabler with the standard priority rules.
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            engine: PriorityEngine::standard(),
        }
    }

    /// Replaces the priority engine.
    pub fn with_engine(mut self, engine: PriorityEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Validates a catalog before running.
    ///
    /// Fatal problems become [`TimetableError::Invalid`]; recoverable ones
    /// (unknown references) are logged and returned.
    pub fn check(&self, catalog: &Catalog) -> Result<Vec<ValidationError>> {
        let Err(errors) = validate_input(catalog) else {
            return Ok(Vec::new());
        };
        let (fatal, recoverable) = partition_fatal(errors);
        if !fatal.is_empty() {
            return Err(TimetableError::Invalid(fatal));
        }
        for e in &recoverable {
            warn!(message = %e.message, "recoverable input problem");
        }
        Ok(recoverable)
    }

    /// Runs with a random source derived from the configured seed, or from
    /// OS entropy when no seed is set.
    pub fn run_seeded(&self, catalog: &mut Catalog) -> TimetableOutcome {
        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        self.run(catalog, &mut rng)
    }

    /// Runs all phases. Course core flags and pools are updated in place.
    pub fn run<R: Rng + ?Sized>(&self, catalog: &mut Catalog, rng: &mut R) -> TimetableOutcome {
        report_missing("popularity", &catalog.load_popularity());

        let order = prioritize(catalog.courses_mut(), &self.engine, &self.config);
        let core_courses = catalog.courses().iter().filter(|c| c.is_core).count();

        let mut schedule = {
            let mut registry = ResourceRegistry::from_catalog(catalog);
            SlotAllocator::new(catalog, &self.config).allocate(&order, &mut registry)
        };

        report_missing("registrations", &catalog.load_registrations());
        let enrollment = EnrollmentSelector::new(catalog).enroll(&mut schedule, rng);

        info!(
            sections = schedule.entry_count(),
            unscheduled = schedule.unscheduled.len(),
            core = core_courses,
            enrolled = schedule.total_enrollment(),
            "timetable complete"
        );
        TimetableOutcome {
            schedule,
            enrollment,
            core_courses,
        }
    }
}

fn report_missing(pass: &str, missing: &[MissingReference]) {
    for m in missing {
        warn!(
            pass,
            student = %m.student_id,
            course = %m.course_id,
            "preference names unknown course"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassRoom, Course, DaySet, SectionKind, Student, Teacher, TimeSlot};

    fn slot(id: &str, start: u32, end: u32, days: &str) -> TimeSlot {
        TimeSlot::new(id, start, end, DaySet::parse(days).unwrap())
    }

    fn campus() -> Catalog {
        Catalog::new(
            vec![
                slot("S1", 540, 600, "MWF"),
                slot("S2", 600, 660, "MWF"),
                slot("LAB", 780, 1080, "TH"),
            ],
            vec![ClassRoom::new("R1", 3), ClassRoom::new("R2", 10)],
            vec![Teacher::new("T1"), Teacher::new("T2"), Teacher::new("T3")],
            vec![
                Course::new("BIO", "T1").with_lab("T3"),
                Course::new("HIST", "T2"),
            ],
            vec![
                Student::new("a", ["HIST"]),
                Student::new("b", ["HIST", "BIO"]),
                Student::new("c", ["HIST"]),
            ],
        )
    }

    #[test]
    fn test_popular_course_placed_first() {
        let mut catalog = campus();
        let outcome = Timetabler::new(SchedulerConfig::default().with_seed(1)).run_seeded(&mut catalog);
        // HIST (3 interested) outranks BIO (1) and gets the largest room first.
        let first = &outcome.schedule.entries[0];
        assert_eq!(first.course_id, "HIST");
        assert_eq!(first.room_id, "R2");
        assert!(outcome.schedule.is_complete());
        assert_eq!(outcome.core_courses, 2);
    }

    #[test]
    fn test_registrations_drive_enrollment() {
        let mut catalog =
            campus().with_registrations(vec![Student::new("late", ["BIO"])]);
        let outcome = Timetabler::new(SchedulerConfig::default().with_seed(1)).run_seeded(&mut catalog);

        let bio = outcome.schedule.entry("BIO", SectionKind::Lecture).unwrap();
        let lab = outcome.schedule.entry("BIO", SectionKind::Lab).unwrap();
        assert_eq!(bio.students, vec!["late".to_string()]);
        assert_eq!(lab.students, bio.students);
        assert_eq!(outcome.schedule.entry("HIST", SectionKind::Lecture).unwrap().enrollment(), 0);
    }

    #[test]
    fn test_same_seed_same_rosters() {
        let config = SchedulerConfig::default().with_seed(99);
        let a = Timetabler::new(config.clone()).run_seeded(&mut campus());
        let b = Timetabler::new(config).run_seeded(&mut campus());
        assert_eq!(a.schedule, b.schedule);
    }

    #[test]
    fn test_check_rejects_fatal() {
        let catalog = Catalog::new(
            vec![],
            vec![ClassRoom::new("R1", 0)],
            vec![],
            vec![],
            vec![],
        );
        let err = Timetabler::default().check(&catalog).unwrap_err();
        assert!(matches!(err, TimetableError::Invalid(_)));
    }

    #[test]
    fn test_check_passes_recoverable() {
        let catalog = Catalog::new(
            vec![],
            vec![ClassRoom::new("R1", 5)],
            vec![],
            vec![],
            vec![Student::new("s", ["NOPE"])],
        );
        let recoverable = Timetabler::default().check(&catalog).unwrap();
        assert_eq!(recoverable.len(), 1);
    }

    #[test]
    fn test_empty_catalog() {
        let mut catalog = Catalog::default();
        let outcome = Timetabler::default().run(&mut catalog, &mut SmallRng::seed_from_u64(0));
        assert_eq!(outcome.schedule.entry_count(), 0);
        assert!(outcome.schedule.is_complete());
    }
}
