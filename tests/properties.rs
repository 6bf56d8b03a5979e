//! Property and scenario tests over full timetabling runs.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use u_timetable::config::SchedulerConfig;
use u_timetable::models::{
    overlaps, Catalog, ClassRoom, Course, DaySet, Schedule, ScheduleEntry, SectionKind, Student,
    Teacher, TimeSlot, UnscheduledReason,
};
use u_timetable::scheduler::{EnrollmentSelector, Timetabler};

const DAY_LETTERS: [char; 5] = ['M', 'T', 'W', 'H', 'F'];
const DEPARTMENTS: [&str; 4] = ["MATH", "WRPR", "ARTS", "CHEM"];

fn days_from_mask(mask: u8) -> DaySet {
    let s: String = DAY_LETTERS
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, c)| *c)
        .collect();
    DaySet::parse(&s).unwrap()
}

fn slot_strategy() -> impl Strategy<Value = (u32, u32, u8)> {
    (480u32..1200, 30u32..400, 1u8..32)
}

fn course_strategy() -> impl Strategy<Value = (usize, Option<usize>, usize, u8)> {
    (
        0usize..4,
        prop::option::of(0usize..4),
        0usize..DEPARTMENTS.len(),
        1u8..4,
    )
}

fn catalog_strategy() -> impl Strategy<Value = Catalog> {
    (
        prop::collection::vec(slot_strategy(), 1..8),
        prop::collection::vec(1u32..8, 1..4),
        prop::collection::vec(prop::option::of(0usize..8), 4),
        prop::collection::vec(course_strategy(), 1..10),
        prop::collection::vec(prop::collection::vec(0usize..10, 0..5), 0..20),
    )
        .prop_map(|(slots, capacities, conflicts, courses, prefs)| {
            let slots: Vec<TimeSlot> = slots
                .into_iter()
                .enumerate()
                .map(|(i, (start, len, mask))| {
                    TimeSlot::new(format!("S{i}"), start, start + len, days_from_mask(mask))
                })
                .collect();
            let rooms = capacities
                .into_iter()
                .enumerate()
                .map(|(i, cap)| ClassRoom::new(format!("R{i}"), cap))
                .collect();
            let teachers = conflicts
                .into_iter()
                .enumerate()
                .map(|(i, conflict)| {
                    let t = Teacher::new(format!("T{i}"));
                    match conflict {
                        Some(s) => t.with_conflict(slots[s % slots.len()].id.clone()),
                        None => t,
                    }
                })
                .collect();
            let course_count = courses.len();
            let courses = courses
                .into_iter()
                .enumerate()
                .map(|(i, (teacher, lab, dept, level))| {
                    let c = Course::new(format!("C{i}"), format!("T{teacher}"))
                        .with_department(DEPARTMENTS[dept])
                        .with_level(level);
                    match lab {
                        Some(l) => c.with_lab(format!("T{l}")),
                        None => c,
                    }
                })
                .collect();
            let students = prefs
                .into_iter()
                .enumerate()
                .map(|(i, wishes)| {
                    Student::new(
                        format!("st{i}"),
                        wishes.into_iter().map(|w| format!("C{}", w % course_count)),
                    )
                })
                .collect();
            Catalog::new(slots, rooms, teachers, courses, students)
        })
}

fn slot<'a>(catalog: &'a Catalog, entry: &ScheduleEntry) -> &'a TimeSlot {
    catalog.slot(&entry.slot_id).unwrap()
}

fn pairs_overlap<'a, I>(catalog: &Catalog, entries: I) -> bool
where
    I: IntoIterator<Item = &'a ScheduleEntry>,
{
    let entries: Vec<_> = entries.into_iter().collect();
    entries.iter().enumerate().any(|(i, a)| {
        entries[i + 1..]
            .iter()
            .any(|b| overlaps(slot(catalog, a), slot(catalog, b)))
    })
}

fn run(catalog: &mut Catalog, seed: u64) -> Schedule {
    Timetabler::new(SchedulerConfig::default().with_seed(seed))
        .run_seeded(catalog)
        .schedule
}

proptest! {
    /// Slot overlap is symmetric.
    #[test]
    fn overlap_is_symmetric(a in slot_strategy(), b in slot_strategy()) {
        let x = TimeSlot::new("A", a.0, a.0 + a.1, days_from_mask(a.2));
        let y = TimeSlot::new("B", b.0, b.0 + b.1, days_from_mask(b.2));
        prop_assert_eq!(overlaps(&x, &y), overlaps(&y, &x));
    }

    /// Rooms and teachers are never double-booked.
    #[test]
    fn no_resource_double_booking(mut catalog in catalog_strategy(), seed in any::<u64>()) {
        let schedule = run(&mut catalog, seed);

        for room in catalog.rooms() {
            prop_assert!(
                !pairs_overlap(&catalog, schedule.entries_for_room(&room.id)),
                "room {} double-booked", room.id
            );
        }

        let teacher_ids: HashSet<&str> =
            schedule.entries.iter().map(|e| e.teacher_id.as_str()).collect();
        for teacher_id in teacher_ids {
            prop_assert!(
                !pairs_overlap(&catalog, schedule.entries_for_teacher(teacher_id)),
                "teacher {} double-booked", teacher_id
            );
            if let Some(teacher) = catalog.teacher(teacher_id) {
                for declared in &teacher.conflicts {
                    let blocked = catalog.slot(declared).unwrap();
                    for e in schedule.entries_for_teacher(teacher_id) {
                        prop_assert!(!overlaps(slot(&catalog, e), blocked));
                    }
                }
            }
        }
    }

    /// A lab never overlaps its own lecture, and every section is accounted for.
    #[test]
    fn sections_accounted_and_labs_apart(mut catalog in catalog_strategy(), seed in any::<u64>()) {
        let schedule = run(&mut catalog, seed);

        for course in catalog.courses() {
            let lecture = schedule.entry(&course.id, SectionKind::Lecture);
            let lecture_missing = schedule
                .unscheduled
                .iter()
                .any(|u| u.course_id == course.id && u.section == SectionKind::Lecture);
            prop_assert!(lecture.is_some() != lecture_missing);

            if let (Some(lecture), Some(lab)) =
                (lecture, schedule.entry(&course.id, SectionKind::Lab))
            {
                prop_assert!(!overlaps(slot(&catalog, lecture), slot(&catalog, lab)));
            }
            if lecture.is_none() && course.has_lab() {
                prop_assert!(schedule.unscheduled.iter().any(|u| {
                    u.course_id == course.id && u.reason == UnscheduledReason::LectureUnscheduled
                }), "lab of unscheduled lecture must be reported as LectureUnscheduled");
            }
        }
    }

    /// Rosters fit their rooms, students never double-book, pairs stay pairs.
    #[test]
    fn enrollment_respects_capacity_and_conflicts(
        mut catalog in catalog_strategy(),
        seed in any::<u64>(),
    ) {
        let schedule = run(&mut catalog, seed);

        for e in &schedule.entries {
            let room = catalog.room(&e.room_id).unwrap();
            prop_assert!(e.students.len() <= room.capacity as usize);
        }

        let students: HashSet<&str> = schedule
            .entries
            .iter()
            .flat_map(|e| e.students.iter().map(String::as_str))
            .collect();
        for student in students {
            prop_assert!(
                !pairs_overlap(&catalog, schedule.entries_for_student(student)),
                "student {} double-booked", student
            );
        }

        for course in catalog.courses() {
            if let (Some(lecture), Some(lab)) = (
                schedule.entry(&course.id, SectionKind::Lecture),
                schedule.entry(&course.id, SectionKind::Lab),
            ) {
                let a: HashSet<_> = lecture.students.iter().collect();
                let b: HashSet<_> = lab.students.iter().collect();
                prop_assert_eq!(a, b);
            }
        }
    }

    /// Core quotas per (department, level); the writing program is always core.
    #[test]
    fn core_quota_respected(mut catalog in catalog_strategy(), seed in any::<u64>()) {
        let config = SchedulerConfig::default();
        run(&mut catalog, seed);

        let mut cores: HashMap<(&str, u8), usize> = HashMap::new();
        for course in catalog.courses() {
            if config.is_writing_program(&course.department) {
                prop_assert!(course.is_core);
            } else if course.is_core {
                *cores.entry((course.department.as_str(), course.level)).or_default() += 1;
            }
        }
        prop_assert!(cores.values().all(|&n| n <= config.core_quota));
    }
}

fn slot_at(id: &str, start: u32) -> TimeSlot {
    TimeSlot::new(id, start, start + 50, DaySet::WEEKDAYS)
}

#[test]
fn two_rooms_three_slots_two_courses() {
    let mut catalog = Catalog::new(
        vec![slot_at("1", 480), slot_at("2", 540), slot_at("3", 600)],
        vec![ClassRoom::new("R1", 10), ClassRoom::new("R2", 20)],
        vec![],
        vec![Course::new("C1", "T1"), Course::new("C2", "T2")],
        vec![],
    );
    let schedule = run(&mut catalog, 0);
    assert!(schedule.is_scheduled("C1"));
    assert!(schedule.is_scheduled("C2"));
    assert!(schedule.is_complete());
}

#[test]
fn one_room_one_slot_two_courses() {
    let mut catalog = Catalog::new(
        vec![slot_at("1", 480)],
        vec![ClassRoom::new("R1", 10)],
        vec![],
        vec![Course::new("C1", "T1"), Course::new("C2", "T2")],
        vec![],
    );
    let schedule = run(&mut catalog, 0);
    assert_eq!(schedule.entry_count(), 1);
    assert_eq!(schedule.unscheduled.len(), 1);
}

#[test]
fn one_teacher_gets_distinct_slots() {
    let mut catalog = Catalog::new(
        vec![slot_at("1", 480), slot_at("2", 540), slot_at("3", 600)],
        vec![ClassRoom::new("R1", 10)],
        vec![Teacher::new("T1").with_course("C1").with_course("C2")],
        vec![Course::new("C1", "T1"), Course::new("C2", "T1")],
        vec![],
    );
    let schedule = run(&mut catalog, 0);
    let a = schedule.entry("C1", SectionKind::Lecture).unwrap();
    let b = schedule.entry("C2", SectionKind::Lecture).unwrap();
    assert_ne!(a.slot_id, b.slot_id);
}

#[test]
fn twenty_five_interested_twenty_seats() {
    let pool: Vec<String> = (0..25).map(|i| format!("s{i}")).collect();
    let course = pool
        .iter()
        .fold(Course::new("C1", "T1"), |c, s| c.with_interested(s.clone()));
    let catalog = Catalog::new(
        vec![slot_at("1", 480)],
        vec![ClassRoom::new("R1", 20)],
        vec![],
        vec![course],
        vec![],
    );
    let wanted: HashSet<&String> = pool.iter().collect();

    for seed in 0..20u64 {
        let mut schedule = Schedule::new();
        schedule.add_entry(ScheduleEntry::new("C1", SectionKind::Lecture, "T1", "R1", "1"));
        EnrollmentSelector::new(&catalog).enroll(&mut schedule, &mut SmallRng::seed_from_u64(seed));
        let roster = &schedule.entries[0].students;
        assert_eq!(roster.len(), 20);
        assert!(roster.iter().all(|s| wanted.contains(s)));
        assert_eq!(roster.iter().collect::<HashSet<_>>().len(), 20);
    }
}
