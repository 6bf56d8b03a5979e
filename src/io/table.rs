//! Tab-delimited schedule table.
//!
//! One row per placed section, sorted by course id (lecture before lab):
//!
//! ```text
//! Course  Room  Teacher  Time  Students
//! ```
//!
//! Ids that are all digits sort numerically, so `2` comes before `10`.

use std::cmp::Ordering;
use std::fmt::Write;

use crate::models::{Catalog, Schedule};

/// Header row.
pub const HEADER: [&str; 5] = ["Course", "Room", "Teacher", "Time", "Students"];

/// Orders ids numerically when both are numbers, lexically otherwise.
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Renders the schedule as a tab-delimited table.
///
/// With `human_times`, the Time column shows `HH:MM-HH:MM DAYS` instead of
/// the slot id. Slots missing from the catalog fall back to their id.
pub fn render_table(schedule: &Schedule, catalog: &Catalog, human_times: bool) -> String {
    let mut entries: Vec<_> = schedule.entries.iter().collect();
    entries.sort_by(|a, b| {
        compare_ids(&a.course_id, &b.course_id).then_with(|| a.section.cmp(&b.section))
    });

    let mut out = HEADER.join("\t");
    out.push('\n');
    for entry in entries {
        let time = match catalog.slot(&entry.slot_id) {
            Some(slot) if human_times => slot.label(),
            _ => entry.slot_id.clone(),
        };
        let mut students: Vec<&str> = entry.students.iter().map(String::as_str).collect();
        students.sort_by(|a, b| compare_ids(a, b));

        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}",
            entry.course_id,
            entry.room_id,
            entry.teacher_id,
            time,
            students.join(" ")
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DaySet, ScheduleEntry, SectionKind, TimeSlot};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                TimeSlot::new("1", 540, 615, DaySet::parse("MWF").unwrap()),
                TimeSlot::new("2", 780, 1080, DaySet::parse("TH").unwrap()),
            ],
            vec![],
            vec![],
            vec![],
            vec![],
        )
    }

    fn schedule() -> Schedule {
        let mut s = Schedule::new();
        let mut lab = ScheduleEntry::new("10", SectionKind::Lab, "T3", "LabA", "2");
        lab.students = vec!["12".into(), "3".into()];
        let mut lecture = ScheduleEntry::new("10", SectionKind::Lecture, "T1", "R1", "1");
        lecture.students = vec!["12".into(), "3".into()];
        let mut other = ScheduleEntry::new("2", SectionKind::Lecture, "T2", "R2", "2");
        other.students = vec!["5".into()];
        s.add_entry(lab);
        s.add_entry(lecture);
        s.add_entry(other);
        s
    }

    #[test]
    fn test_render_sorted() {
        let table = render_table(&schedule(), &catalog(), false);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Course\tRoom\tTeacher\tTime\tStudents");
        assert_eq!(lines[1], "2\tR2\tT2\t2\t5");
        assert_eq!(lines[2], "10\tR1\tT1\t1\t3 12");
        assert_eq!(lines[3], "10\tLabA\tT3\t2\t3 12");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_render_human_times() {
        let table = render_table(&schedule(), &catalog(), true);
        assert!(table.contains("10\tR1\tT1\t09:00-10:15 MWF\t3 12"));
    }

    #[test]
    fn test_render_empty_roster() {
        let mut s = Schedule::new();
        s.add_entry(ScheduleEntry::new("C", SectionKind::Lecture, "T", "R", "X"));
        let table = render_table(&s, &catalog(), true);
        assert_eq!(table.lines().nth(1), Some("C\tR\tT\tX\t"));
    }

    #[test]
    fn test_compare_ids() {
        assert_eq!(compare_ids("2", "10"), Ordering::Less);
        assert_eq!(compare_ids("b", "a"), Ordering::Greater);
        assert_eq!(compare_ids("9", "a"), Ordering::Less);
    }
}
