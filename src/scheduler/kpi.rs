//! Schedule quality metrics (KPIs).
//!
//! Computes enrollment and utilization indicators from a completed
//! schedule and the catalog it was built from.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled sections | Entries in the schedule |
//! | Unscheduled sections | Sections that found no room/slot |
//! | Total enrollment | Sum of roster sizes |
//! | Seat fill rate | Total enrollment / seats offered by scheduled entries |
//! | Request satisfaction | Fraction of (student, course) requests enrolled |
//! | Room utilization | Booked slots / available slots, per room |

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::{Catalog, Schedule, SectionKind};

/// Schedule performance indicators.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleKpi {
    /// Number of placed sections (lectures and labs).
    pub scheduled_sections: usize,
    /// Number of sections left unplaced.
    pub unscheduled_sections: usize,
    /// Sum of roster sizes across all entries.
    pub total_enrollment: usize,
    /// Fraction of offered seats that are filled (0.0..1.0).
    pub seat_fill_rate: f64,
    /// Fraction of enrollment-time course requests that were granted (0.0..1.0).
    pub request_satisfaction_rate: f64,
    /// Average room utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Per-room utilization.
    pub utilization_by_room: HashMap<String, f64>,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its catalog.
    ///
    /// Requests are read from the enrollment-time pool
    /// ([`Catalog::registrations`]).
    pub fn calculate(schedule: &Schedule, catalog: &Catalog) -> Self {
        let total_enrollment = schedule.total_enrollment();

        let seats: usize = schedule
            .entries
            .iter()
            .filter_map(|e| catalog.room(&e.room_id))
            .map(|r| r.capacity as usize)
            .sum();
        let seat_fill_rate = if seats == 0 {
            0.0
        } else {
            total_enrollment as f64 / seats as f64
        };

        let granted: HashSet<(&str, &str)> = schedule
            .entries
            .iter()
            .filter(|e| e.section == SectionKind::Lecture)
            .flat_map(|e| {
                e.students
                    .iter()
                    .map(move |s| (s.as_str(), e.course_id.as_str()))
            })
            .collect();
        let mut requested = 0usize;
        let mut satisfied = 0usize;
        for student in catalog.registrations() {
            let unique: HashSet<&str> = student.preferences.iter().map(String::as_str).collect();
            requested += unique.len();
            satisfied += unique
                .iter()
                .filter(|c| granted.contains(&(student.id.as_str(), **c)))
                .count();
        }
        let request_satisfaction_rate = if requested == 0 {
            1.0
        } else {
            satisfied as f64 / requested as f64
        };

        let slot_count = catalog.slots().len();
        let utilization_by_room: HashMap<String, f64> = catalog
            .rooms()
            .iter()
            .map(|room| {
                let booked = schedule.entries_for_room(&room.id).len();
                let rate = if slot_count == 0 {
                    0.0
                } else {
                    booked as f64 / slot_count as f64
                };
                (room.id.clone(), rate)
            })
            .collect();
        let avg_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_room.values().sum();
            sum / utilization_by_room.len() as f64
        };

        Self {
            scheduled_sections: schedule.entry_count(),
            unscheduled_sections: schedule.unscheduled.len(),
            total_enrollment,
            seat_fill_rate,
            request_satisfaction_rate,
            avg_utilization,
            utilization_by_room,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, min_satisfaction: f64) -> bool {
        self.seat_fill_rate >= min_fill_rate && self.request_satisfaction_rate >= min_satisfaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassRoom, Course, DaySet, ScheduleEntry, Student, TimeSlot, UnscheduledReason,
        UnscheduledSection,
    };

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                TimeSlot::new("S1", 540, 600, DaySet::WEEKDAYS),
                TimeSlot::new("S2", 600, 660, DaySet::WEEKDAYS),
            ],
            vec![ClassRoom::new("R1", 4), ClassRoom::new("R2", 2)],
            vec![],
            vec![Course::new("C1", "T1"), Course::new("C2", "T2")],
            vec![
                Student::new("a", ["C1", "C2"]),
                Student::new("b", ["C1"]),
            ],
        )
    }

    fn entry(course: &str, room: &str, slot: &str, students: &[&str]) -> ScheduleEntry {
        let mut e = ScheduleEntry::new(course, SectionKind::Lecture, "T", room, slot);
        e.students = students.iter().map(|s| s.to_string()).collect();
        e
    }

    #[test]
    fn test_kpi_basic() {
        let mut schedule = Schedule::new();
        schedule.add_entry(entry("C1", "R1", "S1", &["a", "b"]));
        schedule.add_entry(entry("C2", "R2", "S2", &["a"]));

        let kpi = ScheduleKpi::calculate(&schedule, &catalog());
        assert_eq!(kpi.scheduled_sections, 2);
        assert_eq!(kpi.unscheduled_sections, 0);
        assert_eq!(kpi.total_enrollment, 3);
        assert!((kpi.seat_fill_rate - 0.5).abs() < 1e-10); // 3 / (4 + 2)
        assert!((kpi.request_satisfaction_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_partial_satisfaction() {
        let mut schedule = Schedule::new();
        schedule.add_entry(entry("C1", "R1", "S1", &["a"]));
        schedule.add_unscheduled(UnscheduledSection::new(
            "C2",
            SectionKind::Lecture,
            UnscheduledReason::SlotSpaceExhausted,
        ));

        let kpi = ScheduleKpi::calculate(&schedule, &catalog());
        assert_eq!(kpi.unscheduled_sections, 1);
        // a: C1 granted, C2 not; b: C1 not.
        assert!((kpi.request_satisfaction_rate - 1.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_utilization() {
        let mut schedule = Schedule::new();
        schedule.add_entry(entry("C1", "R1", "S1", &[]));
        schedule.add_entry(entry("C2", "R1", "S2", &[]));

        let kpi = ScheduleKpi::calculate(&schedule, &catalog());
        assert!((kpi.utilization_by_room["R1"] - 1.0).abs() < 1e-10);
        assert!((kpi.utilization_by_room["R2"] - 0.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let empty = Catalog::new(vec![], vec![], vec![], vec![], vec![]);
        let kpi = ScheduleKpi::calculate(&Schedule::new(), &empty);
        assert_eq!(kpi.total_enrollment, 0);
        assert!((kpi.seat_fill_rate - 0.0).abs() < 1e-10);
        assert!((kpi.request_satisfaction_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let mut schedule = Schedule::new();
        schedule.add_entry(entry("C1", "R1", "S1", &["a", "b"]));
        let kpi = ScheduleKpi::calculate(&schedule, &catalog());
        assert!(kpi.meets_thresholds(0.5, 0.6));
        assert!(!kpi.meets_thresholds(0.6, 0.0));
        assert!(!kpi.meets_thresholds(0.0, 0.7)); // 2 of 3 requests
    }
}
