//! Core-curriculum quota assignment.
//!
//! Courses are visited in descending popularity (stable). Each
//! (department, level) pair holds a quota of core seats; a course becomes
//! core while its pair still has quota. Writing-program courses are always
//! core and never consume quota.

use std::collections::HashMap;

use tracing::debug;

use crate::config::SchedulerConfig;
use crate::models::Course;

/// Marks core courses in place. Returns the number of core courses.
///
/// Resets every `is_core` flag first, so the call is run-scoped.
pub fn assign_core(courses: &mut [Course], config: &SchedulerConfig) -> usize {
    for course in courses.iter_mut() {
        course.is_core = false;
    }

    let mut order: Vec<usize> = (0..courses.len()).collect();
    order.sort_by(|&a, &b| courses[b].popularity().cmp(&courses[a].popularity()));

    let mut remaining: HashMap<(String, u8), usize> = HashMap::new();
    let mut marked = 0;

    for idx in order {
        let course = &mut courses[idx];
        if config.is_writing_program(&course.department) {
            course.is_core = true;
            marked += 1;
            continue;
        }

        let quota = remaining
            .entry((course.department.clone(), course.level))
            .or_insert(config.core_quota);
        if *quota > 0 {
            *quota -= 1;
            course.is_core = true;
            marked += 1;
            debug!(
                course = %course.id,
                department = %course.department,
                level = course.level,
                "marked core"
            );
        }
    }

    marked
}
