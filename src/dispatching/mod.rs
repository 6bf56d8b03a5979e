//! Course prioritization: dispatching rules and core quotas.
//!
//! Produces the order in which the allocator places courses. Core marking
//! runs first because the core bonus feeds the final weight.
//!
//! # Usage
//!
//! ```
//! use u_timetable::config::SchedulerConfig;
//! use u_timetable::dispatching::{prioritize, PriorityEngine};
//! use u_timetable::models::Course;
//!
//! let mut courses = vec![
//!     Course::new("C1", "T1").with_department("MATH"),
//!     Course::new("C2", "T2").with_department("MATH").with_interested("s1"),
//! ];
//! let order = prioritize(&mut courses, &PriorityEngine::standard(), &SchedulerConfig::default());
//! assert_eq!(order, vec![1, 0]);
//! ```

mod context;
mod core_quota;
mod engine;
pub mod rules;

pub use context::PriorityContext;
pub use core_quota::assign_core;
pub use engine::PriorityEngine;

use crate::config::SchedulerConfig;
use crate::models::Course;
use std::fmt::Debug;

/// Score returned by a priority rule.
///
/// Higher score = placed earlier.
pub type RuleScore = f64;

/// A rule contributing to a course's scheduling weight.
pub trait PriorityRule: Send + Sync + Debug {
    /// Rule name (e.g., "POPULARITY").
    fn name(&self) -> &'static str;

    /// Evaluates a course's contribution. Higher = placed earlier.
    fn evaluate(&self, course: &Course, context: &PriorityContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Marks core courses, then returns course indices in placement order.
pub fn prioritize(
    courses: &mut [Course],
    engine: &PriorityEngine,
    config: &SchedulerConfig,
) -> Vec<usize> {
    assign_core(courses, config);
    engine.sort_indices(courses, &PriorityContext::from(config))
}
