//! Built-in priority rules.
//!
//! The standard course weight is the sum of all four:
//!
//! `weight = popularity + departmentWeight + levelWeight + coreBonus`
//!
//! # Score Convention
//! Higher scores are placed first.

use super::{PriorityContext, PriorityRule, RuleScore};
use crate::models::Course;

/// Size of the interested-student pool.
#[derive(Debug, Clone, Copy)]
pub struct Popularity;

impl PriorityRule for Popularity {
    fn name(&self) -> &'static str {
        "POPULARITY"
    }

    fn evaluate(&self, course: &Course, _context: &PriorityContext) -> RuleScore {
        course.popularity() as f64
    }

    fn description(&self) -> &'static str {
        "Interested-student pool size"
    }
}

/// Configured department weight (reflects department size).
#[derive(Debug, Clone, Copy)]
pub struct DepartmentWeight;

impl PriorityRule for DepartmentWeight {
    fn name(&self) -> &'static str {
        "DEPARTMENT"
    }

    fn evaluate(&self, course: &Course, context: &PriorityContext) -> RuleScore {
        context.department_weight(&course.department)
    }
}

/// Configured level weight; introductory levels weigh more.
#[derive(Debug, Clone, Copy)]
pub struct LevelWeight;

impl PriorityRule for LevelWeight {
    fn name(&self) -> &'static str {
        "LEVEL"
    }

    fn evaluate(&self, course: &Course, context: &PriorityContext) -> RuleScore {
        context.level_weight(course.level)
    }
}

/// Constant bonus for core courses.
#[derive(Debug, Clone, Copy)]
pub struct CoreBonus;

impl PriorityRule for CoreBonus {
    fn name(&self) -> &'static str {
        "CORE"
    }

    fn evaluate(&self, course: &Course, context: &PriorityContext) -> RuleScore {
        if course.is_core {
            context.core_bonus
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Core-curriculum bonus"
    }
}
