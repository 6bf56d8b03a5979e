//! Rule engine for course prioritization.
//!
//! Sums weighted rule scores per course and orders courses by the total,
//! highest first. The sort is stable, so equal weights keep input order.

use std::sync::Arc;

use super::{rules, PriorityContext, PriorityRule, RuleScore};
use crate::models::Course;

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn PriorityRule>,
    weight: f64,
}

/// A composable weighted-sum priority engine.
///
/// # Example
/// ```
/// use u_timetable::dispatching::{PriorityContext, PriorityEngine};
/// use u_timetable::models::Course;
///
/// let courses = vec![
///     Course::new("quiet", "T1"),
///     Course::new("busy", "T2").with_interested("s1").with_interested("s2"),
/// ];
/// let engine = PriorityEngine::standard();
/// let order = engine.sort_indices(&courses, &PriorityContext::new());
/// assert_eq!(order, vec![1, 0]);
/// ```
#[derive(Clone)]
pub struct PriorityEngine {
    rules: Vec<WeightedRule>,
}

impl PriorityEngine {
    /// Creates an empty engine (every course weighs 0).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Popularity + department + level + core bonus, each at weight 1.0.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::Popularity)
            .with_rule(rules::DepartmentWeight)
            .with_rule(rules::LevelWeight)
            .with_rule(rules::CoreBonus)
    }

    /// Adds a rule with weight 1.0.
    pub fn with_rule<R: PriorityRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 1.0)
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: PriorityRule + 'static>(mut self, rule: R, weight: f64) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Total weight of a course.
    pub fn weight(&self, course: &Course, context: &PriorityContext) -> RuleScore {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(course, context) * wr.weight)
            .sum()
    }

    /// Per-rule weighted scores for a course.
    pub fn evaluate(&self, course: &Course, context: &PriorityContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(course, context) * wr.weight)
            .collect()
    }

    /// Course indices ordered by descending weight, ties in input order.
    pub fn sort_indices(&self, courses: &[Course], context: &PriorityContext) -> Vec<usize> {
        let scores: Vec<f64> = courses.iter().map(|c| self.weight(c, context)).collect();
        let mut indices: Vec<usize> = (0..courses.len()).collect();
        indices.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        indices
    }
}

impl Default for PriorityEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for PriorityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
