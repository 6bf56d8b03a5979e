//! Run configuration.
//!
//! Every tunable constant of a timetabling run. Loadable from JSON; missing
//! fields fall back to [`SchedulerConfig::default`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::models::LAB_THRESHOLD_MINUTES;

/// Configuration for priority ordering, allocation, and enrollment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Slots longer than this (minutes) are lab slots.
    pub lab_threshold_minutes: u32,
    /// Core sections allowed per (department, level).
    pub core_quota: usize,
    /// Department whose sections are always core.
    pub writing_program: Option<String>,
    /// Department whose lectures may use lab-classified slots.
    pub studio_department: Option<String>,
    /// Weight added to core courses.
    pub core_bonus: f64,
    /// Per-department weight (reflects department size).
    pub department_weights: HashMap<String, f64>,
    /// Per-level weight; lower levels should weigh more.
    pub level_weights: BTreeMap<u8, f64>,
    /// Seed for the enrollment shuffle. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            lab_threshold_minutes: LAB_THRESHOLD_MINUTES,
            core_quota: 2,
            writing_program: Some("WRPR".to_string()),
            studio_department: Some("ARTS".to_string()),
            core_bonus: 1000.0,
            department_weights: HashMap::new(),
            level_weights: BTreeMap::from([(1, 30.0), (2, 20.0), (3, 10.0)]),
            seed: None,
        }
    }
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lab threshold (minutes).
    pub fn with_lab_threshold(mut self, minutes: u32) -> Self {
        self.lab_threshold_minutes = minutes;
        self
    }

    /// Sets the per-(department, level) core quota.
    pub fn with_core_quota(mut self, quota: usize) -> Self {
        self.core_quota = quota;
        self
    }

    /// Sets (or clears) the writing-program department.
    pub fn with_writing_program(mut self, department: Option<&str>) -> Self {
        self.writing_program = department.map(str::to_string);
        self
    }

    /// Sets (or clears) the studio/arts department.
    pub fn with_studio_department(mut self, department: Option<&str>) -> Self {
        self.studio_department = department.map(str::to_string);
        self
    }

    /// Sets the core bonus.
    pub fn with_core_bonus(mut self, bonus: f64) -> Self {
        self.core_bonus = bonus;
        self
    }

    /// Sets one department's weight.
    pub fn with_department_weight(mut self, department: impl Into<String>, weight: f64) -> Self {
        self.department_weights.insert(department.into(), weight);
        self
    }

    /// Sets one level's weight.
    pub fn with_level_weight(mut self, level: u8, weight: f64) -> Self {
        self.level_weights.insert(level, weight);
        self
    }

    /// Fixes the enrollment seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether a department is the writing program.
    pub fn is_writing_program(&self, department: &str) -> bool {
        self.writing_program.as_deref() == Some(department)
    }

    /// Whether a department is the studio/arts exception.
    pub fn is_studio(&self, department: &str) -> bool {
        self.studio_department.as_deref() == Some(department)
    }

    /// Weight of a department (0 if unconfigured).
    pub fn department_weight(&self, department: &str) -> f64 {
        self.department_weights.get(department).copied().unwrap_or(0.0)
    }

    /// Weight of a level (0 if unconfigured).
    pub fn level_weight(&self, level: u8) -> f64 {
        self.level_weights.get(&level).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.lab_threshold_minutes, 270);
        assert_eq!(c.core_quota, 2);
        assert!(c.is_writing_program("WRPR"));
        assert!(c.is_studio("ARTS"));
        assert!(c.level_weight(1) > c.level_weight(2));
        assert!(c.level_weight(2) > c.level_weight(3));
        assert_eq!(c.level_weight(9), 0.0);
        assert_eq!(c.department_weight("MATH"), 0.0);
    }

    #[test]
    fn test_builder() {
        let c = SchedulerConfig::new()
            .with_core_quota(3)
            .with_writing_program(None)
            .with_department_weight("MATH", 12.5)
            .with_level_weight(4, 5.0)
            .with_seed(7);
        assert_eq!(c.core_quota, 3);
        assert!(!c.is_writing_program("WRPR"));
        assert_eq!(c.department_weight("MATH"), 12.5);
        assert_eq!(c.level_weight(4), 5.0);
        assert_eq!(c.seed, Some(7));
    }

    #[test]
    fn test_partial_json() {
        let c: SchedulerConfig =
            serde_json::from_str(r#"{"core_quota": 1, "level_weights": {"1": 99.0}}"#).unwrap();
        assert_eq!(c.core_quota, 1);
        assert_eq!(c.level_weight(1), 99.0);
        assert_eq!(c.level_weight(2), 0.0);
        assert_eq!(c.lab_threshold_minutes, 270);
    }
}
