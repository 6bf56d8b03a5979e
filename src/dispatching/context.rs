//! Context for priority rule evaluation.

use std::collections::{BTreeMap, HashMap};

use crate::config::SchedulerConfig;

/// Weights consulted by the priority rules.
#[derive(Debug, Clone, Default)]
pub struct PriorityContext {
    /// Per-department weight.
    pub department_weights: HashMap<String, f64>,
    /// Per-level weight.
    pub level_weights: BTreeMap<u8, f64>,
    /// Weight added to core courses.
    pub core_bonus: f64,
}

impl PriorityContext {
    /// Creates a context with no weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a department weight.
    pub fn with_department_weight(mut self, department: impl Into<String>, weight: f64) -> Self {
        self.department_weights.insert(department.into(), weight);
        self
    }

    /// Sets a level weight.
    pub fn with_level_weight(mut self, level: u8, weight: f64) -> Self {
        self.level_weights.insert(level, weight);
        self
    }

    /// Sets the core bonus.
    pub fn with_core_bonus(mut self, bonus: f64) -> Self {
        self.core_bonus = bonus;
        self
    }

    /// Weight of a department (0 if unknown).
    pub fn department_weight(&self, department: &str) -> f64 {
        self.department_weights.get(department).copied().unwrap_or(0.0)
    }

    /// Weight of a level (0 if unknown).
    pub fn level_weight(&self, level: u8) -> f64 {
        self.level_weights.get(&level).copied().unwrap_or(0.0)
    }
}

impl From<&SchedulerConfig> for PriorityContext {
    fn from(config: &SchedulerConfig) -> Self {
        Self {
            department_weights: config.department_weights.clone(),
            level_weights: config.level_weights.clone(),
            core_bonus: config.core_bonus,
        }
    }
}
