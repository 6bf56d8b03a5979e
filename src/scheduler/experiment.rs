//! Repeated independent runs over one catalog.
//!
//! Each trial schedules a fresh copy of the catalog with its own seed
//! (`base + i`), so trials share nothing but the input. Wall-clock time is
//! recorded per trial and kept out of [`TrialSummary`], which depends only
//! on the base seed.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use super::{EnrollmentSummary, ScheduleKpi, Timetabler};
use crate::models::Catalog;

/// Outcome of one trial.
#[derive(Debug, Clone, Serialize)]
pub struct TrialResult {
    /// Trial index (0-based).
    pub trial: usize,
    /// Seed used for enrollment.
    pub seed: u64,
    /// Schedule metrics.
    pub kpi: ScheduleKpi,
    /// Enrollment counts.
    pub enrollment: EnrollmentSummary,
    /// Number of courses marked core.
    pub core_courses: usize,
    /// Wall-clock duration of the run.
    pub duration_ms: u64,
}

/// Mean metrics over a set of trials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialSummary {
    pub trials: usize,
    pub avg_scheduled_sections: f64,
    pub avg_unscheduled_sections: f64,
    pub avg_enrollment: f64,
    pub min_enrollment: usize,
    pub max_enrollment: usize,
    pub avg_seat_fill_rate: f64,
    pub avg_request_satisfaction_rate: f64,
}

/// All trials of one experiment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrialSet {
    pub results: Vec<TrialResult>,
}

impl TrialSet {
    /// Mean metrics, or `None` when no trial ran.
    pub fn summary(&self) -> Option<TrialSummary> {
        if self.results.is_empty() {
            return None;
        }
        let n = self.results.len() as f64;
        let mean = |f: fn(&TrialResult) -> f64| self.results.iter().map(f).sum::<f64>() / n;
        let enrollments = self.results.iter().map(|r| r.kpi.total_enrollment);

        Some(TrialSummary {
            trials: self.results.len(),
            avg_scheduled_sections: mean(|r| r.kpi.scheduled_sections as f64),
            avg_unscheduled_sections: mean(|r| r.kpi.unscheduled_sections as f64),
            avg_enrollment: mean(|r| r.kpi.total_enrollment as f64),
            min_enrollment: enrollments.clone().min().unwrap_or(0),
            max_enrollment: enrollments.max().unwrap_or(0),
            avg_seat_fill_rate: mean(|r| r.kpi.seat_fill_rate),
            avg_request_satisfaction_rate: mean(|r| r.kpi.request_satisfaction_rate),
        })
    }

    /// Mean wall-clock time per trial in milliseconds.
    pub fn avg_duration_ms(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        let total: u64 = self.results.iter().map(|r| r.duration_ms).sum();
        total as f64 / self.results.len() as f64
    }
}

impl Timetabler {
    /// Runs `trials` independent schedules over copies of `catalog`.
    ///
    /// Trial `i` is seeded with `base + i`, where `base` is the configured
    /// seed or a random value when none is set.
    pub fn run_trials(&self, catalog: &Catalog, trials: usize) -> TrialSet {
        let base = match self.config().seed {
            Some(seed) => seed,
            None => SmallRng::from_os_rng().random(),
        };

        let mut set = TrialSet::default();
        for trial in 0..trials {
            let seed = base.wrapping_add(trial as u64);
            let mut copy = catalog.clone();

            let start = Instant::now();
            let outcome = self.run(&mut copy, &mut SmallRng::seed_from_u64(seed));
            let duration_ms = start.elapsed().as_millis() as u64;

            let kpi = ScheduleKpi::calculate(&outcome.schedule, &copy);
            info!(
                trial,
                seed,
                scheduled = kpi.scheduled_sections,
                enrolled = kpi.total_enrollment,
                duration_ms,
                "trial complete"
            );
            set.results.push(TrialResult {
                trial,
                seed,
                kpi,
                enrollment: outcome.enrollment,
                core_courses: outcome.core_courses,
                duration_ms,
            });
        }
        set
    }
}
