//! Allocation, enrollment, and KPI evaluation.
//!
//! # Algorithm
//!
//! [`SlotAllocator`] uses a greedy, priority-driven scan over the flattened
//! (room × slot) space with FIFO deferral queues. It is not optimal, but
//! fills fragmented capacity without backtracking.
//!
//! [`EnrollmentSelector`] draws rosters from shuffled interest pools under
//! room capacity and per-student time conflicts.
//!
//! [`Timetabler`] chains prioritization, allocation, and enrollment.
//! [`Timetabler::run_trials`] repeats it over fresh catalog copies with
//! consecutive seeds.
//!
//! # KPI
//!
//! [`ScheduleKpi`] summarizes enrollment, seat fill, request satisfaction,
//! and room utilization.

mod allocator;
mod enrollment;
mod experiment;
mod kpi;
mod pipeline;

pub use allocator::SlotAllocator;
pub use enrollment::{EnrollmentSelector, EnrollmentSummary};
pub use experiment::{TrialResult, TrialSet, TrialSummary};
pub use kpi::ScheduleKpi;
pub use pipeline::{TimetableOutcome, Timetabler};
