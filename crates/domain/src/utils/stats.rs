//! Aggregate statistics over behavior records.
//!
//! Pure reductions used by dashboards and reports; records with missing
//! fields simply fall out of the aggregates they cannot contribute to.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{SCORE_MAX, SCORE_MIN};
use crate::types::{BehaviorRecord, RecordStatus};

/// Overall workflow counters with approval/rejection rates in percent,
/// rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub approval_rate: f64,
    pub rejection_rate: f64,
}

/// Per-classroom counters; `average_score` covers approved records only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassroomStats {
    pub total: usize,
    pub approved: usize,
    pub total_score: f64,
    pub average_score: f64,
}

/// Compute workflow counters over a set of records.
pub fn calculate_stats(records: &[BehaviorRecord]) -> RecordStats {
    let total = records.len();
    let count = |status: RecordStatus| records.iter().filter(|r| r.status == Some(status)).count();

    let approved = count(RecordStatus::Approved);
    let rejected = count(RecordStatus::Rejected);

    RecordStats {
        total,
        pending: count(RecordStatus::Pending),
        approved,
        rejected,
        approval_rate: rate(approved, total),
        rejection_rate: rate(rejected, total),
    }
}

/// Count records per score value, always covering the full 1-5 range.
pub fn score_distribution(records: &[BehaviorRecord]) -> BTreeMap<u8, usize> {
    let mut distribution: BTreeMap<u8, usize> =
        (SCORE_MIN..=SCORE_MAX).map(|score| (score, 0)).collect();

    for record in records {
        if let Some(score) = record.score.map(|s| s as i64) {
            if let Ok(score) = u8::try_from(score) {
                if let Some(count) = distribution.get_mut(&score) {
                    *count += 1;
                }
            }
        }
    }

    distribution
}

/// Aggregate per classroom; records without a classroom are skipped.
pub fn classroom_stats(records: &[BehaviorRecord]) -> BTreeMap<String, ClassroomStats> {
    let mut stats: BTreeMap<String, ClassroomStats> = BTreeMap::new();

    for record in records {
        let Some(classroom) = record.classroom.as_deref() else {
            continue;
        };
        let entry = stats.entry(classroom.to_string()).or_default();
        entry.total += 1;

        if record.status == Some(RecordStatus::Approved) {
            entry.approved += 1;
            entry.total_score += record.score.unwrap_or_default();
        }
    }

    for entry in stats.values_mut() {
        entry.average_score = if entry.approved > 0 {
            round1(entry.total_score / entry.approved as f64)
        } else {
            0.0
        };
    }

    stats
}

fn rate(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round1(part as f64 / total as f64 * 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
