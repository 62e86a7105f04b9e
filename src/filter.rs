//! Experience filter over a similarity-ranked candidate pool
//!
//! Only removes candidates, never reorders them. With a threshold active, a
//! candidate survives iff its experience coerces to an integer strictly
//! greater than the threshold ("more than N years", not "at least N").

use crate::types::{Candidate, Experience, ProfileId};
use serde::{Deserialize, Serialize};

/// Default number of results shown to the user
pub const DEFAULT_DISPLAY_CAP: usize = 50;

/// Why a candidate was dropped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    BelowThreshold { years: i64, threshold: u32 },
    MissingExperience,
    InvalidExperience(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub id: ProfileId,
    pub reason: RejectReason,
}

/// Output of [`filter_candidates`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    /// Survivors in pool order, truncated to the display cap
    pub kept: Vec<Candidate>,
    /// Survivors before truncation
    pub total_matches: usize,
    pub rejected: Vec<Rejection>,
}

impl FilterReport {
    /// Dropped because the experience value could not be read
    pub fn unreadable(&self) -> usize {
        self.rejected
            .iter()
            .filter(|r| !matches!(r.reason, RejectReason::BelowThreshold { .. }))
            .count()
    }
}

/// Decide a single candidate
pub fn check(candidate: &Candidate, threshold: Option<u32>) -> Result<(), RejectReason> {
    let Some(threshold) = threshold else {
        return Ok(());
    };

    match candidate.experience() {
        Experience::Years(years) if years > i64::from(threshold) => Ok(()),
        Experience::Years(years) => Err(RejectReason::BelowThreshold { years, threshold }),
        Experience::Missing => Err(RejectReason::MissingExperience),
        Experience::Invalid(raw) => Err(RejectReason::InvalidExperience(raw)),
    }
}

/// Apply the threshold to `pool`, keeping at most `cap` survivors
pub fn filter_candidates(pool: Vec<Candidate>, threshold: Option<u32>, cap: usize) -> FilterReport {
    let pool_size = pool.len();
    let mut report = FilterReport::default();

    for candidate in pool {
        match check(&candidate, threshold) {
            Ok(()) => {
                report.total_matches += 1;
                if report.kept.len() < cap {
                    report.kept.push(candidate);
                }
            }
            Err(reason) => report.rejected.push(Rejection {
                id: candidate.id,
                reason,
            }),
        }
    }

    let unreadable = report.unreadable();
    if unreadable > 0 {
        tracing::warn!(unreadable, "dropped candidates with unreadable experience");
    }
    tracing::debug!(
        pool_size,
        ?threshold,
        matches = report.total_matches,
        shown = report.kept.len(),
        "filtered candidate pool"
    );

    report
}
