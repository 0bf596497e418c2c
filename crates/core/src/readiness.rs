//! Technician/job readiness breakdown.
//!
//! Readiness is availability plus coverage: the job's zone and skill must
//! both be among the technician's assignments. A job with no zone or no
//! skill recorded cannot be matched.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Structured verdict explaining whether a technician can take a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentReadiness {
    pub technician_id: DbId,
    pub job_id: DbId,
    pub effective_availability: bool,
    pub zone_match: bool,
    pub skill_match: bool,
    pub can_assign: bool,
}

impl AssignmentReadiness {
    /// Combine the three checks.
    ///
    /// `effective_availability` must come from the availability engine;
    /// it is never recomputed here.
    pub fn evaluate(
        technician_id: DbId,
        job_id: DbId,
        effective_availability: bool,
        job_zone_id: Option<DbId>,
        job_skill_id: Option<DbId>,
        technician_zone_ids: &[DbId],
        technician_skill_ids: &[DbId],
    ) -> Self {
        let zone_match = matches_requirement(job_zone_id, technician_zone_ids);
        let skill_match = matches_requirement(job_skill_id, technician_skill_ids);
        Self {
            technician_id,
            job_id,
            effective_availability,
            zone_match,
            skill_match,
            can_assign: effective_availability && zone_match && skill_match,
        }
    }

    /// Names of the checks that failed, in display order.
    pub fn failed_checks(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        if !self.effective_availability {
            failed.push("effective_availability");
        }
        if !self.zone_match {
            failed.push("zone_match");
        }
        if !self.skill_match {
            failed.push("skill_match");
        }
        failed
    }
}

/// Whether the job's requirement is among the technician's assignments.
pub fn matches_requirement(required: Option<DbId>, assigned: &[DbId]) -> bool {
    required.is_some_and(|id| assigned.contains(&id))
}

/// Fail with the full breakdown when the technician cannot be assigned.
pub fn assert_can_assign(readiness: AssignmentReadiness) -> Result<AssignmentReadiness, CoreError> {
    assert_eligible_for_acceptance(readiness, false)
}

/// Acceptance eligibility: readiness holds and the technician has not
/// already declined the job.
pub fn assert_eligible_for_acceptance(
    readiness: AssignmentReadiness,
    previously_rejected: bool,
) -> Result<AssignmentReadiness, CoreError> {
    if !readiness.can_assign || previously_rejected {
        return Err(CoreError::NotEligible {
            readiness,
            previously_rejected,
        });
    }
    Ok(readiness)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn evaluate(available: bool, zone: Option<DbId>, skill: Option<DbId>) -> AssignmentReadiness {
        AssignmentReadiness::evaluate(1, 100, available, zone, skill, &[10, 11], &[20])
    }

    #[test]
    fn all_checks_pass() {
        let r = evaluate(true, Some(11), Some(20));
        assert!(r.zone_match && r.skill_match && r.can_assign);
        assert!(r.failed_checks().is_empty());
    }

    #[test]
    fn unavailable_blocks_assignment() {
        let r = evaluate(false, Some(10), Some(20));
        assert!(!r.can_assign);
        assert_eq!(r.failed_checks(), vec!["effective_availability"]);
    }

    #[test]
    fn zone_mismatch_blocks_assignment() {
        let r = evaluate(true, Some(99), Some(20));
        assert!(!r.zone_match);
        assert!(!r.can_assign);
    }

    #[test]
    fn missing_requirement_never_matches() {
        let r = evaluate(true, None, None);
        assert!(!r.zone_match);
        assert!(!r.skill_match);
        assert_eq!(r.failed_checks(), vec!["zone_match", "skill_match"]);
    }

    #[test]
    fn assert_can_assign_carries_breakdown() {
        let err = assert_can_assign(evaluate(true, Some(10), Some(21))).unwrap_err();
        assert_matches!(
            err,
            CoreError::NotEligible { ref readiness, previously_rejected: false }
                if readiness.zone_match && !readiness.skill_match
        );
    }

    #[test]
    fn previous_rejection_blocks_ready_technician() {
        let err = assert_eligible_for_acceptance(evaluate(true, Some(10), Some(20)), true)
            .unwrap_err();
        assert_matches!(
            err,
            CoreError::NotEligible { ref readiness, previously_rejected: true } if readiness.can_assign
        );
    }

    #[test]
    fn eligible_returns_readiness() {
        let r = assert_eligible_for_acceptance(evaluate(true, Some(10), Some(20)), false).unwrap();
        assert_eq!(r.job_id, 100);
    }
}
