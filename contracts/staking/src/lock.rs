use crate::plans::Plan;

/// Moment the plan's current lock expires: `start_time + duration`.
///
/// The anchor is plan-wide. Every staker in the plan unlocks together,
/// regardless of when they joined.
pub fn unlock_time(plan: &Plan) -> u64 {
    plan.start_time.saturating_add(plan.duration)
}

/// `true` once `now` has reached the plan's unlock time.
pub fn is_unlocked(plan: &Plan, now: u64) -> bool {
    now >= unlock_time(plan)
}
