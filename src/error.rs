//! Diagnostic error kinds for the planning core.
//!
//! Neither variant is ever propagated out of `ArtPlanner::plan` as a
//! `Result` — spec section 6 fixes the public return type to a (possibly
//! empty) waypoint list. This enum exists purely so the planner can log a
//! distinct, inspectable reason for an empty result, per spec section 7.

use std::{error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// Neither the direct hand-off nor the local-tree search produced a
    /// safeness->=-tau plan this tick.
    NoFeasiblePlan,
    /// The goal is blocked by a static obstacle or a stationary pedestrian.
    GoalOccupied,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFeasiblePlan => write!(f, "no safeness-above-threshold plan found this tick"),
            Self::GoalOccupied => write!(f, "goal is occupied by an obstacle or stationary pedestrian"),
        }
    }
}

impl error::Error for PlanError {}
