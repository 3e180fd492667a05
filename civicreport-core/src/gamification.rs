//! Gamification rule: cumulative points map to a level tier and badge set

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed award for submitting one issue.
pub const POINTS_PER_ISSUE: u32 = 10;

/// Awarded once a citizen reaches 10 points.
pub const BADGE_ACTIVE_CITIZEN: &str = "Active Citizen";

/// Awarded once a citizen reaches 50 points.
pub const BADGE_COMMUNITY_HERO: &str = "Community Hero";

/// Level tiers, ordered lowest to highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Level {
    #[default]
    Bronze,
    Silver,
    Gold,
}

impl Level {
    /// Level for a cumulative point total: Gold at 100, Silver at 50,
    /// Bronze below that. A non-decreasing step function of points.
    pub fn for_points(points: u32) -> Self {
        if points >= 100 {
            Level::Gold
        } else if points >= 50 {
            Level::Silver
        } else {
            Level::Bronze
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Bronze => "Bronze",
            Level::Silver => "Silver",
            Level::Gold => "Gold",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s {
            "Bronze" => Some(Level::Bronze),
            "Silver" => Some(Level::Silver),
            "Gold" => Some(Level::Gold),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badges earned at a cumulative point total, lowest threshold first.
///
/// Callers merge these into the stored badge set append-only; a badge is
/// never revoked even if a future rule change lowered the total.
pub fn badges_for_points(points: u32) -> Vec<&'static str> {
    let mut badges = Vec::new();
    if points >= 10 {
        badges.push(BADGE_ACTIVE_CITIZEN);
    }
    if points >= 50 {
        badges.push(BADGE_COMMUNITY_HERO);
    }
    badges
}

/// Result of applying one submission award to a point total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    pub points: u32,
    pub level: Level,
    pub badges: Vec<&'static str>,
}

/// Apply the fixed per-submission award to a cumulative point total.
///
/// Deterministic and free of I/O; the same input always yields the same
/// reward. Stores run this inside their own critical section so concurrent
/// submissions never lose an increment.
pub fn apply_submission(points: u32) -> Reward {
    let points = points.saturating_add(POINTS_PER_ISSUE);
    Reward {
        points,
        level: Level::for_points(points),
        badges: badges_for_points(points),
    }
}
