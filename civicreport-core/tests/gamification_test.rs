//! Tests for the gamification rule as observed across repeated submissions

use civicreport_core::gamification::{
    apply_submission, badges_for_points, BADGE_ACTIVE_CITIZEN, BADGE_COMMUNITY_HERO,
};
use civicreport_core::{Level, POINTS_PER_ISSUE};

/// Simulate a citizen submitting issues one after another and check the
/// level tier and badge set never regress.
#[test]
fn test_badges_and_level_monotonic_over_many_submissions() {
    let mut points = 0u32;
    let mut level = Level::Bronze;
    let mut badge_count = 0usize;

    for submission in 1..=20 {
        let reward = apply_submission(points);
        assert_eq!(reward.points, points + POINTS_PER_ISSUE);
        assert!(reward.level >= level, "level regressed at submission {}", submission);
        assert!(
            reward.badges.len() >= badge_count,
            "badges regressed at submission {}",
            submission
        );

        points = reward.points;
        level = reward.level;
        badge_count = reward.badges.len();
    }

    // 20 submissions = 200 points
    assert_eq!(points, 200);
    assert_eq!(level, Level::Gold);
    assert_eq!(
        badges_for_points(points),
        vec![BADGE_ACTIVE_CITIZEN, BADGE_COMMUNITY_HERO]
    );
}

#[test]
fn test_tier_boundaries() {
    // First submission: Bronze with the first badge
    let reward = apply_submission(0);
    assert_eq!((reward.level, reward.points), (Level::Bronze, 10));
    assert_eq!(reward.badges, vec![BADGE_ACTIVE_CITIZEN]);

    // Fifth submission crosses into Silver and Community Hero
    let reward = apply_submission(40);
    assert_eq!((reward.level, reward.points), (Level::Silver, 50));
    assert_eq!(reward.badges, vec![BADGE_ACTIVE_CITIZEN, BADGE_COMMUNITY_HERO]);

    // Tenth submission crosses into Gold; no new badge exists beyond 50
    let reward = apply_submission(90);
    assert_eq!((reward.level, reward.points), (Level::Gold, 100));
    assert_eq!(reward.badges, vec![BADGE_ACTIVE_CITIZEN, BADGE_COMMUNITY_HERO]);
}

#[test]
fn test_rule_is_pure() {
    for points in [0, 10, 45, 90, 150] {
        assert_eq!(apply_submission(points), apply_submission(points));
    }
}
