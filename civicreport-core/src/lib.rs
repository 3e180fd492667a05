//! CivicReport Core Library
//!
//! Pure domain rules for the issue-reporting service:
//! - Citizens accrue points, levels and badges for submitting issues
//! - Free-text "lat,lng" locations parse to optional map coordinates
//! - Issues carry one of three conventional lifecycle states

pub mod gamification;
pub mod geo;
pub mod status;

pub use gamification::{Level, Reward, POINTS_PER_ISSUE};
pub use geo::{parse_location, Coordinates};
pub use status::{IssueStatus, UnknownStatus};
