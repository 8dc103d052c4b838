//! Nudge and coaching-tip generation: static rule tables, personalization,
//! frequency throttling, and the background scheduler.

pub mod personalize;
pub mod rules;
pub mod scheduler;
pub mod throttle;

pub use personalize::personalize;
pub use rules::{ActivityRule, DaySegment, StaticNudge, ACTIVITY_RULES, STATIC_NUDGES};
pub use scheduler::BackgroundCoach;
pub use throttle::should_show_nudge;
