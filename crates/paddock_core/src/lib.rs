//! `paddock_core`: racing-team game rules.
//!
//! No IO, no clock reads. Callers pass the current unix time and persist
//! the resulting `TeamState` themselves.

mod calendar;
mod engine;
mod id;
mod onboarding;
mod race;
mod research;
mod types;

pub use calendar::{current_day, day_from_elapsed, seconds_per_game_day, start_for_day};
pub use engine::{advance_day, sync_calendar, sync_to_clock};
pub use id::generate_player_id;
pub use onboarding::{found_team, OnboardingError};
pub use race::{
    average_performance, finishing_position, payout_for_position, run_race, simulate_race,
    RaceError, RaceResult,
};
pub use research::{start_research, ResearchError};
pub use types::*;

#[cfg(any(test, feature = "test-support"))]
pub mod test_fixtures;

#[cfg(test)]
mod tests;
