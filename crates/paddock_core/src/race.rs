use serde::{Deserialize, Serialize};

use crate::{Component, Constants, Event, TeamState};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub average_performance: f64,
    pub position: u32,
    pub payout: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceError {
    /// One race per game day.
    AlreadyRacedToday { day: u32 },
    NoComponents,
}

impl std::fmt::Display for RaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyRacedToday { day } => write!(f, "already raced on day {day}"),
            Self::NoComponents => f.write_str("team has no components"),
        }
    }
}

impl std::error::Error for RaceError {}

/// Mean of `base_performance + level * step` across all components.
pub fn average_performance(components: &[Component], constants: &Constants) -> Option<f64> {
    if components.is_empty() {
        return None;
    }
    let total: f64 = components.iter().map(|c| c.performance(constants)).sum();
    Some(total / components.len() as f64)
}

/// `max(1, round(baseline - average * weight))`, ties rounded to even.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn finishing_position(average_performance: f64, constants: &Constants) -> u32 {
    let raw = constants.race_baseline_position
        - average_performance * constants.race_performance_weight;
    raw.round_ties_even().max(1.0) as u32
}

/// Top five earn 5000 plus 1000 per place above sixth; 6th–10th earn 1000.
pub fn payout_for_position(position: u32) -> i64 {
    match position {
        0..=5 => 5_000 + (6 - i64::from(position)) * 1_000,
        6..=10 => 1_000,
        _ => 0,
    }
}

/// Score a race without touching any state.
pub fn simulate_race(
    components: &[Component],
    constants: &Constants,
) -> Result<RaceResult, RaceError> {
    let average = average_performance(components, constants).ok_or(RaceError::NoComponents)?;
    let position = finishing_position(average, constants);
    Ok(RaceResult {
        average_performance: average,
        position,
        payout: payout_for_position(position),
    })
}

/// Race once and bank the payout. Racing does not move the calendar.
///
/// `last_race_day` is the day of this session's previous race, if any.
pub fn run_race(
    state: &mut TeamState,
    last_race_day: Option<u32>,
    constants: &Constants,
) -> Result<(RaceResult, Event), RaceError> {
    let day = state.player.day;
    if last_race_day == Some(day) {
        return Err(RaceError::AlreadyRacedToday { day });
    }
    let result = simulate_race(&state.components, constants)?;
    state.player.money += result.payout;
    Ok((
        result,
        Event::RaceFinished {
            position: result.position,
            payout: result.payout,
        },
    ))
}
