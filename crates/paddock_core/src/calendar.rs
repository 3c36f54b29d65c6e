use crate::{Constants, Player};

/// Game day reached after `elapsed_secs` of real time.
///
/// Day 1 starts at zero elapsed time; negative elapsed time (clock moved
/// backwards) counts as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn day_from_elapsed(elapsed_secs: i64, constants: &Constants) -> u32 {
    let elapsed = elapsed_secs.max(0) as f64;
    let game_days = elapsed * constants.time_acceleration / constants.seconds_per_day as f64;
    1u32.saturating_add(game_days.floor() as u32)
}

/// Real seconds in one game day, rounded up.
#[allow(clippy::cast_possible_truncation)]
pub fn seconds_per_game_day(constants: &Constants) -> i64 {
    (constants.seconds_per_day as f64 / constants.time_acceleration).ceil() as i64
}

/// Start time that puts a player on `day` at `now_unix_s`.
pub fn start_for_day(day: u32, now_unix_s: i64, constants: &Constants) -> i64 {
    let elapsed =
        i64::from(day.saturating_sub(1)).saturating_mul(seconds_per_game_day(constants));
    now_unix_s.saturating_sub(elapsed)
}

/// The day a player should be on at `now_unix_s`. Never lower than the stored day.
///
/// Players without a real-world start timestamp keep their stored day.
pub fn current_day(player: &Player, now_unix_s: i64, constants: &Constants) -> u32 {
    match player.started_at_unix_s {
        Some(started) => {
            day_from_elapsed(now_unix_s.saturating_sub(started), constants).max(player.day)
        }
        None => player.day,
    }
}
