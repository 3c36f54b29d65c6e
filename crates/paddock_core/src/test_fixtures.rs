//! Shared test fixtures for `paddock_core` and downstream crates.
//!
//! `base_content()` is the built-in content; `base_state()` is a freshly
//! founded team whose real-time clock started at `FIXTURE_START_UNIX_S`.

use crate::{found_team, seconds_per_game_day, GameContent, PlayerId, TeamState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const FIXTURE_START_UNIX_S: i64 = 1_700_000_000;

pub fn base_content() -> GameContent {
    GameContent {
        content_version: "test".to_string(),
        ..GameContent::default()
    }
}

pub fn base_state(content: &GameContent) -> TeamState {
    let (state, _) = found_team(
        PlayerId("player_test".to_string()),
        "Test Director",
        FIXTURE_START_UNIX_S,
        content,
    )
    .expect("fixture director name is not blank");
    state
}

/// Unix time at which a fixture team reaches `day` in real-time mode.
pub fn unix_time_for_day(day: u32, content: &GameContent) -> i64 {
    FIXTURE_START_UNIX_S
        + i64::from(day.saturating_sub(1)) * seconds_per_game_day(&content.constants)
}

pub fn make_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}
