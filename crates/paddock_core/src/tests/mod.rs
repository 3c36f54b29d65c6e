use super::*;
use crate::test_fixtures::{base_content, base_state, unix_time_for_day};

mod onboarding;
mod race;

fn test_content() -> GameContent {
    base_content()
}

fn test_state(content: &GameContent) -> TeamState {
    base_state(content)
}

fn level_of(state: &TeamState, name: &str) -> u32 {
    state.component(name).map(|c| c.level).unwrap()
}

/// Team whose four components all perform at `performance` on level 1.
fn state_with_uniform_performance(content: &GameContent, performance: f64) -> TeamState {
    let mut state = test_state(content);
    for component in &mut state.components {
        component.base_performance = performance - content.constants.level_performance_step;
    }
    state
}

#[test]
fn test_team_state_serializes_to_json() {
    let content = test_content();
    let state = test_state(&content);
    let json = serde_json::to_string(&state).unwrap();
    let back: TeamState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);
}
