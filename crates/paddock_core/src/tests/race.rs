use super::*;

#[test]
fn test_average_performance_one_point_six_finishes_twelfth_without_payout() {
    let content = test_content();
    let state = state_with_uniform_performance(&content, 1.6);

    let result = simulate_race(&state.components, &content.constants).unwrap();

    assert!((result.average_performance - 1.6).abs() < 1e-9);
    assert_eq!(result.position, 12);
    assert_eq!(result.payout, 0);
}

#[test]
fn test_average_performance_five_finishes_fifth() {
    let content = test_content();
    let state = state_with_uniform_performance(&content, 5.0);

    let result = simulate_race(&state.components, &content.constants).unwrap();

    assert_eq!(result.position, 5);
    assert_eq!(result.payout, 6_000);
}

#[test]
fn test_position_is_clamped_to_pole() {
    let content = test_content();
    assert_eq!(finishing_position(100.0, &content.constants), 1);
    assert_eq!(finishing_position(7.0, &content.constants), 1);
}

#[test]
fn test_position_rounds_half_to_even() {
    let content = test_content();
    // 15 - 1.25 * 2 = 12.5
    assert_eq!(finishing_position(1.25, &content.constants), 12);
    // 15 - 1.75 * 2 = 11.5
    assert_eq!(finishing_position(1.75, &content.constants), 12);
}

#[test]
fn test_payout_table() {
    assert_eq!(payout_for_position(1), 10_000);
    assert_eq!(payout_for_position(5), 6_000);
    assert_eq!(payout_for_position(6), 1_000);
    assert_eq!(payout_for_position(10), 1_000);
    assert_eq!(payout_for_position(11), 0);
    assert_eq!(payout_for_position(20), 0);
}

#[test]
fn test_run_race_banks_payout_and_keeps_day() {
    let content = test_content();
    let mut state = state_with_uniform_performance(&content, 5.0);

    let (result, event) = run_race(&mut state, None, &content.constants).unwrap();

    assert_eq!(result.payout, 6_000);
    assert_eq!(
        event,
        Event::RaceFinished {
            position: 5,
            payout: 6_000
        }
    );
    assert_eq!(state.player.money, 106_000);
    assert_eq!(state.player.day, 1);
}

#[test]
fn test_second_race_same_day_is_rejected() {
    let content = test_content();
    let mut state = state_with_uniform_performance(&content, 5.0);
    run_race(&mut state, None, &content.constants).unwrap();
    let money = state.player.money;

    let err = run_race(&mut state, Some(1), &content.constants).unwrap_err();

    assert_eq!(err, RaceError::AlreadyRacedToday { day: 1 });
    assert_eq!(state.player.money, money);
}

#[test]
fn test_race_allowed_again_next_day() {
    let content = test_content();
    let mut state = state_with_uniform_performance(&content, 5.0);
    run_race(&mut state, None, &content.constants).unwrap();
    advance_day(&mut state);

    assert!(run_race(&mut state, Some(1), &content.constants).is_ok());
    assert_eq!(state.player.money, 112_000);
}

#[test]
fn test_team_without_components_cannot_race() {
    let content = test_content();
    let mut state = test_state(&content);
    state.components.clear();

    let err = run_race(&mut state, None, &content.constants).unwrap_err();

    assert_eq!(err, RaceError::NoComponents);
    assert_eq!(state.player.money, content.constants.starting_money);
}

#[test]
fn test_research_improves_performance() {
    let content = test_content();
    let mut state = test_state(&content);
    let before = average_performance(&state.components, &content.constants).unwrap();

    start_research(&mut state, "Motor", &content.constants).unwrap();
    sync_calendar(&mut state, 6);

    let after = average_performance(&state.components, &content.constants).unwrap();
    assert!(after > before);
}
