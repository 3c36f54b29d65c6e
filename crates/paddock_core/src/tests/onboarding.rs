use super::*;

#[test]
fn test_new_team_starts_with_defaults() {
    let content = test_content();

    let (state, event) = found_team(
        PlayerId("p1".to_string()),
        "  Adrian  ",
        1_000,
        &content,
    )
    .unwrap();

    assert_eq!(state.player.day, 1);
    assert_eq!(state.player.money, 100_000);
    assert_eq!(state.player.director.as_deref(), Some("Adrian"));
    assert_eq!(state.player.started_at_unix_s, Some(1_000));
    assert!(state.player.project.is_none());
    assert_eq!(state.components.len(), 4);
    assert!(state.components.iter().all(|c| c.level == 1));
    assert!(state.components.iter().all(|c| c.upgrade_cost == 10_000));
    assert_eq!(
        event,
        Event::TeamFounded {
            player_id: PlayerId("p1".to_string()),
            director: "Adrian".to_string(),
        }
    );
}

#[test]
fn test_blank_director_name_is_rejected() {
    let content = test_content();
    let err = found_team(PlayerId("p1".to_string()), "   ", 0, &content).unwrap_err();
    assert_eq!(err, OnboardingError::EmptyDirectorName);
}

#[test]
fn test_starter_component_names_are_unique() {
    let content = test_content();
    let state = test_state(&content);
    let mut names: Vec<&str> = state.components.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), state.components.len());
}
