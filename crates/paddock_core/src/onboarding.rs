use crate::{Component, Event, GameContent, Player, PlayerId, TeamState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OnboardingError {
    EmptyDirectorName,
}

impl std::fmt::Display for OnboardingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDirectorName => f.write_str("director name must not be empty"),
        }
    }
}

impl std::error::Error for OnboardingError {}

/// Build a fresh team: day 1, starting money, every starter component at level 1.
///
/// The director name is trimmed; a blank name builds nothing.
pub fn found_team(
    id: PlayerId,
    director: &str,
    now_unix_s: i64,
    content: &GameContent,
) -> Result<(TeamState, Event), OnboardingError> {
    let director = director.trim();
    if director.is_empty() {
        return Err(OnboardingError::EmptyDirectorName);
    }

    let components = content
        .starter_components
        .iter()
        .map(|def| Component {
            name: def.name.clone(),
            level: 1,
            base_performance: def.base_performance,
            upgrade_cost: def.upgrade_cost,
        })
        .collect();

    let event = Event::TeamFounded {
        player_id: id.clone(),
        director: director.to_string(),
    };
    let state = TeamState {
        player: Player {
            id,
            day: 1,
            money: content.constants.starting_money,
            project: None,
            director: Some(director.to_string()),
            started_at_unix_s: Some(now_unix_s),
        },
        components,
    };
    Ok((state, event))
}
