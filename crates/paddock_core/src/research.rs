use crate::{Constants, Event, ResearchProject, TeamState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchError {
    /// The research slot is taken.
    ProjectInProgress { component: String },
    UnknownComponent { component: String },
    InsufficientFunds { cost: i64, available: i64 },
}

impl std::fmt::Display for ResearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectInProgress { component } => {
                write!(f, "research already in progress on {component}")
            }
            Self::UnknownComponent { component } => write!(f, "unknown component {component}"),
            Self::InsufficientFunds { cost, available } => {
                write!(f, "research costs {cost} but only {available} is available")
            }
        }
    }
}

impl std::error::Error for ResearchError {}

/// Start researching `component_name`.
///
/// Charges `upgrade_cost * level` and books completion for
/// `day + research_duration_days`. Leaves the state untouched on error.
pub fn start_research(
    state: &mut TeamState,
    component_name: &str,
    constants: &Constants,
) -> Result<Event, ResearchError> {
    if let Some(project) = &state.player.project {
        return Err(ResearchError::ProjectInProgress {
            component: project.component.clone(),
        });
    }
    let Some(component) = state.component(component_name) else {
        return Err(ResearchError::UnknownComponent {
            component: component_name.to_string(),
        });
    };
    let cost = component.research_cost();
    if state.player.money < cost {
        return Err(ResearchError::InsufficientFunds {
            cost,
            available: state.player.money,
        });
    }

    let completes_on_day = state
        .player
        .day
        .saturating_add(constants.research_duration_days);
    state.player.money -= cost;
    state.player.project = Some(ResearchProject {
        component: component_name.to_string(),
        completes_on_day,
    });

    Ok(Event::ResearchStarted {
        component: component_name.to_string(),
        cost,
        completes_on_day,
    })
}

/// Researching → Idle once the current day reaches the completion day.
pub(crate) fn complete_due_research(state: &mut TeamState, events: &mut Vec<Event>) {
    let due = state
        .player
        .project
        .as_ref()
        .is_some_and(|p| state.player.day >= p.completes_on_day);
    if !due {
        return;
    }
    let Some(project) = state.player.project.take() else {
        return;
    };

    match state.component_mut(&project.component) {
        Some(component) => {
            component.level += 1;
            events.push(Event::ResearchCompleted {
                component: project.component,
                new_level: component.level,
            });
        }
        None => events.push(Event::ResearchAbandoned {
            component: project.component,
        }),
    }
}
