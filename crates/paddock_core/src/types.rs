//! Type definitions for `paddock_core`.
//!
//! Team state, content definitions and the events produced by every rule.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ID newtypes
// ---------------------------------------------------------------------------

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(PlayerId);

// ---------------------------------------------------------------------------
// State types
// ---------------------------------------------------------------------------

/// One player row together with its component rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub player: Player,
    pub components: Vec<Component>,
}

impl TeamState {
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn component_mut(&mut self, name: &str) -> Option<&mut Component> {
        self.components.iter_mut().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Current game day, starts at 1 and never decreases.
    pub day: u32,
    pub money: i64,
    /// The single research slot. `None` means Idle.
    pub project: Option<ResearchProject>,
    pub director: Option<String>,
    /// Real-world start time. Drives the calendar in real-time mode.
    pub started_at_unix_s: Option<i64>,
}

impl Player {
    pub fn is_researching(&self) -> bool {
        self.project.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchProject {
    pub component: String,
    pub completes_on_day: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub level: u32,
    pub base_performance: f64,
    /// Cost per level; the next upgrade costs `upgrade_cost * level`.
    pub upgrade_cost: i64,
}

impl Component {
    pub fn research_cost(&self) -> i64 {
        self.upgrade_cost * i64::from(self.level)
    }

    pub fn performance(&self, constants: &Constants) -> f64 {
        self.base_performance + f64::from(self.level) * constants.level_performance_step
    }
}

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    TeamFounded {
        player_id: PlayerId,
        director: String,
    },
    DayAdvanced {
        from: u32,
        to: u32,
    },
    /// A player without a start time joined the real-time clock.
    ClockAnchored {
        started_at_unix_s: i64,
    },
    ResearchStarted {
        component: String,
        cost: i64,
        completes_on_day: u32,
    },
    ResearchCompleted {
        component: String,
        new_level: u32,
    },
    /// The project pointed at a component the team does not own.
    ResearchAbandoned {
        component: String,
    },
    RaceFinished {
        position: u32,
        payout: i64,
    },
}

// ---------------------------------------------------------------------------
// Content types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameContent {
    pub content_version: String,
    pub starter_components: Vec<ComponentDef>,
    pub constants: Constants,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub name: String,
    pub base_performance: f64,
    pub upgrade_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constants {
    pub starting_money: i64,
    pub research_duration_days: u32,
    /// Game days per real day.
    pub time_acceleration: f64,
    pub seconds_per_day: u64,
    /// Performance added per component level.
    pub level_performance_step: f64,
    /// Grid slot of a car with zero performance.
    pub race_baseline_position: f64,
    /// Grid slots gained per point of average performance.
    pub race_performance_weight: f64,
}

impl Default for Constants {
    fn default() -> Self {
        Self {
            starting_money: 100_000,
            research_duration_days: 5,
            time_acceleration: 4.0,
            seconds_per_day: 86_400,
            level_performance_step: 0.1,
            race_baseline_position: 15.0,
            race_performance_weight: 2.0,
        }
    }
}

impl Default for GameContent {
    fn default() -> Self {
        let starter = |name: &str, base_performance: f64| ComponentDef {
            name: name.to_string(),
            base_performance,
            upgrade_cost: 10_000,
        };
        Self {
            content_version: "builtin".to_string(),
            starter_components: vec![
                starter("Chasis", 1.0),
                starter("Motor", 1.2),
                starter("Alerón Delantero", 0.8),
                starter("Alerón Trasero", 0.8),
            ],
            constants: Constants::default(),
        }
    }
}
