use paddock_core::GameContent;
use paddock_store::GameStore;
use std::sync::Arc;

/// How the game calendar moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ClockMode {
    /// Day derived from real time since the team was founded.
    #[value(name = "realtime")]
    RealTime,
    /// Day only moves via `/avanzar`.
    Manual,
}

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<GameStore>,
    pub content: Arc<GameContent>,
    pub clock: ClockMode,
    /// `/reset` also deletes every team, not just the session.
    pub reset_wipes_store: bool,
    /// Current unix time in seconds.
    pub now: fn() -> i64,
}

pub fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
