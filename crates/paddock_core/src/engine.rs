use crate::calendar::{current_day, start_for_day};
use crate::research::complete_due_research;
use crate::{Event, GameContent, TeamState};

/// Bring the team's calendar forward to `target_day`.
///
/// Order of operations:
/// 1. Raise the stored day to `target_day` (a lower target is ignored).
/// 2. Complete the active research project if its day has been reached.
///
/// Returns the events produced. An empty vec means nothing changed and
/// there is nothing to persist.
pub fn sync_calendar(state: &mut TeamState, target_day: u32) -> Vec<Event> {
    let mut events = Vec::new();

    let from = state.player.day;
    if target_day > from {
        state.player.day = target_day;
        events.push(Event::DayAdvanced {
            from,
            to: target_day,
        });
    }

    complete_due_research(state, &mut events);
    events
}

/// Manual clock: move exactly one day forward.
pub fn advance_day(state: &mut TeamState) -> Vec<Event> {
    let next = state.player.day.saturating_add(1);
    sync_calendar(state, next)
}

/// Real-time clock: move to the day derived from the player's start time.
///
/// A player with no start time (rows written before start times were
/// stored) is first anchored so that `now_unix_s` falls on its stored day.
pub fn sync_to_clock(state: &mut TeamState, now_unix_s: i64, content: &GameContent) -> Vec<Event> {
    let mut events = Vec::new();
    if state.player.started_at_unix_s.is_none() {
        let started = start_for_day(state.player.day, now_unix_s, &content.constants);
        state.player.started_at_unix_s = Some(started);
        events.push(Event::ClockAnchored {
            started_at_unix_s: started,
        });
    }
    let day = current_day(&state.player, now_unix_s, &content.constants);
    events.extend(sync_calendar(state, day));
    events
}
