use paddock_core::{Component, Player, PlayerId, ResearchProject};
use rusqlite::Row;

/// Column order expected by `read_player`.
pub(crate) const PLAYER_COLUMNS: &str = "id, dia, dinero, proyecto_activo, dia_finalizacion_rd, \
     nombre_director, inicio_real";

pub(crate) fn read_player(row: &Row<'_>) -> rusqlite::Result<Player> {
    let id = PlayerId(row.get(0)?);
    let project_component: Option<String> = row.get(3)?;
    let completes_on_day: Option<u32> = row.get(4)?;

    let project = match (project_component, completes_on_day) {
        (Some(component), Some(completes_on_day)) => Some(ResearchProject {
            component,
            completes_on_day,
        }),
        (None, None) => None,
        (component, day) => {
            tracing::warn!(
                player_id = %id,
                ?component,
                ?day,
                "half-set research columns, loading player as idle"
            );
            None
        }
    };

    Ok(Player {
        id,
        day: row.get(1)?,
        money: row.get(2)?,
        project,
        director: row.get(5)?,
        started_at_unix_s: row.get(6)?,
    })
}

pub(crate) fn read_component(row: &Row<'_>) -> rusqlite::Result<Component> {
    Ok(Component {
        name: row.get(0)?,
        level: row.get(1)?,
        base_performance: row.get(2)?,
        upgrade_cost: row.get(3)?,
    })
}
