//! Persistence and content loading shared between `paddock_cli` and `paddock_daemon`.
//!
//! Teams live in a single SQLite file: one `jugadores` row per player and
//! one `componentes` row per (player, component). The schema version is
//! tracked in `PRAGMA user_version` and migrated forward once, at open.

mod content;
mod rows;
#[cfg(test)]
mod tests;

pub use content::{load_content, validate_content};

use std::path::Path;

use anyhow::{bail, Context, Result};
use paddock_core::{Player, PlayerId, TeamState};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use rows::{read_component, read_player, PLAYER_COLUMNS};

/// Latest schema version this build knows how to write.
pub const SCHEMA_VERSION: u32 = 2;

/// `(version, sql)` pairs applied in order to reach `SCHEMA_VERSION`.
const MIGRATIONS: [(u32, &str); 2] = [
    (
        1,
        "CREATE TABLE jugadores (
            id                  TEXT PRIMARY KEY,
            dia                 INTEGER NOT NULL DEFAULT 1,
            dinero              INTEGER NOT NULL,
            proyecto_activo     TEXT,
            dia_finalizacion_rd INTEGER
         );
         CREATE TABLE componentes (
            jugador_id       TEXT NOT NULL REFERENCES jugadores(id),
            nombre           TEXT NOT NULL,
            nivel            INTEGER NOT NULL DEFAULT 1,
            rendimiento_base REAL NOT NULL,
            coste_mejora     INTEGER NOT NULL,
            PRIMARY KEY (jugador_id, nombre)
         );",
    ),
    (
        2,
        "ALTER TABLE jugadores ADD COLUMN nombre_director TEXT;
         ALTER TABLE jugadores ADD COLUMN inicio_real INTEGER;",
    ),
];

/// SQLite-backed team store.
///
/// Each call takes the connection lock once. Callers doing load → mutate →
/// save hold no lock in between, so two concurrent requests for the same
/// player can interleave and the last save wins.
pub struct GameStore {
    conn: Mutex<Connection>,
}

impl GameStore {
    /// Open (or create) the database file and migrate it to `SCHEMA_VERSION`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating data dir {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening SQLite at {}", path.display()))?;
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;
             PRAGMA foreign_keys=ON;",
        )
        .context("setting pragmas")?;
        Self::from_connection(conn)
    }

    /// Open a database file that must already exist. Never creates files.
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!("no database at {}", path.display());
        }
        Self::open(path)
    }

    /// Throwaway store, used by tests and previews.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("opening in-memory SQLite")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")
            .context("setting pragmas")?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn schema_version(&self) -> Result<u32> {
        let conn = self.conn.lock();
        read_user_version(&conn)
    }

    /// Insert a freshly founded team: the player row and every component row
    /// in one transaction.
    pub fn create_team(&self, state: &TeamState) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().context("create_team begin")?;
        let p = &state.player;
        let (project, completes_on_day) = project_columns(p);
        tx.execute(
            "INSERT INTO jugadores (
                id, dia, dinero, proyecto_activo, dia_finalizacion_rd,
                nombre_director, inicio_real
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                p.id.0,
                p.day,
                p.money,
                project,
                completes_on_day,
                p.director.as_deref(),
                p.started_at_unix_s,
            ],
        )
        .with_context(|| format!("inserting player {}", p.id))?;
        for c in &state.components {
            tx.execute(
                "INSERT INTO componentes (jugador_id, nombre, nivel, rendimiento_base, coste_mejora)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![p.id.0, c.name, c.level, c.base_performance, c.upgrade_cost],
            )
            .with_context(|| format!("inserting component {} for {}", c.name, p.id))?;
        }
        tx.commit().context("create_team commit")?;
        tracing::info!(player_id = %p.id, components = state.components.len(), "team created");
        Ok(())
    }

    /// Load a team. `Ok(None)` when the player does not exist.
    pub fn load_team(&self, id: &PlayerId) -> Result<Option<TeamState>> {
        let conn = self.conn.lock();
        let player = conn
            .query_row(
                &format!("SELECT {PLAYER_COLUMNS} FROM jugadores WHERE id = ?1"),
                params![id.0],
                read_player,
            )
            .optional()
            .with_context(|| format!("loading player {id}"))?;
        let Some(player) = player else {
            return Ok(None);
        };

        let mut stmt = conn
            .prepare(
                "SELECT nombre, nivel, rendimiento_base, coste_mejora
                 FROM componentes WHERE jugador_id = ?1 ORDER BY rowid",
            )
            .context("preparing component query")?;
        let components = stmt
            .query_map(params![id.0], read_component)
            .with_context(|| format!("loading components for {id}"))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("reading components for {id}"))?;

        Ok(Some(TeamState { player, components }))
    }

    /// Write back every mutable field of an existing team in one transaction.
    pub fn save_team(&self, state: &TeamState) -> Result<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().context("save_team begin")?;
        let p = &state.player;
        let (project, completes_on_day) = project_columns(p);
        let updated = tx
            .execute(
                "UPDATE jugadores
                 SET dia = ?2, dinero = ?3, proyecto_activo = ?4, dia_finalizacion_rd = ?5,
                     nombre_director = ?6, inicio_real = ?7
                 WHERE id = ?1",
                params![
                    p.id.0,
                    p.day,
                    p.money,
                    project,
                    completes_on_day,
                    p.director.as_deref(),
                    p.started_at_unix_s,
                ],
            )
            .with_context(|| format!("updating player {}", p.id))?;
        if updated == 0 {
            bail!("player {} does not exist", p.id);
        }
        for c in &state.components {
            let updated = tx
                .execute(
                    "UPDATE componentes SET nivel = ?3, coste_mejora = ?4
                     WHERE jugador_id = ?1 AND nombre = ?2",
                    params![p.id.0, c.name, c.level, c.upgrade_cost],
                )
                .with_context(|| format!("updating component {} for {}", c.name, p.id))?;
            if updated == 0 {
                bail!("component {} does not exist for player {}", c.name, p.id);
            }
        }
        tx.commit().context("save_team commit")?;
        Ok(())
    }

    /// Every player, oldest first.
    pub fn list_players(&self) -> Result<Vec<Player>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare(&format!("SELECT {PLAYER_COLUMNS} FROM jugadores ORDER BY rowid"))
            .context("preparing player listing")?;
        let players = stmt
            .query_map([], read_player)
            .context("listing players")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("reading player rows")?;
        Ok(players)
    }

    /// Delete every team. Returns the number of players removed.
    pub fn reset(&self) -> Result<usize> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().context("reset begin")?;
        tx.execute("DELETE FROM componentes", [])
            .context("deleting components")?;
        let players = tx
            .execute("DELETE FROM jugadores", [])
            .context("deleting players")?;
        tx.commit().context("reset commit")?;
        tracing::warn!(players, "store reset");
        Ok(players)
    }
}

fn project_columns(player: &Player) -> (Option<&str>, Option<u32>) {
    match &player.project {
        Some(p) => (Some(p.component.as_str()), Some(p.completes_on_day)),
        None => (None, None),
    }
}

fn read_user_version(conn: &Connection) -> Result<u32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("reading schema version")
}

fn migrate(conn: &mut Connection) -> Result<()> {
    let current = read_user_version(conn)?;
    if current > SCHEMA_VERSION {
        bail!("database schema v{current} is newer than supported v{SCHEMA_VERSION}");
    }
    for (version, sql) in MIGRATIONS {
        if version <= current {
            continue;
        }
        tracing::info!(version, "applying schema migration");
        let tx = conn
            .transaction()
            .with_context(|| format!("schema v{version} begin"))?;
        tx.execute_batch(sql)
            .with_context(|| format!("applying schema v{version}"))?;
        tx.execute_batch(&format!("PRAGMA user_version = {version};"))
            .with_context(|| format!("recording schema v{version}"))?;
        tx.commit()
            .with_context(|| format!("schema v{version} commit"))?;
    }
    Ok(())
}
