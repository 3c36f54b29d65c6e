use super::*;
use paddock_core::test_fixtures::{base_content, base_state};
use paddock_core::{start_research, sync_calendar, ResearchProject};
use tempfile::TempDir;

fn test_store() -> (GameStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = GameStore::open(&dir.path().join("paddock.db")).unwrap();
    (store, dir)
}

fn sample_team() -> TeamState {
    base_state(&base_content())
}

#[test]
fn open_migrates_to_latest_schema() {
    let (store, _dir) = test_store();
    assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
}

#[test]
fn reopen_keeps_data_and_version() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paddock.db");
    let team = sample_team();
    {
        let store = GameStore::open(&path).unwrap();
        store.create_team(&team).unwrap();
    }
    let store = GameStore::open(&path).unwrap();
    assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    assert_eq!(store.load_team(&team.player.id).unwrap(), Some(team));
}

#[test]
fn open_creates_missing_parent_dir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("data").join("paddock.db");
    GameStore::open(&path).unwrap();
    assert!(path.exists());
}

#[test]
fn open_existing_refuses_missing_file_without_creating_it() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("paddock.db");
    let err = GameStore::open_existing(&path).err().unwrap();
    assert!(err.to_string().contains("no database at"));
    assert!(!dir.path().join("nested").exists());
}

#[test]
fn open_existing_reads_created_store() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paddock.db");
    let team = sample_team();
    GameStore::open(&path).unwrap().create_team(&team).unwrap();
    let store = GameStore::open_existing(&path).unwrap();
    assert_eq!(store.load_team(&team.player.id).unwrap(), Some(team));
}

#[test]
fn v1_database_is_migrated_in_place() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paddock.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(MIGRATIONS[0].1).unwrap();
        conn.execute_batch("PRAGMA user_version = 1;").unwrap();
        conn.execute(
            "INSERT INTO jugadores (id, dia, dinero) VALUES ('old', 3, 10000)",
            [],
        )
        .unwrap();
    }

    let store = GameStore::open(&path).unwrap();

    assert_eq!(store.schema_version().unwrap(), 2);
    let team = store
        .load_team(&PlayerId("old".to_string()))
        .unwrap()
        .unwrap();
    assert_eq!(team.player.day, 3);
    assert_eq!(team.player.money, 10_000);
    assert!(team.player.director.is_none());
    assert!(team.player.started_at_unix_s.is_none());
    assert!(team.components.is_empty());
}

#[test]
fn newer_schema_is_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("paddock.db");
    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("PRAGMA user_version = 99;").unwrap();
    }
    assert!(GameStore::open(&path).is_err());
}

#[test]
fn create_and_load_team() {
    let (store, _dir) = test_store();
    let team = sample_team();
    store.create_team(&team).unwrap();

    let loaded = store.load_team(&team.player.id).unwrap().unwrap();

    assert_eq!(loaded, team);
    let names: Vec<&str> = loaded.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Chasis", "Motor", "Alerón Delantero", "Alerón Trasero"]
    );
}

#[test]
fn load_missing_returns_none() {
    let (store, _dir) = test_store();
    assert!(store
        .load_team(&PlayerId("nobody".to_string()))
        .unwrap()
        .is_none());
}

#[test]
fn duplicate_team_is_rejected() {
    let (store, _dir) = test_store();
    let team = sample_team();
    store.create_team(&team).unwrap();
    assert!(store.create_team(&team).is_err());
}

#[test]
fn save_persists_research_and_levels() {
    let (store, _dir) = test_store();
    let content = base_content();
    let mut team = sample_team();
    store.create_team(&team).unwrap();

    start_research(&mut team, "Motor", &content.constants).unwrap();
    store.save_team(&team).unwrap();
    let loaded = store.load_team(&team.player.id).unwrap().unwrap();
    assert_eq!(loaded.player.money, 90_000);
    assert_eq!(
        loaded.player.project,
        Some(ResearchProject {
            component: "Motor".to_string(),
            completes_on_day: 6,
        })
    );

    sync_calendar(&mut team, 6);
    store.save_team(&team).unwrap();
    let loaded = store.load_team(&team.player.id).unwrap().unwrap();
    assert_eq!(loaded.player.day, 6);
    assert!(loaded.player.project.is_none());
    assert_eq!(loaded.component("Motor").unwrap().level, 2);
}

#[test]
fn research_columns_are_null_together() {
    let (store, _dir) = test_store();
    let content = base_content();
    let mut team = sample_team();
    store.create_team(&team).unwrap();
    start_research(&mut team, "Chasis", &content.constants).unwrap();
    store.save_team(&team).unwrap();
    sync_calendar(&mut team, 10);
    store.save_team(&team).unwrap();

    let conn = store.conn.lock();
    let (component, day): (Option<String>, Option<u32>) = conn
        .query_row(
            "SELECT proyecto_activo, dia_finalizacion_rd FROM jugadores WHERE id = ?1",
            params![team.player.id.0],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(component.is_none(), day.is_none());
    assert!(component.is_none());
}

#[test]
fn half_set_research_columns_load_as_idle() {
    let (store, _dir) = test_store();
    let team = sample_team();
    store.create_team(&team).unwrap();
    store
        .conn
        .lock()
        .execute(
            "UPDATE jugadores SET proyecto_activo = 'Motor' WHERE id = ?1",
            params![team.player.id.0],
        )
        .unwrap();

    let loaded = store.load_team(&team.player.id).unwrap().unwrap();
    assert!(loaded.player.project.is_none());
}

#[test]
fn save_unknown_player_fails() {
    let (store, _dir) = test_store();
    assert!(store.save_team(&sample_team()).is_err());
}

#[test]
fn list_players_in_creation_order() {
    let (store, _dir) = test_store();
    let content = base_content();
    for name in ["a", "b", "c"] {
        let mut team = base_state(&content);
        team.player.id = PlayerId(name.to_string());
        store.create_team(&team).unwrap();
    }

    let ids: Vec<String> = store
        .list_players()
        .unwrap()
        .into_iter()
        .map(|p| p.id.0)
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn reset_removes_everything() {
    let (store, _dir) = test_store();
    let team = sample_team();
    store.create_team(&team).unwrap();

    assert_eq!(store.reset().unwrap(), 1);

    assert!(store.list_players().unwrap().is_empty());
    assert!(store.load_team(&team.player.id).unwrap().is_none());
    // The same id can be founded again afterwards.
    store.create_team(&team).unwrap();
}

#[test]
fn in_memory_store_works() {
    let store = GameStore::open_in_memory().unwrap();
    let team = sample_team();
    store.create_team(&team).unwrap();
    assert!(store.load_team(&team.player.id).unwrap().is_some());
}
