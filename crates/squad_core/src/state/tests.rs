use super::*;
use crate::data::BUILTIN_FORMATIONS;
use crate::save::{FileRepository, MemoryRepository, SaveError};
use serde_json::json;
use tempfile::TempDir;

fn haaland() -> PlayerRecord {
    PlayerRecord::new("34145937", "Erling Haaland")
        .with_position("Centre-Forward")
        .with_nationality("Norway")
        .with_club("Manchester City")
}

fn keeper() -> PlayerRecord {
    PlayerRecord::new("1", "Keeper")
        .with_position("Goalkeeper")
        .with_nationality("Norway")
        .with_club("Manchester City")
}

fn new_store() -> SquadStore<MemoryRepository> {
    SquadStore::open(MemoryRepository::new())
}

/// Accepts reads, refuses every write
#[derive(Default)]
struct ReadOnlyRepository {
    inner: MemoryRepository,
}

impl StateRepository for ReadOnlyRepository {
    fn load(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, SaveError> {
        self.inner.load(key)
    }

    fn save(&mut self, _key: &str, _value: &[u8]) -> std::result::Result<(), SaveError> {
        Err(SaveError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only")))
    }
}

#[test]
fn test_fresh_store_defaults() {
    let store = new_store();
    assert!(store.squad().is_empty());
    assert_eq!(store.formation_id(), "4-4-2");
    assert!(store.snapshots().is_empty());
}

#[test]
fn test_assign_and_clear_slot() {
    let mut store = new_store();
    store.assign_player("lst", haaland());
    store.assign_player("gk", keeper());
    assert_eq!(store.squad().len(), 2);

    store.assign_player("lst", keeper());
    assert_eq!(store.player("lst").map(|p| p.display_name()), Some("Keeper"));

    store.clear_slot("lst");
    store.clear_slot("lst");
    assert!(!store.squad().is_occupied("lst"));
    assert_eq!(store.squad().len(), 1);

    store.reset_all();
    assert!(store.squad().is_empty());
}

#[test]
fn test_set_formation_keeps_orphan_slots() {
    let mut store = new_store();
    store.assign_player("lm", haaland());
    store.set_formation("4-3-3");

    assert_eq!(store.formation_id(), "4-3-3");
    assert!(store.squad().is_occupied("lm"));

    let report = store.report(&*BUILTIN_FORMATIONS);
    assert_eq!(report.orphan_slots, vec!["lm".to_string()]);
    assert_eq!(report.stats, None);
    assert_eq!(report.chemistry, 0);
}

#[test]
fn test_apply_override_changes_stats() {
    let mut store = new_store();
    assert!(!store.apply_override("lst", StatOverride::default()));

    store.assign_player("lst", haaland());
    let overrides = StatOverride { pac: Some(70), rating: Some(80), ..Default::default() };
    assert!(store.apply_override("lst", overrides));

    let player = store.player("lst").unwrap();
    assert_eq!(player.custom_rating, Some(80));

    let report = store.report(&*BUILTIN_FORMATIONS);
    let stats = report.stats.unwrap();
    assert_eq!(stats.pac, 70);
    assert_eq!(stats.sho, 77);
    assert_eq!(stats.rating, 80);
    assert_eq!(report.stars, 5.0);
}

#[test]
fn test_reset_player_stats() {
    let mut store = new_store();
    assert!(!store.reset_player_stats("lst"));

    store.assign_player("lst", haaland());
    store.apply_override("lst", StatOverride { pac: Some(70), rating: Some(80), ..Default::default() });
    assert!(store.reset_player_stats("lst"));

    let player = store.player("lst").unwrap();
    assert_eq!(player.overrides, None);
    assert_eq!(player.custom_rating, None);
    assert_eq!(store.report(&*BUILTIN_FORMATIONS).stats.map(|s| s.rating), Some(99));
}

#[test]
fn test_import_keeps_loosely_typed_players() {
    let mut store = new_store();
    store
        .import_state(r#"{"squad":{"gk":{"idPlayer":34145937,"strPlayer":"Keeper"}},"formation":"4-4-2"}"#)
        .unwrap();

    let player = store.player("gk").unwrap();
    assert_eq!(player.identity(), "34145937");
    let stats = store.report(&*BUILTIN_FORMATIONS).stats.unwrap();
    assert_eq!((stats.pac, stats.rating), (85, 99));
}

#[test]
fn test_snapshot_is_isolated_from_live_squad() {
    let mut store = new_store();
    store.assign_player("lst", haaland());
    let id = store.save_snapshot("Before").id;

    store.clear_slot("lst");
    store.assign_player("gk", keeper());
    store.set_formation("3-5-2");

    let snapshot = store.snapshot(id).unwrap();
    assert!(snapshot.squad.is_occupied("lst"));
    assert!(!snapshot.squad.is_occupied("gk"));
    assert_eq!(snapshot.formation, "4-4-2");

    store.load_snapshot(id).unwrap();
    assert_eq!(store.formation_id(), "4-4-2");
    assert!(store.squad().is_occupied("lst"));

    // editing after a load must not reach back into the snapshot
    store.reset_all();
    assert!(store.snapshot(id).unwrap().squad.is_occupied("lst"));
}

#[test]
fn test_snapshot_names_and_order() {
    let mut store = new_store();
    store.save_snapshot("");
    store.save_snapshot("  Derby XI  ");
    store.save_snapshot("   ");

    let names: Vec<&str> = store.snapshots().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Squad 3", "  Derby XI  ", "Squad 1"]);
}

#[test]
fn test_snapshot_ids_strictly_increase() {
    let mut store = new_store();
    let ids: Vec<u64> = (0..5).map(|_| store.save_snapshot("x").id).collect();
    assert!(ids.windows(2).all(|w| w[1] > w[0]), "{ids:?}");
}

#[test]
fn test_load_missing_snapshot_is_not_found() {
    let mut store = new_store();
    store.assign_player("lst", haaland());

    assert_eq!(store.load_snapshot(42), Err(SquadError::NotFound { id: 42 }));
    assert!(store.squad().is_occupied("lst"));
    assert!(matches!(store.snapshot(42), Err(SquadError::NotFound { id: 42 })));
}

#[test]
fn test_delete_snapshot() {
    let mut store = new_store();
    let id = store.save_snapshot("A").id;

    assert!(!store.delete_snapshot(id + 1000));
    assert_eq!(store.snapshots().len(), 1);
    assert!(store.delete_snapshot(id));
    assert!(store.snapshots().is_empty());
}

#[test]
fn test_snapshot_summaries() {
    let mut store = new_store();
    store.assign_player("lst", haaland());
    store.save_snapshot("One");

    let summaries = store.snapshot_summaries();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].name, "One");
    assert_eq!(summaries[0].player_count, 1);
    assert_eq!(summaries[0].rating, Some(99));
    assert_eq!(summaries[0].stars, 5.0);
}

#[test]
fn test_export_import_roundtrip() {
    let mut store = new_store();
    store.assign_player("lst", haaland());
    store.assign_player("gk", keeper());
    store.set_formation("4-3-3");
    let exported = store.export_json().unwrap();

    let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(value["appName"], "FC26-Builder");
    assert_eq!(value["version"], "1.0");
    assert_eq!(value["formation"], "4-3-3");

    let mut other = new_store();
    other.import_state(&exported).unwrap();
    assert_eq!(other.squad(), store.squad());
    assert_eq!(other.formation_id(), "4-3-3");
}

#[test]
fn test_malformed_import_leaves_state_unchanged() {
    let mut store = new_store();
    store.assign_player("lst", haaland());
    store.set_formation("3-5-2");
    let before = store.squad().clone();

    let cases = [
        "{".to_string(),
        json!({"squad": {}}).to_string(),
        json!({"formation": "4-3-3"}).to_string(),
        json!({"squad": "nope", "formation": "4-3-3"}).to_string(),
    ];
    for raw in cases {
        let result = store.import_state(&raw);
        assert!(matches!(result, Err(SquadError::Validation(_))), "{raw}");
        assert_eq!(store.squad(), &before);
        assert_eq!(store.formation_id(), "3-5-2");
    }
}

#[test]
fn test_state_survives_reopen() {
    let mut store = new_store();
    store.assign_player("lst", haaland());
    store.set_formation("4-3-3");
    let id = store.save_snapshot("Saved").id;
    let repo = store.close();
    assert!(repo.is_closed());

    let mut reopened_repo = MemoryRepository::new();
    for key in ["fc26-squad", "fc26-formation", "fc26-snapshots"] {
        reopened_repo.insert_raw(key, repo.raw(key).unwrap().to_vec());
    }

    let reopened = SquadStore::open(reopened_repo);
    assert!(reopened.squad().is_occupied("lst"));
    assert_eq!(reopened.formation_id(), "4-3-3");
    assert_eq!(reopened.snapshot(id).unwrap().name, "Saved");
}

#[test]
fn test_file_backed_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let id = {
        let mut store = SquadStore::open(FileRepository::open(temp_dir.path()).unwrap());
        store.assign_player("gk", keeper());
        store.set_formation("3-5-2");
        let id = store.save_snapshot("Disk").id;
        store.close();
        id
    };

    let mut store = SquadStore::open(FileRepository::open(temp_dir.path()).unwrap());
    assert!(store.take_warnings().is_empty());
    assert!(store.squad().is_occupied("gk"));
    assert_eq!(store.formation_id(), "3-5-2");

    // the next snapshot id stays ahead of the persisted ones
    let next = store.save_snapshot("Next").id;
    assert!(next > id);
}

#[test]
fn test_corrupted_record_falls_back_to_default() {
    let mut repo = MemoryRepository::new();
    repo.insert_raw("fc26-squad", vec![1, 2, 3]);
    repo.insert_raw("fc26-formation", encode_record(&"4-3-3".to_string()).unwrap());

    let mut store = SquadStore::open(repo);
    assert!(store.squad().is_empty());
    assert_eq!(store.formation_id(), "4-3-3");

    let warnings = store.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "fc26-squad");
    assert!(!warnings[0].recoverable);
    assert!(store.take_warnings().is_empty());
}

#[test]
fn test_write_failures_become_warnings() {
    let mut store = SquadStore::open(ReadOnlyRepository::default());
    store.assign_player("lst", haaland());
    store.save_snapshot("Kept");

    assert!(store.squad().is_occupied("lst"));
    assert_eq!(store.snapshots().len(), 1);

    let warnings = store.take_warnings();
    assert!(warnings.iter().all(|w| w.recoverable));
    let keys: Vec<String> = warnings.into_iter().map(|w| w.key).collect();
    assert_eq!(keys, vec!["fc26-squad".to_string(), "fc26-snapshots".to_string()]);
}

#[test]
fn test_custom_keys_and_default_formation() {
    let config = StoreConfig::from_json(
        r#"{"defaultFormation": "3-5-2", "keys": {"squad": "a", "formation": "b", "snapshots": "c"}}"#,
    )
    .unwrap();
    let mut store = SquadStore::with_config(MemoryRepository::new(), config);
    assert_eq!(store.formation_id(), "3-5-2");

    store.assign_player("lst", haaland());
    assert!(store.repository().contains("a"));
    assert!(!store.repository().contains("fc26-squad"));
}

#[test]
fn test_report_on_full_builtin_formation() {
    let mut store = new_store();
    store.assign_player("lst", haaland());
    store.assign_player("gk", keeper());

    let report = store.report(&*BUILTIN_FORMATIONS);
    assert!(report.orphan_slots.is_empty());
    assert!(report.chemistry > 0);
    assert!(report.chemistry <= 100);
    assert!(report.stats.is_some());
}
